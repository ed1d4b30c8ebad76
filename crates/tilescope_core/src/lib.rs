pub mod buffer;
pub mod color;
pub mod frame;
pub mod palette;
pub mod regs;
pub mod snapshot;
pub mod sprite;
pub mod tile;
pub mod tilemap;
pub mod window;

pub use buffer::PixelBuffer;
pub use color::Color;
pub use frame::{Engine, FrameDecoder, FrameSet, Viewport};
pub use regs::{Lcdc, Register, Registers};
pub use snapshot::Snapshot;
pub use tile::TileSet;
pub use tilemap::{AddressingMode, TileMap};

/// Logical screen width in pixels for the DMG LCD.
pub const SCREEN_WIDTH: usize = 160;
/// Logical screen height in pixels.
pub const SCREEN_HEIGHT: usize = 144;

/// Side length in pixels of the tile atlas and background map panels.
pub const PANEL_DIM: usize = 256;

/// Size of a video memory snapshot: tile data plus both tile maps.
pub const VRAM_SIZE: usize = 0x2000;
/// Size of an object attribute memory snapshot (40 entries, 4 bytes each).
pub const OAM_SIZE: usize = 0xA0;

/// Number of tiles addressable through the tile data region.
pub const TILE_COUNT: usize = 384;
