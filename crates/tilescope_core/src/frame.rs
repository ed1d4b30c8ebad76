use anyhow::{ensure, Result};

use crate::buffer::PixelBuffer;
use crate::regs::{Lcdc, Register, Registers};
use crate::sprite::render_sprites;
use crate::tile::TileSet;
use crate::tilemap::{render_tile_map, AddressingMode, TileMap};
use crate::window::render_window;
use crate::{OAM_SIZE, PANEL_DIM, SCREEN_HEIGHT, SCREEN_WIDTH, VRAM_SIZE};

/// Read-only view of the machine state needed for one decode pass.
///
/// The emulation engine owns the memory; the decoder borrows it for the
/// duration of a single call and never writes through it.
pub trait Engine {
    /// The 8 KiB tile data / tile map address space.
    fn video_memory(&self) -> &[u8];
    /// The 160-byte object attribute memory.
    fn object_memory(&self) -> &[u8];
    /// One of the 12 graphics registers.
    fn read_register(&self, reg: Register) -> u8;
}

/// Scroll rectangle to outline on the first background map panel.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Viewport {
    pub x: u8,
    pub y: u8,
    pub width: u32,
    pub height: u32,
}

/// Everything one decode pass produces for the presentation surface.
pub struct FrameSet {
    /// 256x256 atlas of all 384 tiles, 16 per row.
    pub atlas: PixelBuffer,
    /// The two 256x256 background maps, offsets 0x1800 and 0x1C00.
    pub background: [PixelBuffer; 2],
    /// 160x144 window overlay; uncovered pixels are transparent.
    pub window: PixelBuffer,
    /// 160x144 sprite layer; uncovered pixels are transparent.
    pub sprites: PixelBuffer,
    /// Scroll rectangle for annotating the first background map.
    pub viewport: Viewport,
    /// Register values the pass was decoded from, for display or logging.
    pub registers: Registers,
}

impl Default for FrameSet {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameSet {
    pub fn new() -> Self {
        Self {
            atlas: PixelBuffer::new(PANEL_DIM, PANEL_DIM),
            background: [
                PixelBuffer::new(PANEL_DIM, PANEL_DIM),
                PixelBuffer::new(PANEL_DIM, PANEL_DIM),
            ],
            window: PixelBuffer::new(SCREEN_WIDTH, SCREEN_HEIGHT),
            sprites: PixelBuffer::new(SCREEN_WIDTH, SCREEN_HEIGHT),
            viewport: Viewport::default(),
            registers: Registers::default(),
        }
    }
}

/// Drives the per-layer decoders once per display refresh.
///
/// Holds only a reusable tile-set allocation; everything it produces is a
/// pure function of the snapshot handed to `decode`.
pub struct FrameDecoder {
    tiles: TileSet,
}

impl Default for FrameDecoder {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameDecoder {
    pub fn new() -> Self {
        Self {
            tiles: TileSet::new(),
        }
    }

    /// Decode one snapshot into `frames`.
    ///
    /// Snapshot lengths are validated here, once; the per-layer decoders
    /// assume well-formed input. Validation happens before any buffer is
    /// touched, and a successful pass fully overwrites every buffer, so a
    /// failed tick never corrupts the next one.
    pub fn decode<E: Engine + ?Sized>(&mut self, engine: &E, frames: &mut FrameSet) -> Result<()> {
        let vram = engine.video_memory();
        let oam = engine.object_memory();
        ensure!(
            vram.len() == VRAM_SIZE,
            "video memory snapshot is {} bytes, expected {}",
            vram.len(),
            VRAM_SIZE
        );
        ensure!(
            oam.len() == OAM_SIZE,
            "object memory snapshot is {} bytes, expected {}",
            oam.len(),
            OAM_SIZE
        );

        let regs = Registers::capture(engine);
        let lcdc = regs.lcdc_flags();
        let mode = AddressingMode::from_lcdc(lcdc);
        let window_map = if lcdc.contains(Lcdc::WINDOW_MAP_HIGH) {
            TileMap::High
        } else {
            TileMap::Low
        };

        self.tiles.rebuild(vram, &mut frames.atlas);
        render_tile_map(&self.tiles, vram, TileMap::Low, mode, &mut frames.background[0]);
        render_tile_map(&self.tiles, vram, TileMap::High, mode, &mut frames.background[1]);
        render_window(&self.tiles, vram, window_map, regs.wx, regs.wy, &mut frames.window);
        render_sprites(
            oam,
            vram,
            lcdc.contains(Lcdc::OBJ_TALL),
            regs.obp0,
            regs.obp1,
            &mut frames.sprites,
        );

        frames.viewport = Viewport {
            x: regs.scx,
            y: regs.scy,
            width: SCREEN_WIDTH as u32,
            height: SCREEN_HEIGHT as u32,
        };
        frames.registers = regs;
        log::trace!(
            "decoded frame: lcdc=0x{:02X} mode={:?} window_map={:?}",
            regs.lcdc,
            mode,
            window_map
        );
        Ok(())
    }
}
