use crate::buffer::PixelBuffer;
use crate::palette::shade_to_color;
use crate::regs::Lcdc;
use crate::tile::TileSet;
use crate::PANEL_DIM;

/// Cells per side of a background tile map.
pub const MAP_COLS: usize = 32;
/// Total cells in one map grid.
pub const MAP_CELLS: usize = MAP_COLS * MAP_COLS;

/// How tile-map index bytes are interpreted. One global flag (LCDC bit 4)
/// covers both background maps; this is a hardware constraint, not a
/// per-map choice.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum AddressingMode {
    /// The map byte 0-255 is the tile set index directly.
    Unsigned,
    /// The map byte is a signed offset; tile set index is `value + 256`,
    /// giving the effective range 128-383.
    Signed,
}

impl AddressingMode {
    #[inline]
    pub fn from_lcdc(lcdc: Lcdc) -> Self {
        if lcdc.contains(Lcdc::UNSIGNED_TILE_DATA) {
            AddressingMode::Unsigned
        } else {
            AddressingMode::Signed
        }
    }

    /// Resolve a raw tile-map byte to a tile set index (0-383).
    #[inline]
    pub fn resolve(self, raw: u8) -> usize {
        match self {
            AddressingMode::Unsigned => raw as usize,
            AddressingMode::Signed => (raw as i8 as i32 + 256) as usize,
        }
    }
}

/// Which of the two 32x32 tile maps to read.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TileMap {
    /// Map at VRAM offset 0x1800.
    Low,
    /// Map at VRAM offset 0x1C00.
    High,
}

impl TileMap {
    #[inline]
    pub const fn base_offset(self) -> usize {
        match self {
            TileMap::Low => 0x1800,
            TileMap::High => 0x1C00,
        }
    }
}

/// Render a full 32x32 tile map into a 256x256 buffer.
///
/// Which map to render and which addressing mode applies are the caller's
/// decisions; this walk is the same for both maps.
pub fn render_tile_map(
    tiles: &TileSet,
    vram: &[u8],
    map: TileMap,
    mode: AddressingMode,
    out: &mut PixelBuffer,
) {
    debug_assert_eq!(out.width(), PANEL_DIM);
    debug_assert_eq!(out.height(), PANEL_DIM);
    for cell in 0..MAP_CELLS {
        let raw = vram[map.base_offset() + cell];
        let tile = tiles.tile(mode.resolve(raw));
        let origin_x = (cell % MAP_COLS) * 8;
        let origin_y = (cell / MAP_COLS) * 8;
        for y in 0..8 {
            for x in 0..8 {
                out.put(origin_x + x, origin_y + y, shade_to_color(tile.pixel(x, y)));
            }
        }
    }
}
