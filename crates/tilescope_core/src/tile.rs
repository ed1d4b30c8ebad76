use crate::buffer::PixelBuffer;
use crate::color::Color;
use crate::palette::shade_to_color;
use crate::{PANEL_DIM, TILE_COUNT};

/// Bytes backing one tile in video memory: 8 rows, 2 bit-plane bytes each.
pub const TILE_BYTES: usize = 16;

/// Tiles per row in the atlas panel.
const ATLAS_COLS: usize = 16;

/// An 8x8 tile of 2-bit color indices.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Tile {
    rows: [[u8; 8]; 8],
}

impl Tile {
    /// Color index (0-3) of the pixel at `(x, y)`.
    #[inline]
    pub fn pixel(&self, x: usize, y: usize) -> u8 {
        self.rows[y][x]
    }
}

/// Decode the 16-byte record for `tile_index` from video memory.
///
/// Each row is a low bit-plane byte followed by a high bit-plane byte, and
/// bit 7 of each byte is the leftmost pixel:
/// `index = bit(low, 7-x) | bit(high, 7-x) << 1`.
pub fn decode_tile(vram: &[u8], tile_index: usize) -> Tile {
    assert!(
        tile_index < TILE_COUNT,
        "tile index out of range: {tile_index}"
    );
    let base = tile_index * TILE_BYTES;
    let mut rows = [[0u8; 8]; 8];
    for (y, row) in rows.iter_mut().enumerate() {
        let low = vram[base + y * 2];
        let high = vram[base + y * 2 + 1];
        for (x, px) in row.iter_mut().enumerate() {
            let bit = 7 - x;
            *px = ((low >> bit) & 0x01) | (((high >> bit) & 0x01) << 1);
        }
    }
    Tile { rows }
}

/// All 384 tiles decoded from video memory.
///
/// The set is fully recomputed from the snapshot on every pass; nothing is
/// cached across passes beyond the allocation itself.
pub struct TileSet {
    tiles: Vec<Tile>,
}

impl Default for TileSet {
    fn default() -> Self {
        Self::new()
    }
}

impl TileSet {
    pub fn new() -> Self {
        Self {
            tiles: vec![Tile::default(); TILE_COUNT],
        }
    }

    /// Decode every tile from `vram` and redraw the atlas panel: 16 tiles
    /// per row, 24 rows, tile `n` at cell `(n % 16, n / 16)`. The lower
    /// quarter of the panel holds no tiles and stays transparent.
    pub fn rebuild(&mut self, vram: &[u8], atlas: &mut PixelBuffer) {
        debug_assert_eq!(atlas.width(), PANEL_DIM);
        debug_assert_eq!(atlas.height(), PANEL_DIM);
        atlas.fill(Color::TRANSPARENT);
        for index in 0..TILE_COUNT {
            let tile = decode_tile(vram, index);
            let origin_x = (index % ATLAS_COLS) * 8;
            let origin_y = (index / ATLAS_COLS) * 8;
            for y in 0..8 {
                for x in 0..8 {
                    atlas.put(origin_x + x, origin_y + y, shade_to_color(tile.pixel(x, y)));
                }
            }
            self.tiles[index] = tile;
        }
    }

    /// Tile at `index` (0-383). Out-of-range indices are caller bugs.
    #[inline]
    pub fn tile(&self, index: usize) -> &Tile {
        assert!(index < TILE_COUNT, "tile index out of range: {index}");
        &self.tiles[index]
    }
}
