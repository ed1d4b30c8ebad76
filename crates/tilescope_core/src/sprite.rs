use bitflags::bitflags;

use crate::buffer::PixelBuffer;
use crate::color::Color;
use crate::palette::{palette_lookup, shade_to_color};
use crate::tile::TILE_BYTES;
use crate::{SCREEN_HEIGHT, SCREEN_WIDTH};

/// Number of object attribute records in OAM.
pub const OBJECT_COUNT: usize = 40;

const OBJECT_BYTES: usize = 4;

bitflags! {
    /// Attribute flags from the fourth byte of an object record. The low
    /// four bits are CGB-only and ignored here.
    #[derive(Copy, Clone, Debug, PartialEq, Eq)]
    pub struct ObjectFlags: u8 {
        const PRIORITY = 0x80;
        const Y_FLIP = 0x40;
        const X_FLIP = 0x20;
        const PALETTE = 0x10;
    }
}

/// One 4-byte object attribute record.
#[derive(Copy, Clone, Debug)]
pub struct ObjectAttribute {
    pub y_raw: u8,
    pub x_raw: u8,
    pub tile_index: u8,
    pub flags: ObjectFlags,
}

impl ObjectAttribute {
    pub fn from_bytes(bytes: [u8; OBJECT_BYTES]) -> Self {
        Self {
            y_raw: bytes[0],
            x_raw: bytes[1],
            tile_index: bytes[2],
            flags: ObjectFlags::from_bits_truncate(bytes[3]),
        }
    }

    /// Screen x of the left edge. The raw value is offset by 8 so that a
    /// zero byte parks the object fully off-screen.
    #[inline]
    pub fn screen_x(&self) -> i32 {
        self.x_raw as i32 - 8
    }

    /// Screen y of the top edge; the raw value is offset by 16.
    #[inline]
    pub fn screen_y(&self) -> i32 {
        self.y_raw as i32 - 16
    }
}

/// Iterate the 40 object records in OAM order.
pub fn object_attributes(oam: &[u8]) -> impl Iterator<Item = ObjectAttribute> + '_ {
    oam.chunks_exact(OBJECT_BYTES)
        .map(|c| ObjectAttribute::from_bytes([c[0], c[1], c[2], c[3]]))
}

/// Composite all 40 objects into a 160x144 layer.
///
/// Objects are drawn in ascending OAM order with later entries overwriting
/// earlier ones; there is no priority sort and no per-scanline object
/// limit. Object tile bytes are read straight from video memory at
/// `tile_index * 16` - object tiles are always unsigned-addressed, whatever
/// the background addressing mode. Color index 0 writes nothing, and pixels
/// no object covers stay fully transparent.
pub fn render_sprites(
    oam: &[u8],
    vram: &[u8],
    tall_sprites: bool,
    obp0: u8,
    obp1: u8,
    out: &mut PixelBuffer,
) {
    debug_assert_eq!(out.width(), SCREEN_WIDTH);
    debug_assert_eq!(out.height(), SCREEN_HEIGHT);
    out.fill(Color::TRANSPARENT);
    let height: i32 = if tall_sprites { 16 } else { 8 };

    for obj in object_attributes(oam) {
        let mut tile_index = obj.tile_index as usize;
        if tall_sprites {
            // The low bit is ignored in 8x16 mode; the odd tile is
            // implicitly the lower half.
            tile_index &= 0xFE;
        }
        let base = tile_index * TILE_BYTES;
        let palette = if obj.flags.contains(ObjectFlags::PALETTE) {
            obp1
        } else {
            obp0
        };

        for y in 0..height {
            // Flips mirror the coordinates used to read the stored bit
            // pattern, not the destination.
            let src_y = if obj.flags.contains(ObjectFlags::Y_FLIP) {
                height - 1 - y
            } else {
                y
            } as usize;
            let low = vram[base + src_y * 2];
            let high = vram[base + src_y * 2 + 1];
            for x in 0..8i32 {
                let src_x = if obj.flags.contains(ObjectFlags::X_FLIP) {
                    7 - x
                } else {
                    x
                };
                let bit = 7 - src_x;
                let color_index = ((low >> bit) & 0x01) | (((high >> bit) & 0x01) << 1);
                if color_index == 0 {
                    continue;
                }
                let shade = palette_lookup(palette, color_index);
                out.put_clipped(obj.screen_x() + x, obj.screen_y() + y, shade_to_color(shade));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::palette::SHADE_COLORS;
    use crate::{OAM_SIZE, VRAM_SIZE};

    fn layer() -> PixelBuffer {
        PixelBuffer::new(SCREEN_WIDTH, SCREEN_HEIGHT)
    }

    fn is_fully_transparent(buf: &PixelBuffer) -> bool {
        (0..SCREEN_HEIGHT)
            .all(|y| (0..SCREEN_WIDTH).all(|x| buf.pixel(x, y) == Color::TRANSPARENT))
    }

    /// One object at OAM slot `slot`.
    fn place(oam: &mut [u8], slot: usize, y_raw: u8, x_raw: u8, tile: u8, flags: u8) {
        let base = slot * OBJECT_BYTES;
        oam[base] = y_raw;
        oam[base + 1] = x_raw;
        oam[base + 2] = tile;
        oam[base + 3] = flags;
    }

    #[test]
    fn all_zero_tile_leaves_layer_transparent() {
        let vram = vec![0u8; VRAM_SIZE];
        let mut oam = vec![0u8; OAM_SIZE];
        place(&mut oam, 0, 16, 8, 0, 0);
        let mut out = layer();
        render_sprites(&oam, &vram, false, 0xE4, 0xE4, &mut out);
        assert!(is_fully_transparent(&out));
    }

    #[test]
    fn left_edge_clipping_drops_whole_object() {
        let vram = vec![0xFF; VRAM_SIZE];
        let mut oam = vec![0u8; OAM_SIZE];
        // x_raw = 0 puts the object at screen x -8..0: nothing visible.
        place(&mut oam, 0, 16, 0, 0, 0);
        let mut out = layer();
        render_sprites(&oam, &vram, false, 0xE4, 0xE4, &mut out);
        assert!(is_fully_transparent(&out));
    }

    #[test]
    fn right_edge_clipping_drops_whole_object() {
        let vram = vec![0xFF; VRAM_SIZE];
        let mut oam = vec![0u8; OAM_SIZE];
        // x_raw = 168 puts the object at screen x 160: fully off the right.
        place(&mut oam, 0, 16, 168, 0, 0);
        let mut out = layer();
        render_sprites(&oam, &vram, false, 0xE4, 0xE4, &mut out);
        assert!(is_fully_transparent(&out));
    }

    #[test]
    fn partial_clip_keeps_on_screen_columns() {
        let vram = vec![0xFF; VRAM_SIZE];
        let mut oam = vec![0u8; OAM_SIZE];
        // Screen x -4: only columns 4..8 land on screen.
        place(&mut oam, 0, 16, 4, 0, 0);
        let mut out = layer();
        render_sprites(&oam, &vram, false, 0xE4, 0xE4, &mut out);
        for x in 0..4 {
            assert_eq!(out.pixel(x, 0), SHADE_COLORS[3]);
        }
        assert_eq!(out.pixel(4, 0), Color::TRANSPARENT);
    }

    /// Tile 2 with a single color-3 pixel at (0, 0), everything else 0.
    fn corner_dot_vram() -> Vec<u8> {
        let mut vram = vec![0u8; VRAM_SIZE];
        let base = 2 * TILE_BYTES;
        vram[base] = 0x80;
        vram[base + 1] = 0x80;
        vram
    }

    #[test]
    fn x_flip_mirrors_read_columns() {
        let vram = corner_dot_vram();
        let mut oam = vec![0u8; OAM_SIZE];
        place(&mut oam, 0, 16, 8, 2, ObjectFlags::X_FLIP.bits());
        let mut out = layer();
        render_sprites(&oam, &vram, false, 0xE4, 0xE4, &mut out);
        assert_eq!(out.pixel(7, 0), SHADE_COLORS[3]);
        assert_eq!(out.pixel(0, 0), Color::TRANSPARENT);
    }

    #[test]
    fn y_flip_mirrors_read_rows() {
        let vram = corner_dot_vram();
        let mut oam = vec![0u8; OAM_SIZE];
        place(&mut oam, 0, 16, 8, 2, ObjectFlags::Y_FLIP.bits());
        let mut out = layer();
        render_sprites(&oam, &vram, false, 0xE4, 0xE4, &mut out);
        assert_eq!(out.pixel(0, 7), SHADE_COLORS[3]);
        assert_eq!(out.pixel(0, 0), Color::TRANSPARENT);
    }

    #[test]
    fn tall_sprites_mask_the_tile_index_and_span_two_tiles() {
        let mut vram = vec![0u8; VRAM_SIZE];
        // Tile 2 row 0 and tile 3 row 7 carry a dot; object names tile 3,
        // which 8x16 mode masks down to 2.
        vram[2 * TILE_BYTES] = 0x80;
        vram[2 * TILE_BYTES + 1] = 0x80;
        vram[3 * TILE_BYTES + 14] = 0x80;
        vram[3 * TILE_BYTES + 15] = 0x80;
        let mut oam = vec![0u8; OAM_SIZE];
        place(&mut oam, 0, 16, 8, 3, 0);
        let mut out = layer();
        render_sprites(&oam, &vram, true, 0xE4, 0xE4, &mut out);
        assert_eq!(out.pixel(0, 0), SHADE_COLORS[3]);
        assert_eq!(out.pixel(0, 15), SHADE_COLORS[3]);
    }

    #[test]
    fn tall_y_flip_mirrors_across_sixteen_rows() {
        let mut vram = vec![0u8; VRAM_SIZE];
        vram[2 * TILE_BYTES] = 0x80;
        vram[2 * TILE_BYTES + 1] = 0x80;
        let mut oam = vec![0u8; OAM_SIZE];
        place(&mut oam, 0, 16, 8, 2, ObjectFlags::Y_FLIP.bits());
        let mut out = layer();
        render_sprites(&oam, &vram, true, 0xE4, 0xE4, &mut out);
        // Row 0 of the pattern lands at output row 15.
        assert_eq!(out.pixel(0, 15), SHADE_COLORS[3]);
        assert_eq!(out.pixel(0, 0), Color::TRANSPARENT);
    }

    #[test]
    fn palette_select_switches_registers() {
        let vram = corner_dot_vram();
        let mut oam = vec![0u8; OAM_SIZE];
        place(&mut oam, 0, 16, 8, 2, 0);
        place(&mut oam, 1, 48, 8, 2, ObjectFlags::PALETTE.bits());
        let mut out = layer();
        // OBP0 maps index 3 to shade 1, OBP1 maps it to shade 2.
        render_sprites(&oam, &vram, false, 0b0100_0000, 0b1000_0000, &mut out);
        assert_eq!(out.pixel(0, 0), SHADE_COLORS[1]);
        assert_eq!(out.pixel(0, 32), SHADE_COLORS[2]);
    }

    #[test]
    fn later_objects_overwrite_earlier_ones() {
        let mut vram = vec![0u8; VRAM_SIZE];
        // Tile 1: solid color 1. Tile 2: solid color 3.
        for row in 0..8 {
            vram[TILE_BYTES + row * 2] = 0xFF;
            vram[2 * TILE_BYTES + row * 2] = 0xFF;
            vram[2 * TILE_BYTES + row * 2 + 1] = 0xFF;
        }
        let mut oam = vec![0u8; OAM_SIZE];
        place(&mut oam, 0, 16, 8, 1, 0);
        place(&mut oam, 1, 16, 8, 2, 0);
        let mut out = layer();
        render_sprites(&oam, &vram, false, 0xE4, 0xE4, &mut out);
        // Slot 1 drew last, so its shade wins everywhere they overlap.
        assert_eq!(out.pixel(0, 0), SHADE_COLORS[3]);
    }

    #[test]
    fn transparent_pixels_do_not_punch_holes() {
        let mut vram = vec![0u8; VRAM_SIZE];
        // Tile 1 solid color 1; tile 2 all transparent (index 0).
        for row in 0..8 {
            vram[TILE_BYTES + row * 2] = 0xFF;
        }
        let mut oam = vec![0u8; OAM_SIZE];
        place(&mut oam, 0, 16, 8, 1, 0);
        place(&mut oam, 1, 16, 8, 2, 0);
        let mut out = layer();
        render_sprites(&oam, &vram, false, 0xE4, 0xE4, &mut out);
        // The later all-transparent object leaves slot 0's pixels alone.
        assert_eq!(out.pixel(0, 0), SHADE_COLORS[1]);
    }
}
