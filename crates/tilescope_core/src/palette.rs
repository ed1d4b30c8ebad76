use crate::color::Color;

/// The four DMG shades as displayed by the viewer, lightest (0) to
/// darkest (3).
pub const SHADE_COLORS: [Color; 4] = [
    Color::new_rgb(175, 197, 160),
    Color::new_rgb(93, 147, 66),
    Color::new_rgb(22, 63, 48),
    Color::new_rgb(0, 40, 0),
];

/// Map a 2-bit shade index to its display color.
#[inline]
pub fn shade_to_color(shade: u8) -> Color {
    SHADE_COLORS[(shade & 0x03) as usize]
}

/// Extract the 2-bit shade stored in `slot` (0-3) of a palette register.
#[inline]
pub fn palette_lookup(register: u8, slot: u8) -> u8 {
    (register >> (2 * (slot & 0x03))) & 0x03
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_lookup_extracts_each_slot() {
        // Slots 0..3 hold 2, 3, 0, 1 respectively.
        let register = 0b01_00_11_10;
        assert_eq!(palette_lookup(register, 0), 2);
        assert_eq!(palette_lookup(register, 1), 3);
        assert_eq!(palette_lookup(register, 2), 0);
        assert_eq!(palette_lookup(register, 3), 1);
    }

    #[test]
    fn lookup_composed_with_shade_color_has_finite_codomain() {
        for register in 0..=255u8 {
            for slot in 0..4u8 {
                let color = shade_to_color(palette_lookup(register, slot));
                assert!(SHADE_COLORS.contains(&color));
            }
        }
    }

    #[test]
    fn identity_palette_maps_slots_in_order() {
        // 0xE4 = 3,2,1,0 from slot 3 down to slot 0.
        for slot in 0..4u8 {
            assert_eq!(palette_lookup(0xE4, slot), slot);
        }
    }
}
