#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    /// Alpha-zero black. Layer pixels that a decode pass never writes are
    /// left at this value, so "untouched" and "transparent" are the same
    /// thing by construction.
    pub const TRANSPARENT: Color = Color::new_rgba(0, 0, 0, 0);

    /// Stroke color for the viewport rectangle drawn over the first
    /// background map panel.
    pub const VIEWPORT: Color = Color::new_rgb(0, 0, 255);

    #[inline]
    pub const fn new_rgb(r: u8, g: u8, b: u8) -> Color {
        Color { r, g, b, a: 0xff }
    }

    #[inline]
    pub const fn new_rgba(r: u8, g: u8, b: u8, a: u8) -> Color {
        Color { r, g, b, a }
    }

    #[inline]
    pub const fn rgba(&self) -> (u8, u8, u8, u8) {
        (self.r, self.g, self.b, self.a)
    }
}
