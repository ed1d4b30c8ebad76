use crate::color::Color;

/// Fixed-size RGBA pixel buffer.
///
/// Buffers are reused across decode passes; every pass either rewrites all
/// pixels or clears first, so no pixel from a previous pass can survive.
#[derive(Clone, Debug)]
pub struct PixelBuffer {
    width: usize,
    height: usize,
    data: Vec<u8>,
}

impl PixelBuffer {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            data: vec![0; width * height * 4],
        }
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Overwrite every pixel with `color`.
    pub fn fill(&mut self, color: Color) {
        for px in self.data.chunks_exact_mut(4) {
            px[0] = color.r;
            px[1] = color.g;
            px[2] = color.b;
            px[3] = color.a;
        }
    }

    #[inline]
    pub fn put(&mut self, x: usize, y: usize, color: Color) {
        debug_assert!(x < self.width && y < self.height);
        let base = (y * self.width + x) * 4;
        self.data[base] = color.r;
        self.data[base + 1] = color.g;
        self.data[base + 2] = color.b;
        self.data[base + 3] = color.a;
    }

    /// Write a pixel given signed coordinates, dropping anything outside the
    /// buffer. Callers doing offset math (window bias, sprite origins) stay
    /// in `i32` and route through here instead of wrapping.
    #[inline]
    pub fn put_clipped(&mut self, x: i32, y: i32, color: Color) {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return;
        }
        self.put(x as usize, y as usize, color);
    }

    #[inline]
    pub fn pixel(&self, x: usize, y: usize) -> Color {
        let base = (y * self.width + x) * 4;
        Color::new_rgba(
            self.data[base],
            self.data[base + 1],
            self.data[base + 2],
            self.data[base + 3],
        )
    }

    /// Raw RGBA bytes, row-major, 4 bytes per pixel.
    #[inline]
    pub fn bytes(&self) -> &[u8] {
        &self.data
    }
}
