//! Square pixel buffer that card faces are drawn into.

use crate::color::Color;

/// A 2D pixel buffer (RGBA, row-major, f64 components).
#[derive(Debug, Clone)]
pub struct Canvas {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Pixel data (row-major).
    pub data: Vec<Color>,
}

impl Canvas {
    /// Create a new canvas filled with a color.
    pub fn new(width: u32, height: u32, fill: Color) -> Self {
        let size = width as usize * height as usize;
        Self {
            width,
            height,
            data: vec![fill; size],
        }
    }

    /// Create a square card canvas.
    pub fn card(size: u32, fill: Color) -> Self {
        Self::new(size, size, fill)
    }

    /// Get a pixel at the given coordinates.
    #[inline]
    pub fn get(&self, x: u32, y: u32) -> Color {
        let idx = y as usize * self.width as usize + x as usize;
        self.data[idx]
    }

    /// Set a pixel at the given coordinates.
    #[inline]
    pub fn set(&mut self, x: u32, y: u32, color: Color) {
        let idx = y as usize * self.width as usize + x as usize;
        self.data[idx] = color;
    }

    /// Set a pixel with signed coordinates, ignoring out-of-bounds writes.
    #[inline]
    pub fn set_clipped(&mut self, x: i64, y: i64, color: Color) {
        if x >= 0 && y >= 0 && (x as u32) < self.width && (y as u32) < self.height {
            self.set(x as u32, y as u32, color);
        }
    }

    /// Blend a color over a pixel with the given coverage (0.0 to 1.0).
    ///
    /// Used by the glyph rasterizer, where coverage comes from the font's
    /// anti-aliasing. Out-of-bounds writes are ignored so clipped text
    /// degrades cosmetically instead of panicking.
    #[inline]
    pub fn blend(&mut self, x: i64, y: i64, color: Color, coverage: f64) {
        if x < 0 || y < 0 || x as u32 >= self.width || y as u32 >= self.height {
            return;
        }
        let (x, y) = (x as u32, y as u32);
        let dst = self.get(x, y);
        self.set(x, y, dst.lerp(&color, coverage));
    }

    /// Fill a rectangle given its top-left corner and dimensions, clipped
    /// to the canvas.
    pub fn fill_rect(&mut self, x: i64, y: i64, w: u32, h: u32, color: Color) {
        for py in y..y + h as i64 {
            for px in x..x + w as i64 {
                self.set_clipped(px, py, color);
            }
        }
    }

    /// Stroke a rectangle outline with the band growing inward from the
    /// inclusive corner coordinates.
    pub fn outline_rect(&mut self, x0: i64, y0: i64, x1: i64, y1: i64, width: u32, color: Color) {
        for i in 0..width as i64 {
            let (left, top) = (x0 + i, y0 + i);
            let (right, bottom) = (x1 - i, y1 - i);
            if left > right || top > bottom {
                break;
            }
            for x in left..=right {
                self.set_clipped(x, top, color);
                self.set_clipped(x, bottom, color);
            }
            for y in top..=bottom {
                self.set_clipped(left, y, color);
                self.set_clipped(right, y, color);
            }
        }
    }

    /// Mean luminance of a rectangular region, clipped to the canvas.
    /// Returns 0.0 for a fully clipped region.
    pub fn mean_luminance(&self, x: i64, y: i64, w: u32, h: u32) -> f64 {
        let x0 = x.max(0) as u32;
        let y0 = y.max(0) as u32;
        let x1 = ((x + w as i64).max(0) as u32).min(self.width);
        let y1 = ((y + h as i64).max(0) as u32).min(self.height);
        if x0 >= x1 || y0 >= y1 {
            return 0.0;
        }

        let mut sum = 0.0;
        for py in y0..y1 {
            for px in x0..x1 {
                sum += self.get(px, py).luminance();
            }
        }
        sum / ((x1 - x0) as f64 * (y1 - y0) as f64)
    }

    /// Convert to 8-bit RGB bytes.
    pub fn to_rgb8(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.data.len() * 3);
        for color in &self.data {
            bytes.extend_from_slice(&color.to_rgb8());
        }
        bytes
    }

    /// Convert to 8-bit RGBA bytes.
    pub fn to_rgba8(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.data.len() * 4);
        for color in &self.data {
            bytes.extend_from_slice(&color.to_rgba8());
        }
        bytes
    }

    /// Build a canvas from 8-bit RGB bytes. Returns `None` when the byte
    /// count does not match the dimensions.
    pub fn from_rgb8(width: u32, height: u32, bytes: &[u8]) -> Option<Self> {
        if bytes.len() != width as usize * height as usize * 3 {
            return None;
        }
        let data = bytes
            .chunks_exact(3)
            .map(|c| Color::from_rgb8([c[0], c[1], c[2]]))
            .collect();
        Some(Self {
            width,
            height,
            data,
        })
    }

    /// Build a canvas from 8-bit RGBA bytes.
    pub fn from_rgba8(width: u32, height: u32, bytes: &[u8]) -> Option<Self> {
        if bytes.len() != width as usize * height as usize * 4 {
            return None;
        }
        let data = bytes
            .chunks_exact(4)
            .map(|c| Color::from_rgba8([c[0], c[1], c[2], c[3]]))
            .collect();
        Some(Self {
            width,
            height,
            data,
        })
    }
}
