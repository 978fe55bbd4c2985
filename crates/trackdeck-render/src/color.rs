//! Color utilities for card rendering.

use thiserror::Error;

/// Error parsing a `#RRGGBB` string.
#[derive(Debug, Error)]
#[error("invalid hex color: {0:?}")]
pub struct ColorParseError(pub String);

/// RGBA color with f64 components (0.0 to 1.0 range).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    pub a: f64,
}

impl Color {
    /// Create a new color with alpha = 1.0.
    pub const fn rgb(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Create a new color with alpha.
    pub const fn rgba(r: f64, g: f64, b: f64, a: f64) -> Self {
        Self { r, g, b, a }
    }

    /// Create black.
    pub const fn black() -> Self {
        Self::rgb(0.0, 0.0, 0.0)
    }

    /// Create white.
    pub const fn white() -> Self {
        Self::rgb(1.0, 1.0, 1.0)
    }

    /// Parse a `#RRGGBB` string (leading `#` optional).
    pub fn from_hex(hex: &str) -> Result<Self, ColorParseError> {
        let body = hex.strip_prefix('#').unwrap_or(hex);
        if body.len() != 6 || !body.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(ColorParseError(hex.to_string()));
        }
        let channel = |range| {
            u8::from_str_radix(&body[range], 16)
                .map_err(|_| ColorParseError(hex.to_string()))
        };
        Ok(Self::from_rgb8([channel(0..2)?, channel(2..4)?, channel(4..6)?]))
    }

    /// Linearly interpolate between two colors.
    pub fn lerp(&self, other: &Color, t: f64) -> Color {
        let t = t.clamp(0.0, 1.0);
        Color {
            r: self.r + (other.r - self.r) * t,
            g: self.g + (other.g - self.g) * t,
            b: self.b + (other.b - self.b) * t,
            a: self.a + (other.a - self.a) * t,
        }
    }

    /// Clamp all components to [0.0, 1.0].
    pub fn clamp(&self) -> Color {
        Color {
            r: self.r.clamp(0.0, 1.0),
            g: self.g.clamp(0.0, 1.0),
            b: self.b.clamp(0.0, 1.0),
            a: self.a.clamp(0.0, 1.0),
        }
    }

    /// Convert to 8-bit RGB.
    pub fn to_rgb8(&self) -> [u8; 3] {
        let c = self.clamp();
        [
            (c.r * 255.0).round() as u8,
            (c.g * 255.0).round() as u8,
            (c.b * 255.0).round() as u8,
        ]
    }

    /// Convert to 8-bit RGBA.
    pub fn to_rgba8(&self) -> [u8; 4] {
        let c = self.clamp();
        [
            (c.r * 255.0).round() as u8,
            (c.g * 255.0).round() as u8,
            (c.b * 255.0).round() as u8,
            (c.a * 255.0).round() as u8,
        ]
    }

    /// Create from 8-bit RGB.
    pub fn from_rgb8(rgb: [u8; 3]) -> Self {
        Self {
            r: rgb[0] as f64 / 255.0,
            g: rgb[1] as f64 / 255.0,
            b: rgb[2] as f64 / 255.0,
            a: 1.0,
        }
    }

    /// Create from 8-bit RGBA.
    pub fn from_rgba8(rgba: [u8; 4]) -> Self {
        Self {
            r: rgba[0] as f64 / 255.0,
            g: rgba[1] as f64 / 255.0,
            b: rgba[2] as f64 / 255.0,
            a: rgba[3] as f64 / 255.0,
        }
    }

    /// Luminance of the color (perceived brightness).
    pub fn luminance(&self) -> f64 {
        0.299 * self.r + 0.587 * self.g + 0.114 * self.b
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::black()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_hex() {
        let c = Color::from_hex("#FF6B9D").unwrap();
        assert_eq!(c.to_rgb8(), [0xFF, 0x6B, 0x9D]);

        let no_hash = Color::from_hex("4169E1").unwrap();
        assert_eq!(no_hash.to_rgb8(), [0x41, 0x69, 0xE1]);
    }

    #[test]
    fn test_from_hex_rejects_garbage() {
        assert!(Color::from_hex("#FFF").is_err());
        assert!(Color::from_hex("not-a-color").is_err());
        assert!(Color::from_hex("#GGGGGG").is_err());
    }

    #[test]
    fn test_lerp() {
        let black = Color::black();
        let white = Color::white();

        let mid = black.lerp(&white, 0.5);
        assert!((mid.r - 0.5).abs() < 1e-10);
        assert!((mid.g - 0.5).abs() < 1e-10);
        assert!((mid.b - 0.5).abs() < 1e-10);

        // t is clamped
        assert_eq!(black.lerp(&white, 2.0), white);
    }

    #[test]
    fn test_rgb8_roundtrip() {
        let original = Color::rgb(0.5, 0.25, 0.75);
        let restored = Color::from_rgb8(original.to_rgb8());

        // Allow for 8-bit quantization error
        assert!((original.r - restored.r).abs() < 0.01);
        assert!((original.g - restored.g).abs() < 0.01);
        assert!((original.b - restored.b).abs() < 0.01);
    }

    #[test]
    fn test_luminance_extremes() {
        assert!(Color::black().luminance() < 1e-10);
        assert!((Color::white().luminance() - 1.0).abs() < 1e-10);
    }
}
