//! Font loading, measurement, and glyph rasterization.
//!
//! The reveal face wants three TrueType faces (year, artist, song title).
//! Loading cascades without retry or error: the configured font files
//! first, then a fixed list of platform-conventional system fonts, and
//! finally the built-in bitmap font from [`builtin`]. A missing font never
//! fails a render.

pub mod builtin;

use rusttype::{point, Font, Scale};

use crate::canvas::Canvas;
use crate::color::Color;
use trackdeck_spec::FontConfig;

/// Where the loaded font set came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontOrigin {
    /// The paths named in the configuration.
    Configured,
    /// A platform-conventional system font.
    System,
    /// The built-in bitmap font.
    Builtin,
}

/// A loaded face: a real TrueType font or the built-in bitmap fallback.
#[derive(Clone)]
pub enum FaceFont {
    TrueType(Font<'static>),
    Builtin,
}

/// Platform-conventional (bold, regular, italic) font path triples, tried
/// in order when the configured fonts are unavailable.
const SYSTEM_FALLBACKS: &[(&str, &str, &str)] = &[
    // Linux
    (
        "/usr/share/fonts/truetype/dejavu/DejaVuSans-Bold.ttf",
        "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
        "/usr/share/fonts/truetype/dejavu/DejaVuSans-Oblique.ttf",
    ),
    // macOS
    (
        "/System/Library/Fonts/Helvetica.ttc",
        "/System/Library/Fonts/Helvetica.ttc",
        "/System/Library/Fonts/Helvetica.ttc",
    ),
    // Windows
    (
        "C:\\Windows\\Fonts\\arialbd.ttf",
        "C:\\Windows\\Fonts\\arial.ttf",
        "C:\\Windows\\Fonts\\ariali.ttf",
    ),
];

fn load_truetype(path: &str) -> Option<Font<'static>> {
    let bytes = std::fs::read(path).ok()?;
    Font::try_from_vec(bytes)
}

impl FaceFont {
    /// Pixel width of `text` rendered on one line at size `px`.
    pub fn measure_width(&self, text: &str, px: f32) -> f32 {
        match self {
            FaceFont::TrueType(font) => {
                let scale = Scale::uniform(px);
                font.layout(text, scale, point(0.0, 0.0))
                    .last()
                    .map(|g| g.position().x + g.unpositioned().h_metrics().advance_width)
                    .unwrap_or(0.0)
            }
            FaceFont::Builtin => {
                let s = bitmap_scale(px);
                (text.chars().count() as u32 * builtin::GLYPH_ADVANCE * s) as f32
            }
        }
    }

    /// Vertical advance between the baselines of stacked lines.
    pub fn line_advance(&self, px: f32) -> f32 {
        match self {
            FaceFont::TrueType(font) => {
                let vm = font.v_metrics(Scale::uniform(px));
                vm.ascent - vm.descent + vm.line_gap
            }
            FaceFont::Builtin => {
                let s = bitmap_scale(px);
                ((builtin::GLYPH_HEIGHT + 2) * s) as f32
            }
        }
    }

    /// Draw one line centered horizontally and vertically on `(cx, cy)`.
    pub fn draw_centered(
        &self,
        canvas: &mut Canvas,
        text: &str,
        px: f32,
        cx: f32,
        cy: f32,
        color: Color,
    ) {
        let left = cx - self.measure_width(text, px) / 2.0;
        self.draw_at(canvas, text, px, left, cy, color);
    }

    /// Draw one line with its right edge at `right_x`, centered on `cy`.
    pub fn draw_right_anchored(
        &self,
        canvas: &mut Canvas,
        text: &str,
        px: f32,
        right_x: f32,
        cy: f32,
        color: Color,
    ) {
        let left = right_x - self.measure_width(text, px);
        self.draw_at(canvas, text, px, left, cy, color);
    }

    /// Draw a possibly multi-line string (lines separated by `\n`) with
    /// the whole block centered on `(cx, cy)` and each line centered
    /// horizontally.
    pub fn draw_multiline_centered(
        &self,
        canvas: &mut Canvas,
        text: &str,
        px: f32,
        cx: f32,
        cy: f32,
        color: Color,
    ) {
        let lines: Vec<&str> = text.split('\n').collect();
        let advance = self.line_advance(px);
        let total = advance * lines.len() as f32;
        for (i, line) in lines.iter().enumerate() {
            let line_cy = cy - total / 2.0 + advance * (i as f32 + 0.5);
            self.draw_centered(canvas, line, px, cx, line_cy, color);
        }
    }

    /// Draw one line starting at `left`, vertically centered on `cy`.
    fn draw_at(&self, canvas: &mut Canvas, text: &str, px: f32, left: f32, cy: f32, color: Color) {
        match self {
            FaceFont::TrueType(font) => {
                let scale = Scale::uniform(px);
                let vm = font.v_metrics(scale);
                // ascent is positive, descent negative; this puts the
                // glyph box's vertical middle on cy
                let baseline = cy + (vm.ascent + vm.descent) / 2.0;
                for glyph in font.layout(text, scale, point(left, baseline)) {
                    if let Some(bb) = glyph.pixel_bounding_box() {
                        glyph.draw(|gx, gy, v| {
                            canvas.blend(
                                bb.min.x as i64 + gx as i64,
                                bb.min.y as i64 + gy as i64,
                                color,
                                v as f64,
                            );
                        });
                    }
                }
            }
            FaceFont::Builtin => {
                let s = bitmap_scale(px) as i64;
                let top = cy as i64 - (builtin::GLYPH_HEIGHT as i64 * s) / 2;
                let mut x = left as i64;
                for c in text.chars() {
                    if let Some(rows) = builtin::glyph(c) {
                        for (ry, row) in rows.iter().enumerate() {
                            for rx in 0..builtin::GLYPH_WIDTH {
                                let bit = 1u8 << (builtin::GLYPH_WIDTH - 1 - rx);
                                if row & bit != 0 {
                                    canvas.fill_rect(
                                        x + rx as i64 * s,
                                        top + ry as i64 * s,
                                        s as u32,
                                        s as u32,
                                        color,
                                    );
                                }
                            }
                        }
                    }
                    x += builtin::GLYPH_ADVANCE as i64 * s;
                }
            }
        }
    }
}

/// Integer upscale factor for the bitmap font at a requested pixel size.
fn bitmap_scale(px: f32) -> u32 {
    ((px / builtin::EM_HEIGHT as f32).round() as u32).max(1)
}

/// The three reveal-face fonts. The corner label reuses the artist face.
#[derive(Clone)]
pub struct FontSet {
    pub year: FaceFont,
    pub artist: FaceFont,
    pub song: FaceFont,
    origin: FontOrigin,
}

impl FontSet {
    /// Load fonts through the fallback chain. Never fails; the worst case
    /// is the built-in bitmap font for all three roles.
    pub fn load(config: &FontConfig) -> Self {
        if let (Some(year), Some(artist), Some(song)) = (
            config.year.as_deref().and_then(load_truetype),
            config.artist.as_deref().and_then(load_truetype),
            config.song.as_deref().and_then(load_truetype),
        ) {
            return Self {
                year: FaceFont::TrueType(year),
                artist: FaceFont::TrueType(artist),
                song: FaceFont::TrueType(song),
                origin: FontOrigin::Configured,
            };
        }

        for (bold, regular, italic) in SYSTEM_FALLBACKS {
            if let (Some(year), Some(artist), Some(song)) = (
                load_truetype(bold),
                load_truetype(regular),
                load_truetype(italic),
            ) {
                return Self {
                    year: FaceFont::TrueType(year),
                    artist: FaceFont::TrueType(artist),
                    song: FaceFont::TrueType(song),
                    origin: FontOrigin::System,
                };
            }
        }

        Self::builtin()
    }

    /// The built-in bitmap font for all roles.
    pub fn builtin() -> Self {
        Self {
            year: FaceFont::Builtin,
            artist: FaceFont::Builtin,
            song: FaceFont::Builtin,
            origin: FontOrigin::Builtin,
        }
    }

    /// Where this set came from, for reporting.
    pub fn origin(&self) -> FontOrigin {
        self.origin
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_measure_is_linear_in_length() {
        let font = FaceFont::Builtin;
        let one = font.measure_width("A", 8.0);
        let five = font.measure_width("AAAAA", 8.0);
        assert!((five - one * 5.0).abs() < 1e-6);
    }

    #[test]
    fn bitmap_scale_floors_at_one() {
        assert_eq!(bitmap_scale(2.0), 1);
        assert_eq!(bitmap_scale(8.0), 1);
        assert_eq!(bitmap_scale(16.0), 2);
        assert_eq!(bitmap_scale(380.0), 48);
    }

    #[test]
    fn draw_centered_marks_pixels_around_center() {
        let mut canvas = Canvas::new(64, 64, Color::black());
        let font = FaceFont::Builtin;
        font.draw_centered(&mut canvas, "8", 16.0, 32.0, 32.0, Color::white());

        // Something was drawn, and it sits in the middle region
        let mut lit = Vec::new();
        for y in 0..64 {
            for x in 0..64 {
                if canvas.get(x, y).luminance() > 0.5 {
                    lit.push((x, y));
                }
            }
        }
        assert!(!lit.is_empty());
        assert!(lit.iter().all(|&(x, y)| (20..44).contains(&x) && (20..44).contains(&y)));
    }

    #[test]
    fn multiline_draws_each_line() {
        let mut canvas = Canvas::new(64, 64, Color::black());
        let font = FaceFont::Builtin;
        font.draw_multiline_centered(&mut canvas, "A\nB", 8.0, 32.0, 32.0, Color::white());

        let top_lit = (0..32).any(|y| (0..64).any(|x| canvas.get(x, y).luminance() > 0.5));
        let bottom_lit = (32..64).any(|y| (0..64).any(|x| canvas.get(x, y).luminance() > 0.5));
        assert!(top_lit && bottom_lit);
    }

    #[test]
    fn missing_config_falls_back_without_error() {
        let config = FontConfig {
            year: Some("/nonexistent/font.ttf".to_string()),
            artist: None,
            song: None,
        };
        // Either a system font or the builtin, depending on the host;
        // the call itself must not fail.
        let set = FontSet::load(&config);
        let _ = set.year.measure_width("1999", 380.0);
    }
}
