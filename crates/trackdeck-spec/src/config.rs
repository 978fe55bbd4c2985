//! Render configuration.
//!
//! Everything the renderer needs beyond the record list travels in one
//! explicit [`RenderConfig`] value. Render calls are pure functions of their
//! arguments plus this config; nothing reads process-wide state.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Default card raster side length in pixels.
pub const DEFAULT_CARD_SIZE: u32 = 2000;

/// Reference color ramp, oldest to newest.
pub const DEFAULT_RAMP: [&str; 7] = [
    "#7030A0", // purple (oldest)
    "#E31C79", // pink
    "#FF6B9D", // light pink
    "#FFA500", // orange
    "#FFD700", // gold
    "#87CEEB", // sky blue
    "#4169E1", // royal blue (newest)
];

/// Reference neon ring palette for the scan face.
pub const DEFAULT_NEON_PALETTE: [[u8; 3]; 4] =
    [[255, 0, 100], [0, 200, 255], [255, 255, 0], [0, 255, 120]];

/// Physical sheet dimensions in millimeters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SheetConfig {
    pub width_mm: f64,
    pub height_mm: f64,
}

impl SheetConfig {
    /// A4 portrait.
    pub const fn a4() -> Self {
        Self {
            width_mm: 210.0,
            height_mm: 297.0,
        }
    }
}

impl Default for SheetConfig {
    fn default() -> Self {
        Self::a4()
    }
}

/// Font file paths for the reveal face, one per text role.
///
/// Any of these may be absent or unreadable; loading cascades through
/// platform system fonts and finally a built-in bitmap font. Fallback is
/// immediate and never fails the render.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FontConfig {
    /// Font for the year figure (boldest weight).
    pub year: Option<String>,
    /// Font for the artist line.
    pub artist: Option<String>,
    /// Font for the song title line.
    pub song: Option<String>,
}

/// Configuration for a full deck render.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderConfig {
    /// Square card raster side length in pixels; shared by every card in
    /// the deck (the paginator assumes uniform cells).
    pub card_size: u32,
    /// Physical sheet the pages are laid out on.
    pub sheet: SheetConfig,
    /// Cards per page row.
    pub cards_per_row: u32,
    /// Cards per page column.
    pub cards_per_col: u32,
    /// Printed card side length in millimeters.
    pub card_mm: f64,
    /// Gap between adjacent cards in millimeters.
    pub gap_mm: f64,
    /// Invert the black/white convention to spare printer ink.
    pub ink_saving: bool,
    /// Draw a cutting-guide border on the scan face.
    pub draw_border: bool,
    /// Cutting-guide border width in pixels.
    pub border_width: u32,
    /// Optional small label drawn in the reveal face corner.
    pub card_label: Option<String>,
    /// Reveal face fonts.
    pub fonts: FontConfig,
    /// Neon ring palette, cycled over the concentric rings.
    pub neon_palette: Vec<[u8; 3]>,
    /// Color ramp anchors as `#RRGGBB` strings, oldest to newest. Order is
    /// meaningful and never re-sorted.
    pub ramp: Vec<String>,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            card_size: DEFAULT_CARD_SIZE,
            sheet: SheetConfig::a4(),
            cards_per_row: 4,
            cards_per_col: 5,
            card_mm: 50.0,
            gap_mm: 2.0,
            ink_saving: false,
            draw_border: false,
            border_width: 20,
            card_label: None,
            fonts: FontConfig::default(),
            neon_palette: DEFAULT_NEON_PALETTE.to_vec(),
            ramp: DEFAULT_RAMP.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl RenderConfig {
    /// Cards per page.
    pub fn cards_per_page(&self) -> usize {
        (self.cards_per_row * self.cards_per_col) as usize
    }

    /// Validate the configuration contract.
    ///
    /// Violations here are the only fatal conditions of a deck render; the
    /// renderer assumes a validated config and degrades gracefully on
    /// everything else.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.card_size == 0 {
            return Err(ConfigError::ZeroCardSize);
        }
        if self.cards_per_row == 0 || self.cards_per_col == 0 {
            return Err(ConfigError::ZeroGrid {
                rows: self.cards_per_col,
                cols: self.cards_per_row,
            });
        }
        if self.sheet.width_mm <= 0.0 {
            return Err(ConfigError::NonPositiveDimension(
                "sheet width",
                self.sheet.width_mm,
            ));
        }
        if self.sheet.height_mm <= 0.0 {
            return Err(ConfigError::NonPositiveDimension(
                "sheet height",
                self.sheet.height_mm,
            ));
        }
        if self.card_mm <= 0.0 {
            return Err(ConfigError::NonPositiveDimension("card size", self.card_mm));
        }
        if self.gap_mm < 0.0 {
            return Err(ConfigError::NonPositiveDimension("card gap", self.gap_mm));
        }

        let grid_w = self.cards_per_row as f64 * self.card_mm
            + (self.cards_per_row - 1) as f64 * self.gap_mm;
        let grid_h = self.cards_per_col as f64 * self.card_mm
            + (self.cards_per_col - 1) as f64 * self.gap_mm;
        if grid_w > self.sheet.width_mm || grid_h > self.sheet.height_mm {
            return Err(ConfigError::GridTooLarge {
                rows: self.cards_per_col,
                cols: self.cards_per_row,
                grid_w,
                grid_h,
                sheet_w: self.sheet.width_mm,
                sheet_h: self.sheet.height_mm,
            });
        }

        if self.ramp.len() < 2 {
            return Err(ConfigError::RampTooShort(self.ramp.len()));
        }
        for anchor in &self.ramp {
            validate_hex(anchor, "color ramp")?;
        }
        if self.neon_palette.is_empty() {
            return Err(ConfigError::EmptyNeonPalette);
        }
        Ok(())
    }
}

fn validate_hex(color: &str, context: &'static str) -> Result<(), ConfigError> {
    let body = color.strip_prefix('#').unwrap_or(color);
    if body.len() == 6 && body.chars().all(|c| c.is_ascii_hexdigit()) {
        Ok(())
    } else {
        Err(ConfigError::InvalidColor(color.to_string(), context))
    }
}
