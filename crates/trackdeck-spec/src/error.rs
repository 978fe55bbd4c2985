//! Error types for configuration validation and record persistence.

use thiserror::Error;

/// Errors raised by [`crate::RenderConfig::validate`] and record loading.
///
/// Configuration errors are contract violations and fail fast; they are the
/// only fatal conditions in the pipeline. Degraded per-record metadata (an
/// unknown year, an empty title) is represented in the data instead and
/// never raised.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The color ramp needs at least two anchors to interpolate between.
    #[error("color ramp must have at least 2 anchors, got {0}")]
    RampTooShort(usize),

    /// A color string was not in `#RRGGBB` form.
    #[error("invalid hex color {0:?} in {1}")]
    InvalidColor(String, &'static str),

    /// Card pixel size must be non-zero.
    #[error("card size must be > 0 pixels")]
    ZeroCardSize,

    /// Grid dimensions must be non-zero.
    #[error("cards per row/column must be > 0, got {rows}x{cols}")]
    ZeroGrid { rows: u32, cols: u32 },

    /// Sheet or card physical dimensions must be positive.
    #[error("physical dimension {0} must be > 0 mm, got {1}")]
    NonPositiveDimension(&'static str, f64),

    /// The card grid does not fit on the sheet.
    #[error("grid of {rows}x{cols} cards ({grid_w:.1}x{grid_h:.1} mm) exceeds sheet {sheet_w:.1}x{sheet_h:.1} mm")]
    GridTooLarge {
        rows: u32,
        cols: u32,
        grid_w: f64,
        grid_h: f64,
        sheet_w: f64,
        sheet_h: f64,
    },

    /// The neon ring palette must contain at least one color.
    #[error("neon ring palette must not be empty")]
    EmptyNeonPalette,

    /// IO error while reading or writing a record list.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The record list JSON could not be parsed or serialized.
    #[error("record list JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
