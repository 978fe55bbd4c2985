//! Error types for deck rendering.

use std::path::PathBuf;

use thiserror::Error;

use crate::color::ColorParseError;
use crate::png::PngError;

/// Errors from the rendering pipeline.
///
/// Per-card metadata problems (unknown year, empty title) are represented
/// in the output, not raised; these variants cover contract violations and
/// I/O failures only.
#[derive(Debug, Error)]
pub enum RenderError {
    /// A configured color string could not be parsed.
    #[error(transparent)]
    Color(#[from] ColorParseError),

    /// The payload could not be QR-encoded (too long for any version).
    #[error("QR encoding failed: {0}")]
    Qr(String),

    /// PNG encode/decode error.
    #[error("PNG error: {0}")]
    Png(#[from] PngError),

    /// PDF emission failed.
    #[error("PDF error: {0}")]
    Pdf(String),

    /// IO error while persisting or reloading faces.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The paginator was handed face lists of different lengths.
    #[error("scan and reveal face counts differ: {scans} vs {reveals}")]
    MismatchedFaces { scans: usize, reveals: usize },

    /// A saved face image does not match the deck's card size.
    #[error("face image {path:?}: {reason}")]
    BadFaceImage { path: PathBuf, reason: String },

    /// A face directory is missing one side of a card pair.
    #[error("card {index} has a {present} face but no {missing} face")]
    UnpairedFace {
        index: usize,
        present: &'static str,
        missing: &'static str,
    },

    /// Configuration contract violation.
    #[error(transparent)]
    Config(#[from] trackdeck_spec::ConfigError),
}
