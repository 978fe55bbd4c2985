//! Trackdeck Canonical Types
//!
//! This crate provides the data model shared by the trackdeck renderer and
//! CLI: song records, render configuration, validation, and the JSON
//! persistence of a record list.
//!
//! The renderer treats everything here as read-only input. Configuration is
//! an explicit value passed into every render call; there is no process-wide
//! mutable state.
//!
//! # Example
//!
//! ```
//! use trackdeck_spec::{RenderConfig, SongRecord};
//!
//! let record = SongRecord::new(
//!     "Bohemian Rhapsody - 2011 Remaster",
//!     "Queen",
//!     1975,
//!     "https://open.spotify.com/track/7tFiyTwD0nx5a1eklYtX2J",
//! );
//! assert_eq!(record.sanitized_title, "Bohemian Rhapsody");
//!
//! let config = RenderConfig::default();
//! assert!(config.validate().is_ok());
//! ```
//!
//! # Modules
//!
//! - [`config`]: [`RenderConfig`] and sheet/font sub-configuration
//! - [`error`]: [`ConfigError`] for fail-fast contract violations
//! - [`song`]: [`SongRecord`], title sanitization, JSON round-trip

pub mod config;
pub mod error;
pub mod song;

pub use config::{FontConfig, RenderConfig, SheetConfig};
pub use error::ConfigError;
pub use song::{load_records, sanitize_title, save_records, SongRecord, UNKNOWN_YEAR};
