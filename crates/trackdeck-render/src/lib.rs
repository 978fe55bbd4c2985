//! Trackdeck Card Rendering Engine
//!
//! This crate turns an ordered list of song records into a printable deck of
//! game cards: a scan face carrying a QR-encoded track link over a seeded
//! neon ring pattern, and a reveal face showing artist, title, and year over
//! a background color that encodes the year's percentile within the deck.
//!
//! Rendering is deterministic: the same records and the same
//! [`RenderConfig`](trackdeck_spec::RenderConfig) produce byte-identical
//! face PNGs. The decorative ring pattern uses PCG32 with a fixed seed,
//! and PNG encoding uses fixed compression settings. (The PDF container
//! carries a creation timestamp, so only its page content is stable.)
//!
//! # Example
//!
//! ```no_run
//! use trackdeck_render::deck::{render_deck, save_faces};
//! use trackdeck_render::font::FontSet;
//! use trackdeck_spec::{RenderConfig, SongRecord};
//! use std::path::Path;
//!
//! let records = vec![
//!     SongRecord::new("Song A", "Artist A", 1990, "https://example.com/a"),
//!     SongRecord::new("Song B", "Artist B", 2020, "https://example.com/b"),
//! ];
//! let config = RenderConfig::default();
//! config.validate().unwrap();
//!
//! let fonts = FontSet::load(&config.fonts);
//! let deck = render_deck(&records, &config, &fonts).unwrap();
//! save_faces(&deck.faces, Path::new("cards")).unwrap();
//! std::fs::write("cards.pdf", &deck.pdf).unwrap();
//! ```
//!
//! # Modules
//!
//! - [`canvas`]: square f64 RGBA pixel buffer the faces are drawn into
//! - [`color`]: RGB color type, hex parsing, interpolation
//! - [`deck`]: whole-deck pipeline, face persistence, warnings
//! - [`fit`]: width-heuristic text wrapping
//! - [`font`]: TrueType loading with system and built-in fallbacks
//! - [`layout`]: page layout plan with duplex mirroring
//! - [`pdf`]: PDF emission from a layout plan
//! - [`png`]: deterministic PNG encode/decode
//! - [`ramp`]: percentile-based year-to-color mapping
//! - [`reveal`]: reveal face renderer
//! - [`rng`]: deterministic PCG32 wrapper
//! - [`scan`]: scan face renderer
//! - [`style`]: config colors resolved once per deck

pub mod canvas;
pub mod color;
pub mod deck;
pub mod error;
pub mod fit;
pub mod font;
pub mod layout;
pub mod pdf;
pub mod png;
pub mod ramp;
pub mod reveal;
pub mod rng;
pub mod scan;
pub mod style;

pub use canvas::Canvas;
pub use color::Color;
pub use deck::{load_faces, render_deck, save_faces, CardFaces, DeckArtifacts, DeckWarning};
pub use error::RenderError;
pub use font::{FaceFont, FontOrigin, FontSet};
pub use fit::fit_text;
pub use layout::{plan_deck, PageKind, PagePlan, Placement, SheetLayout};
pub use pdf::render_deck_pdf;
pub use reveal::render_reveal_face;
pub use scan::render_scan_face;
pub use ramp::{year_color, year_percentile, ColorRamp};
pub use rng::DeckRng;
pub use style::DeckStyle;
