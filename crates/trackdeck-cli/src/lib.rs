//! Trackdeck CLI library.
//!
//! Command implementations live here so they can be exercised by tests;
//! `main.rs` only parses arguments and dispatches.

pub mod commands;
