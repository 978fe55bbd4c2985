//! CLI command implementations

pub mod compose;
pub mod generate;
