//! Song records and their JSON persistence.
//!
//! A record list is the handoff point between the metadata collaborators
//! (playlist fetchers, scrapers, year lookups) and the renderer. The on-disk
//! format is a JSON array of objects with `name`, `original_name`, `artist`,
//! `year`, and `link` keys; `name` carries the sanitized title.

use std::path::Path;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Sentinel for a release year no source could resolve.
///
/// Far outside any plausible release year so it sorts to the oldest end of
/// the deck's year distribution instead of crashing percentile math. Cards
/// carrying it are visually obvious and surfaced as warnings by the
/// pipeline.
pub const UNKNOWN_YEAR: i32 = -1000;

/// One song in the deck, immutable once constructed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SongRecord {
    /// Title as delivered by the metadata source.
    #[serde(rename = "original_name", default)]
    pub title: String,
    /// Title with remaster/version noise stripped; what the card shows.
    #[serde(rename = "name")]
    pub sanitized_title: String,
    /// Primary artist.
    pub artist: String,
    /// Release year, or [`UNKNOWN_YEAR`].
    pub year: i32,
    /// Track link encoded on the scan face.
    pub link: String,
}

impl SongRecord {
    /// Build a record, sanitizing the title.
    pub fn new(
        title: impl Into<String>,
        artist: impl Into<String>,
        year: i32,
        link: impl Into<String>,
    ) -> Self {
        let title = title.into();
        let sanitized_title = sanitize_title(&title);
        Self {
            title,
            sanitized_title,
            artist: artist.into(),
            year,
            link: link.into(),
        }
    }

    /// Whether the year was actually resolved by a metadata source.
    pub fn has_known_year(&self) -> bool {
        self.year != UNKNOWN_YEAR
    }
}

static REMASTER_PATTERNS: OnceLock<Vec<Regex>> = OnceLock::new();

fn remaster_patterns() -> &'static [Regex] {
    REMASTER_PATTERNS.get_or_init(|| {
        [
            r"(?i)\s?-\s?\d{4} remaster(ed)?",
            r"(?i)\s?/\s?\d{4} remaster(ed)?",
            r"(?i)\s?\(\d{4} remaster(ed)?\)",
            r"(?i)\s?-\s?remaster(ed)?\s?\d{4}",
            r"(?i)\s?/\s?remaster(ed)?\s?\d{4}",
            r"(?i)\s?\(remaster(ed)?\s?\d{4}\)",
            r"(?i)\s?-\s?remaster(ed)?",
            r"(?i)\s?-\s?\d{4} version",
            r"(?i)\s?-\s?version \d{4}",
        ]
        .iter()
        .map(|p| Regex::new(p).expect("invalid remaster pattern"))
        .collect()
    })
}

/// Strip remaster and version suffixes from a track title.
///
/// Streaming catalogs decorate titles with reissue markers
/// (`- 2011 Remastered`, `(Remastered 2009)`, `- Version 1997`) that would
/// waste card space and leak the answer's era.
pub fn sanitize_title(title: &str) -> String {
    let mut sanitized = title.to_string();
    for pattern in remaster_patterns() {
        sanitized = pattern.replace_all(&sanitized, "").into_owned();
    }
    sanitized.trim().to_string()
}

/// Load a record list from a `songs.json` file.
///
/// Records missing `original_name` get it backfilled from `name`, so lists
/// written by older tooling still round-trip.
pub fn load_records(path: &Path) -> Result<Vec<SongRecord>, ConfigError> {
    let data = std::fs::read_to_string(path)?;
    let mut records: Vec<SongRecord> = serde_json::from_str(&data)?;
    for record in &mut records {
        if record.title.is_empty() {
            record.title = record.sanitized_title.clone();
        }
    }
    Ok(records)
}

/// Write a record list as pretty-printed JSON.
pub fn save_records(records: &[SongRecord], path: &Path) -> Result<(), ConfigError> {
    let data = serde_json::to_string_pretty(records)?;
    std::fs::write(path, data)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn sanitize_strips_dash_year_remaster() {
        assert_eq!(
            sanitize_title("Bohemian Rhapsody - 2011 Remaster"),
            "Bohemian Rhapsody"
        );
        assert_eq!(
            sanitize_title("Heroes - 2017 Remastered"),
            "Heroes"
        );
    }

    #[test]
    fn sanitize_strips_parenthesized_and_slash_forms() {
        assert_eq!(sanitize_title("Africa (2018 Remaster)"), "Africa");
        assert_eq!(sanitize_title("Africa / 1999 Remastered"), "Africa");
        assert_eq!(sanitize_title("Hey Jude (Remastered 2015)"), "Hey Jude");
    }

    #[test]
    fn sanitize_strips_bare_remaster_and_version() {
        assert_eq!(sanitize_title("Let It Be - Remastered"), "Let It Be");
        assert_eq!(sanitize_title("One - 1992 Version"), "One");
        assert_eq!(sanitize_title("One - Version 1992"), "One");
    }

    #[test]
    fn sanitize_leaves_clean_titles_alone() {
        assert_eq!(sanitize_title("Paranoid Android"), "Paranoid Android");
    }

    #[test]
    fn record_new_sanitizes() {
        let record = SongRecord::new("Starman - 2012 Remaster", "David Bowie", 1972, "url");
        assert_eq!(record.title, "Starman - 2012 Remaster");
        assert_eq!(record.sanitized_title, "Starman");
        assert!(record.has_known_year());
    }

    #[test]
    fn unknown_year_is_flagged() {
        let record = SongRecord::new("Mystery", "Unknown", UNKNOWN_YEAR, "url");
        assert!(!record.has_known_year());
    }

    #[test]
    fn json_round_trip() {
        let records = vec![
            SongRecord::new("Song A - Remastered", "Artist A", 1990, "url1"),
            SongRecord::new("Song B", "Artist B", 2020, "url2"),
        ];
        let json = serde_json::to_string(&records).unwrap();
        let back: Vec<SongRecord> = serde_json::from_str(&json).unwrap();
        assert_eq!(records, back);
    }

    #[test]
    fn json_without_original_name_backfills() {
        let json = r#"[{"name": "Song A", "artist": "Artist A", "year": 1990, "link": "url1"}]"#;
        let records: Vec<SongRecord> = serde_json::from_str(json).unwrap();
        assert_eq!(records[0].sanitized_title, "Song A");
        assert_eq!(records[0].title, "");
    }
}
