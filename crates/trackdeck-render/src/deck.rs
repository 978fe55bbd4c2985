//! Whole-deck pipeline: render all faces, assemble the PDF, persist and
//! reload face images.

use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

use trackdeck_spec::{RenderConfig, SongRecord};

use crate::canvas::Canvas;
use crate::error::RenderError;
use crate::font::FontSet;
use crate::pdf::render_deck_pdf;
use crate::png::{read_canvas, write_rgb, PngConfig};
use crate::reveal::render_reveal_face;
use crate::scan::render_scan_face;
use crate::style::DeckStyle;

/// The two rendered faces of one card.
#[derive(Debug, Clone)]
pub struct CardFaces {
    pub scan: Canvas,
    pub reveal: Canvas,
}

/// A non-fatal defect noticed while rendering.
///
/// Degraded metadata never aborts a render; the affected card is rendered
/// as-is and reported here so the caller can surface it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeckWarning {
    /// 1-based card number, matching the saved file names.
    pub card_number: usize,
    pub title: String,
}

impl fmt::Display for DeckWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "card {:03} ({:?}) has no resolved release year; it will sort to the oldest end",
            self.card_number, self.title
        )
    }
}

/// Everything a deck render produces.
#[derive(Debug, Clone)]
pub struct DeckArtifacts {
    /// Face pairs in deck order.
    pub faces: Vec<CardFaces>,
    /// The assembled multi-page PDF.
    pub pdf: Vec<u8>,
    pub warnings: Vec<DeckWarning>,
}

/// Render a full deck.
///
/// Validates the config, resolves colors once, computes the year
/// population once, then renders both faces per record in deck order and
/// assembles the PDF. The only failure modes are config contract
/// violations and encoding problems; a record with a sentinel year or an
/// empty title still renders and is reported in `warnings`.
pub fn render_deck(
    records: &[SongRecord],
    config: &RenderConfig,
    fonts: &FontSet,
) -> Result<DeckArtifacts, RenderError> {
    config.validate()?;
    let style = DeckStyle::resolve(config)?;
    let years: Vec<i32> = records.iter().map(|r| r.year).collect();

    let mut scans = Vec::with_capacity(records.len());
    let mut reveals = Vec::with_capacity(records.len());
    let mut warnings = Vec::new();

    for (i, record) in records.iter().enumerate() {
        if !record.has_known_year() {
            warnings.push(DeckWarning {
                card_number: i + 1,
                title: record.sanitized_title.clone(),
            });
        }
        scans.push(render_scan_face(&record.link, &style, config)?);
        reveals.push(render_reveal_face(record, &years, &style, fonts, config));
    }

    let pdf = render_deck_pdf(&scans, &reveals, config)?;
    let faces = scans
        .into_iter()
        .zip(reveals)
        .map(|(scan, reveal)| CardFaces { scan, reveal })
        .collect();

    Ok(DeckArtifacts {
        faces,
        pdf,
        warnings,
    })
}

const SCAN_SUFFIX: &str = "_qr.png";
const REVEAL_SUFFIX: &str = "_solution.png";

fn face_paths(dir: &Path, card_number: usize) -> (PathBuf, PathBuf) {
    (
        dir.join(format!("card_{card_number:03}{SCAN_SUFFIX}")),
        dir.join(format!("card_{card_number:03}{REVEAL_SUFFIX}")),
    )
}

/// Save every face pair as PNGs under `dir`.
///
/// Files are named `card_NNN_qr.png` / `card_NNN_solution.png` with a
/// 1-based card number, so a directory listing sorts in deck order. The
/// directory is created if missing.
pub fn save_faces(faces: &[CardFaces], dir: &Path) -> Result<(), RenderError> {
    std::fs::create_dir_all(dir)?;
    let png = PngConfig::default();
    for (i, pair) in faces.iter().enumerate() {
        let (scan_path, reveal_path) = face_paths(dir, i + 1);
        write_rgb(&pair.scan, &scan_path, &png)?;
        write_rgb(&pair.reveal, &reveal_path, &png)?;
    }
    Ok(())
}

/// Reload face pairs saved by [`save_faces`].
///
/// Non-face files in the directory are ignored. Cards come back sorted by
/// their embedded number; the numbers need not be contiguous. A card with
/// only one face present, or faces that are not square images of a single
/// shared size, is an error.
pub fn load_faces(dir: &Path) -> Result<Vec<CardFaces>, RenderError> {
    let mut pairs: BTreeMap<usize, (Option<PathBuf>, Option<PathBuf>)> = BTreeMap::new();

    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        match parse_face_name(name) {
            Some((number, FaceSide::Scan)) => {
                pairs.entry(number).or_default().0 = Some(path);
            }
            Some((number, FaceSide::Reveal)) => {
                pairs.entry(number).or_default().1 = Some(path);
            }
            None => {}
        }
    }

    let mut faces = Vec::with_capacity(pairs.len());
    let mut size: Option<u32> = None;
    for (number, paths) in pairs {
        let (scan_path, reveal_path) = match paths {
            (Some(s), Some(r)) => (s, r),
            (Some(_), None) => {
                return Err(RenderError::UnpairedFace {
                    index: number,
                    present: "scan",
                    missing: "reveal",
                })
            }
            (None, Some(_)) => {
                return Err(RenderError::UnpairedFace {
                    index: number,
                    present: "reveal",
                    missing: "scan",
                })
            }
            (None, None) => unreachable!("entry inserted without a path"),
        };

        let scan = read_face(&scan_path, &mut size)?;
        let reveal = read_face(&reveal_path, &mut size)?;
        faces.push(CardFaces { scan, reveal });
    }
    Ok(faces)
}

enum FaceSide {
    Scan,
    Reveal,
}

fn parse_face_name(name: &str) -> Option<(usize, FaceSide)> {
    let rest = name.strip_prefix("card_")?;
    let (digits, side) = if let Some(digits) = rest.strip_suffix(SCAN_SUFFIX) {
        (digits, FaceSide::Scan)
    } else if let Some(digits) = rest.strip_suffix(REVEAL_SUFFIX) {
        (digits, FaceSide::Reveal)
    } else {
        return None;
    };
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok().map(|n| (n, side))
}

/// Read one face, pinning the shared card size to the first face seen.
fn read_face(path: &Path, size: &mut Option<u32>) -> Result<Canvas, RenderError> {
    let canvas = read_canvas(path)?;
    if canvas.width != canvas.height {
        return Err(RenderError::BadFaceImage {
            path: path.to_path_buf(),
            reason: format!("not square ({}x{})", canvas.width, canvas.height),
        });
    }
    match *size {
        Some(expected) if canvas.width != expected => Err(RenderError::BadFaceImage {
            path: path.to_path_buf(),
            reason: format!("size {} does not match deck size {expected}", canvas.width),
        }),
        _ => {
            *size = Some(canvas.width);
            Ok(canvas)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Color;

    fn small_config() -> RenderConfig {
        RenderConfig {
            card_size: 256,
            ..RenderConfig::default()
        }
    }

    fn records() -> Vec<SongRecord> {
        vec![
            SongRecord::new("First Song", "Artist A", 1985, "https://example.com/1"),
            SongRecord::new("Second Song", "Artist B", 2005, "https://example.com/2"),
        ]
    }

    #[test]
    fn render_deck_produces_pairs_and_pdf() {
        let config = small_config();
        let deck = render_deck(&records(), &config, &FontSet::builtin()).unwrap();
        assert_eq!(deck.faces.len(), 2);
        assert!(deck.pdf.starts_with(b"%PDF"));
        assert!(deck.warnings.is_empty());
        for pair in &deck.faces {
            assert_eq!(pair.scan.width, 256);
            assert_eq!(pair.reveal.width, 256);
        }
    }

    #[test]
    fn empty_deck_renders_empty_artifacts() {
        let config = small_config();
        let deck = render_deck(&[], &config, &FontSet::builtin()).unwrap();
        assert!(deck.faces.is_empty());
        assert!(deck.pdf.starts_with(b"%PDF"));
    }

    #[test]
    fn sentinel_year_is_warned_not_fatal() {
        let config = small_config();
        let mut recs = records();
        recs.push(SongRecord::new(
            "Mystery Song",
            "Artist C",
            trackdeck_spec::UNKNOWN_YEAR,
            "https://example.com/3",
        ));
        let deck = render_deck(&recs, &config, &FontSet::builtin()).unwrap();
        assert_eq!(deck.faces.len(), 3);
        assert_eq!(deck.warnings.len(), 1);
        assert_eq!(deck.warnings[0].card_number, 3);
        assert_eq!(deck.warnings[0].title, "Mystery Song");
    }

    #[test]
    fn invalid_config_fails_fast() {
        let config = RenderConfig {
            card_size: 0,
            ..RenderConfig::default()
        };
        assert!(render_deck(&records(), &config, &FontSet::builtin()).is_err());
    }

    #[test]
    fn save_and_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let config = small_config();
        let deck = render_deck(&records(), &config, &FontSet::builtin()).unwrap();

        save_faces(&deck.faces, dir.path()).unwrap();
        assert!(dir.path().join("card_001_qr.png").exists());
        assert!(dir.path().join("card_002_solution.png").exists());

        let loaded = load_faces(dir.path()).unwrap();
        assert_eq!(loaded.len(), 2);
        for (orig, back) in deck.faces.iter().zip(&loaded) {
            assert_eq!(orig.scan.to_rgb8(), back.scan.to_rgb8());
            assert_eq!(orig.reveal.to_rgb8(), back.reveal.to_rgb8());
        }
    }

    #[test]
    fn load_ignores_unrelated_files() {
        let dir = tempfile::tempdir().unwrap();
        let faces = vec![CardFaces {
            scan: Canvas::card(16, Color::black()),
            reveal: Canvas::card(16, Color::white()),
        }];
        save_faces(&faces, dir.path()).unwrap();
        std::fs::write(dir.path().join("notes.txt"), b"not a face").unwrap();
        std::fs::write(dir.path().join("card_xx_qr.png"), b"bad name").unwrap();

        let loaded = load_faces(dir.path()).unwrap();
        assert_eq!(loaded.len(), 1);
    }

    #[test]
    fn unpaired_face_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let faces = vec![CardFaces {
            scan: Canvas::card(16, Color::black()),
            reveal: Canvas::card(16, Color::white()),
        }];
        save_faces(&faces, dir.path()).unwrap();
        std::fs::remove_file(dir.path().join("card_001_solution.png")).unwrap();

        let err = load_faces(dir.path()).unwrap_err();
        assert!(matches!(
            err,
            RenderError::UnpairedFace {
                index: 1,
                present: "scan",
                missing: "reveal",
            }
        ));
    }

    #[test]
    fn mismatched_face_size_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let faces = vec![
            CardFaces {
                scan: Canvas::card(16, Color::black()),
                reveal: Canvas::card(16, Color::white()),
            },
            CardFaces {
                scan: Canvas::card(32, Color::black()),
                reveal: Canvas::card(32, Color::white()),
            },
        ];
        save_faces(&faces, dir.path()).unwrap();

        let err = load_faces(dir.path()).unwrap_err();
        assert!(matches!(err, RenderError::BadFaceImage { .. }));
    }

    #[test]
    fn face_name_parsing() {
        assert!(matches!(
            parse_face_name("card_007_qr.png"),
            Some((7, FaceSide::Scan))
        ));
        assert!(matches!(
            parse_face_name("card_012_solution.png"),
            Some((12, FaceSide::Reveal))
        ));
        assert!(parse_face_name("card__qr.png").is_none());
        assert!(parse_face_name("deck_001_qr.png").is_none());
        assert!(parse_face_name("card_001_front.png").is_none());
    }
}
