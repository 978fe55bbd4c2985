//! Percentile-based year-to-color mapping.
//!
//! A card's reveal color encodes *where the year sits within this deck*,
//! not any absolute scale: the oldest song in the deck gets the first ramp
//! anchor and the newest gets the last, whatever the actual years are. The
//! year population is always passed in explicitly because the percentile is
//! deck-relative.

use crate::color::Color;
use crate::error::RenderError;
use trackdeck_spec::ConfigError;

/// Ordered color anchors, oldest to newest.
///
/// Anchor order is meaningful and never re-sorted.
#[derive(Debug, Clone)]
pub struct ColorRamp {
    anchors: Vec<Color>,
}

impl ColorRamp {
    /// Build a ramp from at least two anchors.
    pub fn new(anchors: Vec<Color>) -> Result<Self, RenderError> {
        if anchors.len() < 2 {
            return Err(RenderError::Config(ConfigError::RampTooShort(
                anchors.len(),
            )));
        }
        Ok(Self { anchors })
    }

    /// Build a ramp from `#RRGGBB` strings.
    pub fn from_hex(anchors: &[String]) -> Result<Self, RenderError> {
        let parsed = anchors
            .iter()
            .map(|s| Color::from_hex(s))
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(parsed)
    }

    /// Number of anchors.
    pub fn len(&self) -> usize {
        self.anchors.len()
    }

    /// Whether the ramp has no anchors. Always false for a constructed
    /// ramp, provided for completeness.
    pub fn is_empty(&self) -> bool {
        self.anchors.is_empty()
    }

    /// Interpolated color at position `p` in [0, 1].
    ///
    /// `p` maps onto the anchor index space `[0, len - 1]`; fractional
    /// positions interpolate the RGB channels between the two bracketing
    /// anchors.
    pub fn color_at(&self, p: f64) -> Color {
        let idx = p.clamp(0.0, 1.0) * (self.anchors.len() - 1) as f64;
        let lo = idx.floor() as usize;
        let hi = idx.ceil() as usize;
        if lo == hi {
            return self.anchors[lo];
        }
        self.anchors[lo].lerp(&self.anchors[hi], idx - lo as f64)
    }
}

/// Percentile of `year` within the deck's year population.
///
/// Rank uses the midpoint of the tied-value run:
/// `(count_below + count_equal / 2) / n`. This keeps duplicate years from
/// clustering at one extreme and gives every instance of a repeated year
/// the same stable mid-rank. A population of one yields 0.5. `year` does
/// not have to be a member of the population.
///
/// The population must be non-empty (a validated deck always is); an empty
/// slice falls back to the midpoint.
pub fn year_percentile(year: i32, years: &[i32]) -> f64 {
    if years.is_empty() {
        return 0.5;
    }
    let below = years.iter().filter(|&&y| y < year).count() as f64;
    let equal = years.iter().filter(|&&y| y == year).count() as f64;
    (below + equal / 2.0) / years.len() as f64
}

/// Color for a year based on its percentile in the deck's distribution.
///
/// Deterministic: depends only on the arguments.
pub fn year_color(year: i32, years: &[i32], ramp: &ColorRamp) -> Color {
    ramp.color_at(year_percentile(year, years))
}
