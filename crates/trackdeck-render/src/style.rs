//! Configured colors resolved once per deck.

use trackdeck_spec::RenderConfig;

use crate::color::Color;
use crate::error::RenderError;
use crate::ramp::ColorRamp;

/// Parsed colors shared by every card of a deck.
///
/// Resolving once up front means per-card render calls cannot fail on a
/// malformed color string; config parsing problems surface before the first
/// face is drawn.
#[derive(Debug, Clone)]
pub struct DeckStyle {
    /// Year color ramp, oldest to newest.
    pub ramp: ColorRamp,
    /// Neon ring palette.
    pub neon: Vec<Color>,
    /// Card background. Black normally; white in ink-saving mode.
    pub card_background: Color,
    /// Cutting-guide border color, the inverse of the background.
    pub border_color: Color,
}

impl DeckStyle {
    /// Resolve the color configuration.
    pub fn resolve(config: &RenderConfig) -> Result<Self, RenderError> {
        let ramp = ColorRamp::from_hex(&config.ramp)?;
        let neon = config
            .neon_palette
            .iter()
            .map(|&rgb| Color::from_rgb8(rgb))
            .collect();

        // Ink-saving mode swaps the dark-card convention for a light one.
        let (card_background, border_color) = if config.ink_saving {
            (Color::white(), Color::black())
        } else {
            (Color::black(), Color::white())
        };

        Ok(Self {
            ramp,
            neon,
            card_background,
            border_color,
        })
    }
}
