//! Reveal face renderer: year, artist, and title over the year color.

use trackdeck_spec::{RenderConfig, SongRecord};

use crate::canvas::Canvas;
use crate::color::Color;
use crate::fit::fit_text;
use crate::font::FontSet;
use crate::ramp::year_color;
use crate::style::DeckStyle;

/// Text keep-out margin from the card edge, at the reference card size.
const MARGIN: f64 = 150.0;

/// Vertical offset of the artist (above) and title (below) lines from the
/// card center.
const TEXT_OFFSET: f64 = 400.0;

/// Border stroke width in ink-saving mode.
const INK_BORDER: f64 = 100.0;

const YEAR_PX: f64 = 380.0;
const ARTIST_PX: f64 = 110.0;
const SONG_PX: f64 = 100.0;
const LABEL_PX: f64 = 50.0;

/// Card side the pixel constants above are calibrated for.
const REFERENCE_SIZE: f64 = 2000.0;

/// Render the reveal face for one record.
///
/// The background carries the year's percentile color: the whole canvas in
/// normal mode, a thick border over the flat card background in ink-saving
/// mode. The year is set large in the center with the artist above and the
/// (wrapped) title below, all in black. A sentinel year renders as-is; the
/// deck pipeline surfaces it as a warning rather than failing the card.
pub fn render_reveal_face(
    record: &SongRecord,
    years: &[i32],
    style: &DeckStyle,
    fonts: &FontSet,
    config: &RenderConfig,
) -> Canvas {
    let size = config.card_size;
    let scale = size as f64 / REFERENCE_SIZE;
    let face_color = year_color(record.year, years, &style.ramp);

    let mut card = if config.ink_saving {
        let mut card = Canvas::card(size, style.card_background);
        card.outline_rect(
            0,
            0,
            size as i64 - 1,
            size as i64 - 1,
            (INK_BORDER * scale).round() as u32,
            face_color,
        );
        card
    } else {
        Canvas::card(size, face_color)
    };

    let center = size as f64 / 2.0;
    let max_text_width = (size as f64 - 2.0 * MARGIN * scale) as f32;
    let offset = TEXT_OFFSET * scale;
    let ink = Color::black();

    let year_px = (YEAR_PX * scale) as f32;
    let year_text = record.year.to_string();
    fonts
        .year
        .draw_centered(&mut card, &year_text, year_px, center as f32, center as f32, ink);

    let artist_px = (ARTIST_PX * scale) as f32;
    let artist = fit_text(&record.artist, &fonts.artist, artist_px, max_text_width);
    fonts.artist.draw_multiline_centered(
        &mut card,
        &artist,
        artist_px,
        center as f32,
        (center - offset) as f32,
        ink,
    );

    let song_px = (SONG_PX * scale) as f32;
    let title = fit_text(&record.sanitized_title, &fonts.song, song_px, max_text_width);
    fonts.song.draw_multiline_centered(
        &mut card,
        &title,
        song_px,
        center as f32,
        (center + offset) as f32,
        ink,
    );

    if let Some(label) = config.card_label.as_deref() {
        if !label.is_empty() {
            let label_px = (LABEL_PX * scale) as f32;
            let inset = (INK_BORDER * scale / 2.0) as f32;
            fonts.artist.draw_right_anchored(
                &mut card,
                label,
                label_px,
                size as f32 - inset,
                size as f32 - inset,
                ink,
            );
        }
    }

    card
}

#[cfg(test)]
mod tests {
    use super::*;
    use trackdeck_spec::{RenderConfig, SongRecord};

    fn record(year: i32) -> SongRecord {
        SongRecord::new("Test Song", "Test Artist", year, "https://example.com/t")
    }

    fn render(config: &RenderConfig, rec: &SongRecord, years: &[i32]) -> Canvas {
        let style = DeckStyle::resolve(config).unwrap();
        let fonts = FontSet::builtin();
        render_reveal_face(rec, years, &style, &fonts, config)
    }

    #[test]
    fn normal_mode_fills_background_with_year_color() {
        let config = RenderConfig::default();
        let style = DeckStyle::resolve(&config).unwrap();
        let years = [1970, 1990, 2010];
        let card = render(&config, &record(1990), &years);

        let expected = year_color(1990, &years, &style.ramp);
        // Corners are untouched by text
        assert_eq!(card.get(0, 0).to_rgb8(), expected.to_rgb8());
        let far = config.card_size - 1;
        assert_eq!(card.get(far, 0).to_rgb8(), expected.to_rgb8());
    }

    #[test]
    fn ink_saving_mode_draws_border_on_flat_background() {
        let config = RenderConfig {
            ink_saving: true,
            ..RenderConfig::default()
        };
        let style = DeckStyle::resolve(&config).unwrap();
        let years = [1970, 1990, 2010];
        let card = render(&config, &record(1990), &years);

        let expected = year_color(1990, &years, &style.ramp);
        // Border band carries the year color
        assert_eq!(card.get(0, 0).to_rgb8(), expected.to_rgb8());
        assert_eq!(card.get(50, 50).to_rgb8(), expected.to_rgb8());
        // Inside the band the background is white
        assert_eq!(card.get(120, 120).to_rgb8(), Color::white().to_rgb8());
    }

    #[test]
    fn year_text_is_drawn_in_black() {
        let config = RenderConfig::default();
        let card = render(&config, &record(1990), &[1970, 1990, 2010]);

        // Black pixels exist in the central band
        let size = config.card_size;
        let mut found = false;
        for y in size / 2 - 200..size / 2 + 200 {
            for x in size / 4..3 * size / 4 {
                if card.get(x, y).luminance() < 0.05 {
                    found = true;
                    break;
                }
            }
        }
        assert!(found, "no year glyph pixels near center");
    }

    #[test]
    fn label_marks_the_bottom_right_corner() {
        let labeled = RenderConfig {
            card_label: Some("MY DECK".to_string()),
            ..RenderConfig::default()
        };
        let unlabeled = RenderConfig::default();
        let years = [1970, 1990, 2010];

        let with = render(&labeled, &record(1990), &years);
        let without = render(&unlabeled, &record(1990), &years);

        let size = labeled.card_size;
        let mut differs = false;
        for y in size - 200..size {
            for x in size / 2..size {
                if with.get(x, y).to_rgb8() != without.get(x, y).to_rgb8() {
                    differs = true;
                    break;
                }
            }
        }
        assert!(differs, "label left no mark");
    }

    #[test]
    fn sentinel_year_still_renders() {
        let config = RenderConfig::default();
        let card = render(
            &config,
            &record(trackdeck_spec::UNKNOWN_YEAR),
            &[trackdeck_spec::UNKNOWN_YEAR, 1990, 2010],
        );
        assert_eq!(card.width, config.card_size);
    }

    #[test]
    fn small_card_scales_without_panic() {
        let config = RenderConfig {
            card_size: 400,
            ..RenderConfig::default()
        };
        let card = render(&config, &record(2001), &[2001]);
        assert_eq!(card.width, 400);
    }
}
