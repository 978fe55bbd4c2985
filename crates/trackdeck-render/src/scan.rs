//! Scan face renderer: QR code over a seeded neon ring pattern.

use image::imageops::{self, FilterType};
use image::RgbaImage;
use qrcode::types::Color as Module;
use qrcode::QrCode;
use trackdeck_spec::RenderConfig;

use crate::canvas::Canvas;
use crate::color::Color;
use crate::error::RenderError;
use crate::rng::DeckRng;
use crate::style::DeckStyle;

/// Fixed seed for the ring pattern so repeated renders of the same deck
/// produce a visually stable pattern.
pub const RING_SEED: u32 = 42;

/// Pixels per QR module before the overlay resize.
const MODULE_PX: u32 = 10;

/// Fraction of the card covered by the QR overlay.
const QR_FRACTION: f64 = 0.45;

/// Margin between the outermost ring and the card edge, and the radial
/// step between consecutive rings.
const RING_MARGIN: i64 = 50;
const RING_STEP: i64 = 50;

/// Stroke width of a ring band.
const RING_WIDTH: f64 = 12.0;

/// Luminance cut between dark and light pixels when building the module
/// mask (8-bit scale).
const MASK_THRESHOLD: u8 = 128;

/// Render the scan face for one track link.
///
/// The QR code is encoded at the smallest version that fits the payload
/// with no quiet zone, rasterized with inverted polarity (light modules on
/// a dark field), resized to 45% of the card, and overlaid on the ring
/// pattern through a module mask so the background shows through between
/// modules. Module fill flips to black or white based on the brightness of
/// the covered background region, so the code stays scannable over any
/// background color.
pub fn render_scan_face(
    payload: &str,
    style: &DeckStyle,
    config: &RenderConfig,
) -> Result<Canvas, RenderError> {
    let size = config.card_size;
    let mut card = Canvas::card(size, style.card_background);

    if config.draw_border {
        let bw = config.border_width;
        card.outline_rect(
            bw as i64,
            bw as i64,
            (size - bw) as i64,
            (size - bw) as i64,
            bw,
            style.border_color,
        );
    }

    draw_neon_rings(&mut card, style);

    let qr = encode_inverted(payload)?;
    overlay_qr(&mut card, &qr);

    Ok(card)
}

/// Encode the payload and rasterize it with light modules on a dark field.
fn encode_inverted(payload: &str) -> Result<Canvas, RenderError> {
    let code = QrCode::new(payload.as_bytes()).map_err(|e| RenderError::Qr(e.to_string()))?;
    let modules = code.to_colors();
    let module_count = code.width() as u32;

    let raster_size = module_count * MODULE_PX;
    let mut raster = Canvas::card(raster_size, Color::black());
    for (i, module) in modules.iter().enumerate() {
        if *module == Module::Dark {
            let mx = (i as u32 % module_count) * MODULE_PX;
            let my = (i as u32 / module_count) * MODULE_PX;
            raster.fill_rect(mx as i64, my as i64, MODULE_PX, MODULE_PX, Color::white());
        }
    }
    Ok(raster)
}

/// Draw the concentric neon rings with randomized gaps.
///
/// The palette is cycled twice over rings stepping inward from the card
/// edge. Each ring gets 1 to 3 gaps of 20 to 60 degrees erased back to the
/// background color. The RNG is seeded with [`RING_SEED`] per card, so the
/// pattern is identical on every card of every render.
fn draw_neon_rings(card: &mut Canvas, style: &DeckStyle) {
    let size = card.width as i64;
    let center = (size / 2) as f64;
    let max_radius = size / 2 - RING_MARGIN;

    let mut rng = DeckRng::new(RING_SEED);
    let ring_colors: Vec<Color> = style
        .neon
        .iter()
        .chain(style.neon.iter())
        .copied()
        .collect();

    for (i, color) in ring_colors.iter().enumerate() {
        let radius = max_radius - i as i64 * RING_STEP;
        if radius <= 0 {
            break;
        }

        draw_ring(card, center, center, radius as f64, *color);

        let num_gaps: u32 = rng.gen_range(1..=3);
        for _ in 0..num_gaps {
            let gap_start: f64 = rng.gen_range(0..=360) as f64;
            let gap_length: f64 = rng.gen_range(20..=60) as f64;
            erase_ring_gap(
                card,
                center,
                center,
                radius as f64,
                gap_start,
                gap_length,
                style.card_background,
            );
        }
    }
}

/// Paint an annulus band of [`RING_WIDTH`] pixels growing inward from
/// `radius`.
fn draw_ring(card: &mut Canvas, cx: f64, cy: f64, radius: f64, color: Color) {
    for_ring_pixels(card, cx, cy, radius, |card, x, y, _angle| {
        card.set_clipped(x, y, color);
    });
}

/// Erase the band back to the background over an angular span. Angles are
/// in degrees, measured clockwise from three o'clock (screen coordinates,
/// y grows downward).
fn erase_ring_gap(
    card: &mut Canvas,
    cx: f64,
    cy: f64,
    radius: f64,
    start_deg: f64,
    sweep_deg: f64,
    background: Color,
) {
    for_ring_pixels(card, cx, cy, radius, |card, x, y, angle| {
        if (angle - start_deg).rem_euclid(360.0) <= sweep_deg {
            card.set_clipped(x, y, background);
        }
    });
}

fn for_ring_pixels<F>(card: &mut Canvas, cx: f64, cy: f64, radius: f64, mut f: F)
where
    F: FnMut(&mut Canvas, i64, i64, f64),
{
    let r_outer = radius;
    let r_inner = (radius - RING_WIDTH).max(0.0);
    let x0 = (cx - r_outer).floor() as i64 - 1;
    let x1 = (cx + r_outer).ceil() as i64 + 1;
    let y0 = (cy - r_outer).floor() as i64 - 1;
    let y1 = (cy + r_outer).ceil() as i64 + 1;

    for y in y0..=y1 {
        for x in x0..=x1 {
            let dx = x as f64 - cx;
            let dy = y as f64 - cy;
            let dist = (dx * dx + dy * dy).sqrt();
            if dist > r_inner && dist <= r_outer {
                let angle = dy.atan2(dx).to_degrees().rem_euclid(360.0);
                f(card, x, y, angle);
            }
        }
    }
}

/// Resize the QR raster and paste it centered through a module mask.
fn overlay_qr(card: &mut Canvas, qr: &Canvas) {
    let size = card.width;
    let qr_size = ((size as f64 * QR_FRACTION) as u32).max(1);
    let left = (size / 2 - qr_size / 2) as i64;
    let top = left;

    let resized = resize_lanczos(qr, qr_size);
    let mask = module_mask(&resized);

    // Contrast rule: black modules over a bright backdrop, white over a
    // dark one.
    let backdrop = card.mean_luminance(left, top, qr_size, qr_size);
    let module_color = if backdrop > 127.0 / 255.0 {
        Color::black()
    } else {
        Color::white()
    };

    for y in 0..qr_size {
        for x in 0..qr_size {
            if mask[(y * qr_size + x) as usize] {
                card.set_clipped(left + x as i64, top + y as i64, module_color);
            }
        }
    }
}

fn resize_lanczos(canvas: &Canvas, target: u32) -> Canvas {
    let rgba = RgbaImage::from_raw(canvas.width, canvas.height, canvas.to_rgba8())
        .expect("canvas byte count matches dimensions");
    let resized = imageops::resize(&rgba, target, target, FilterType::Lanczos3);
    Canvas::from_rgba8(target, target, resized.as_raw())
        .expect("resized byte count matches dimensions")
}

/// Identify module pixels: threshold on luminance, then take whichever of
/// the dark and light groups is smaller.
///
/// Modules occupy the minority of the raster's pixels, so the minority
/// group is the code regardless of the polarity the encode step produced.
/// This is a heuristic, not a bit-exact decode contract; it holds for the
/// rasters this module produces.
fn module_mask(canvas: &Canvas) -> Vec<bool> {
    let dark: Vec<bool> = canvas
        .data
        .iter()
        .map(|c| (c.luminance() * 255.0) < MASK_THRESHOLD as f64)
        .collect();
    let dark_count = dark.iter().filter(|&&d| d).count();

    if dark_count * 2 < dark.len() {
        dark
    } else {
        dark.iter().map(|&d| !d).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use trackdeck_spec::RenderConfig;

    fn style(config: &RenderConfig) -> DeckStyle {
        DeckStyle::resolve(config).unwrap()
    }

    /// Sample the center of each module cell and check that one whole
    /// module class survived the resize and overlay.
    ///
    /// Only the minority module class is pasted; the other class lets the
    /// ring background show through. With a mostly dark backdrop the
    /// pasted modules are white, so the encoded grid round-trips up to a
    /// global polarity: every center of exactly the pasted class is light.
    fn assert_masked_modules_survive(card: &Canvas, payload: &str, config: &RenderConfig) {
        let code = QrCode::new(payload.as_bytes()).unwrap();
        let modules = code.to_colors();
        let module_count = code.width() as u32;

        let size = config.card_size;
        let qr_size = (size as f64 * QR_FRACTION) as u32;
        let left = size / 2 - qr_size / 2;
        let cell = qr_size as f64 / module_count as f64;

        let center_is_light = |i: usize| {
            let mx = i as u32 % module_count;
            let my = i as u32 / module_count;
            let px = left + (mx as f64 * cell + cell / 2.0) as u32;
            let py = left + (my as f64 * cell + cell / 2.0) as u32;
            card.get(px, py).luminance() > 0.5
        };
        let class_survives = |class: Module| {
            modules
                .iter()
                .enumerate()
                .filter(|(_, m)| **m == class)
                .all(|(i, _)| center_is_light(i))
        };

        assert!(
            class_survives(Module::Dark) || class_survives(Module::Light),
            "no module class survived the overlay"
        );
    }

    #[test]
    fn inverted_raster_matches_encoded_modules() {
        let payload = "https://example.com/track/1";
        let code = QrCode::new(payload.as_bytes()).unwrap();
        let raster = encode_inverted(payload).unwrap();

        let module_count = code.width() as u32;
        assert_eq!(raster.width, module_count * MODULE_PX);

        // Sample each module's center pixel: dark modules render white
        for (i, module) in code.to_colors().iter().enumerate() {
            let mx = (i as u32 % module_count) * MODULE_PX + MODULE_PX / 2;
            let my = (i as u32 / module_count) * MODULE_PX + MODULE_PX / 2;
            let lum = raster.get(mx, my).luminance();
            if *module == Module::Dark {
                assert!(lum > 0.5, "module ({mx},{my}) should be light");
            } else {
                assert!(lum < 0.5, "module ({mx},{my}) should be dark");
            }
        }
    }

    #[test]
    fn module_mask_is_polarity_agnostic() {
        // 3 dark pixels out of 9: dark minority = modules
        let mut canvas = Canvas::new(3, 3, Color::white());
        canvas.set(0, 0, Color::black());
        canvas.set(1, 1, Color::black());
        canvas.set(2, 2, Color::black());
        let mask = module_mask(&canvas);
        assert_eq!(mask.iter().filter(|&&m| m).count(), 3);
        assert!(mask[0] && mask[4] && mask[8]);

        // Inverted image selects the same pixels
        let mut inverted = Canvas::new(3, 3, Color::black());
        inverted.set(0, 0, Color::white());
        inverted.set(1, 1, Color::white());
        inverted.set(2, 2, Color::white());
        let inv_mask = module_mask(&inverted);
        assert_eq!(mask, inv_mask);
    }

    #[test]
    fn scan_face_round_trips_module_grid() {
        // The overlay upscales module centers faithfully, so sampling the
        // center of each module cell recovers the encoded grid up to a
        // global polarity (the minority mask may land on either class).
        let payload = "https://open.spotify.com/track/7tFiyTwD0nx5a1eklYtX2J?si=abcdef123456";
        let config = RenderConfig::default();
        let card = render_scan_face(payload, &style(&config), &config).unwrap();
        assert_masked_modules_survive(&card, payload, &config);
    }

    #[test]
    fn long_payload_round_trips() {
        // A 200+ character payload forces a high QR version, so each module
        // cell covers only a few pixels after the resize.
        let payload = format!(
            "https://example.com/track?id={}&ref=deck&session=0123456789abcdef",
            "x".repeat(160)
        );
        let config = RenderConfig::default();
        let card = render_scan_face(&payload, &style(&config), &config).unwrap();
        assert_eq!(card.width, config.card_size);
        assert_masked_modules_survive(&card, &payload, &config);
    }

    #[test]
    fn ring_pattern_is_reproducible() {
        let config = RenderConfig::default();
        let s = style(&config);
        let a = render_scan_face("https://example.com/a", &s, &config).unwrap();
        let b = render_scan_face("https://example.com/a", &s, &config).unwrap();
        assert_eq!(a.to_rgb8(), b.to_rgb8());
    }

    #[test]
    fn border_is_drawn_when_enabled() {
        let config = RenderConfig {
            draw_border: true,
            ..RenderConfig::default()
        };
        let s = style(&config);
        let card = render_scan_face("https://example.com/a", &s, &config).unwrap();

        let bw = config.border_width;
        // A pixel in the border band is the border color (white on black)
        assert!(card.get(bw + bw / 2, bw + bw / 2).luminance() > 0.5);
        // A corner pixel outside the band is background
        assert!(card.get(0, 0).luminance() < 0.5);
    }
}
