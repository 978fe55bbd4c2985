//! PDF emission from a layout plan.

use printpdf::{
    ColorBits, ColorSpace, Image, ImageTransform, ImageXObject, Line, Mm, PdfDocument,
    PdfLayerReference, Point, Px,
};
use trackdeck_spec::RenderConfig;

use crate::canvas::Canvas;
use crate::error::RenderError;
use crate::layout::{plan_deck, PageKind};

const DOCUMENT_TITLE: &str = "Trackdeck Cards";
const MM_PER_INCH: f64 = 25.4;

/// Assemble the deck PDF from rendered face pairs.
///
/// Pages follow the layout plan: a scan page then the mirrored reveal page
/// per slice of the deck. Face rasters are embedded as raw RGB image
/// objects with the DPI chosen so each lands at exactly `card_mm` on the
/// sheet. An empty deck produces a valid zero-page document.
pub fn render_deck_pdf(
    scans: &[Canvas],
    reveals: &[Canvas],
    config: &RenderConfig,
) -> Result<Vec<u8>, RenderError> {
    if scans.len() != reveals.len() {
        return Err(RenderError::MismatchedFaces {
            scans: scans.len(),
            reveals: reveals.len(),
        });
    }

    let doc = PdfDocument::empty(DOCUMENT_TITLE);
    let plan = plan_deck(scans.len(), config);

    for page in &plan {
        let (page_idx, layer_idx) = doc.add_page(
            Mm(config.sheet.width_mm),
            Mm(config.sheet.height_mm),
            "cards",
        );
        let layer = doc.get_page(page_idx).get_layer(layer_idx);

        // The sheet behind the scan faces matches the card background, so
        // the cut lines between dark cards do not stand out in white.
        let (faces, background) = match page.kind {
            PageKind::Scan => {
                let bg = if config.ink_saving {
                    (1.0, 1.0, 1.0)
                } else {
                    (0.0, 0.0, 0.0)
                };
                (scans, bg)
            }
            PageKind::Reveal => (reveals, (1.0, 1.0, 1.0)),
        };
        fill_page(&layer, config, background);

        for placement in &page.placements {
            let face = &faces[placement.card_index];
            let dpi = face.width as f64 * MM_PER_INCH / config.card_mm;

            let image = Image::from(ImageXObject {
                width: Px(face.width as usize),
                height: Px(face.height as usize),
                color_space: ColorSpace::Rgb,
                bits_per_component: ColorBits::Bit8,
                interpolate: true,
                image_data: face.to_rgb8(),
                image_filter: None,
                clipping_bbox: None,
            });
            image.add_to_layer(
                layer.clone(),
                ImageTransform {
                    translate_x: Some(Mm(placement.x_mm)),
                    translate_y: Some(Mm(placement.y_mm)),
                    dpi: Some(dpi),
                    ..Default::default()
                },
            );
        }
    }

    doc.save_to_bytes().map_err(|e| RenderError::Pdf(e.to_string()))
}

/// Flood the whole page with a fill color.
fn fill_page(layer: &PdfLayerReference, config: &RenderConfig, (r, g, b): (f64, f64, f64)) {
    let w = config.sheet.width_mm;
    let h = config.sheet.height_mm;
    layer.set_fill_color(printpdf::Color::Rgb(printpdf::Rgb::new(r, g, b, None)));
    layer.add_shape(Line {
        points: vec![
            (Point::new(Mm(0.0), Mm(0.0)), false),
            (Point::new(Mm(w), Mm(0.0)), false),
            (Point::new(Mm(w), Mm(h)), false),
            (Point::new(Mm(0.0), Mm(h)), false),
        ],
        is_closed: true,
        has_fill: true,
        has_stroke: false,
        is_clipping_path: false,
    });
}
