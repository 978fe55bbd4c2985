//! Page layout planning for duplex printing.
//!
//! The plan is pure geometry, computed before any PDF object exists: which
//! card index lands at which millimeter position on which page. Scan and
//! reveal pages alternate per slice of the deck, and reveal pages mirror
//! the column order so that after double-sided printing (flip on the long
//! edge) the two faces of each physical card line up back to back.

use trackdeck_spec::RenderConfig;

/// Which face a page carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageKind {
    Scan,
    Reveal,
}

/// One card's position on a page, in sheet millimeters with the origin at
/// the bottom-left corner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    /// Index of the card in the deck (0-based).
    pub card_index: usize,
    pub x_mm: f64,
    pub y_mm: f64,
}

/// A single page of the deck document.
#[derive(Debug, Clone)]
pub struct PagePlan {
    pub kind: PageKind,
    pub placements: Vec<Placement>,
}

/// Sheet geometry derived from the configuration: the card grid centered
/// on the page.
#[derive(Debug, Clone, Copy)]
pub struct SheetLayout {
    pub sheet_width_mm: f64,
    pub sheet_height_mm: f64,
    pub card_mm: f64,
    pub margin_x_mm: f64,
    pub margin_y_mm: f64,
    /// Distance between the left edges of adjacent cells.
    pub pitch_mm: f64,
    pub cols: u32,
    pub rows: u32,
}

impl SheetLayout {
    pub fn new(config: &RenderConfig) -> Self {
        let cols = config.cards_per_row;
        let rows = config.cards_per_col;
        let grid_w = cols as f64 * config.card_mm + (cols - 1) as f64 * config.gap_mm;
        let grid_h = rows as f64 * config.card_mm + (rows - 1) as f64 * config.gap_mm;
        Self {
            sheet_width_mm: config.sheet.width_mm,
            sheet_height_mm: config.sheet.height_mm,
            card_mm: config.card_mm,
            margin_x_mm: (config.sheet.width_mm - grid_w) / 2.0,
            margin_y_mm: (config.sheet.height_mm - grid_h) / 2.0,
            pitch_mm: config.card_mm + config.gap_mm,
            cols,
            rows,
        }
    }

    /// Bottom-left corner of the cell at `(row, col)`, row 0 at the top of
    /// the sheet.
    fn cell_origin(&self, row: u32, col: u32) -> (f64, f64) {
        let x = self.margin_x_mm + col as f64 * self.pitch_mm;
        let y = self.sheet_height_mm - self.margin_y_mm - (row + 1) as f64 * self.card_mm
            - row as f64 * (self.pitch_mm - self.card_mm);
        (x, y)
    }

    fn placement(&self, card_index: usize, slot: usize, mirror: bool) -> Placement {
        let row = (slot as u32) / self.cols;
        let col = (slot as u32) % self.cols;
        let col = if mirror { self.cols - 1 - col } else { col };
        let (x_mm, y_mm) = self.cell_origin(row, col);
        Placement {
            card_index,
            x_mm,
            y_mm,
        }
    }
}

/// Lay out `count` cards into alternating scan/reveal pages.
///
/// Each slice of `cards_per_page` cards produces a scan page followed by
/// the matching mirrored reveal page, so the output is always
/// `2 * ceil(count / cards_per_page)` pages. The last slice may be
/// partial; empty cells are simply left empty. Zero cards plan zero pages.
pub fn plan_deck(count: usize, config: &RenderConfig) -> Vec<PagePlan> {
    let layout = SheetLayout::new(config);
    let per_page = config.cards_per_page();

    let mut pages = Vec::new();
    let mut start = 0;
    while start < count {
        let slice = start..(start + per_page).min(count);

        let scan = slice
            .clone()
            .enumerate()
            .map(|(slot, idx)| layout.placement(idx, slot, false))
            .collect();
        pages.push(PagePlan {
            kind: PageKind::Scan,
            placements: scan,
        });

        let reveal = slice
            .clone()
            .enumerate()
            .map(|(slot, idx)| layout.placement(idx, slot, true))
            .collect();
        pages.push(PagePlan {
            kind: PageKind::Reveal,
            placements: reveal,
        });

        start = slice.end;
    }
    pages
}
