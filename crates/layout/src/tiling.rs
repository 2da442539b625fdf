use crate::LayoutError;
use cardpress_types::{Point, Rect, Size};

/// Card counts a page can be tiled into.
pub const SUPPORTED_CARDS_PER_PAGE: [usize; 6] = [1, 2, 4, 6, 8, 10];

const FIT_TOLERANCE: f32 = 0.01;

/// One card position on a page.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CardSlot {
    /// Fill order on the page, row-major.
    pub index: usize,
    pub row: usize,
    pub col: usize,
    /// Page-relative rectangle, top-left origin.
    pub rect: Rect,
}

impl CardSlot {
    /// Translates a card-relative rectangle into page coordinates.
    pub fn place(&self, card_rect: Rect) -> Rect {
        card_rect.translate(self.rect.x, self.rect.y)
    }
}

/// A straight cut guide in page coordinates, top-left origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CutLine {
    pub from: Point,
    pub to: Point,
}

impl CutLine {
    pub fn is_vertical(&self) -> bool {
        self.from.x == self.to.x
    }
}

/// The grid for one page: slots in fill order plus the cut lines around them.
#[derive(Debug, Clone, PartialEq)]
pub struct PageTiling {
    pub cols: usize,
    pub rows: usize,
    pub page: Size,
    pub slots: Vec<CardSlot>,
    pub cut_lines: Vec<CutLine>,
}

impl PageTiling {
    pub fn cards_per_page(&self) -> usize {
        self.slots.len()
    }
}

/// Columns and rows used for a supported card count.
pub fn grid_dimensions(cards_per_page: usize) -> Result<(usize, usize), LayoutError> {
    match cards_per_page {
        1 => Ok((1, 1)),
        2 => Ok((1, 2)),
        4 => Ok((2, 2)),
        6 => Ok((2, 3)),
        8 => Ok((2, 4)),
        10 => Ok((2, 5)),
        other => Err(LayoutError::UnsupportedCardsPerPage(other)),
    }
}

/// Arranges `cards_per_page` cards of size `card` on a `page`.
///
/// Cards are spaced `margin` apart and the grid is centered on the page; a
/// grid larger than the page is an error. Each card edge gets a cut line
/// that overshoots the card by `extension` on both ends; lines shared by
/// touching cards are emitted once and everything is clipped to the page.
pub fn tile_page(
    cards_per_page: usize,
    page: Size,
    card: Size,
    margin: f32,
    extension: f32,
) -> Result<PageTiling, LayoutError> {
    let (cols, rows) = grid_dimensions(cards_per_page)?;

    if !page.is_positive() || !card.is_positive() {
        return Err(LayoutError::InvalidDimensions(format!(
            "page {}x{} and card {}x{} must be positive",
            page.width, page.height, card.width, card.height
        )));
    }
    if margin < 0.0 || extension < 0.0 {
        return Err(LayoutError::InvalidDimensions(format!(
            "margin ({}) and cut line extension ({}) must not be negative",
            margin, extension
        )));
    }

    let grid_width = cols as f32 * card.width + (cols - 1) as f32 * margin;
    let grid_height = rows as f32 * card.height + (rows - 1) as f32 * margin;
    if grid_width > page.width + FIT_TOLERANCE || grid_height > page.height + FIT_TOLERANCE {
        return Err(LayoutError::GridDoesNotFit {
            cols,
            rows,
            needed_width: grid_width,
            needed_height: grid_height,
            page_width: page.width,
            page_height: page.height,
        });
    }

    let start_x = (page.width - grid_width) / 2.0;
    let start_y = (page.height - grid_height) / 2.0;

    let slots: Vec<CardSlot> = (0..rows)
        .flat_map(|row| (0..cols).map(move |col| (row, col)))
        .enumerate()
        .map(|(index, (row, col))| CardSlot {
            index,
            row,
            col,
            rect: Rect::new(
                start_x + col as f32 * (card.width + margin),
                start_y + row as f32 * (card.height + margin),
                card.width,
                card.height,
            ),
        })
        .collect();

    let cut_lines = cut_lines_for(&slots, page, extension);
    log::debug!(
        "Tiled {} cards as {}x{} grid with {} cut lines",
        cards_per_page,
        cols,
        rows,
        cut_lines.len()
    );

    Ok(PageTiling {
        cols,
        rows,
        page,
        slots,
        cut_lines,
    })
}

fn cut_lines_for(slots: &[CardSlot], page: Size, extension: f32) -> Vec<CutLine> {
    let mut lines: Vec<CutLine> = Vec::with_capacity(slots.len() * 4);
    let clamp_x = |x: f32| x.clamp(0.0, page.width);
    let clamp_y = |y: f32| y.clamp(0.0, page.height);

    for slot in slots {
        let r = slot.rect;
        let horizontal = |y: f32| CutLine {
            from: Point::new(clamp_x(r.x - extension), y),
            to: Point::new(clamp_x(r.right() + extension), y),
        };
        let vertical = |x: f32| CutLine {
            from: Point::new(x, clamp_y(r.y - extension)),
            to: Point::new(x, clamp_y(r.bottom() + extension)),
        };
        for line in [
            horizontal(r.y),
            horizontal(r.bottom()),
            vertical(r.x),
            vertical(r.right()),
        ] {
            if !lines.iter().any(|existing| same_line(existing, &line)) {
                lines.push(line);
            }
        }
    }
    lines
}

fn same_line(a: &CutLine, b: &CutLine) -> bool {
    const EPS: f32 = 0.001;
    (a.from.x - b.from.x).abs() < EPS
        && (a.from.y - b.from.y).abs() < EPS
        && (a.to.x - b.to.x).abs() < EPS
        && (a.to.y - b.to.y).abs() < EPS
}
