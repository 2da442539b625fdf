//! Card geometry shared by every export backend.
//!
//! [`resolve`] turns a template's design-space fields into rectangles inside a
//! card of a given size, in draw order. [`tile_page`] arranges a fixed number
//! of cards on a page and computes the cut lines between them. Neither knows
//! anything about the output format.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum LayoutError {
    #[error("Unsupported cards per page: {0} (supported: 1, 2, 4, 6, 8, 10)")]
    UnsupportedCardsPerPage(usize),
    #[error(
        "A {cols}x{rows} grid needs {needed_width:.2}x{needed_height:.2}pt but the page is only {page_width:.2}x{page_height:.2}pt."
    )]
    GridDoesNotFit {
        cols: usize,
        rows: usize,
        needed_width: f32,
        needed_height: f32,
        page_width: f32,
        page_height: f32,
    },
    #[error("Invalid dimensions: {0}")]
    InvalidDimensions(String),
}

pub mod config;
mod resolver;
mod tiling;

pub use self::config::{CARD_HEIGHT_PT, CARD_WIDTH_PT, POINTS_PER_INCH, PageSetup};
pub use self::resolver::{PositionedField, resolve};
pub use self::tiling::{
    CardSlot, CutLine, PageTiling, SUPPORTED_CARDS_PER_PAGE, grid_dimensions, tile_page,
};

// Re-export geometry types so backends agree on one definition
pub use cardpress_types::{Point, Rect, Size};
