use crate::{LayoutError, PageTiling, tile_page};
use cardpress_types::Size;
use serde::{Deserialize, Serialize};

pub const POINTS_PER_INCH: f32 = 72.0;
/// Standard business card width (3.5in).
pub const CARD_WIDTH_PT: f32 = 3.5 * POINTS_PER_INCH;
/// Standard business card height (2in).
pub const CARD_HEIGHT_PT: f32 = 2.0 * POINTS_PER_INCH;

/// Physical page and card dimensions used for export, all in points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageSetup {
    /// Page size.
    ///
    /// Defaults to US Letter (612 x 792).
    pub page: Size,
    /// Size every card is printed at, regardless of the design canvas.
    pub card: Size,
    /// Gap between neighbouring cards.
    ///
    /// Defaults to `18.0` (a quarter inch).
    pub margin: f32,
    /// How far each cut line overshoots the card edge it marks.
    ///
    /// Defaults to `10.0`.
    pub cut_line_extension: f32,
}

impl Default for PageSetup {
    fn default() -> Self {
        Self::letter()
    }
}

impl PageSetup {
    pub fn letter() -> Self {
        Self {
            page: Size::new(8.5 * POINTS_PER_INCH, 11.0 * POINTS_PER_INCH),
            card: Size::new(CARD_WIDTH_PT, CARD_HEIGHT_PT),
            margin: 18.0,
            cut_line_extension: 10.0,
        }
    }

    pub fn a4() -> Self {
        Self {
            page: Size::new(595.28, 841.89),
            ..Self::letter()
        }
    }

    pub fn with_page_size(mut self, width: f32, height: f32) -> Self {
        self.page = Size::new(width, height);
        self
    }

    pub fn with_card_size(mut self, width: f32, height: f32) -> Self {
        self.card = Size::new(width, height);
        self
    }

    pub fn with_margin(mut self, margin: f32) -> Self {
        self.margin = margin;
        self
    }

    pub fn with_cut_line_extension(mut self, extension: f32) -> Self {
        self.cut_line_extension = extension;
        self
    }

    /// Tiles `cards_per_page` cards onto this page.
    pub fn tile(&self, cards_per_page: usize) -> Result<PageTiling, LayoutError> {
        tile_page(
            cards_per_page,
            self.page,
            self.card,
            self.margin,
            self.cut_line_extension,
        )
    }
}
