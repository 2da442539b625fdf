use cardpress_layout::CutLine;
use cardpress_traits::SharedImageData;
use cardpress_types::{Color, Rect, Size};

/// Font family plus style flags as requested by a field.
#[derive(Debug, Clone, PartialEq)]
pub struct FontSpec {
    pub family: String,
    pub bold: bool,
    pub italic: bool,
}

/// One primitive on a page. Rectangles are page coordinates in points with a
/// top-left origin; backends flip or convert as their format requires.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawItem {
    /// Solid rectangle, used for card backgrounds.
    Fill { rect: Rect, color: Color },
    /// A single line of text, left-anchored and vertically centered in `rect`.
    Text {
        rect: Rect,
        content: String,
        font: FontSpec,
        font_size: f32,
        color: Color,
    },
    /// A registered image drawn into `rect`, already letterboxed by the caller.
    Image { rect: Rect, key: String },
}

/// Everything drawn on one page, in paint order.
#[derive(Debug, Clone, Default)]
pub struct PageContent {
    pub size: Size,
    pub items: Vec<DrawItem>,
    pub cut_lines: Vec<CutLine>,
}

/// Image bytes shared by every placement of the same file.
#[derive(Debug, Clone)]
pub struct ImageResource {
    /// Identifier pages use to refer to this image.
    pub key: String,
    /// The reference the bytes were loaded from, for diagnostics.
    pub source: String,
    pub data: SharedImageData,
    /// Pixel dimensions.
    pub width: u32,
    pub height: u32,
}

impl ImageResource {
    pub fn pixel_size(&self) -> Size {
        Size::new(self.width as f32, self.height as f32)
    }
}
