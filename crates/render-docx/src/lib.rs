//! Word card sheet renderer.
//!
//! Writes a WordprocessingML package directly: every page is one paragraph
//! holding page-anchored drawings (text boxes, pictures, filled rectangles and
//! cut lines) positioned from the same draw list the PDF backend consumes.

mod drawing;
mod package;
mod renderer;

pub use drawing::{EMU_PER_POINT, TWIPS_PER_POINT};
pub use package::DocxPackage;
pub use renderer::DocxCardRenderer;
