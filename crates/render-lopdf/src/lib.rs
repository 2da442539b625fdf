//! PDF card sheet renderer built on lopdf.
//!
//! [`StreamingPdfWriter`] writes each image and page as soon as it is produced;
//! [`LopdfCardRenderer`] turns page draw lists into content streams using the
//! standard fonts, so no font files are embedded.

mod helpers;
mod renderer;
mod writer;

pub use helpers::{CUT_LINE_DASH, CUT_LINE_GRAY, CUT_LINE_WIDTH, PageContext};
pub use renderer::LopdfCardRenderer;
pub use writer::StreamingPdfWriter;
