use crate::elements::{ImageResource, PageContent};
use crate::error::RenderError;
use std::io::{Seek, Write};

/// An output backend that turns page draw lists into a document.
///
/// Call order: `begin_document`, any number of `add_image` and `render_page`
/// calls (images before the pages that use them), then `finish`.
pub trait CardRenderer<W: Write + Seek> {
    fn begin_document(&mut self, writer: W) -> Result<(), RenderError>;

    /// Registers an image so pages can refer to it by `image.key`.
    fn add_image(&mut self, image: &ImageResource) -> Result<(), RenderError>;

    fn render_page(&mut self, page: &PageContent) -> Result<(), RenderError>;

    /// Completes the document and hands back the writer.
    fn finish(self: Box<Self>) -> Result<W, RenderError>;

    /// Backend name for log messages.
    fn name(&self) -> &'static str;
}
