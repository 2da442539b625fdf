use crate::drawing::{self, Anchor, RunStyle};
use crate::package::DocxPackage;
use cardpress_render_core::{CardRenderer, DrawItem, ImageResource, PageContent, RenderError};
use cardpress_types::{Color, Size};
use image::ImageFormat;
use std::collections::HashMap;
use std::io::{Cursor, Seek, Write};

const CUT_LINE_WIDTH: f32 = 0.5;
const CUT_LINE_GRAY: Color = Color::gray(128);

/// Renders card sheets into a Word document, one page per sheet.
pub struct DocxCardRenderer<W: Write + Seek> {
    package: Option<DocxPackage<W>>,
    /// Image key to relationship id.
    images: HashMap<String, String>,
    body: String,
    page_size: Option<Size>,
    pages: usize,
    next_shape_id: u32,
}

impl<W: Write + Seek> Default for DocxCardRenderer<W> {
    fn default() -> Self {
        Self::new()
    }
}

fn docx_error(e: zip::result::ZipError) -> RenderError {
    RenderError::Docx(e.to_string())
}

/// Picks the stored form of an image: formats Word displays natively keep
/// their bytes, anything else is re-encoded as PNG.
fn media_for(resource: &ImageResource) -> Result<(Vec<u8>, &'static str), RenderError> {
    let image_error = |message: String| RenderError::Image {
        reference: resource.source.clone(),
        message,
    };
    let format = image::guess_format(&resource.data).map_err(|e| image_error(e.to_string()))?;
    let extension = match format {
        ImageFormat::Png => Some("png"),
        ImageFormat::Jpeg => Some("jpeg"),
        ImageFormat::Gif => Some("gif"),
        ImageFormat::Bmp => Some("bmp"),
        _ => None,
    };
    if let Some(extension) = extension {
        return Ok(((*resource.data).clone(), extension));
    }

    log::debug!("Converting '{}' ({:?}) to PNG for Word", resource.source, format);
    let decoded = image::load_from_memory(&resource.data).map_err(|e| image_error(e.to_string()))?;
    let mut out = Cursor::new(Vec::new());
    decoded
        .write_to(&mut out, ImageFormat::Png)
        .map_err(|e| image_error(e.to_string()))?;
    Ok((out.into_inner(), "png"))
}

impl<W: Write + Seek> DocxCardRenderer<W> {
    pub fn new() -> Self {
        Self {
            package: None,
            images: HashMap::new(),
            body: String::new(),
            page_size: None,
            pages: 0,
            next_shape_id: 1,
        }
    }

    fn shape_id(&mut self) -> u32 {
        let id = self.next_shape_id;
        self.next_shape_id += 1;
        id
    }
}

impl<W: Write + Seek> CardRenderer<W> for DocxCardRenderer<W> {
    fn begin_document(&mut self, writer: W) -> Result<(), RenderError> {
        self.package = Some(DocxPackage::new(writer));
        Ok(())
    }

    fn add_image(&mut self, resource: &ImageResource) -> Result<(), RenderError> {
        if self.images.contains_key(&resource.key) {
            return Ok(());
        }
        let (data, extension) = media_for(resource)?;
        let package = self
            .package
            .as_mut()
            .ok_or_else(|| RenderError::Other("Document not started".into()))?;
        let relationship = package.add_media(&data, extension).map_err(docx_error)?;
        self.images.insert(resource.key.clone(), relationship);
        Ok(())
    }

    fn render_page(&mut self, page: &PageContent) -> Result<(), RenderError> {
        if self.package.is_none() {
            return Err(RenderError::Other("Document not started".into()));
        }
        if self.page_size.is_none() {
            self.page_size = Some(page.size);
        }

        let mut runs = String::new();
        let mut z = 0u32;
        for item in &page.items {
            z += 1;
            let id = self.shape_id();
            match item {
                DrawItem::Fill { rect, color } => {
                    runs.push_str(&drawing::filled_rect(&Anchor::from_rect(id, z, rect), *color));
                }
                DrawItem::Text { rect, content, font, font_size, color } => {
                    let style = RunStyle {
                        family: &font.family,
                        font_size: *font_size,
                        bold: font.bold,
                        italic: font.italic,
                        color: *color,
                    };
                    runs.push_str(&drawing::text_box(&Anchor::from_rect(id, z, rect), content, &style));
                }
                DrawItem::Image { rect, key } => match self.images.get(key) {
                    Some(relationship) => {
                        runs.push_str(&drawing::picture(&Anchor::from_rect(id, z, rect), relationship));
                    }
                    None => log::warn!("Image '{}' was not registered before use; skipped", key),
                },
            }
        }
        for line in &page.cut_lines {
            z += 1;
            let id = self.shape_id();
            runs.push_str(&drawing::cut_line(id, z, line, CUT_LINE_WIDTH, CUT_LINE_GRAY));
        }

        let paragraph_props = if self.pages > 0 {
            "<w:pPr><w:pageBreakBefore/></w:pPr>"
        } else {
            ""
        };
        self.body.push_str(&format!("<w:p>{}{}</w:p>", paragraph_props, runs));
        self.pages += 1;
        Ok(())
    }

    fn finish(mut self: Box<Self>) -> Result<W, RenderError> {
        let package = self
            .package
            .take()
            .ok_or_else(|| RenderError::Other("Document not started".into()))?;
        let size = self.page_size.unwrap_or(Size::new(612.0, 792.0));
        log::debug!("Finishing Word document with {} page(s)", self.pages);
        package.finish(&self.body, size.width, size.height).map_err(docx_error)
    }

    fn name(&self) -> &'static str {
        "docx"
    }
}
