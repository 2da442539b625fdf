use crate::helpers::PageContext;
use crate::writer::StreamingPdfWriter;
use cardpress_render_core::utils::get_styled_font_name;
use cardpress_render_core::{CardRenderer, DrawItem, ImageResource, PageContent, RenderError};
use image::GenericImageView;
use lopdf::{Dictionary, Object, ObjectId, Stream, dictionary};
use std::collections::BTreeMap;
use std::io::{Seek, Write};

const PDF_VERSION: &str = "1.7";

/// Renders card sheets to PDF using the standard fonts.
pub struct LopdfCardRenderer<W: Write + Seek> {
    writer: Option<StreamingPdfWriter<W>>,
    /// Base font name to resource name, filled as fonts are first used.
    fonts: BTreeMap<&'static str, String>,
    /// Image key to (resource name, XObject id).
    images: BTreeMap<String, (String, ObjectId)>,
}

impl<W: Write + Seek> Default for LopdfCardRenderer<W> {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: Write + Seek> LopdfCardRenderer<W> {
    pub fn new() -> Self {
        Self {
            writer: None,
            fonts: BTreeMap::new(),
            images: BTreeMap::new(),
        }
    }

    fn writer_mut(&mut self) -> Result<&mut StreamingPdfWriter<W>, RenderError> {
        self.writer
            .as_mut()
            .ok_or_else(|| RenderError::Other("Document not started".into()))
    }

    fn font_resource(&mut self, base_font: &'static str) -> String {
        let next = self.fonts.len() + 1;
        self.fonts.entry(base_font).or_insert_with(|| format!("F{}", next)).clone()
    }

    fn resources(&self) -> Dictionary {
        let mut font_dict = Dictionary::new();
        for (base_font, resource) in &self.fonts {
            font_dict.set(
                resource.as_str(),
                dictionary! {
                    "Type" => "Font",
                    "Subtype" => "Type1",
                    "BaseFont" => *base_font,
                    "Encoding" => "WinAnsiEncoding",
                },
            );
        }
        let mut xobject_dict = Dictionary::new();
        for (resource, id) in self.images.values() {
            xobject_dict.set(resource.as_str(), Object::Reference(*id));
        }
        dictionary! { "Font" => font_dict, "XObject" => xobject_dict }
    }
}

fn pdf_error(e: lopdf::Error) -> RenderError {
    RenderError::Pdf(e.to_string())
}

impl<W: Write + Seek> CardRenderer<W> for LopdfCardRenderer<W> {
    fn begin_document(&mut self, writer: W) -> Result<(), RenderError> {
        self.writer = Some(StreamingPdfWriter::new(writer, PDF_VERSION)?);
        Ok(())
    }

    fn add_image(&mut self, resource: &ImageResource) -> Result<(), RenderError> {
        if self.images.contains_key(&resource.key) {
            return Ok(());
        }
        let decoded = image::load_from_memory(&resource.data).map_err(|e| RenderError::Image {
            reference: resource.source.clone(),
            message: e.to_string(),
        })?;
        let (width, height) = decoded.dimensions();

        let mut image_dict = dictionary! {
            "Type" => "XObject",
            "Subtype" => "Image",
            "Width" => width as i64,
            "Height" => height as i64,
            "ColorSpace" => "DeviceRGB",
            "BitsPerComponent" => 8i64,
        };

        let writer = self.writer_mut()?;
        if decoded.color().has_alpha() {
            let alpha: Vec<u8> = decoded.to_rgba8().pixels().map(|p| p.0[3]).collect();
            let mask = dictionary! {
                "Type" => "XObject",
                "Subtype" => "Image",
                "Width" => width as i64,
                "Height" => height as i64,
                "ColorSpace" => "DeviceGray",
                "BitsPerComponent" => 8i64,
            };
            let mask_id = writer.write_object(&Object::Stream(Stream::new(mask, alpha)))?;
            image_dict.set("SMask", Object::Reference(mask_id));
        }
        let rgb = decoded.to_rgb8().into_raw();
        let id = writer.write_object(&Object::Stream(Stream::new(image_dict, rgb)))?;

        let name = format!("Im{}", self.images.len() + 1);
        log::debug!("Embedded image '{}' as {} ({}x{} px)", resource.source, name, width, height);
        self.images.insert(resource.key.clone(), (name, id));
        Ok(())
    }

    fn render_page(&mut self, page: &PageContent) -> Result<(), RenderError> {
        let mut ctx = PageContext::new(page.size.height);
        for item in &page.items {
            match item {
                DrawItem::Fill { rect, color } => ctx.fill_rect(rect, *color),
                DrawItem::Text { rect, content, font, font_size, color } => {
                    let base_font = get_styled_font_name(&font.family, font.bold, font.italic);
                    let resource = self.font_resource(base_font);
                    ctx.draw_text(rect, content, &resource, *font_size, *color);
                }
                DrawItem::Image { rect, key } => match self.images.get(key) {
                    Some((resource, _)) => ctx.draw_image(rect, resource),
                    None => log::warn!("Image '{}' was not registered before use; skipped", key),
                },
            }
        }
        ctx.draw_cut_lines(&page.cut_lines);

        let content = ctx.finish().encode().map_err(pdf_error)?;
        let writer = self.writer_mut()?;
        let content_id = writer.write_content_stream(content)?;
        let page_dict = dictionary! {
            "Type" => "Page",
            "Parent" => writer.pages_id,
            "MediaBox" => vec![0.0f32.into(), 0.0f32.into(), page.size.width.into(), page.size.height.into()],
            "Contents" => content_id,
            "Resources" => writer.resources_id,
        };
        let page_id = writer.write_object(&page_dict.into())?;
        writer.add_page(page_id);
        Ok(())
    }

    fn finish(mut self: Box<Self>) -> Result<W, RenderError> {
        let resources = self.resources();
        let writer = self
            .writer
            .take()
            .ok_or_else(|| RenderError::Other("Document not started".into()))?;
        log::debug!("Finishing PDF with {} page(s)", writer.page_count());
        Ok(writer.finish(resources)?)
    }

    fn name(&self) -> &'static str {
        "pdf"
    }
}
