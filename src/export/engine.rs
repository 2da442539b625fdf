use super::format::ExportFormat;
use crate::error::ExportError;
use cardpress_layout::{CardSlot, PageSetup, PageTiling, PositionedField, resolve};
use cardpress_model::{CardRecord, CardTemplate, FieldKind};
use cardpress_render_core::utils::letterbox;
use cardpress_render_core::{CardRenderer, DrawItem, FontSpec, ImageResource, PageContent, RenderError};
use cardpress_render_docx::DocxCardRenderer;
use cardpress_render_lopdf::LopdfCardRenderer;
use cardpress_resource::match_destination_permissions;
use cardpress_traits::ImageProvider;
use cardpress_types::Size;
use std::collections::HashMap;
use std::io::{Cursor, Seek, Write};
use std::path::Path;
use std::sync::Arc;
use tempfile::NamedTempFile;

/// Summary of a finished export.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportReport {
    pub format: ExportFormat,
    pub pages: usize,
    pub cards: usize,
    /// Fields that were skipped, one message per affected card field.
    pub warnings: Vec<String>,
}

/// Renders card decks to documents. Built by
/// [`ExportBuilder`](super::builder::ExportBuilder).
pub struct Exporter {
    format: Option<ExportFormat>,
    page_setup: PageSetup,
    tiling: PageTiling,
    images: Arc<dyn ImageProvider>,
}

fn renderer_for<'w, W: Write + Seek + 'w>(format: ExportFormat) -> Box<dyn CardRenderer<W> + 'w> {
    match format {
        ExportFormat::Pdf => Box::new(LopdfCardRenderer::new()),
        ExportFormat::Docx => Box::new(DocxCardRenderer::new()),
    }
}

fn probe_dimensions(data: &[u8]) -> Result<(u32, u32), String> {
    image::ImageReader::new(Cursor::new(data))
        .with_guessed_format()
        .map_err(|e| e.to_string())?
        .into_dimensions()
        .map_err(|e| e.to_string())
}

/// Images seen during one export, keyed by reference. Failures are cached
/// too so a missing file is only looked up once.
struct ImageCache {
    entries: HashMap<String, Result<Size, String>>,
}

impl ImageCache {
    fn new() -> Self {
        Self { entries: HashMap::new() }
    }

    fn get<W: Write + Seek>(
        &mut self,
        reference: &str,
        provider: &dyn ImageProvider,
        renderer: &mut dyn CardRenderer<W>,
    ) -> Result<Result<Size, String>, ExportError> {
        if let Some(entry) = self.entries.get(reference) {
            return Ok(entry.clone());
        }
        let entry = Self::load(reference, provider, renderer)?;
        self.entries.insert(reference.to_string(), entry.clone());
        Ok(entry)
    }

    fn load<W: Write + Seek>(
        reference: &str,
        provider: &dyn ImageProvider,
        renderer: &mut dyn CardRenderer<W>,
    ) -> Result<Result<Size, String>, ExportError> {
        let data = match provider.load(reference) {
            Ok(data) => data,
            Err(e) => return Ok(Err(e.to_string())),
        };
        let (width, height) = match probe_dimensions(&data) {
            Ok(dims) => dims,
            Err(e) => return Ok(Err(format!("image '{}' could not be read: {}", reference, e))),
        };
        let resource = ImageResource {
            key: reference.to_string(),
            source: reference.to_string(),
            data,
            width,
            height,
        };
        match renderer.add_image(&resource) {
            Ok(()) => Ok(Ok(resource.pixel_size())),
            Err(RenderError::Image { message, .. }) => {
                Ok(Err(format!("image '{}' could not be decoded: {}", reference, message)))
            }
            Err(e) => Err(e.into()),
        }
    }
}

impl Exporter {
    pub(crate) fn new(
        format: Option<ExportFormat>,
        page_setup: PageSetup,
        tiling: PageTiling,
        images: Arc<dyn ImageProvider>,
    ) -> Self {
        Self {
            format,
            page_setup,
            tiling,
            images,
        }
    }

    pub fn cards_per_page(&self) -> usize {
        self.tiling.cards_per_page()
    }

    pub fn page_setup(&self) -> &PageSetup {
        &self.page_setup
    }

    pub fn tiling(&self) -> &PageTiling {
        &self.tiling
    }

    /// The configured format, or the one implied by `destination`.
    pub fn format_for(&self, destination: &Path) -> Result<ExportFormat, ExportError> {
        match self.format {
            Some(format) => Ok(format),
            None => ExportFormat::from_path(destination),
        }
    }

    /// Exports `records` to `destination`. The document is written to a
    /// temporary file beside the destination and moved into place only once
    /// complete, so a failed export leaves no partial file.
    pub fn export(
        &self,
        template: &CardTemplate,
        records: &[CardRecord],
        destination: &Path,
    ) -> Result<ExportReport, ExportError> {
        let format = self.format_for(destination)?;
        if records.is_empty() {
            return Err(ExportError::NoData);
        }
        let dir = match destination.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        let tmp = NamedTempFile::new_in(dir)?;
        let (tmp, report) = self.export_to_writer(template, records, format, tmp)?;
        match_destination_permissions(tmp.as_file(), destination)?;
        tmp.persist(destination).map_err(|e| e.error)?;

        log::info!(
            "Exported {} cards on {} page(s) to {} ({} warning(s))",
            report.cards,
            report.pages,
            destination.display(),
            report.warnings.len()
        );
        Ok(report)
    }

    /// Renders into `writer` and hands it back with the report.
    pub fn export_to_writer<W: Write + Seek>(
        &self,
        template: &CardTemplate,
        records: &[CardRecord],
        format: ExportFormat,
        writer: W,
    ) -> Result<(W, ExportReport), ExportError> {
        if records.is_empty() {
            return Err(ExportError::NoData);
        }
        let card = self.page_setup.card;
        let fields = resolve(template, card.width, card.height);
        let per_page = self.tiling.cards_per_page();

        let mut renderer = renderer_for::<W>(format);
        log::debug!("Rendering {} cards with the {} backend", records.len(), renderer.name());
        renderer.begin_document(writer)?;

        let mut images = ImageCache::new();
        let mut warnings = Vec::new();
        let mut pages = 0;
        for (page_index, chunk) in records.chunks(per_page).enumerate() {
            let mut page = PageContent {
                size: self.tiling.page,
                items: Vec::new(),
                cut_lines: self.tiling.cut_lines.clone(),
            };
            for (slot, record) in self.tiling.slots.iter().zip(chunk) {
                let card_number = page_index * per_page + slot.index + 1;
                page.items.push(DrawItem::Fill {
                    rect: slot.rect,
                    color: template.background(),
                });
                for positioned in &fields {
                    let placed = self.place_field(
                        positioned,
                        slot,
                        record,
                        &mut images,
                        renderer.as_mut(),
                    )?;
                    match placed {
                        Ok(Some(item)) => page.items.push(item),
                        Ok(None) => {}
                        Err(reason) => {
                            let warning = format!("card {} field '{}': {}", card_number, positioned.field.id, reason);
                            log::warn!("{}", warning);
                            warnings.push(warning);
                        }
                    }
                }
            }
            renderer.render_page(&page)?;
            pages += 1;
        }
        let writer = renderer.finish()?;

        let report = ExportReport {
            format,
            pages,
            cards: records.len(),
            warnings,
        };
        Ok((writer, report))
    }

    /// The draw item for one field of one card. `Ok(Err(_))` is a skipped
    /// field with the reason; `Ok(Ok(None))` is a blank text value.
    fn place_field<W: Write + Seek>(
        &self,
        positioned: &PositionedField<'_>,
        slot: &CardSlot,
        record: &CardRecord,
        images: &mut ImageCache,
        renderer: &mut dyn CardRenderer<W>,
    ) -> Result<Result<Option<DrawItem>, String>, ExportError> {
        let field = positioned.field;
        let rect = slot.place(positioned.rect);
        let value = record.get(&field.id);

        match field.kind {
            FieldKind::Text => {
                if value.is_empty() {
                    return Ok(Ok(None));
                }
                Ok(Ok(Some(DrawItem::Text {
                    rect,
                    content: value.to_string(),
                    font: FontSpec {
                        family: field.style.font_family.clone(),
                        bold: field.style.bold,
                        italic: field.style.italic,
                    },
                    font_size: positioned.font_size,
                    color: field.style.color,
                })))
            }
            FieldKind::Image => {
                let reference = value.trim();
                if reference.is_empty() {
                    return Ok(Err("no image set".to_string()));
                }
                Ok(images
                    .get(reference, self.images.as_ref(), renderer)?
                    .map(|pixels| {
                        Some(DrawItem::Image {
                            rect: letterbox(pixels, &rect),
                            key: reference.to_string(),
                        })
                    }))
            }
        }
    }
}
