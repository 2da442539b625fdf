use super::engine::Exporter;
use super::format::ExportFormat;
use crate::error::ExportError;
use cardpress_layout::PageSetup;
use cardpress_resource::FilesystemImageProvider;
use cardpress_traits::ImageProvider;
use std::path::PathBuf;
use std::sync::Arc;

/// Cards per page used when none is configured: a full sheet of ten.
pub const DEFAULT_CARDS_PER_PAGE: usize = 10;

/// A builder for creating an [`Exporter`].
pub struct ExportBuilder {
    format: Option<ExportFormat>,
    cards_per_page: usize,
    page_setup: PageSetup,
    images: Option<Arc<dyn ImageProvider>>,
}

impl Default for ExportBuilder {
    fn default() -> Self {
        Self {
            format: None,
            cards_per_page: DEFAULT_CARDS_PER_PAGE,
            page_setup: PageSetup::default(),
            images: None,
        }
    }
}

impl ExportBuilder {
    /// Creates a builder with US Letter pages, ten cards per page, and image
    /// references resolved against the working directory.
    pub fn new() -> Self {
        Default::default()
    }

    /// Fixes the output format. Without this the format is inferred from the
    /// destination's extension.
    pub fn with_format(mut self, format: ExportFormat) -> Self {
        self.format = Some(format);
        self
    }

    pub fn with_cards_per_page(mut self, cards_per_page: usize) -> Self {
        self.cards_per_page = cards_per_page;
        self
    }

    pub fn with_page_setup(mut self, page_setup: PageSetup) -> Self {
        self.page_setup = page_setup;
        self
    }

    pub fn with_image_provider(mut self, provider: Arc<dyn ImageProvider>) -> Self {
        self.images = Some(provider);
        self
    }

    /// Resolves relative image references against `root`, typically a
    /// project directory.
    pub fn with_asset_root(self, root: impl Into<PathBuf>) -> Self {
        self.with_image_provider(Arc::new(FilesystemImageProvider::new(root.into())))
    }

    /// Validates the page grid and builds the exporter.
    pub fn build(self) -> Result<Exporter, ExportError> {
        let tiling = self.page_setup.tile(self.cards_per_page)?;
        let images = self
            .images
            .unwrap_or_else(|| Arc::new(FilesystemImageProvider::new(".")));
        log::debug!(
            "Exporter ready: {} cards per page ({}x{}), {} image source",
            self.cards_per_page,
            tiling.cols,
            tiling.rows,
            images.name()
        );
        Ok(Exporter::new(self.format, self.page_setup, tiling, images))
    }
}
