//! Business card sheets from a shared template.
//!
//! A project holds a [`CardTemplate`] (positioned text and image fields) and
//! a list of [`CardRecord`]s (one card's values each). Export tiles the cards
//! onto printable pages with cut lines and writes PDF or Word documents.
//!
//! ```no_run
//! use cardpress::{ExportFormat, ProjectStore};
//!
//! # fn main() -> Result<(), cardpress::CardpressError> {
//! let store = ProjectStore::from_env()?;
//! let project = store.open("team")?;
//! let report = cardpress::export_project(&project, 10, ExportFormat::Pdf, "team.pdf".as_ref())?;
//! println!("{} pages", report.pages);
//! # Ok(())
//! # }
//! ```

mod error;
pub mod export;

pub use error::{CardpressError, ExportError};
pub use export::{DEFAULT_CARDS_PER_PAGE, ExportBuilder, ExportFormat, ExportReport, Exporter};

pub use cardpress_import::{ImportError, import_rows, import_workbook};
pub use cardpress_layout::{LayoutError, PageSetup, PageTiling, PositionedField, resolve, tile_page};
pub use cardpress_model::{
    CardDeck, CardRecord, CardTemplate, FieldDefinition, FieldKind, ModelError, TextStyle,
};
pub use cardpress_project::{Project, ProjectError, ProjectStore, SaveReport};
pub use cardpress_types::{Color, Point, Rect, Size};

use std::path::Path;

/// Exports `records` laid out by `template`. Relative image references are
/// resolved against the working directory.
pub fn export(
    template: &CardTemplate,
    records: &[CardRecord],
    cards_per_page: usize,
    format: ExportFormat,
    destination: &Path,
) -> Result<ExportReport, ExportError> {
    ExportBuilder::new()
        .with_format(format)
        .with_cards_per_page(cards_per_page)
        .build()?
        .export(template, records, destination)
}

/// Exports a project's cards, resolving its `images/` paths against the
/// project directory.
pub fn export_project(
    project: &Project,
    cards_per_page: usize,
    format: ExportFormat,
    destination: &Path,
) -> Result<ExportReport, ExportError> {
    ExportBuilder::new()
        .with_format(format)
        .with_cards_per_page(cards_per_page)
        .with_asset_root(project.dir())
        .build()?
        .export(&project.deck.template, &project.deck.records, destination)
}
