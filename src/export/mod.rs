//! The export engine: pages a deck's records onto sheets and drives a
//! format backend over the resulting draw lists.

mod builder;
mod engine;
mod format;

pub use builder::{DEFAULT_CARDS_PER_PAGE, ExportBuilder};
pub use engine::{ExportReport, Exporter};
pub use format::ExportFormat;
