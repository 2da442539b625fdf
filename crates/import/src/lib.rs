//! Excel import.
//!
//! The first row of the first worksheet names the fields; every following
//! row with at least one value becomes a card. Columns whose header or
//! values look like image file names become image fields.

mod error;
mod excel;
mod rows;

pub use error::ImportError;
pub use excel::{import_workbook, read_first_sheet};
pub use rows::{IMAGE_EXTENSIONS, IMAGE_KEYWORDS, SAMPLE_ROWS, import_rows};
