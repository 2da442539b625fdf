use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ImportError {
    #[error("Could not read spreadsheet {path}: {message}")]
    UnreadableFile { path: PathBuf, message: String },

    #[error("The first row of the spreadsheet has no column names")]
    EmptyHeader,
}
