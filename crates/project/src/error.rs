use cardpress_model::ModelError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProjectError {
    #[error("Malformed project file: {0}")]
    MalformedProject(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid project name '{0}': names must be non-empty and contain no path separators")]
    InvalidName(String),

    #[error("Project not found: {0}")]
    NotFound(PathBuf),

    #[error("Project already exists: {0}")]
    AlreadyExists(String),

    #[error("Field '{0}' is not an image field")]
    NotAnImageField(String),

    #[error("Could not determine the home directory")]
    NoHomeDirectory,

    #[error(transparent)]
    Model(#[from] ModelError),
}

impl From<serde_json::Error> for ProjectError {
    fn from(e: serde_json::Error) -> Self {
        ProjectError::MalformedProject(e.to_string())
    }
}
