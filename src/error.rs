use cardpress_import::ImportError;
use cardpress_layout::LayoutError;
use cardpress_model::ModelError;
use cardpress_project::ProjectError;
use cardpress_render_core::RenderError;
use thiserror::Error;

/// Failures of a whole export. Problems with a single field are reported as
/// warnings instead.
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Unsupported export format '{0}' (expected pdf or docx)")]
    UnsupportedFormat(String),

    #[error("There are no cards to export")]
    NoData,

    #[error("Layout failed: {0}")]
    Layout(#[from] LayoutError),

    #[error("Rendering failed: {0}")]
    Render(RenderError),
}

impl From<RenderError> for ExportError {
    fn from(e: RenderError) -> Self {
        match e {
            RenderError::Io(io) => ExportError::Io(io),
            other => ExportError::Render(other),
        }
    }
}

/// Any error the library can produce.
#[derive(Error, Debug)]
pub enum CardpressError {
    #[error(transparent)]
    Export(#[from] ExportError),

    #[error(transparent)]
    Project(#[from] ProjectError),

    #[error(transparent)]
    Import(#[from] ImportError),

    #[error(transparent)]
    Model(#[from] ModelError),

    #[error(transparent)]
    Layout(#[from] LayoutError),
}
