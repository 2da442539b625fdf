use thiserror::Error;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("PDF generation error: {0}")]
    Pdf(String),
    #[error("Word document generation error: {0}")]
    Docx(String),
    #[error("Image '{reference}' could not be decoded: {message}")]
    Image { reference: String, message: String },
    #[error("Other rendering error: {0}")]
    Other(String),
}

impl From<&str> for RenderError {
    fn from(s: &str) -> Self {
        RenderError::Other(s.to_string())
    }
}
