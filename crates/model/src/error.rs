use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ModelError {
    #[error("A field named '{0}' already exists")]
    DuplicateField(String),

    #[error("Unknown field: {0}")]
    UnknownField(String),

    #[error("Field identifier must not be empty")]
    EmptyIdentifier,

    #[error("Invalid geometry for field '{id}': width and height must be positive (got {width}x{height})")]
    InvalidGeometry { id: String, width: f32, height: f32 },

    #[error("No card at index {0}")]
    UnknownRecord(usize),
}
