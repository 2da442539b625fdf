//! `ImageProvider` trait for loading the files image fields point at.
//!
//! Export backends only ever see image bytes through this trait, so they work
//! the same whether the images live in a project directory or in memory.

use std::collections::HashMap;
use std::fmt::Debug;
use std::sync::Arc;
use thiserror::Error;

/// Error type for image loading.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AssetError {
    #[error("Image not found: {0}")]
    NotFound(String),

    #[error("Failed to load image '{path}': {message}")]
    LoadFailed { path: String, message: String },

    #[error("Image reference escapes the asset directory: {0}")]
    OutsideRoot(String),
}

/// Image bytes shared between every card that shows the same file.
pub type SharedImageData = Arc<Vec<u8>>;

/// Resolves an image field's stored value to the bytes of the file.
///
/// # Implementations
///
/// - `FilesystemImageProvider` (cardpress-resource): project directories
/// - [`InMemoryImageProvider`]: pre-populated map, used in tests and previews
pub trait ImageProvider: Debug {
    /// Load the image referenced by `reference` (an image field's value).
    fn load(&self, reference: &str) -> Result<SharedImageData, AssetError>;

    /// `true` if `reference` can be loaded.
    fn exists(&self, reference: &str) -> bool;

    /// Human-readable name for log messages.
    fn name(&self) -> &'static str;
}

/// An image provider backed by a map of reference to bytes.
#[derive(Debug, Default, Clone)]
pub struct InMemoryImageProvider {
    images: HashMap<String, SharedImageData>,
}

impl InMemoryImageProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `data` under `reference`, replacing any previous entry.
    pub fn add(&mut self, reference: impl Into<String>, data: Vec<u8>) {
        self.images.insert(reference.into(), Arc::new(data));
    }

    pub fn with(mut self, reference: impl Into<String>, data: Vec<u8>) -> Self {
        self.add(reference, data);
        self
    }

    pub fn remove(&mut self, reference: &str) -> Option<SharedImageData> {
        self.images.remove(reference)
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }
}

impl ImageProvider for InMemoryImageProvider {
    fn load(&self, reference: &str) -> Result<SharedImageData, AssetError> {
        self.images
            .get(reference)
            .cloned()
            .ok_or_else(|| AssetError::NotFound(reference.to_string()))
    }

    fn exists(&self, reference: &str) -> bool {
        self.images.contains_key(reference)
    }

    fn name(&self) -> &'static str {
        "InMemoryImageProvider"
    }
}
