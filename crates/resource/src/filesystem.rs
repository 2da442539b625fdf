//! Filesystem-based image provider.
//!
//! Relative references (`images/logo.png`) are resolved against a base
//! directory, normally the project directory, and may not climb out of it.
//! Absolute references point at files the user picked that have not been
//! copied into the project yet; they are only honoured when enabled.

use cardpress_traits::{AssetError, ImageProvider, SharedImageData};
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;

#[derive(Debug)]
pub struct FilesystemImageProvider {
    base_path: PathBuf,
    /// Canonicalized base path for containment checks
    canonical_base: Option<PathBuf>,
    allow_absolute: bool,
}

impl FilesystemImageProvider {
    /// A provider resolving relative references against `base_path`.
    /// Absolute references are accepted.
    pub fn new<P: AsRef<Path>>(base_path: P) -> Self {
        let base = base_path.as_ref().to_path_buf();
        // may fail if the directory does not exist yet
        let canonical = base.canonicalize().ok();
        Self {
            base_path: base,
            canonical_base: canonical,
            allow_absolute: true,
        }
    }

    /// Restricts the provider to references inside the base directory.
    pub fn confined(mut self) -> Self {
        self.allow_absolute = false;
        self
    }

    pub fn base(&self) -> &Path {
        &self.base_path
    }

    /// Maps a reference to a concrete path, or `None` if it is not allowed.
    pub fn resolve(&self, reference: &str) -> Option<PathBuf> {
        let path = Path::new(reference);
        if path.is_absolute() {
            return self.allow_absolute.then(|| path.to_path_buf());
        }

        let full_path = self.base_path.join(path);

        if let Ok(canonical) = full_path.canonicalize()
            && let Some(ref base) = self.canonical_base
        {
            return canonical.starts_with(base).then_some(canonical);
        }

        // File missing: fall back to a lexical check
        if path.components().any(|c| matches!(c, Component::ParentDir)) {
            return None;
        }
        Some(full_path)
    }
}

impl ImageProvider for FilesystemImageProvider {
    fn load(&self, reference: &str) -> Result<SharedImageData, AssetError> {
        let full_path = self
            .resolve(reference)
            .ok_or_else(|| AssetError::OutsideRoot(reference.to_string()))?;

        log::debug!("Loading image '{}' from {}", reference, full_path.display());
        std::fs::read(&full_path).map(Arc::new).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                AssetError::NotFound(reference.to_string())
            } else {
                AssetError::LoadFailed {
                    path: reference.to_string(),
                    message: e.to_string(),
                }
            }
        })
    }

    fn exists(&self, reference: &str) -> bool {
        self.resolve(reference).is_some_and(|p| p.is_file())
    }

    fn name(&self) -> &'static str {
        "FilesystemImageProvider"
    }
}
