use crate::error::ProjectError;
use crate::images::{self, IMAGES_DIR};
use crate::persistence::PROJECT_FILE;
use cardpress_model::{CardDeck, CardTemplate, ModelError};
use std::path::{Path, PathBuf};

/// A named card deck bound to its directory on disk.
#[derive(Debug, Clone)]
pub struct Project {
    name: String,
    dir: PathBuf,
    pub deck: CardDeck,
}

impl Project {
    pub fn new(name: impl Into<String>, dir: impl Into<PathBuf>, deck: CardDeck) -> Self {
        Self {
            name: name.into(),
            dir: dir.into(),
            deck,
        }
    }

    /// A project with the default field set and no cards.
    pub fn with_default_template(name: impl Into<String>, dir: impl Into<PathBuf>) -> Self {
        Self::new(name, dir, CardDeck::new(CardTemplate::with_default_fields()))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn project_file(&self) -> PathBuf {
        self.dir.join(PROJECT_FILE)
    }

    pub fn images_dir(&self) -> PathBuf {
        self.dir.join(IMAGES_DIR)
    }

    /// Copies `source` into the project's images directory and stores the
    /// new relative path as the value of `field_id` on card `record`.
    /// Files already inside the images directory are not copied again.
    pub fn assign_image(&mut self, record: usize, field_id: &str, source: &Path) -> Result<String, ProjectError> {
        match self.deck.template.field(field_id) {
            Some(field) if field.is_image() => {}
            Some(_) => return Err(ProjectError::NotAnImageField(field_id.to_string())),
            None => return Err(ModelError::UnknownField(field_id.to_string()).into()),
        }
        if self.deck.record(record).is_none() {
            return Err(ModelError::UnknownRecord(record).into());
        }

        let value = match source.to_str().and_then(|s| images::internal_value(&self.dir, s)) {
            Some(internal) => internal,
            None => images::copy_into_project(&self.dir, source)?,
        };
        self.deck.set_value(record, field_id, value.clone())?;
        log::info!("Assigned image {} to card {} field '{}'", value, record, field_id);
        Ok(value)
    }
}
