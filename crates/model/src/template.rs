use crate::error::ModelError;
use crate::field::{FieldDefinition, FieldKind};
use cardpress_types::Color;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// The layout shared by every card in a project.
///
/// Field identifiers are unique and insertion order is preserved; that order
/// breaks ties between fields with the same z-index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawTemplate")]
pub struct CardTemplate {
    fields: Vec<FieldDefinition>,
    background: Color,
}

#[derive(Deserialize)]
struct RawTemplate {
    fields: Vec<FieldDefinition>,
    #[serde(default = "white")]
    background: Color,
}

fn white() -> Color {
    Color::WHITE
}

impl TryFrom<RawTemplate> for CardTemplate {
    type Error = ModelError;

    fn try_from(raw: RawTemplate) -> Result<Self, Self::Error> {
        let mut template = CardTemplate::new();
        template.background = raw.background;
        for field in raw.fields {
            template.push_field(field)?;
        }
        Ok(template)
    }
}

impl Default for CardTemplate {
    fn default() -> Self {
        Self::new()
    }
}

impl CardTemplate {
    /// An empty template with a white background.
    pub fn new() -> Self {
        Self {
            fields: Vec::new(),
            background: Color::WHITE,
        }
    }

    /// The starter layout used for a brand-new project.
    pub fn with_default_fields() -> Self {
        const DEFAULTS: [(&str, FieldKind, f32, f32, f32, f32); 6] = [
            ("Name", FieldKind::Text, 10.0, 10.0, 150.0, 25.0),
            ("Title", FieldKind::Text, 10.0, 40.0, 150.0, 20.0),
            ("Company", FieldKind::Text, 10.0, 65.0, 150.0, 20.0),
            ("Email", FieldKind::Text, 10.0, 95.0, 150.0, 18.0),
            ("Phone", FieldKind::Text, 10.0, 118.0, 150.0, 18.0),
            ("Photo", FieldKind::Image, 220.0, 10.0, 80.0, 80.0),
        ];
        let fields = DEFAULTS
            .iter()
            .map(|&(id, kind, x, y, w, h)| FieldDefinition::new(id, kind).at(x, y).sized(w, h))
            .collect();
        Self {
            fields,
            background: Color::WHITE,
        }
    }

    pub fn fields(&self) -> &[FieldDefinition] {
        &self.fields
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn background(&self) -> Color {
        self.background
    }

    pub fn set_background(&mut self, color: Color) {
        self.background = color;
    }

    pub fn with_background(mut self, color: Color) -> Self {
        self.background = color;
        self
    }

    pub fn field(&self, id: &str) -> Option<&FieldDefinition> {
        self.fields.iter().find(|f| f.id == id)
    }

    pub(crate) fn field_mut(&mut self, id: &str) -> Result<&mut FieldDefinition, ModelError> {
        self.fields
            .iter_mut()
            .find(|f| f.id == id)
            .ok_or_else(|| ModelError::UnknownField(id.to_string()))
    }

    pub fn position(&self, id: &str) -> Option<usize> {
        self.fields.iter().position(|f| f.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.position(id).is_some()
    }

    /// Appends a validated field, rejecting duplicate identifiers.
    pub fn push_field(&mut self, field: FieldDefinition) -> Result<(), ModelError> {
        field.validate()?;
        if self.contains(&field.id) {
            return Err(ModelError::DuplicateField(field.id));
        }
        self.fields.push(field);
        Ok(())
    }

    /// Builder form of [`push_field`](Self::push_field).
    pub fn with_field(mut self, field: FieldDefinition) -> Result<Self, ModelError> {
        self.push_field(field)?;
        Ok(self)
    }

    pub(crate) fn take_field(&mut self, id: &str) -> Option<FieldDefinition> {
        let idx = self.position(id)?;
        Some(self.fields.remove(idx))
    }

    pub fn max_z_index(&self) -> i32 {
        self.fields.iter().map(|f| f.z_index).max().unwrap_or(0)
    }

    pub fn min_z_index(&self) -> i32 {
        self.fields.iter().map(|f| f.z_index).min().unwrap_or(0)
    }

    /// Fields in draw order: ascending z-index, ties kept in template order.
    pub fn fields_in_draw_order(&self) -> Vec<&FieldDefinition> {
        let mut ordered: Vec<&FieldDefinition> = self.fields.iter().collect();
        // sort_by_key is stable, so equal z-indices keep insertion order
        ordered.sort_by_key(|f| f.z_index);
        ordered
    }

    /// `base` if unused, otherwise the first free `base_1`, `base_2`, ...
    pub fn unique_field_name(&self, base: &str) -> String {
        let existing: HashSet<&str> = self.fields.iter().map(|f| f.id.as_str()).collect();
        if !existing.contains(base) {
            return base.to_string();
        }
        (1..)
            .map(|n| format!("{}_{}", base, n))
            .find(|candidate| !existing.contains(candidate.as_str()))
            .unwrap_or_else(|| base.to_string())
    }
}
