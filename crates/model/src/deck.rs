use crate::error::ModelError;
use crate::field::{FieldDefinition, FieldKind, TextStyle};
use crate::record::CardRecord;
use crate::template::CardTemplate;
use crate::{DESIGN_HEIGHT, DESIGN_WIDTH};
use serde::{Deserialize, Serialize};

/// A template together with the records filled in against it.
///
/// Every mutation that touches both sides (removing or renaming a field) goes
/// through here so records never drift from the template.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CardDeck {
    pub template: CardTemplate,
    #[serde(rename = "cards")]
    pub records: Vec<CardRecord>,
}

impl CardDeck {
    pub fn new(template: CardTemplate) -> Self {
        Self {
            template,
            records: Vec::new(),
        }
    }

    pub fn with_records(template: CardTemplate, records: Vec<CardRecord>) -> Self {
        Self { template, records }
    }

    // --- fields ---

    /// Adds a field centered on the canvas, above every existing field.
    pub fn add_field(&mut self, name: &str, kind: FieldKind) -> Result<&FieldDefinition, ModelError> {
        let (width, height) = kind.default_size();
        let z_index = if self.template.is_empty() {
            0
        } else {
            self.template.max_z_index() + 1
        };
        let field = FieldDefinition::new(name, kind)
            .at(((DESIGN_WIDTH - width) / 2.0).floor(), ((DESIGN_HEIGHT - height) / 2.0).floor())
            .with_z_index(z_index);
        self.insert_field(field)
    }

    /// Adds a prepared field definition as-is.
    pub fn insert_field(&mut self, field: FieldDefinition) -> Result<&FieldDefinition, ModelError> {
        let id = field.id.clone();
        self.template.push_field(field)?;
        log::debug!("Added field '{}'", id);
        self.template
            .field(&id)
            .ok_or(ModelError::UnknownField(id))
    }

    /// Removes a field and drops its key from every record.
    pub fn remove_field(&mut self, id: &str) -> Result<FieldDefinition, ModelError> {
        let removed = self
            .template
            .take_field(id)
            .ok_or_else(|| ModelError::UnknownField(id.to_string()))?;
        for record in &mut self.records {
            record.remove(id);
        }
        log::debug!("Removed field '{}' from template and {} cards", id, self.records.len());
        Ok(removed)
    }

    /// Renames a field and re-keys every record's value.
    pub fn rename_field(&mut self, id: &str, new_id: &str) -> Result<(), ModelError> {
        if id == new_id {
            return Ok(());
        }
        if new_id.trim().is_empty() {
            return Err(ModelError::EmptyIdentifier);
        }
        if self.template.contains(new_id) {
            return Err(ModelError::DuplicateField(new_id.to_string()));
        }
        self.template.field_mut(id)?.id = new_id.to_string();
        for record in &mut self.records {
            record.rename_key(id, new_id);
        }
        Ok(())
    }

    /// Copies a field under a fresh `_n`-suffixed name and puts it on top.
    pub fn duplicate_field(&mut self, id: &str) -> Result<&FieldDefinition, ModelError> {
        let mut copy = self
            .template
            .field(id)
            .cloned()
            .ok_or_else(|| ModelError::UnknownField(id.to_string()))?;
        copy.id = self.template.unique_field_name(id);
        copy.z_index = self.template.max_z_index() + 1;
        self.insert_field(copy)
    }

    pub fn move_field(&mut self, id: &str, x: f32, y: f32) -> Result<(), ModelError> {
        let field = self.template.field_mut(id)?;
        field.x = x;
        field.y = y;
        Ok(())
    }

    pub fn resize_field(&mut self, id: &str, width: f32, height: f32) -> Result<(), ModelError> {
        if !(width > 0.0 && height > 0.0) {
            return Err(ModelError::InvalidGeometry {
                id: id.to_string(),
                width,
                height,
            });
        }
        let field = self.template.field_mut(id)?;
        field.width = width;
        field.height = height;
        Ok(())
    }

    pub fn set_style(&mut self, id: &str, style: TextStyle) -> Result<(), ModelError> {
        self.template.field_mut(id)?.style = style;
        Ok(())
    }

    // --- z-order ---

    pub fn bring_to_front(&mut self, id: &str) -> Result<(), ModelError> {
        let top = self.template.max_z_index() + 1;
        self.template.field_mut(id)?.z_index = top;
        Ok(())
    }

    pub fn send_to_back(&mut self, id: &str) -> Result<(), ModelError> {
        let bottom = self.template.min_z_index() - 1;
        self.template.field_mut(id)?.z_index = bottom;
        Ok(())
    }

    /// Swaps z-index with the next field up the draw order.
    pub fn bring_forward(&mut self, id: &str) -> Result<(), ModelError> {
        self.swap_with_neighbour(id, 1)
    }

    /// Swaps z-index with the next field down the draw order.
    pub fn send_backward(&mut self, id: &str) -> Result<(), ModelError> {
        self.swap_with_neighbour(id, -1)
    }

    fn swap_with_neighbour(&mut self, id: &str, direction: isize) -> Result<(), ModelError> {
        let order: Vec<String> = self
            .template
            .fields_in_draw_order()
            .iter()
            .map(|f| f.id.clone())
            .collect();
        let current = order
            .iter()
            .position(|f| f == id)
            .ok_or_else(|| ModelError::UnknownField(id.to_string()))?;
        let Some(neighbour) = current
            .checked_add_signed(direction)
            .and_then(|idx| order.get(idx))
        else {
            return Ok(());
        };

        let own_z = self.template.field_mut(id)?.z_index;
        let other = self.template.field_mut(neighbour)?;
        let other_z = other.z_index;
        other.z_index = own_z;

        // equal z-indices would leave the order unchanged after the swap
        let new_z = if own_z == other_z {
            own_z + direction as i32
        } else {
            other_z
        };
        self.template.field_mut(id)?.z_index = new_z;
        Ok(())
    }

    // --- records ---

    pub fn add_record(&mut self) -> usize {
        self.records.push(CardRecord::new());
        self.records.len() - 1
    }

    pub fn remove_record(&mut self, index: usize) -> Result<CardRecord, ModelError> {
        if index >= self.records.len() {
            return Err(ModelError::UnknownRecord(index));
        }
        Ok(self.records.remove(index))
    }

    pub fn record(&self, index: usize) -> Option<&CardRecord> {
        self.records.get(index)
    }

    /// Sets a value; the field must exist so no new stale keys get created.
    pub fn set_value(&mut self, index: usize, field_id: &str, value: impl Into<String>) -> Result<(), ModelError> {
        if !self.template.contains(field_id) {
            return Err(ModelError::UnknownField(field_id.to_string()));
        }
        let record = self
            .records
            .get_mut(index)
            .ok_or(ModelError::UnknownRecord(index))?;
        record.set(field_id, value);
        Ok(())
    }
}
