use crate::error::ModelError;
use cardpress_types::{Color, Rect};
use serde::{Deserialize, Serialize};

/// What a field holds: a line of text or a reference to an image file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    #[default]
    Text,
    Image,
}

impl FieldKind {
    /// Default size in design units for a freshly added field of this kind.
    pub fn default_size(self) -> (f32, f32) {
        match self {
            FieldKind::Text => (100.0, 25.0),
            FieldKind::Image => (80.0, 80.0),
        }
    }
}

/// Text styling. Image fields carry one too but never read it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextStyle {
    pub font_family: String,
    pub font_size: f32,
    pub color: Color,
    pub bold: bool,
    pub italic: bool,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            font_family: "Arial".to_string(),
            font_size: 12.0,
            color: Color::BLACK,
            bold: false,
            italic: false,
        }
    }
}

fn default_width() -> f32 {
    100.0
}

fn default_height() -> f32 {
    30.0
}

/// One placeholder on a card. Geometry is in design units on the
/// [`DESIGN_WIDTH`](crate::DESIGN_WIDTH) x [`DESIGN_HEIGHT`](crate::DESIGN_HEIGHT) canvas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDefinition {
    pub id: String,
    pub kind: FieldKind,
    #[serde(default)]
    pub x: f32,
    #[serde(default)]
    pub y: f32,
    #[serde(default = "default_width")]
    pub width: f32,
    #[serde(default = "default_height")]
    pub height: f32,
    #[serde(default)]
    pub z_index: i32,
    #[serde(default)]
    pub style: TextStyle,
}

impl FieldDefinition {
    pub fn new(id: impl Into<String>, kind: FieldKind) -> Self {
        let (width, height) = kind.default_size();
        Self {
            id: id.into(),
            kind,
            x: 0.0,
            y: 0.0,
            width,
            height,
            z_index: 0,
            style: TextStyle::default(),
        }
    }

    pub fn text(id: impl Into<String>) -> Self {
        Self::new(id, FieldKind::Text)
    }

    pub fn image(id: impl Into<String>) -> Self {
        Self::new(id, FieldKind::Image)
    }

    pub fn at(mut self, x: f32, y: f32) -> Self {
        self.x = x;
        self.y = y;
        self
    }

    pub fn sized(mut self, width: f32, height: f32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn with_z_index(mut self, z_index: i32) -> Self {
        self.z_index = z_index;
        self
    }

    pub fn with_style(mut self, style: TextStyle) -> Self {
        self.style = style;
        self
    }

    pub fn is_image(&self) -> bool {
        self.kind == FieldKind::Image
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }

    pub fn validate(&self) -> Result<(), ModelError> {
        if self.id.trim().is_empty() {
            return Err(ModelError::EmptyIdentifier);
        }
        if !(self.width > 0.0 && self.height > 0.0) {
            return Err(ModelError::InvalidGeometry {
                id: self.id.clone(),
                width: self.width,
                height: self.height,
            });
        }
        Ok(())
    }
}
