use serde::{Deserialize, Deserializer, Serialize, Serializer, de};
use std::fmt;
use std::str::FromStr;

/// An opaque RGB color, written as `#RRGGBB` in project files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}

impl Color {
    pub const BLACK: Color = Color { r: 0, g: 0, b: 0 };
    pub const WHITE: Color = Color { r: 255, g: 255, b: 255 };

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub const fn gray(value: u8) -> Self {
        Self { r: value, g: value, b: value }
    }

    /// Components scaled to `0.0..=1.0`, the form PDF color operators expect.
    pub fn to_unit_rgb(self) -> [f32; 3] {
        [
            self.r as f32 / 255.0,
            self.g as f32 / 255.0,
            self.b as f32 / 255.0,
        ]
    }

    /// Uppercase hex without the leading `#`, as used by OOXML attributes.
    pub fn to_hex_digits(self) -> String {
        format!("{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }

    /// Parse a hex color string (#RGB or #RRGGBB format)
    fn parse_hex(s: &str) -> Result<Color, String> {
        let s = s.trim();
        let hex = s
            .strip_prefix('#')
            .ok_or_else(|| format!("Color must start with #, got: {}", s))?;

        if !hex.is_ascii() {
            return Err(format!("Color must be hex digits, got: {}", s));
        }

        let channel = |digits: &str, name: &str| {
            u8::from_str_radix(digits, 16).map_err(|e| format!("Invalid {} component: {}", name, e))
        };

        match hex.len() {
            3 => {
                // #RGB format - expand each digit
                let r = channel(&hex[0..1].repeat(2), "red")?;
                let g = channel(&hex[1..2].repeat(2), "green")?;
                let b = channel(&hex[2..3].repeat(2), "blue")?;
                Ok(Color { r, g, b })
            }
            6 => {
                let r = channel(&hex[0..2], "red")?;
                let g = channel(&hex[2..4], "green")?;
                let b = channel(&hex[4..6], "blue")?;
                Ok(Color { r, g, b })
            }
            _ => Err(format!(
                "Invalid hex color length: expected 3 or 6, got {}",
                hex.len()
            )),
        }
    }
}

impl FromStr for Color {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_hex(s)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.to_hex_digits())
    }
}

impl Serialize for Color {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum ColorDef {
            Str(String),
            Map { r: u8, g: u8, b: u8 },
        }

        match ColorDef::deserialize(deserializer)? {
            ColorDef::Str(s) => Self::parse_hex(&s).map_err(de::Error::custom),
            ColorDef::Map { r, g, b } => Ok(Color { r, g, b }),
        }
    }
}
