use crate::error::ExportError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// Output document format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Pdf,
    Docx,
}

impl ExportFormat {
    /// Infers the format from a destination file's extension.
    pub fn from_path(path: &Path) -> Result<Self, ExportError> {
        let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("");
        extension.parse()
    }

    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Pdf => "pdf",
            ExportFormat::Docx => "docx",
        }
    }
}

impl FromStr for ExportFormat {
    type Err = ExportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pdf" => Ok(ExportFormat::Pdf),
            "docx" | "word" => Ok(ExportFormat::Docx),
            _ => Err(ExportError::UnsupportedFormat(s.to_string())),
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_names_and_aliases() {
        assert_eq!("pdf".parse::<ExportFormat>().unwrap(), ExportFormat::Pdf);
        assert_eq!("DOCX".parse::<ExportFormat>().unwrap(), ExportFormat::Docx);
        assert_eq!("word".parse::<ExportFormat>().unwrap(), ExportFormat::Docx);
        assert!(matches!("odt".parse::<ExportFormat>(), Err(ExportError::UnsupportedFormat(f)) if f == "odt"));
    }

    #[test]
    fn infers_from_extension() {
        assert_eq!(ExportFormat::from_path(Path::new("out/cards.PDF")).unwrap(), ExportFormat::Pdf);
        assert_eq!(ExportFormat::from_path(Path::new("cards.docx")).unwrap(), ExportFormat::Docx);
        assert!(ExportFormat::from_path(Path::new("cards")).is_err());
    }
}
