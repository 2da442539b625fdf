#![allow(dead_code)]

pub mod fixtures;
pub mod pdf_assertions;

use lopdf::Document as LopdfDocument;
use std::io::{Cursor, Read};

pub type TestResult = Result<(), Box<dyn std::error::Error>>;

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Wrapper around a generated PDF with helper methods
pub struct GeneratedPdf {
    pub bytes: Vec<u8>,
    pub doc: LopdfDocument,
}

impl GeneratedPdf {
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self, Box<dyn std::error::Error>> {
        let doc = LopdfDocument::load_mem(&bytes)?;
        Ok(Self { bytes, doc })
    }

    pub fn from_file(path: &std::path::Path) -> Result<Self, Box<dyn std::error::Error>> {
        Self::from_bytes(std::fs::read(path)?)
    }

    pub fn page_count(&self) -> usize {
        self.doc.get_pages().len()
    }

    /// Save PDF to a file for manual debugging
    pub fn save_for_debug(&self, name: &str) -> std::io::Result<()> {
        std::fs::write(format!("test_output_{}.pdf", name), &self.bytes)
    }
}

/// The main document part of a generated Word file.
pub struct GeneratedDocx {
    pub document_xml: String,
    pub part_names: Vec<String>,
}

impl GeneratedDocx {
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self, Box<dyn std::error::Error>> {
        let mut archive = zip::ZipArchive::new(Cursor::new(bytes))?;
        let part_names = archive.file_names().map(str::to_string).collect();
        let mut document_xml = String::new();
        archive.by_name("word/document.xml")?.read_to_string(&mut document_xml)?;
        Ok(Self { document_xml, part_names })
    }

    pub fn from_file(path: &std::path::Path) -> Result<Self, Box<dyn std::error::Error>> {
        Self::from_bytes(std::fs::read(path)?)
    }

    pub fn count(&self, needle: &str) -> usize {
        self.document_xml.matches(needle).count()
    }

    /// Number of pages: the first page plus one per page break.
    pub fn page_count(&self) -> usize {
        1 + self.count("<w:pageBreakBefore/>")
    }

    pub fn cut_line_count(&self) -> usize {
        self.count(r#"prst="line""#)
    }

    pub fn media_count(&self) -> usize {
        self.part_names.iter().filter(|name| name.starts_with("word/media/")).count()
    }
}
