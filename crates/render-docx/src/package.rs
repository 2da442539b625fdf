use std::collections::BTreeSet;
use std::io::{Seek, Write};
use zip::ZipWriter;
use zip::result::ZipError;
use zip::write::SimpleFileOptions;

const DOCUMENT_NAMESPACES: &str = concat!(
    r#"xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main" "#,
    r#"xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships" "#,
    r#"xmlns:wp="http://schemas.openxmlformats.org/drawingml/2006/wordprocessingDrawing" "#,
    r#"xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" "#,
    r#"xmlns:pic="http://schemas.openxmlformats.org/drawingml/2006/picture" "#,
    r#"xmlns:wps="http://schemas.microsoft.com/office/word/2010/wordprocessingShape""#
);

const ROOT_RELS: &str = concat!(
    r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
    r#"<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">"#,
    r#"<Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="word/document.xml"/>"#,
    r#"</Relationships>"#
);

const IMAGE_RELATIONSHIP: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships/image";

/// Writes the parts of a WordprocessingML package into a zip archive.
/// Media parts are streamed as they arrive; the main document part and the
/// package bookkeeping are written by `finish`.
pub struct DocxPackage<W: Write + Seek> {
    zip: ZipWriter<W>,
    relationships: Vec<(String, String)>,
    media_extensions: BTreeSet<&'static str>,
}

fn options() -> SimpleFileOptions {
    SimpleFileOptions::default().compression_method(zip::CompressionMethod::Deflated)
}

fn content_type(extension: &str) -> &'static str {
    match extension {
        "png" => "image/png",
        "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "bmp" => "image/bmp",
        _ => "application/octet-stream",
    }
}

impl<W: Write + Seek> DocxPackage<W> {
    pub fn new(writer: W) -> Self {
        Self {
            zip: ZipWriter::new(writer),
            relationships: Vec::new(),
            media_extensions: BTreeSet::new(),
        }
    }

    /// Stores an image under `word/media/` and returns its relationship id.
    pub fn add_media(&mut self, data: &[u8], extension: &'static str) -> Result<String, ZipError> {
        let index = self.relationships.len() + 1;
        let target = format!("media/image{}.{}", index, extension);
        self.zip.start_file(format!("word/{}", target), options())?;
        self.zip.write_all(data)?;

        let id = format!("rIdImg{}", index);
        self.relationships.push((id.clone(), target));
        self.media_extensions.insert(extension);
        Ok(id)
    }

    fn write_part(&mut self, name: &str, xml: &str) -> Result<(), ZipError> {
        self.zip.start_file(name, options())?;
        self.zip.write_all(xml.as_bytes())?;
        Ok(())
    }

    fn content_types(&self) -> String {
        let mut xml = String::from(concat!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
            r#"<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">"#,
            r#"<Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>"#,
            r#"<Default Extension="xml" ContentType="application/xml"/>"#
        ));
        for extension in &self.media_extensions {
            xml.push_str(&format!(
                r#"<Default Extension="{}" ContentType="{}"/>"#,
                extension,
                content_type(extension)
            ));
        }
        xml.push_str(concat!(
            r#"<Override PartName="/word/document.xml" "#,
            r#"ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/>"#,
            r#"</Types>"#
        ));
        xml
    }

    fn document_relationships(&self) -> String {
        let mut xml = String::from(concat!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
            r#"<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">"#
        ));
        for (id, target) in &self.relationships {
            xml.push_str(&format!(
                r#"<Relationship Id="{}" Type="{}" Target="{}"/>"#,
                id, IMAGE_RELATIONSHIP, target
            ));
        }
        xml.push_str("</Relationships>");
        xml
    }

    /// Writes the main document around `body` (the content of `w:body`
    /// without its section properties) and closes the archive.
    pub fn finish(mut self, body: &str, page_width_pt: f32, page_height_pt: f32) -> Result<W, ZipError> {
        let twips = |pt: f32| (pt * crate::TWIPS_PER_POINT).round() as i64;
        let document = format!(
            concat!(
                r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
                r#"<w:document {ns}><w:body>{body}"#,
                r#"<w:sectPr><w:pgSz w:w="{w}" w:h="{h}"/>"#,
                r#"<w:pgMar w:top="0" w:right="0" w:bottom="0" w:left="0" w:header="0" w:footer="0" w:gutter="0"/>"#,
                r#"</w:sectPr></w:body></w:document>"#
            ),
            ns = DOCUMENT_NAMESPACES,
            body = body,
            w = twips(page_width_pt),
            h = twips(page_height_pt),
        );

        let content_types = self.content_types();
        let document_rels = self.document_relationships();
        self.write_part("[Content_Types].xml", &content_types)?;
        self.write_part("_rels/.rels", ROOT_RELS)?;
        self.write_part("word/_rels/document.xml.rels", &document_rels)?;
        self.write_part("word/document.xml", &document)?;
        self.zip.finish()
    }
}
