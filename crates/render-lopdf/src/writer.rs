use lopdf::{Dictionary, Object, ObjectId, Stream, StringFormat, dictionary};
use std::collections::BTreeMap;
use std::io::{self, Seek, Write};

/// Writes PDF objects to the output as they are produced and records their
/// offsets for the cross-reference table.
///
/// Only the resources, pages and catalog objects are held back until
/// [`finish`](Self::finish): their contents depend on every page, so they get
/// reserved ids that pages can reference before they are written.
pub struct StreamingPdfWriter<W: Write + Seek> {
    writer: W,
    offsets: BTreeMap<u32, u64>,
    last_id: u32,
    pub catalog_id: ObjectId,
    pub pages_id: ObjectId,
    pub resources_id: ObjectId,
    page_ids: Vec<ObjectId>,
}

impl<W: Write + Seek> StreamingPdfWriter<W> {
    pub fn new(mut writer: W, version: &str) -> io::Result<Self> {
        writer.write_all(format!("%PDF-{}\n", version).as_bytes())?;
        // Binary marker so transfer tools treat the file as binary.
        writer.write_all(b"%\xE2\xE3\xCF\xD3\n")?;

        Ok(Self {
            writer,
            offsets: BTreeMap::new(),
            last_id: 3,
            resources_id: (1, 0),
            pages_id: (2, 0),
            catalog_id: (3, 0),
            page_ids: Vec::new(),
        })
    }

    pub fn new_object_id(&mut self) -> ObjectId {
        self.last_id += 1;
        (self.last_id, 0)
    }

    /// Writes `object` under a fresh id.
    pub fn write_object(&mut self, object: &Object) -> io::Result<ObjectId> {
        let id = self.new_object_id();
        self.write_object_at(id, object)?;
        Ok(id)
    }

    /// Writes an already-encoded content stream.
    pub fn write_content_stream(&mut self, content: Vec<u8>) -> io::Result<ObjectId> {
        self.write_object(&Object::Stream(Stream::new(dictionary! {}, content)))
    }

    fn write_object_at(&mut self, id: ObjectId, object: &Object) -> io::Result<()> {
        let mut bytes = Vec::new();
        write!(bytes, "{} {} obj\n", id.0, id.1)?;
        encode(object, &mut bytes);
        bytes.extend_from_slice(b"\nendobj\n");

        let offset = self.writer.stream_position()?;
        self.writer.write_all(&bytes)?;
        self.offsets.insert(id.0, offset);
        Ok(())
    }

    pub fn add_page(&mut self, page_id: ObjectId) {
        self.page_ids.push(page_id);
    }

    pub fn page_count(&self) -> usize {
        self.page_ids.len()
    }

    /// Writes the shared resources, page tree and catalog, then the
    /// cross-reference table and trailer.
    pub fn finish(mut self, resources: Dictionary) -> io::Result<W> {
        self.write_object_at(self.resources_id, &resources.into())?;

        let kids: Vec<Object> = self.page_ids.iter().map(|id| Object::Reference(*id)).collect();
        let pages = dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => self.page_ids.len() as i64,
        };
        self.write_object_at(self.pages_id, &pages.into())?;

        let catalog = dictionary! { "Type" => "Catalog", "Pages" => self.pages_id };
        self.write_object_at(self.catalog_id, &catalog.into())?;

        let xref_start = self.writer.stream_position()?;
        let size = self.last_id + 1;
        let mut tail = Vec::new();
        writeln!(tail, "xref\n0 {}", size)?;
        writeln!(tail, "0000000000 65535 f ")?;
        for id in 1..size {
            match self.offsets.get(&id) {
                Some(offset) => writeln!(tail, "{:010} 00000 n ", offset)?,
                None => writeln!(tail, "0000000000 00000 f ")?,
            }
        }
        tail.extend_from_slice(b"trailer\n");
        encode(&dictionary! { "Size" => size as i64, "Root" => self.catalog_id }.into(), &mut tail);
        write!(tail, "\nstartxref\n{}\n%%EOF\n", xref_start)?;

        self.writer.write_all(&tail)?;
        self.writer.flush()?;
        Ok(self.writer)
    }
}

/// Appends the PDF syntax for `object` to `out`.
fn encode(object: &Object, out: &mut Vec<u8>) {
    match object {
        Object::Null => out.extend_from_slice(b"null"),
        Object::Boolean(b) => out.extend_from_slice(if *b { "true" } else { "false" }.as_bytes()),
        Object::Integer(i) => out.extend_from_slice(i.to_string().as_bytes()),
        Object::Real(r) => out.extend_from_slice(format_real(*r as f64).as_bytes()),
        Object::Name(name) => encode_name(name, out),
        Object::String(bytes, StringFormat::Literal) => {
            out.push(b'(');
            for &byte in bytes {
                match byte {
                    b'(' | b')' | b'\\' => out.extend_from_slice(&[b'\\', byte]),
                    b'\r' => out.extend_from_slice(b"\\r"),
                    b'\n' => out.extend_from_slice(b"\\n"),
                    _ => out.push(byte),
                }
            }
            out.push(b')');
        }
        Object::String(bytes, StringFormat::Hexadecimal) => {
            out.push(b'<');
            for byte in bytes {
                out.extend_from_slice(format!("{:02X}", byte).as_bytes());
            }
            out.push(b'>');
        }
        Object::Array(items) => {
            out.push(b'[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push(b' ');
                }
                encode(item, out);
            }
            out.push(b']');
        }
        Object::Dictionary(dict) => encode_dictionary(dict, None, out),
        Object::Stream(stream) => {
            encode_dictionary(&stream.dict, Some(stream.content.len()), out);
            out.extend_from_slice(b"\nstream\n");
            out.extend_from_slice(&stream.content);
            out.extend_from_slice(b"\nendstream");
        }
        Object::Reference(id) => out.extend_from_slice(format!("{} {} R", id.0, id.1).as_bytes()),
    }
}

/// Writes `dict` in insertion order. A stream's `Length` always comes from
/// its actual content.
fn encode_dictionary(dict: &Dictionary, stream_length: Option<usize>, out: &mut Vec<u8>) {
    out.extend_from_slice(b"<<");
    for (key, value) in dict.iter() {
        if stream_length.is_some() && key.as_slice() == b"Length" {
            continue;
        }
        encode_name(key, out);
        out.push(b' ');
        encode(value, out);
        out.push(b' ');
    }
    if let Some(length) = stream_length {
        out.extend_from_slice(format!("/Length {}", length).as_bytes());
    }
    out.extend_from_slice(b">>");
}

fn encode_name(name: &[u8], out: &mut Vec<u8>) {
    out.push(b'/');
    for &byte in name {
        let delimiter = matches!(byte, b'(' | b')' | b'<' | b'>' | b'[' | b']' | b'{' | b'}' | b'/' | b'%' | b'#');
        if delimiter || !(0x21..=0x7E).contains(&byte) {
            out.extend_from_slice(format!("#{:02X}", byte).as_bytes());
        } else {
            out.push(byte);
        }
    }
}

/// Fixed-point with at most four decimals and no trailing zeros.
fn format_real(value: f64) -> String {
    let text = format!("{:.4}", value);
    let text = text.trim_end_matches('0').trim_end_matches('.');
    if text == "-0" { "0".to_string() } else { text.to_string() }
}
