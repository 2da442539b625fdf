use cardpress::{CardRecord, CardTemplate, FieldDefinition, TextStyle};
use std::io::{Cursor, Write};
use std::path::Path;
use zip::write::SimpleFileOptions;

/// One text field "Name" at (10,10,100,20) and one image field "Logo" at
/// (10,40,50,50), in design units.
pub fn name_and_logo_template() -> CardTemplate {
    CardTemplate::new()
        .with_field(FieldDefinition::text("Name").at(10.0, 10.0).sized(100.0, 20.0))
        .expect("valid field")
        .with_field(FieldDefinition::image("Logo").at(10.0, 40.0).sized(50.0, 50.0))
        .expect("valid field")
}

pub fn styled_template() -> CardTemplate {
    let bold = TextStyle {
        bold: true,
        ..TextStyle::default()
    };
    CardTemplate::new()
        .with_field(FieldDefinition::text("Name").at(10.0, 10.0).sized(150.0, 25.0).with_style(bold))
        .expect("valid field")
        .with_field(FieldDefinition::text("Email").at(10.0, 40.0).sized(150.0, 25.0))
        .expect("valid field")
}

pub fn numbered_records(count: usize) -> Vec<CardRecord> {
    (1..=count)
        .map(|i| {
            CardRecord::new()
                .with("Name", format!("Person {}", i))
                .with("Email", format!("person{}@example.com", i))
        })
        .collect()
}

/// Writes a solid PNG of the given pixel size.
pub fn write_png(path: &Path, width: u32, height: u32) {
    let img = image::RgbImage::from_pixel(width, height, image::Rgb([20, 40, 200]));
    image::DynamicImage::ImageRgb8(img)
        .save_with_format(path, image::ImageFormat::Png)
        .expect("png written");
}

fn column_name(index: usize) -> String {
    let mut name = String::new();
    let mut n = index + 1;
    while n > 0 {
        let rem = (n - 1) % 26;
        name.insert(0, (b'A' + rem as u8) as char);
        n = (n - 1) / 26;
    }
    name
}

fn xml_escape(s: &str) -> String {
    s.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;")
}

/// Writes a minimal single-sheet .xlsx. Cells that parse as numbers are
/// stored as numbers, everything else as shared strings; empty cells are
/// omitted.
pub fn write_xlsx(path: &Path, rows: &[&[&str]]) {
    let mut strings: Vec<String> = Vec::new();
    let mut sheet_rows = String::new();
    for (r, row) in rows.iter().enumerate() {
        sheet_rows.push_str(&format!(r#"<row r="{}">"#, r + 1));
        for (c, value) in row.iter().enumerate() {
            if value.is_empty() {
                continue;
            }
            let cell_ref = format!("{}{}", column_name(c), r + 1);
            if value.parse::<f64>().is_ok() {
                sheet_rows.push_str(&format!(r#"<c r="{}"><v>{}</v></c>"#, cell_ref, value));
            } else {
                strings.push(value.to_string());
                sheet_rows.push_str(&format!(r#"<c r="{}" t="s"><v>{}</v></c>"#, cell_ref, strings.len() - 1));
            }
        }
        sheet_rows.push_str("</row>");
    }

    let main_ns = "http://schemas.openxmlformats.org/spreadsheetml/2006/main";
    let rel_ns = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";
    let parts: Vec<(&str, String)> = vec![
        (
            "[Content_Types].xml",
            concat!(
                r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
                r#"<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">"#,
                r#"<Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>"#,
                r#"<Default Extension="xml" ContentType="application/xml"/>"#,
                r#"<Override PartName="/xl/workbook.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml"/>"#,
                r#"<Override PartName="/xl/worksheets/sheet1.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.worksheet+xml"/>"#,
                r#"<Override PartName="/xl/sharedStrings.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.sharedStrings+xml"/>"#,
                r#"</Types>"#
            )
            .to_string(),
        ),
        (
            "_rels/.rels",
            format!(
                r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="{}/officeDocument" Target="xl/workbook.xml"/></Relationships>"#,
                rel_ns
            ),
        ),
        (
            "xl/workbook.xml",
            format!(
                r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><workbook xmlns="{}" xmlns:r="{}"><sheets><sheet name="Sheet1" sheetId="1" r:id="rId1"/></sheets></workbook>"#,
                main_ns, rel_ns
            ),
        ),
        (
            "xl/_rels/workbook.xml.rels",
            format!(
                concat!(
                    r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">"#,
                    r#"<Relationship Id="rId1" Type="{ns}/worksheet" Target="worksheets/sheet1.xml"/>"#,
                    r#"<Relationship Id="rId2" Type="{ns}/sharedStrings" Target="sharedStrings.xml"/>"#,
                    r#"</Relationships>"#
                ),
                ns = rel_ns
            ),
        ),
        (
            "xl/sharedStrings.xml",
            format!(
                r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><sst xmlns="{}" count="{n}" uniqueCount="{n}">{}</sst>"#,
                main_ns,
                strings
                    .iter()
                    .map(|s| format!("<si><t>{}</t></si>", xml_escape(s)))
                    .collect::<String>(),
                n = strings.len()
            ),
        ),
        (
            "xl/worksheets/sheet1.xml",
            format!(
                r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><worksheet xmlns="{}"><sheetData>{}</sheetData></worksheet>"#,
                main_ns, sheet_rows
            ),
        ),
    ];

    let mut zip = zip::ZipWriter::new(Cursor::new(Vec::new()));
    for (name, content) in parts {
        zip.start_file(name, SimpleFileOptions::default()).expect("zip entry");
        zip.write_all(content.as_bytes()).expect("zip write");
    }
    let bytes = zip.finish().expect("zip finished").into_inner();
    std::fs::write(path, bytes).expect("xlsx written");
}
