use lopdf::content::{Content, Operation};
use lopdf::{Document as LopdfDocument, Object};

/// Decoded content stream operations of a 1-based page.
pub fn page_operations(doc: &LopdfDocument, page_num: u32) -> Vec<Operation> {
    let pages = doc.get_pages();
    let Some(page_id) = pages.get(&page_num) else {
        return Vec::new();
    };
    doc.get_page_content(*page_id)
        .ok()
        .and_then(|bytes| Content::decode(&bytes).ok())
        .map(|content| content.operations)
        .unwrap_or_default()
}

fn number(object: &Object) -> f32 {
    match object {
        Object::Integer(i) => *i as f32,
        Object::Real(r) => *r as f32,
        _ => f32::NAN,
    }
}

/// Every string shown with `Tj` on a page, in paint order.
pub fn shown_text(doc: &LopdfDocument, page_num: u32) -> Vec<String> {
    page_operations(doc, page_num)
        .iter()
        .filter(|op| op.operator == "Tj")
        .filter_map(|op| match op.operands.first() {
            Some(Object::String(bytes, _)) => Some(bytes.iter().map(|&b| b as char).collect()),
            _ => None,
        })
        .collect()
}

/// `(x, y)` of each `Td` text position on a page, PDF coordinates.
pub fn text_positions(doc: &LopdfDocument, page_num: u32) -> Vec<(f32, f32)> {
    page_operations(doc, page_num)
        .iter()
        .filter(|op| op.operator == "Td")
        .map(|op| (number(&op.operands[0]), number(&op.operands[1])))
        .collect()
}

/// Number of stroked paths on a page. Only cut lines are stroked.
pub fn stroke_count(doc: &LopdfDocument, page_num: u32) -> usize {
    page_operations(doc, page_num).iter().filter(|op| op.operator == "S").count()
}

/// `(x, y, width, height)` of each image drawn on a page, PDF coordinates.
pub fn image_placements(doc: &LopdfDocument, page_num: u32) -> Vec<(f32, f32, f32, f32)> {
    let ops = page_operations(doc, page_num);
    ops.windows(2)
        .filter(|pair| pair[0].operator == "cm" && pair[1].operator == "Do")
        .map(|pair| {
            let m = &pair[0].operands;
            (number(&m[4]), number(&m[5]), number(&m[0]), number(&m[3]))
        })
        .collect()
}

/// Media box `(width, height)` of a page.
pub fn page_size(doc: &LopdfDocument, page_num: u32) -> Option<(f32, f32)> {
    let page_id = *doc.get_pages().get(&page_num)?;
    let page = doc.get_dictionary(page_id).ok()?;
    let media_box = page.get(b"MediaBox").ok()?.as_array().ok()?;
    Some((number(&media_box[2]), number(&media_box[3])))
}

pub fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < 0.01
}

/// Assert a page's media box matches the expected size.
pub fn assert_page_size(doc: &LopdfDocument, page_num: u32, width: f32, height: f32) {
    let (w, h) = page_size(doc, page_num).expect("page has a media box");
    assert!(
        approx(w, width) && approx(h, height),
        "expected {}x{}, got {}x{}",
        width,
        height,
        w,
        h
    );
}
