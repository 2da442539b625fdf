use cardpress_types::{Rect, Size};

/// Ratio of a font's size used to drop the baseline below a line's vertical center.
const BASELINE_DROP: f32 = 0.35;

/// The three base families of the standard PDF fonts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StandardFamily {
    Helvetica,
    Times,
    Courier,
}

impl StandardFamily {
    /// Maps a requested font family onto the closest standard family.
    /// Unknown names fall back to Helvetica.
    pub fn for_family(family: &str) -> Self {
        let lower = family.to_ascii_lowercase();
        if lower.contains("courier") || lower.contains("mono") || lower.contains("consolas") {
            StandardFamily::Courier
        } else if lower.contains("times") || lower.contains("georgia") || lower.contains("garamond") || lower == "serif" {
            StandardFamily::Times
        } else {
            StandardFamily::Helvetica
        }
    }
}

/// Get the PDF base font name for a family with style flags applied.
pub fn get_styled_font_name(family: &str, bold: bool, italic: bool) -> &'static str {
    match (StandardFamily::for_family(family), bold, italic) {
        (StandardFamily::Helvetica, false, false) => "Helvetica",
        (StandardFamily::Helvetica, true, false) => "Helvetica-Bold",
        (StandardFamily::Helvetica, false, true) => "Helvetica-Oblique",
        (StandardFamily::Helvetica, true, true) => "Helvetica-BoldOblique",
        (StandardFamily::Times, false, false) => "Times-Roman",
        (StandardFamily::Times, true, false) => "Times-Bold",
        (StandardFamily::Times, false, true) => "Times-Italic",
        (StandardFamily::Times, true, true) => "Times-BoldItalic",
        (StandardFamily::Courier, false, false) => "Courier",
        (StandardFamily::Courier, true, false) => "Courier-Bold",
        (StandardFamily::Courier, false, true) => "Courier-Oblique",
        (StandardFamily::Courier, true, true) => "Courier-BoldOblique",
    }
}

/// Convert layout Y coordinate to PDF Y coordinate (flip origin)
pub fn flip_y(y: f32, page_height: f32) -> f32 {
    page_height - y
}

/// Baseline of a single text line vertically centered in `rect`, in top-left
/// coordinates.
pub fn centered_baseline(rect: &Rect, font_size: f32) -> f32 {
    rect.y + rect.height / 2.0 + font_size * BASELINE_DROP
}

/// Largest rectangle with the aspect ratio of `content` that fits in `frame`,
/// centered inside it. Degenerate content fills the frame.
pub fn letterbox(content: Size, frame: &Rect) -> Rect {
    if !content.is_positive() {
        return *frame;
    }
    let fitted = content.fit_within(frame.size());
    Rect::new(
        frame.x + (frame.width - fitted.width) / 2.0,
        frame.y + (frame.height - fitted.height) / 2.0,
        fitted.width,
        fitted.height,
    )
}

/// Encodes text for a standard font's WinAnsi encoding. Characters outside it
/// become `?`.
pub fn to_win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| match c {
            '\u{20AC}' => 0x80,
            '\u{201A}' => 0x82,
            '\u{0192}' => 0x83,
            '\u{201E}' => 0x84,
            '\u{2026}' => 0x85,
            '\u{2020}' => 0x86,
            '\u{2021}' => 0x87,
            '\u{02C6}' => 0x88,
            '\u{2030}' => 0x89,
            '\u{0160}' => 0x8A,
            '\u{2039}' => 0x8B,
            '\u{0152}' => 0x8C,
            '\u{017D}' => 0x8E,
            '\u{2018}' => 0x91,
            '\u{2019}' => 0x92,
            '\u{201C}' => 0x93,
            '\u{201D}' => 0x94,
            '\u{2022}' => 0x95,
            '\u{2013}' => 0x96,
            '\u{2014}' => 0x97,
            '\u{02DC}' => 0x98,
            '\u{2122}' => 0x99,
            '\u{0161}' => 0x9A,
            '\u{203A}' => 0x9B,
            '\u{0153}' => 0x9C,
            '\u{017E}' => 0x9E,
            '\u{0178}' => 0x9F,
            c if (c as u32) < 0x80 || (0xA0..=0xFF).contains(&(c as u32)) => c as u8,
            _ => b'?',
        })
        .collect()
}
