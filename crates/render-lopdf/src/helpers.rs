use cardpress_layout::CutLine;
use cardpress_render_core::utils::{centered_baseline, flip_y, to_win_ansi};
use cardpress_types::{Color, Rect};
use lopdf::content::{Content, Operation};
use lopdf::{Object, StringFormat};

pub const CUT_LINE_WIDTH: f32 = 0.5;
pub const CUT_LINE_GRAY: Color = Color::gray(128);
/// Dash pattern of cut lines: three on, three off.
pub const CUT_LINE_DASH: [i64; 2] = [3, 3];

/// Accumulates the content stream operations of one page. Inputs use a
/// top-left origin and are flipped into PDF space here.
pub struct PageContext {
    page_height: f32,
    content: Content,
    current_fill: Option<Color>,
}

impl PageContext {
    pub fn new(page_height: f32) -> Self {
        Self {
            page_height,
            content: Content { operations: Vec::new() },
            current_fill: None,
        }
    }

    pub fn finish(self) -> Content {
        self.content
    }

    fn push(&mut self, operator: &str, operands: Vec<Object>) {
        self.content.operations.push(Operation::new(operator, operands));
    }

    fn set_fill_color(&mut self, color: Color) {
        if self.current_fill != Some(color) {
            let [r, g, b] = color.to_unit_rgb();
            self.push("rg", vec![r.into(), g.into(), b.into()]);
            self.current_fill = Some(color);
        }
    }

    fn rect_operands(&self, rect: &Rect) -> Vec<Object> {
        let y = flip_y(rect.bottom(), self.page_height);
        vec![rect.x.into(), y.into(), rect.width.into(), rect.height.into()]
    }

    pub fn fill_rect(&mut self, rect: &Rect, color: Color) {
        self.set_fill_color(color);
        let operands = self.rect_operands(rect);
        self.push("re", operands);
        self.push("f", vec![]);
    }

    /// Draws one line of text clipped to `rect`.
    pub fn draw_text(&mut self, rect: &Rect, text: &str, font_resource: &str, font_size: f32, color: Color) {
        let baseline = flip_y(centered_baseline(rect, font_size), self.page_height);
        let clip = self.rect_operands(rect);

        self.push("q", vec![]);
        self.push("re", clip);
        self.push("W", vec![]);
        self.push("n", vec![]);
        self.set_fill_color(color);
        self.push("BT", vec![]);
        self.push("Tf", vec![Object::Name(font_resource.as_bytes().to_vec()), font_size.into()]);
        self.push("Td", vec![rect.x.into(), baseline.into()]);
        self.push("Tj", vec![Object::String(to_win_ansi(text), StringFormat::Literal)]);
        self.push("ET", vec![]);
        self.push("Q", vec![]);
        self.current_fill = None;
    }

    /// Paints an image XObject scaled to `rect`.
    pub fn draw_image(&mut self, rect: &Rect, xobject_name: &str) {
        let y = flip_y(rect.bottom(), self.page_height);
        self.push("q", vec![]);
        self.push(
            "cm",
            vec![rect.width.into(), Object::Integer(0), Object::Integer(0), rect.height.into(), rect.x.into(), y.into()],
        );
        self.push("Do", vec![Object::Name(xobject_name.as_bytes().to_vec())]);
        self.push("Q", vec![]);
    }

    /// Strokes every cut line with the shared dashed gray style.
    pub fn draw_cut_lines(&mut self, lines: &[CutLine]) {
        if lines.is_empty() {
            return;
        }
        let [r, g, b] = CUT_LINE_GRAY.to_unit_rgb();
        self.push("q", vec![]);
        self.push("w", vec![CUT_LINE_WIDTH.into()]);
        self.push("RG", vec![r.into(), g.into(), b.into()]);
        self.push(
            "d",
            vec![CUT_LINE_DASH.iter().map(|&v| Object::Integer(v)).collect::<Vec<_>>().into(), Object::Integer(0)],
        );
        for line in lines {
            self.push("m", vec![line.from.x.into(), flip_y(line.from.y, self.page_height).into()]);
            self.push("l", vec![line.to.x.into(), flip_y(line.to.y, self.page_height).into()]);
            self.push("S", vec![]);
        }
        self.push("Q", vec![]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cardpress_types::Point;

    fn operators(content: &Content) -> Vec<&str> {
        content.operations.iter().map(|op| op.operator.as_str()).collect()
    }

    #[test]
    fn fill_rect_flips_to_pdf_space() {
        let mut ctx = PageContext::new(792.0);
        ctx.fill_rect(&Rect::new(10.0, 20.0, 100.0, 50.0), Color::WHITE);
        let content = ctx.finish();
        assert_eq!(operators(&content), vec!["rg", "re", "f"]);
        let re = &content.operations[1];
        assert_eq!(re.operands[1].as_float().unwrap(), 722.0);
    }

    #[test]
    fn text_is_clipped_and_encoded() {
        let mut ctx = PageContext::new(792.0);
        ctx.draw_text(&Rect::new(0.0, 0.0, 100.0, 20.0), "Ada", "F1", 10.0, Color::BLACK);
        let content = ctx.finish();
        let ops = operators(&content);
        assert_eq!(ops.first(), Some(&"q"));
        assert!(ops.contains(&"W"));
        let tj = content.operations.iter().find(|op| op.operator == "Tj").unwrap();
        assert_eq!(tj.operands[0], Object::String(b"Ada".to_vec(), StringFormat::Literal));
    }

    #[test]
    fn each_cut_line_is_one_stroke() {
        let mut ctx = PageContext::new(792.0);
        let lines = vec![
            CutLine { from: Point::new(0.0, 10.0), to: Point::new(100.0, 10.0) },
            CutLine { from: Point::new(10.0, 0.0), to: Point::new(10.0, 100.0) },
        ];
        ctx.draw_cut_lines(&lines);
        let content = ctx.finish();
        assert_eq!(operators(&content).iter().filter(|op| **op == "S").count(), 2);
    }

    #[test]
    fn no_cut_lines_means_no_operations() {
        let mut ctx = PageContext::new(792.0);
        ctx.draw_cut_lines(&[]);
        assert!(ctx.finish().operations.is_empty());
    }
}
