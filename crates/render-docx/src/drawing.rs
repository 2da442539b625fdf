use cardpress_layout::CutLine;
use cardpress_types::{Color, Rect};
use quick_xml::escape::escape;

pub const EMU_PER_POINT: i64 = 12_700;
pub const TWIPS_PER_POINT: f32 = 20.0;

const WPS_URI: &str = "http://schemas.microsoft.com/office/word/2010/wordprocessingShape";
const PIC_URI: &str = "http://schemas.openxmlformats.org/drawingml/2006/picture";

pub fn emu(points: f32) -> i64 {
    (points as f64 * EMU_PER_POINT as f64).round() as i64
}

/// Placement shared by every anchored shape.
pub struct Anchor {
    pub id: u32,
    pub z: u32,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Anchor {
    pub fn from_rect(id: u32, z: u32, rect: &Rect) -> Self {
        Self {
            id,
            z,
            x: rect.x,
            y: rect.y,
            width: rect.width,
            height: rect.height,
        }
    }

    fn wrap(&self, name: &str, graphic_uri: &str, graphic_data: &str) -> String {
        format!(
            concat!(
                r#"<w:r><w:drawing><wp:anchor distT="0" distB="0" distL="0" distR="0" simplePos="0" relativeHeight="{z}" "#,
                r#"behindDoc="0" locked="0" layoutInCell="1" allowOverlap="1"><wp:simplePos x="0" y="0"/>"#,
                r#"<wp:positionH relativeFrom="page"><wp:posOffset>{x}</wp:posOffset></wp:positionH>"#,
                r#"<wp:positionV relativeFrom="page"><wp:posOffset>{y}</wp:posOffset></wp:positionV>"#,
                r#"<wp:extent cx="{cx}" cy="{cy}"/><wp:effectExtent l="0" t="0" r="0" b="0"/><wp:wrapNone/>"#,
                r#"<wp:docPr id="{id}" name="{name} {id}"/><wp:cNvGraphicFramePr/>"#,
                r#"<a:graphic><a:graphicData uri="{uri}">{data}</a:graphicData></a:graphic>"#,
                r#"</wp:anchor></w:drawing></w:r>"#
            ),
            z = self.z,
            x = emu(self.x),
            y = emu(self.y),
            cx = emu(self.width),
            cy = emu(self.height),
            id = self.id,
            name = name,
            uri = graphic_uri,
            data = graphic_data,
        )
    }

    fn shape_properties(&self, geometry: &str, fill: &str, line: &str) -> String {
        format!(
            r#"<wps:spPr><a:xfrm><a:off x="0" y="0"/><a:ext cx="{}" cy="{}"/></a:xfrm><a:prstGeom prst="{}"><a:avLst/></a:prstGeom>{}{}</wps:spPr>"#,
            emu(self.width),
            emu(self.height),
            geometry,
            fill,
            line
        )
    }
}

fn solid_fill(color: Color) -> String {
    format!(r#"<a:solidFill><a:srgbClr val="{}"/></a:solidFill>"#, color.to_hex_digits())
}

/// A borderless filled rectangle.
pub fn filled_rect(anchor: &Anchor, color: Color) -> String {
    let shape = format!(
        "<wps:wsp><wps:cNvSpPr/>{}<wps:bodyPr/></wps:wsp>",
        anchor.shape_properties("rect", &solid_fill(color), "<a:ln><a:noFill/></a:ln>")
    );
    anchor.wrap("Background", WPS_URI, &shape)
}

/// Run properties for a text box's single run.
pub struct RunStyle<'a> {
    pub family: &'a str,
    pub font_size: f32,
    pub bold: bool,
    pub italic: bool,
    pub color: Color,
}

/// A frameless text box holding one left-aligned line, vertically centered.
pub fn text_box(anchor: &Anchor, text: &str, style: &RunStyle<'_>) -> String {
    let family = escape(style.family);
    let half_points = (style.font_size * 2.0).round().max(1.0) as u32;
    let mut run_props = format!(r#"<w:rFonts w:ascii="{f}" w:hAnsi="{f}" w:cs="{f}"/>"#, f = family);
    if style.bold {
        run_props.push_str("<w:b/>");
    }
    if style.italic {
        run_props.push_str("<w:i/>");
    }
    run_props.push_str(&format!(
        r#"<w:color w:val="{}"/><w:sz w:val="{hp}"/><w:szCs w:val="{hp}"/>"#,
        style.color.to_hex_digits(),
        hp = half_points
    ));

    let shape = format!(
        concat!(
            r#"<wps:wsp><wps:cNvSpPr txBox="1"/>{props}<wps:txbx><w:txbxContent><w:p>"#,
            r#"<w:pPr><w:spacing w:before="0" w:after="0" w:line="240" w:lineRule="auto"/><w:jc w:val="left"/></w:pPr>"#,
            r#"<w:r><w:rPr>{run}</w:rPr><w:t xml:space="preserve">{text}</w:t></w:r></w:p></w:txbxContent></wps:txbx>"#,
            r#"<wps:bodyPr rot="0" vert="horz" wrap="none" lIns="0" tIns="0" rIns="0" bIns="0" anchor="ctr"><a:noAutofit/></wps:bodyPr></wps:wsp>"#
        ),
        props = anchor.shape_properties("rect", "<a:noFill/>", "<a:ln><a:noFill/></a:ln>"),
        run = run_props,
        text = escape(text),
    );
    anchor.wrap("Text Box", WPS_URI, &shape)
}

/// An embedded picture referring to an image relationship.
pub fn picture(anchor: &Anchor, relationship_id: &str) -> String {
    let pic = format!(
        concat!(
            r#"<pic:pic><pic:nvPicPr><pic:cNvPr id="{id}" name="Picture {id}"/><pic:cNvPicPr/></pic:nvPicPr>"#,
            r#"<pic:blipFill><a:blip r:embed="{rel}"/><a:stretch><a:fillRect/></a:stretch></pic:blipFill>"#,
            r#"<pic:spPr><a:xfrm><a:off x="0" y="0"/><a:ext cx="{cx}" cy="{cy}"/></a:xfrm>"#,
            r#"<a:prstGeom prst="rect"><a:avLst/></a:prstGeom></pic:spPr></pic:pic>"#
        ),
        id = anchor.id,
        rel = relationship_id,
        cx = emu(anchor.width),
        cy = emu(anchor.height),
    );
    anchor.wrap("Picture", PIC_URI, &pic)
}

/// A dashed gray guide line. Cut lines are axis-aligned, so the shape's box
/// collapses to zero in one dimension.
pub fn cut_line(id: u32, z: u32, line: &CutLine, width_pt: f32, color: Color) -> String {
    let x = line.from.x.min(line.to.x);
    let y = line.from.y.min(line.to.y);
    let anchor = Anchor {
        id,
        z,
        x,
        y,
        width: (line.to.x - line.from.x).abs(),
        height: (line.to.y - line.from.y).abs(),
    };
    let outline = format!(
        r#"<a:ln w="{}">{}<a:prstDash val="dash"/></a:ln>"#,
        emu(width_pt),
        solid_fill(color)
    );
    let shape = format!(
        "<wps:wsp><wps:cNvCnPr/>{}<wps:bodyPr/></wps:wsp>",
        anchor.shape_properties("line", "", &outline)
    );
    anchor.wrap("Cut Line", WPS_URI, &shape)
}
