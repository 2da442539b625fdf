use cardpress_model::{CardTemplate, DESIGN_HEIGHT, DESIGN_WIDTH, FieldDefinition};
use cardpress_types::Rect;

/// A field placed inside a card's bounding box, ready to draw.
#[derive(Debug, Clone, PartialEq)]
pub struct PositionedField<'a> {
    pub field: &'a FieldDefinition,
    /// Card-relative rectangle in points, top-left origin, clipped to the card.
    pub rect: Rect,
    /// Font size after scaling from design units to points.
    pub font_size: f32,
}

/// Maps every template field onto a card of `card_width` x `card_height` points.
///
/// The result has one entry per field, in draw order (ascending z-index, ties
/// in template order). Design-space geometry is scaled to the card and each
/// rectangle is clipped to the card bounds.
pub fn resolve(template: &CardTemplate, card_width: f32, card_height: f32) -> Vec<PositionedField<'_>> {
    let scale_x = card_width.max(0.0) / DESIGN_WIDTH;
    let scale_y = card_height.max(0.0) / DESIGN_HEIGHT;
    let font_scale = scale_x.min(scale_y);
    let bounds = Rect::new(0.0, 0.0, card_width.max(0.0), card_height.max(0.0));

    template
        .fields_in_draw_order()
        .into_iter()
        .map(|field| {
            let rect = field.rect().scale(scale_x, scale_y).clip_to(bounds);
            if rect.is_empty() {
                log::debug!("Field '{}' lies outside the card and resolves to an empty rect", field.id);
            }
            PositionedField {
                field,
                rect,
                font_size: field.style.font_size * font_scale,
            }
        })
        .collect()
}
