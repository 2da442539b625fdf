//! The card data model.
//!
//! A [`CardTemplate`] describes the shape every card shares: an ordered list of
//! [`FieldDefinition`]s plus a background color. A [`CardRecord`] holds one
//! card's values keyed by field identifier. The two are linked only by that
//! identifier; [`CardDeck`] pairs them and provides the editing commands that
//! keep both sides consistent.

mod deck;
mod error;
mod field;
mod record;
mod template;

pub use deck::CardDeck;
pub use error::ModelError;
pub use field::{FieldDefinition, FieldKind, TextStyle};
pub use record::CardRecord;
pub use template::CardTemplate;

/// Width of the designer canvas, in design units (3.5in at 96 DPI).
pub const DESIGN_WIDTH: f32 = 336.0;
/// Height of the designer canvas, in design units (2in at 96 DPI).
pub const DESIGN_HEIGHT: f32 = 192.0;
