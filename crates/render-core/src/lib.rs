//! Core rendering abstractions for card export.
//!
//! This crate provides what every output backend shares:
//! - [`PageContent`] and [`DrawItem`], the positioned draw list for one page
//! - the [`CardRenderer`] trait backends implement
//! - [`RenderError`]
//! - geometry and font helpers in [`utils`]

mod elements;
mod error;
mod traits;
pub mod utils;

pub use elements::{DrawItem, FontSpec, ImageResource, PageContent};
pub use error::RenderError;
pub use traits::CardRenderer;
