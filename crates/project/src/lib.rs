//! Card projects on disk.
//!
//! A project is a directory holding `project.json` (the serialized
//! [`CardDeck`](cardpress_model::CardDeck)) and an `images/` directory with
//! copies of every image the cards use. [`ProjectStore`] manages the
//! directory of projects; [`load`] and [`save`] work on a single project.

mod error;
mod images;
mod persistence;
mod project;
mod store;

pub use error::ProjectError;
pub use images::IMAGES_DIR;
pub use persistence::{PROJECT_FILE, SaveReport, load, save};
pub use project::Project;
pub use store::{DEFAULT_STORE_DIR, ProjectStore, STORE_ENV_VAR};
