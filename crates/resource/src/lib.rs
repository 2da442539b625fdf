//! Image providers for card export.
//!
//! - [`FilesystemImageProvider`]: resolves image values against a project directory
//! - [`InMemoryImageProvider`]: re-exported from cardpress-traits
//! - [`match_destination_permissions`]: mode fix-up for atomically replaced files

mod filesystem;
mod permissions;

pub use filesystem::FilesystemImageProvider;
pub use permissions::match_destination_permissions;

pub use cardpress_traits::InMemoryImageProvider;
