pub mod assets;

pub use assets::{AssetError, ImageProvider, InMemoryImageProvider, SharedImageData};
