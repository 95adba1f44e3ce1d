//! Core domain types, chunked copying, and the container interface for
//! PowerPoint image extraction.

pub mod container;
pub mod copy;
pub mod error;
pub mod types;

pub use container::ImageContainer;
pub use copy::{ChunkedCopier, DEFAULT_CHUNK_SIZE};
pub use error::{Error, Result};
pub use types::{image_name, ContainerFormat, ImageEntry, ImageIndex, ImageLocator};
