//! PPTX (Office Open XML) backend for PowerPoint image extraction.
//!
//! Images in .pptx/.ppsx files are plain zip entries under `ppt/media/`.

pub mod images;
pub mod locator;

pub use images::PptxImages;
pub use locator::{ZipLocator, MEDIA_DIR};
