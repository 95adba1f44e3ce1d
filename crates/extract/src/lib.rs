//! Extract embedded images from PowerPoint files (.ppt, .pps, .pptx, .ppsx).
//!
//! ```no_run
//! use pptimg::{Container, ImageContainer};
//! use std::path::Path;
//!
//! let mut deck = Container::open("talk.ppt")?;
//! println!("{}", deck);
//! for name in deck.names() {
//!     println!("{}", name);
//! }
//! pptimg::extract_all_to_dir(&mut deck, Path::new("out"))?;
//! # Ok::<(), pptimg::Error>(())
//! ```

pub mod container;
pub mod output;

pub use container::{basename_of, detect_format, Container};
pub use output::{extract_all_to_dir, extract_to_dir};
pub use pptimg_core::{
    image_name, ChunkedCopier, ContainerFormat, Error, ImageContainer, ImageEntry, ImageIndex,
    ImageLocator, Result, DEFAULT_CHUNK_SIZE,
};
pub use pptimg_ppt::PptImages;
pub use pptimg_pptx::PptxImages;
