//! Legacy PPT (OLE/CFB) backend for PowerPoint image extraction.
//!
//! Images in .ppt/.pps files live in the `Pictures` stream of the
//! compound file as a sequence of BLIP records. This crate locates them
//! without reading the stream into memory.

pub mod formats;
pub mod images;
pub mod scanner;

pub use formats::{lookup, FormatEntry, FORMATS};
pub use images::{PptImages, PICTURES_STREAM};
pub use scanner::{RecordHeader, RecordScanner, HEADER_LEN};
