//! Error types for PowerPoint image extraction.

use thiserror::Error;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur during PowerPoint image extraction.
#[derive(Error, Debug)]
pub enum Error {
    /// Failed to open, read, or write a file.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Neither the compound-file nor the zip signature matched.
    #[error("Unrecognized file format: {0}")]
    UnrecognizedFormat(String),

    /// The Pictures stream could not be decoded past `offset`.
    ///
    /// Raised for truncated record headers, unknown (type, instance)
    /// pairs, and records whose payload is shorter than their padding.
    #[error("Decoding failure at offset {offset}: {reason}")]
    DecodingFailure { offset: u64, reason: String },

    /// Extraction was requested for a name that is not in the index.
    #[error("No such image: {0}")]
    NameNotFound(String),

    /// The source ran out of bytes before a locator's length was copied.
    #[error("Truncated read: expected {expected} bytes, got {actual}")]
    TruncatedRead { expected: u64, actual: u64 },

    /// OLE/CFB container error (for PPT).
    #[error("OLE/CFB error: {0}")]
    CfbError(String),

    /// ZIP archive error (for PPTX).
    #[error("ZIP error: {0}")]
    ZipError(String),
}

impl Error {
    /// Build a decoding failure at the given stream offset.
    pub fn decoding(offset: u64, reason: impl Into<String>) -> Self {
        Error::DecodingFailure {
            offset,
            reason: reason.into(),
        }
    }
}
