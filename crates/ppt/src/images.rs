//! Image container backed by a legacy PPT compound file.

use crate::scanner::RecordScanner;
use cfb::{CompoundFile, Stream};
use pptimg_core::{
    ChunkedCopier, ContainerFormat, Error, ImageContainer, ImageIndex, ImageLocator, Result,
};
use std::io::{Read, Seek, SeekFrom, Write};

/// Name of the stream holding BLIP records.
pub const PICTURES_STREAM: &str = "/Pictures";

/// Images stored in the Pictures stream of a `.ppt`/`.pps` file.
///
/// Owns the compound file and the one open Pictures stream; every
/// extraction seeks that stream to an absolute offset first, so a failed
/// extraction leaves nothing behind that a later one depends on.
pub struct PptImages<F> {
    basename: String,
    index: ImageIndex,
    pictures: Option<Stream<F>>,
    copier: ChunkedCopier,
    /// Keeps the compound file open for as long as `pictures` is read.
    _compound: CompoundFile<F>,
}

impl<F: Read + Seek> PptImages<F> {
    /// Open a compound file and index its Pictures stream.
    pub fn open(reader: F, basename: impl Into<String>) -> Result<Self> {
        Self::open_with(reader, basename, ChunkedCopier::new())
    }

    /// Open with a custom copier.
    pub fn open_with(reader: F, basename: impl Into<String>, copier: ChunkedCopier) -> Result<Self> {
        let basename = basename.into();
        let mut compound = CompoundFile::open(reader)
            .map_err(|e| Error::CfbError(format!("Failed to open CFB container: {}", e)))?;

        // A presentation without drawings has no Pictures stream at all.
        if !compound.is_stream(PICTURES_STREAM) {
            log::debug!("'{}' has no Pictures stream", basename);
            return Ok(Self {
                basename,
                index: ImageIndex::default(),
                pictures: None,
                copier,
                _compound: compound,
            });
        }

        let mut stream = compound.open_stream(PICTURES_STREAM).map_err(|e| {
            Error::CfbError(format!("Failed to open Pictures stream: {}", e))
        })?;

        let entries = RecordScanner::new(basename.as_str()).scan(&mut stream)?;
        log::debug!("'{}': {} images in Pictures stream", basename, entries.len());

        Ok(Self {
            basename,
            index: ImageIndex::new(entries),
            pictures: Some(stream),
            copier,
            _compound: compound,
        })
    }

    /// Current cursor of the Pictures stream, if the stream exists.
    pub fn stream_position(&mut self) -> Result<Option<u64>> {
        match self.pictures.as_mut() {
            Some(stream) => Ok(Some(stream.stream_position()?)),
            None => Ok(None),
        }
    }
}

impl<F: Read + Seek> ImageContainer for PptImages<F> {
    fn format(&self) -> ContainerFormat {
        ContainerFormat::Ppt
    }

    fn basename(&self) -> &str {
        &self.basename
    }

    fn index(&self) -> &ImageIndex {
        &self.index
    }

    fn extract(&mut self, name: &str, sink: &mut dyn Write) -> Result<u64> {
        let entry = self
            .index
            .get(name)
            .ok_or_else(|| Error::NameNotFound(name.to_string()))?;

        let (offset, length) = match entry.locator {
            ImageLocator::Range { offset, length } => (offset, length),
            ImageLocator::ArchivePath(ref path) => {
                return Err(Error::CfbError(format!(
                    "'{}' points into a zip package ({}), not the Pictures stream",
                    name, path
                )))
            }
        };

        let stream = self
            .pictures
            .as_mut()
            .ok_or_else(|| Error::NameNotFound(name.to_string()))?;

        stream.seek(SeekFrom::Start(offset))?;
        self.copier.copy_exact(stream, sink, length)
    }
}
