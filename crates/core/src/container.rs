//! The uniform name-to-bytes interface shared by both container families.

use crate::error::Result;
use crate::types::{ContainerFormat, ImageEntry, ImageIndex};
use std::io::Write;

/// A presentation opened for image extraction.
///
/// The index is built once when the container is opened and never changes.
/// Extraction takes `&mut self` because every variant owns a single
/// cursor-bearing handle: the borrow checker serializes "seek + read"
/// pairs, so two extractions can never interleave on one container.
pub trait ImageContainer {
    /// Container family this instance was opened as.
    fn format(&self) -> ContainerFormat;

    /// Base name used to build image names (input file stem).
    fn basename(&self) -> &str;

    /// The read-only name index.
    fn index(&self) -> &ImageIndex;

    /// Write the bytes of image `name` to `sink`.
    ///
    /// Returns the number of bytes written. Fails with
    /// [`Error::NameNotFound`](crate::Error::NameNotFound) if `name` is not
    /// in the index; the container stays usable afterwards.
    fn extract(&mut self, name: &str, sink: &mut dyn Write) -> Result<u64>;

    /// Image names. Callers must not rely on the order.
    fn names(&self) -> Vec<&str> {
        self.index()
            .entries()
            .iter()
            .map(|e| e.name.as_str())
            .collect()
    }

    fn len(&self) -> usize {
        self.index().len()
    }

    fn is_empty(&self) -> bool {
        self.index().is_empty()
    }

    fn contains(&self, name: &str) -> bool {
        self.index().contains(name)
    }

    /// Extract every image, one at a time, into sinks produced by
    /// `sink_factory`.
    ///
    /// Returns `(name, bytes written)` per image in encounter order. Stops
    /// at the first failure.
    fn extract_all<W, F>(&mut self, mut sink_factory: F) -> Result<Vec<(String, u64)>>
    where
        Self: Sized,
        W: Write,
        F: FnMut(&ImageEntry) -> Result<W>,
    {
        let entries = self.index().entries().to_vec();
        let mut written = Vec::with_capacity(entries.len());

        for entry in &entries {
            let mut sink = sink_factory(entry)?;
            let n = self.extract(&entry.name, &mut sink)?;
            log::debug!("Extracted {} ({} bytes)", entry.name, n);
            written.push((entry.name.clone(), n));
        }

        Ok(written)
    }
}
