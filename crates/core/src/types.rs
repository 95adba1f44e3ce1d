//! Domain types for describing images embedded in a presentation.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Compound-file (OLE/CFB) signature.
pub const CFB_MAGIC: [u8; 8] = [0xD0, 0xCF, 0x11, 0xE0, 0xA1, 0xB1, 0x1A, 0xE1];

/// Zip local file header signature (PK\x03\x04).
pub const ZIP_MAGIC: [u8; 4] = [0x50, 0x4B, 0x03, 0x04];

/// The container family of the source presentation file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ContainerFormat {
    /// Legacy PPT/PPS (OLE/CFB binary).
    Ppt,
    /// Modern PPTX/PPSX (Office Open XML package).
    Pptx,
}

impl ContainerFormat {
    /// Detectors in probe order. Compound file is tried before zip.
    pub const PROBE_ORDER: [ContainerFormat; 2] = [ContainerFormat::Ppt, ContainerFormat::Pptx];

    /// Whether `bytes` starts with this format's signature.
    pub fn matches(self, bytes: &[u8]) -> bool {
        match self {
            ContainerFormat::Ppt => bytes.starts_with(&CFB_MAGIC),
            ContainerFormat::Pptx => bytes.starts_with(&ZIP_MAGIC),
        }
    }

    /// Detect format from file magic bytes.
    pub fn from_magic(bytes: &[u8]) -> Option<Self> {
        Self::PROBE_ORDER.into_iter().find(|f| f.matches(bytes))
    }

    /// Short lower-case name, used in logs and listings.
    pub fn name(self) -> &'static str {
        match self {
            ContainerFormat::Ppt => "ppt",
            ContainerFormat::Pptx => "pptx",
        }
    }
}

/// Where an image's bytes live inside its container.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ImageLocator {
    /// Byte range inside the binary Pictures stream.
    Range { offset: u64, length: u64 },
    /// Entry path inside a zip package.
    ArchivePath(String),
}

impl ImageLocator {
    /// Known byte length, if the locator carries one.
    pub fn length(&self) -> Option<u64> {
        match self {
            ImageLocator::Range { length, .. } => Some(*length),
            ImageLocator::ArchivePath(_) => None,
        }
    }
}

/// A named image and how to find it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageEntry {
    /// Generated logical name, `{basename}{index}{extension}`.
    pub name: String,

    /// Location of the image bytes.
    pub locator: ImageLocator,
}

impl ImageEntry {
    pub fn new(name: impl Into<String>, locator: ImageLocator) -> Self {
        Self {
            name: name.into(),
            locator,
        }
    }
}

/// Build the logical name of the `index`-th image (1-based).
///
/// No separator is inserted: `image_name("deck", 3, ".png") == "deck3.png"`.
pub fn image_name(basename: &str, index: usize, extension: &str) -> String {
    format!("{}{}{}", basename, index, extension)
}

/// Read-only index from logical name to entry, built once per container.
#[derive(Debug, Clone, Default)]
pub struct ImageIndex {
    entries: Vec<ImageEntry>,
    by_name: HashMap<String, usize>,
}

impl ImageIndex {
    /// Build an index from entries in encounter order.
    pub fn new(entries: Vec<ImageEntry>) -> Self {
        let by_name = entries
            .iter()
            .enumerate()
            .map(|(i, e)| (e.name.clone(), i))
            .collect();
        Self { entries, by_name }
    }

    pub fn get(&self, name: &str) -> Option<&ImageEntry> {
        self.by_name.get(name).map(|&i| &self.entries[i])
    }

    pub fn contains(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    /// Entries in encounter order.
    pub fn entries(&self) -> &[ImageEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_magic() {
        let cfb = [0xD0, 0xCF, 0x11, 0xE0, 0xA1, 0xB1, 0x1A, 0xE1, 0x00];
        assert_eq!(ContainerFormat::from_magic(&cfb), Some(ContainerFormat::Ppt));

        let zip = [0x50, 0x4B, 0x03, 0x04, 0x14, 0x00, 0x06, 0x00];
        assert_eq!(ContainerFormat::from_magic(&zip), Some(ContainerFormat::Pptx));

        assert_eq!(ContainerFormat::from_magic(b"hello world"), None);
        assert_eq!(ContainerFormat::from_magic(&[0xD0, 0xCF]), None);
        assert_eq!(ContainerFormat::from_magic(&[]), None);
    }

    #[test]
    fn test_image_name() {
        assert_eq!(image_name("deck", 1, ".png"), "deck1.png");
        assert_eq!(image_name("My Talk", 12, ".emf"), "My Talk12.emf");
        assert_eq!(image_name("noext", 2, ""), "noext2");
    }

    #[test]
    fn test_index_lookup() {
        let index = ImageIndex::new(vec![
            ImageEntry::new("a1.png", ImageLocator::Range { offset: 25, length: 10 }),
            ImageEntry::new("a2.jpeg", ImageLocator::Range { offset: 60, length: 5 }),
        ]);

        assert_eq!(index.len(), 2);
        assert!(index.contains("a2.jpeg"));
        assert!(!index.contains("a3.png"));
        assert_eq!(
            index.get("a1.png").map(|e| e.locator.length()),
            Some(Some(10))
        );
        assert_eq!(index.entries()[1].name, "a2.jpeg");
    }

    #[test]
    fn test_archive_locator_has_no_length() {
        let locator = ImageLocator::ArchivePath("ppt/media/image1.png".to_string());
        assert_eq!(locator.length(), None);
    }
}
