//! Media locator for PPTX packages.
//!
//! PPTX stores images verbatim under `ppt/media/`, so locating them is
//! just filtering the archive's entry list and naming what's left.

use pptimg_core::{image_name, Error, ImageEntry, ImageLocator, Result};
use std::io::{Read, Seek};
use zip::ZipArchive;

/// Directory holding embedded media inside a PPTX package.
pub const MEDIA_DIR: &str = "ppt/media";

/// Assigns logical names to the media entries of a zip package.
#[derive(Debug, Clone)]
pub struct ZipLocator {
    basename: String,
}

impl ZipLocator {
    /// Create a locator that names images `{basename}{n}{ext}`.
    pub fn new(basename: impl Into<String>) -> Self {
        Self {
            basename: basename.into(),
        }
    }

    /// List the archive's entries in directory order and locate media.
    ///
    /// Only entry metadata is read, so entries with an unsupported
    /// compression method or encryption don't prevent listing.
    pub fn locate<R: Read + Seek>(&self, archive: &mut ZipArchive<R>) -> Result<Vec<ImageEntry>> {
        let mut paths = Vec::with_capacity(archive.len());
        for i in 0..archive.len() {
            let file = archive
                .by_index_raw(i)
                .map_err(|e| Error::ZipError(format!("Failed to read entry #{}: {}", i, e)))?;
            paths.push(file.name().to_string());
        }

        Ok(self.locate_paths(paths.iter().map(String::as_str)))
    }

    /// Name every path directly inside [`MEDIA_DIR`], keeping input order.
    pub fn locate_paths<'a, I>(&self, paths: I) -> Vec<ImageEntry>
    where
        I: IntoIterator<Item = &'a str>,
    {
        paths
            .into_iter()
            .filter_map(|path| media_extension(path).map(|ext| (path, ext)))
            .enumerate()
            .map(|(i, (path, ext))| {
                ImageEntry::new(
                    image_name(&self.basename, i + 1, &ext),
                    ImageLocator::ArchivePath(path.to_string()),
                )
            })
            .collect()
    }
}

/// Extension (lower-cased, with dot) of a file directly inside the media
/// directory, or `None` for anything else.
///
/// Files without an extension yield an empty string.
fn media_extension(path: &str) -> Option<String> {
    let (dir, file) = path.rsplit_once('/')?;
    if dir != MEDIA_DIR || file.is_empty() {
        return None;
    }

    // A leading dot starts a hidden name, not an extension.
    let ext = match file.rfind('.') {
        Some(pos) if pos > 0 => file[pos..].to_lowercase(),
        _ => String::new(),
    };
    Some(ext)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_media_extension() {
        assert_eq!(media_extension("ppt/media/image1.png"), Some(".png".to_string()));
        assert_eq!(media_extension("ppt/media/photo.JPEG"), Some(".jpeg".to_string()));
        assert_eq!(media_extension("ppt/media/archive.tar.gz"), Some(".gz".to_string()));
        assert_eq!(media_extension("ppt/media/noext"), Some(String::new()));
        assert_eq!(media_extension("ppt/media/.hidden"), Some(String::new()));

        assert_eq!(media_extension("ppt/media/"), None);
        assert_eq!(media_extension("ppt/media/sub/image2.png"), None);
        assert_eq!(media_extension("ppt/theme/theme1.xml"), None);
        assert_eq!(media_extension("xppt/media/image1.png"), None);
        assert_eq!(media_extension("image1.png"), None);
    }

    #[test]
    fn test_locate_paths_filters_and_numbers() {
        let paths = [
            "[Content_Types].xml",
            "ppt/media/image1.png",
            "ppt/theme/theme1.xml",
            "ppt/media/image2.jpeg",
            "ppt/slides/slide1.xml",
            "ppt/media/image3.emf",
        ];

        let entries = ZipLocator::new("deck").locate_paths(paths);
        let names: Vec<_> = entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["deck1.png", "deck2.jpeg", "deck3.emf"]);
        assert_eq!(
            entries[1].locator,
            ImageLocator::ArchivePath("ppt/media/image2.jpeg".to_string())
        );
    }

    #[test]
    fn test_locate_paths_none() {
        let entries = ZipLocator::new("deck").locate_paths(["ppt/presentation.xml"]);
        assert!(entries.is_empty());
    }
}
