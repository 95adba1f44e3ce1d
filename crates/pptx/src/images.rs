//! Image container backed by a PPTX zip package.

use crate::locator::ZipLocator;
use pptimg_core::{
    ChunkedCopier, ContainerFormat, Error, ImageContainer, ImageIndex, ImageLocator, Result,
};
use std::io::{Read, Seek, Write};
use zip::ZipArchive;

/// Images stored under `ppt/media/` of a `.pptx`/`.ppsx` file.
pub struct PptxImages<R> {
    basename: String,
    index: ImageIndex,
    archive: ZipArchive<R>,
    copier: ChunkedCopier,
}

impl<R: Read + Seek> PptxImages<R> {
    /// Open a zip package and index its media entries.
    pub fn open(reader: R, basename: impl Into<String>) -> Result<Self> {
        Self::open_with(reader, basename, ChunkedCopier::new())
    }

    /// Open with a custom copier.
    pub fn open_with(reader: R, basename: impl Into<String>, copier: ChunkedCopier) -> Result<Self> {
        let basename = basename.into();
        let mut archive = ZipArchive::new(reader)
            .map_err(|e| Error::ZipError(format!("Failed to open ZIP: {}", e)))?;

        let entries = ZipLocator::new(basename.as_str()).locate(&mut archive)?;
        log::debug!(
            "'{}': {} media entries out of {} archive entries",
            basename,
            entries.len(),
            archive.len()
        );

        Ok(Self {
            basename,
            index: ImageIndex::new(entries),
            archive,
            copier,
        })
    }
}

impl<R: Read + Seek> ImageContainer for PptxImages<R> {
    fn format(&self) -> ContainerFormat {
        ContainerFormat::Pptx
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

        let path = match entry.locator {
            ImageLocator::ArchivePath(ref path) => path.as_str(),
            ImageLocator::Range { offset, length } => {
                return Err(Error::ZipError(format!(
                    "'{}' is a stream range ({} bytes at {}), not an archive entry",
                    name, length, offset
                )))
            }
        };

        let mut file = self
            .archive
            .by_name(path)
            .map_err(|e| Error::ZipError(format!("File not found in archive '{}': {}", path, e)))?;

        self.copier.copy_to_end(&mut file, sink)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use zip::write::FileOptions;
    use zip::{CompressionMethod, ZipWriter};

    fn build_pptx(files: &[(&str, &[u8])]) -> Cursor<Vec<u8>> {
        let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
        let options = FileOptions::default().compression_method(CompressionMethod::Deflated);
        for (name, data) in files {
            if name.ends_with('/') {
                writer.add_directory(*name, options).unwrap();
            } else {
                writer.start_file(*name, options).unwrap();
                writer.write_all(data).unwrap();
            }
        }
        writer.finish().unwrap()
    }

    #[test]
    fn test_media_only() {
        let archive = build_pptx(&[
            ("ppt/media/image1.png", b"\x89PNG fake".as_slice()),
            ("ppt/theme/theme1.xml", b"<theme/>".as_slice()),
        ]);
        let mut images = PptxImages::open(archive, "deck").unwrap();

        assert_eq!(images.names(), vec!["deck1.png"]);

        let mut out = Vec::new();
        let n = images.extract("deck1.png", &mut out).unwrap();
        assert_eq!(n, 9);
        assert_eq!(out, b"\x89PNG fake");
    }

    #[test]
    fn test_directory_entries_are_skipped() {
        let archive = build_pptx(&[
            ("ppt/", b"".as_slice()),
            ("ppt/media/", b"".as_slice()),
            ("ppt/media/image1.jpeg", b"jpeg".as_slice()),
            ("ppt/media/image2.wdp", b"wdp".as_slice()),
        ]);
        let images = PptxImages::open(archive, "p").unwrap();
        assert_eq!(images.names(), vec!["p1.jpeg", "p2.wdp"]);
    }

    #[test]
    fn test_large_entry_is_copied_in_chunks() {
        let big: Vec<u8> = (0..200_000u32).map(|i| (i % 7) as u8).collect();
        let archive = build_pptx(&[("ppt/media/image1.tiff", big.as_slice())]);
        let copier = ChunkedCopier::new().with_chunk_size(4096);
        let mut images = PptxImages::open_with(archive, "big", copier).unwrap();

        let mut out = Vec::new();
        images.extract("big1.tiff", &mut out).unwrap();
        assert_eq!(out, big);
    }

    #[test]
    fn test_name_not_found() {
        let archive = build_pptx(&[("ppt/media/image1.png", b"png".as_slice())]);
        let mut images = PptxImages::open(archive, "deck").unwrap();

        let err = images.extract("image1.png", &mut Vec::new()).unwrap_err();
        assert!(matches!(err, Error::NameNotFound(_)));

        let mut out = Vec::new();
        images.extract("deck1.png", &mut out).unwrap();
        assert_eq!(out, b"png");
    }

    /// Rewrite the compression method of entry `name` in both its local
    /// and central directory headers.
    fn set_compression_method(archive: &mut [u8], name: &str, method: u16) {
        const LOCAL_SIG: &[u8] = b"PK\x03\x04";
        const CENTRAL_SIG: &[u8] = b"PK\x01\x02";

        let read_u16 = |data: &[u8], at: usize| u16::from_le_bytes([data[at], data[at + 1]]) as usize;
        let mut patched = 0;

        for pos in 0..archive.len().saturating_sub(46) {
            // (method offset, name length offset, name offset)
            let layout = if &archive[pos..pos + 4] == LOCAL_SIG {
                (8, 26, 30)
            } else if &archive[pos..pos + 4] == CENTRAL_SIG {
                (10, 28, 46)
            } else {
                continue;
            };

            let name_len = read_u16(&*archive, pos + layout.1);
            let start = pos + layout.2;
            if archive.get(start..start + name_len) == Some(name.as_bytes()) {
                archive[pos + layout.0..pos + layout.0 + 2].copy_from_slice(&method.to_le_bytes());
                patched += 1;
            }
        }

        assert_eq!(patched, 2, "expected a local and a central header for {}", name);
    }

    #[test]
    fn test_unsupported_non_media_entry_does_not_block_listing() {
        let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
        let stored = FileOptions::default().compression_method(CompressionMethod::Stored);
        writer.start_file("ppt/media/image1.png", stored).unwrap();
        writer.write_all(b"png bytes").unwrap();
        writer.start_file("ppt/theme/theme1.xml", stored).unwrap();
        writer.write_all(b"<a:theme/>").unwrap();
        let mut bytes = writer.finish().unwrap().into_inner();

        // 14 = LZMA, which this zip build cannot decode.
        set_compression_method(&mut bytes, "ppt/theme/theme1.xml", 14);

        let mut images = PptxImages::open(Cursor::new(bytes), "deck").unwrap();
        assert_eq!(images.names(), vec!["deck1.png"]);

        let mut out = Vec::new();
        images.extract("deck1.png", &mut out).unwrap();
        assert_eq!(out, b"png bytes");
    }

    #[test]
    fn test_extract_is_idempotent() {
        let archive = build_pptx(&[
            ("ppt/media/image1.png", b"first image".as_slice()),
            ("ppt/media/image2.emf", b"second image".as_slice()),
        ]);
        let mut images = PptxImages::open(archive, "deck").unwrap();

        let mut first = Vec::new();
        let mut second = Vec::new();
        images.extract("deck2.emf", &mut first).unwrap();
        images.extract("deck1.png", &mut Vec::new()).unwrap();
        images.extract("deck2.emf", &mut second).unwrap();

        assert_eq!(first, b"second image");
        assert_eq!(first, second);
    }

    #[test]
    fn test_not_a_zip() {
        let result = PptxImages::open(Cursor::new(b"plain text".to_vec()), "x");
        assert!(matches!(result, Err(Error::ZipError(_))));
    }
}
