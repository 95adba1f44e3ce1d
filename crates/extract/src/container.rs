//! Format detection and the polymorphic container front end.

use pptimg_core::{ChunkedCopier, ContainerFormat, Error, ImageContainer, ImageIndex, Result};
use pptimg_ppt::PptImages;
use pptimg_pptx::PptxImages;
use std::fmt;
use std::fs::File;
use std::io::{BufReader, Read, Seek, SeekFrom, Write};
use std::path::Path;

/// Number of leading bytes needed to tell the formats apart.
const MAGIC_LEN: u64 = 8;

/// A presentation opened as whichever container family it turned out to be.
pub enum Container<F> {
    Ppt(PptImages<F>),
    Pptx(PptxImages<F>),
}

impl Container<BufReader<File>> {
    /// Open a presentation file, detecting its format from its contents.
    ///
    /// The file extension is never consulted. Images are named after the
    /// file stem.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        Self::open_with(path, ChunkedCopier::new())
    }

    /// Open with a custom copier.
    pub fn open_with(path: impl AsRef<Path>, copier: ChunkedCopier) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)?;
        let basename = basename_of(path);
        log::debug!("Opening {} (basename '{}')", path.display(), basename);
        Self::from_reader(BufReader::new(file), basename, copier)
    }
}

impl<F: Read + Seek> Container<F> {
    /// Detect the format of `reader` and build the matching container.
    pub fn from_reader(mut reader: F, basename: impl Into<String>, copier: ChunkedCopier) -> Result<Self> {
        let format = detect_format(&mut reader)?;
        log::debug!("Detected {} container", format.name());

        match format {
            ContainerFormat::Ppt => PptImages::open_with(reader, basename, copier).map(Container::Ppt),
            ContainerFormat::Pptx => {
                PptxImages::open_with(reader, basename, copier).map(Container::Pptx)
            }
        }
    }

    fn inner(&self) -> &dyn ImageContainer {
        match self {
            Container::Ppt(c) => c,
            Container::Pptx(c) => c,
        }
    }

    fn inner_mut(&mut self) -> &mut dyn ImageContainer {
        match self {
            Container::Ppt(c) => c,
            Container::Pptx(c) => c,
        }
    }
}

impl<F: Read + Seek> ImageContainer for Container<F> {
    fn format(&self) -> ContainerFormat {
        self.inner().format()
    }

    fn basename(&self) -> &str {
        self.inner().basename()
    }

    fn index(&self) -> &ImageIndex {
        self.inner().index()
    }

    fn extract(&mut self, name: &str, sink: &mut dyn Write) -> Result<u64> {
        self.inner_mut().extract(name, sink)
    }
}

impl<F: Read + Seek> fmt::Display for Container<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<PowerPoint file with {} images>", self.len())
    }
}

/// Probe the leading bytes of `reader` and rewind it.
///
/// Detectors are tried in [`ContainerFormat::PROBE_ORDER`]: compound file
/// first, then zip.
pub fn detect_format<R: Read + Seek>(reader: &mut R) -> Result<ContainerFormat> {
    let mut magic = Vec::with_capacity(MAGIC_LEN as usize);
    reader.by_ref().take(MAGIC_LEN).read_to_end(&mut magic)?;
    reader.seek(SeekFrom::Start(0))?;

    ContainerFormat::from_magic(&magic).ok_or_else(|| {
        Error::UnrecognizedFormat(format!(
            "no compound-file or zip signature in leading bytes {:02X?}",
            magic
        ))
    })
}

/// File stem used as the image basename.
pub fn basename_of(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "image".to_string())
}
