//! Writing extracted images to disk.

use pptimg_core::{Error, ImageContainer, Result};
use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};

/// Extract one image into `dir`, under `rename` if given, else its own name.
///
/// A partially written file is removed if the extraction fails.
pub fn extract_to_dir<C>(
    container: &mut C,
    name: &str,
    dir: &Path,
    rename: Option<&str>,
) -> Result<PathBuf>
where
    C: ImageContainer + ?Sized,
{
    // Check first so a bad name doesn't leave an empty file behind.
    if !container.contains(name) {
        return Err(Error::NameNotFound(name.to_string()));
    }

    let target = dir.join(rename.unwrap_or(name));
    let mut writer = BufWriter::new(File::create(&target)?);

    match container.extract(name, &mut writer) {
        Ok(n) => {
            log::debug!("Wrote {} bytes to {}", n, target.display());
            Ok(target)
        }
        Err(e) => {
            drop(writer);
            if let Err(rm) = fs::remove_file(&target) {
                log::warn!("Could not remove partial file {}: {}", target.display(), rm);
            }
            Err(e)
        }
    }
}

/// Extract every image into `dir`, creating it if needed.
///
/// Images are written one at a time. The first failure stops the run, and
/// its partially written file is removed.
pub fn extract_all_to_dir<C: ImageContainer>(container: &mut C, dir: &Path) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(dir)?;

    let names: Vec<String> = container
        .index()
        .entries()
        .iter()
        .map(|e| e.name.clone())
        .collect();
    let mut written = Vec::with_capacity(names.len());
    for name in &names {
        written.push(extract_to_dir(container, name, dir, None)?);
    }

    Ok(written)
}
