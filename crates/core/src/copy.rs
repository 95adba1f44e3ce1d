//! Bounded-memory copying from an image source to a sink.
//!
//! Images can be large, so neither container variant ever materializes a
//! whole image: bytes are moved one chunk at a time.

use crate::error::{Error, Result};
use std::io::{ErrorKind, Read, Write};

/// Default chunk size (64 KiB).
pub const DEFAULT_CHUNK_SIZE: usize = 64 * 1024;

/// Copies bytes between a reader and a writer in fixed-size chunks.
#[derive(Debug, Clone)]
pub struct ChunkedCopier {
    /// Maximum number of bytes held in memory at once.
    chunk_size: usize,
}

impl Default for ChunkedCopier {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }
}

impl ChunkedCopier {
    /// Create a copier with the default 64 KiB chunk.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a copier with a custom chunk size.
    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size.max(1);
        self
    }

    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    /// Copy exactly `total` bytes from `src` to `dst`.
    ///
    /// Never reads past `total`, so `src` is left positioned right after
    /// the copied range. Running out of data first is a
    /// [`Error::TruncatedRead`].
    pub fn copy_exact<R, W>(&self, src: &mut R, dst: &mut W, total: u64) -> Result<u64>
    where
        R: Read + ?Sized,
        W: Write + ?Sized,
    {
        let mut buf = vec![0u8; self.buffer_len(total)];
        let mut copied: u64 = 0;

        while copied < total {
            let want = (total - copied).min(buf.len() as u64) as usize;
            let n = match src.read(&mut buf[..want]) {
                Ok(0) => {
                    return Err(Error::TruncatedRead {
                        expected: total,
                        actual: copied,
                    })
                }
                Ok(n) => n,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            };
            dst.write_all(&buf[..n])?;
            copied += n as u64;
        }

        dst.flush()?;
        Ok(copied)
    }

    /// Copy from `src` to `dst` until `src` is exhausted.
    pub fn copy_to_end<R, W>(&self, src: &mut R, dst: &mut W) -> Result<u64>
    where
        R: Read + ?Sized,
        W: Write + ?Sized,
    {
        let mut buf = vec![0u8; self.chunk_size];
        let mut copied: u64 = 0;

        loop {
            let n = match src.read(&mut buf) {
                Ok(0) => break,
                Ok(n) => n,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            };
            dst.write_all(&buf[..n])?;
            copied += n as u64;
        }

        dst.flush()?;
        Ok(copied)
    }

    /// Small ranges don't need a full chunk allocated.
    fn buffer_len(&self, total: u64) -> usize {
        total.min(self.chunk_size as u64).max(1) as usize
    }
}
