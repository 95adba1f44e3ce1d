//! Record scanner for the Pictures stream.
//!
//! The Pictures stream is a flat run of BLIP records with no index. The
//! only way to find record N+1 is to know the exact size of record N, so
//! the scan is a single sequential pass: read a header, look the record up
//! in the format catalog, note where the image bytes start and end, then
//! seek past the payload. The stream is never loaded into memory.

use crate::formats;
use pptimg_core::{image_name, Error, ImageEntry, ImageLocator, Result};
use std::io::{ErrorKind, Read, Seek, SeekFrom};

/// Size of a record header in bytes.
pub const HEADER_LEN: u64 = 8;

/// An 8-byte little-endian record header.
///
/// - 2 bytes: recVer (4 bits) + recInstance (12 bits)
/// - 2 bytes: recType
/// - 4 bytes: recLen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordHeader {
    /// First header word as stored, version nibble included.
    pub instance: u16,
    pub record_type: u16,
    /// Declared payload length, excluding the header itself.
    pub length: u32,
}

impl RecordHeader {
    pub fn new(record_type: u16, instance: u16, length: u32) -> Self {
        Self {
            instance,
            record_type,
            length,
        }
    }

    /// Decode a header from its on-disk bytes.
    pub fn parse(bytes: &[u8; HEADER_LEN as usize]) -> Self {
        Self {
            instance: read_u16_le(bytes, 0),
            record_type: read_u16_le(bytes, 2),
            length: read_u32_le(bytes, 4),
        }
    }

    /// Encode the header as it appears on disk.
    pub fn to_bytes(&self) -> [u8; HEADER_LEN as usize] {
        let mut out = [0u8; HEADER_LEN as usize];
        out[0..2].copy_from_slice(&self.instance.to_le_bytes());
        out[2..4].copy_from_slice(&self.record_type.to_le_bytes());
        out[4..8].copy_from_slice(&self.length.to_le_bytes());
        out
    }
}

/// Walks a Pictures stream and locates every image record.
#[derive(Debug, Clone)]
pub struct RecordScanner {
    basename: String,
}

impl RecordScanner {
    /// Create a scanner that names images `{basename}{n}{ext}`.
    pub fn new(basename: impl Into<String>) -> Self {
        Self {
            basename: basename.into(),
        }
    }

    /// Scan `stream` from its start and return one entry per image record.
    ///
    /// Any decoding failure aborts the whole scan: offsets past a bad
    /// record cannot be trusted, so no partial list is returned.
    pub fn scan<R: Read + Seek + ?Sized>(&self, stream: &mut R) -> Result<Vec<ImageEntry>> {
        let stream_len = stream.seek(SeekFrom::End(0))?;
        stream.seek(SeekFrom::Start(0))?;

        let mut entries = Vec::new();
        let mut offset: u64 = 0;
        let mut n: usize = 1;

        while let Some(header) = read_header(stream, offset)? {
            let header_offset = offset;
            offset += HEADER_LEN;

            let format = formats::lookup(header.record_type, header.instance).ok_or_else(|| {
                Error::decoding(
                    header_offset,
                    format!(
                        "unknown record type 0x{:04X} instance 0x{:04X}",
                        header.record_type, header.instance
                    ),
                )
            })?;

            let declared = u64::from(header.length);
            let length = declared.checked_sub(format.padding).ok_or_else(|| {
                Error::decoding(
                    header_offset,
                    format!(
                        "record length {} is shorter than its {}-byte {} sub-header",
                        declared, format.padding, format.extension
                    ),
                )
            })?;

            let start = offset + format.padding;
            let end = start + length;
            if end > stream_len {
                return Err(Error::decoding(
                    header_offset,
                    format!(
                        "record payload ends at {} but the stream is only {} bytes",
                        end, stream_len
                    ),
                ));
            }

            log::trace!(
                "record {:04X}/{:04X} at {}: {} bytes of {} image data at {}",
                header.record_type,
                header.instance,
                header_offset,
                length,
                format.extension,
                start
            );

            entries.push(ImageEntry::new(
                image_name(&self.basename, n, format.extension),
                ImageLocator::Range {
                    offset: start,
                    length,
                },
            ));

            stream.seek(SeekFrom::Start(end))?;
            offset = end;
            n += 1;
        }

        log::debug!(
            "Pictures stream: {} bytes, {} image records",
            stream_len,
            entries.len()
        );

        Ok(entries)
    }
}

/// Read the next header. `None` means the stream ended cleanly.
fn read_header<R: Read + ?Sized>(stream: &mut R, offset: u64) -> Result<Option<RecordHeader>> {
    let mut buf = [0u8; HEADER_LEN as usize];
    let mut filled = 0;

    while filled < buf.len() {
        match stream.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(e.into()),
        }
    }

    match filled {
        0 => Ok(None),
        n if n == buf.len() => Ok(Some(RecordHeader::parse(&buf))),
        n => Err(Error::decoding(
            offset,
            format!("truncated record header ({} of {} bytes)", n, HEADER_LEN),
        )),
    }
}

/// Read a little-endian u16 from a byte slice.
fn read_u16_le(data: &[u8], offset: usize) -> u16 {
    u16::from_le_bytes([data[offset], data[offset + 1]])
}

/// Read a little-endian u32 from a byte slice.
fn read_u32_le(data: &[u8], offset: usize) -> u32 {
    u32::from_le_bytes([
        data[offset],
        data[offset + 1],
        data[offset + 2],
        data[offset + 3],
    ])
}
