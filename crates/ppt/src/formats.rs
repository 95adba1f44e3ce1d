//! BLIP record catalog for the Pictures stream.
//!
//! Each image format is stored under its own record type, and the record
//! instance says whether the record carries one or two 16-byte UIDs ahead
//! of the image bytes. The resulting sub-header length ("padding") must be
//! skipped to reach the actual image.
//!
//! Reference: [MS-ODRAW] 2.2.24 – 2.2.30.

/// Record type constants for BLIP records.
pub mod record_types {
    pub const RT_BLIP_EMF: u16 = 0xF01A;
    pub const RT_BLIP_WMF: u16 = 0xF01B;
    pub const RT_BLIP_PICT: u16 = 0xF01C;
    pub const RT_BLIP_JPEG: u16 = 0xF01D;
    pub const RT_BLIP_PNG: u16 = 0xF01E;
    pub const RT_BLIP_DIB: u16 = 0xF01F;
    pub const RT_BLIP_TIFF: u16 = 0xF029;
}

use record_types::*;

/// A known (record type, record instance) pair and how to unwrap it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormatEntry {
    pub record_type: u16,
    /// Full first header word, version nibble included.
    pub record_instance: u16,
    /// Bytes of sub-header between the record header and the image.
    pub padding: u64,
    /// Lower-case file extension with leading dot.
    pub extension: &'static str,
}

const fn entry(
    record_type: u16,
    record_instance: u16,
    padding: u64,
    extension: &'static str,
) -> FormatEntry {
    FormatEntry {
        record_type,
        record_instance,
        padding,
        extension,
    }
}

/// Every BLIP record this extractor understands.
pub static FORMATS: [FormatEntry; 16] = [
    // 2.2.24 OfficeArtBlipEMF
    entry(RT_BLIP_EMF, 0x3D40, 50, ".emf"),
    entry(RT_BLIP_EMF, 0x3D50, 66, ".emf"),
    // 2.2.25 OfficeArtBlipWMF
    entry(RT_BLIP_WMF, 0x2160, 50, ".wmf"),
    entry(RT_BLIP_WMF, 0x2170, 66, ".wmf"),
    // 2.2.26 OfficeArtBlipPICT
    entry(RT_BLIP_PICT, 0x5420, 50, ".pict"),
    entry(RT_BLIP_PICT, 0x5430, 50, ".pict"),
    // 2.2.27 OfficeArtBlipJPEG
    entry(RT_BLIP_JPEG, 0x46A0, 17, ".jpeg"),
    entry(RT_BLIP_JPEG, 0x6E20, 17, ".jpeg"),
    entry(RT_BLIP_JPEG, 0x46B0, 33, ".jpeg"),
    entry(RT_BLIP_JPEG, 0x6E30, 33, ".jpeg"),
    // 2.2.28 OfficeArtBlipPNG
    entry(RT_BLIP_PNG, 0x6E00, 17, ".png"),
    entry(RT_BLIP_PNG, 0x6E10, 33, ".png"),
    // 2.2.29 OfficeArtBlipDIB
    entry(RT_BLIP_DIB, 0x7A80, 17, ".dib"),
    entry(RT_BLIP_DIB, 0x7A90, 33, ".dib"),
    // 2.2.30 OfficeArtBlipTIFF
    entry(RT_BLIP_TIFF, 0x6E40, 17, ".tiff"),
    entry(RT_BLIP_TIFF, 0x6E50, 33, ".tiff"),
];

/// Find the catalog entry for a record, if it is a known image record.
pub fn lookup(record_type: u16, record_instance: u16) -> Option<&'static FormatEntry> {
    FORMATS
        .iter()
        .find(|f| f.record_type == record_type && f.record_instance == record_instance)
}
