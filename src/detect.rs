//! Spreadsheet container detection.

use crate::error::{Error, Result};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// Container information derived from the leading bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContainerFormat {
    /// A ZIP archive (the OOXML package container)
    Zip,
    /// An empty ZIP archive (end-of-central-directory record only)
    EmptyZip,
}

impl std::fmt::Display for ContainerFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ContainerFormat::Zip => write!(f, "ZIP"),
            ContainerFormat::EmptyZip => write!(f, "empty ZIP"),
        }
    }
}

/// ZIP local file header magic: PK\x03\x04
const ZIP_MAGIC: &[u8] = b"PK\x03\x04";
/// ZIP end-of-central-directory magic, the first record of an empty archive
const ZIP_EMPTY_MAGIC: &[u8] = b"PK\x05\x06";
/// Legacy OLE2 compound document magic (`.xls`, encrypted `.xlsx`)
const OLE2_MAGIC: &[u8] = &[0xD0, 0xCF, 0x11, 0xE0, 0xA1, 0xB1, 0x1A, 0xE1];

/// Detect the container format from a file path.
///
/// # Example
/// ```no_run
/// use sheetpdf::detect::detect_format_from_path;
///
/// let format = detect_format_from_path("report.xlsx").unwrap();
/// println!("container: {}", format);
/// ```
pub fn detect_format_from_path<P: AsRef<Path>>(path: P) -> Result<ContainerFormat> {
    let file = File::open(path)?;
    let mut reader = BufReader::new(file);
    let mut header = [0u8; 8];
    let mut filled = 0;
    while filled < header.len() {
        let n = reader.read(&mut header[filled..])?;
        if n == 0 {
            break;
        }
        filled += n;
    }
    detect_format_from_bytes(&header[..filled])
}

/// Detect the container format from leading bytes.
///
/// # Returns
/// * `Ok(ContainerFormat)` if the data starts with a ZIP signature
/// * `Err(Error::Format)` otherwise, naming legacy `.xls` files explicitly
pub fn detect_format_from_bytes(data: &[u8]) -> Result<ContainerFormat> {
    if data.starts_with(ZIP_MAGIC) {
        return Ok(ContainerFormat::Zip);
    }
    if data.starts_with(ZIP_EMPTY_MAGIC) {
        return Ok(ContainerFormat::EmptyZip);
    }
    if data.starts_with(OLE2_MAGIC) {
        return Err(Error::Format(
            "legacy binary workbook (OLE2) or encrypted package is not supported".to_string(),
        ));
    }
    if data.is_empty() {
        return Err(Error::Format("input is empty".to_string()));
    }
    Err(Error::Format("input is not a ZIP container".to_string()))
}

/// Check if bytes look like a spreadsheet package container.
pub fn is_xlsx_bytes(data: &[u8]) -> bool {
    detect_format_from_bytes(data).is_ok()
}

/// Check if a file looks like a spreadsheet package container.
pub fn is_xlsx<P: AsRef<Path>>(path: P) -> bool {
    detect_format_from_path(path).is_ok()
}
