//! DOCX container detection.
//!
//! A DOCX file is an OOXML package stored as a zip archive. Detection only
//! looks at the container signature; whether the package really holds a
//! word-processing document is decided when the main part is resolved.

use crate::error::{Error, Result};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// Zip container signature found at the start of a package.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContainerFormat {
    /// Regular archive starting with a local file header
    Zip,
}

impl std::fmt::Display for ContainerFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ContainerFormat::Zip => write!(f, "zip"),
        }
    }
}

/// Local file header magic: PK\x03\x04
const ZIP_LOCAL_HEADER: &[u8] = b"PK\x03\x04";

/// Detect the container format from a file path.
///
/// # Example
/// ```no_run
/// use docxbook::detect::detect_format_from_path;
///
/// let format = detect_format_from_path("book.docx").unwrap();
/// println!("container: {}", format);
/// ```
pub fn detect_format_from_path<P: AsRef<Path>>(path: P) -> Result<ContainerFormat> {
    let file = File::open(path)?;
    let mut reader = BufReader::new(file);
    let mut header = Vec::with_capacity(ZIP_LOCAL_HEADER.len());
    reader
        .by_ref()
        .take(ZIP_LOCAL_HEADER.len() as u64)
        .read_to_end(&mut header)?;
    detect_format_from_bytes(&header)
}

/// Detect the container format from the first bytes of a file.
///
/// An empty archive (end-of-central-directory signature only) cannot hold a
/// document and is rejected like any other non-zip input.
pub fn detect_format_from_bytes(data: &[u8]) -> Result<ContainerFormat> {
    if data.starts_with(ZIP_LOCAL_HEADER) {
        Ok(ContainerFormat::Zip)
    } else {
        Err(Error::UnknownFormat)
    }
}

/// Check if a file looks like a DOCX package.
pub fn is_docx<P: AsRef<Path>>(path: P) -> bool {
    detect_format_from_path(path).is_ok()
}

/// Check if bytes look like a DOCX package.
pub fn is_docx_bytes(data: &[u8]) -> bool {
    detect_format_from_bytes(data).is_ok()
}
