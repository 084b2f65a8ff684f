//! DOCX package reader using zip + quick-xml.

use std::io::{Cursor, Read, Seek};
use std::path::Path;

use quick_xml::events::Event;
use quick_xml::Reader;
use zip::result::ZipError;
use zip::ZipArchive;

use crate::detect::{detect_format_from_bytes, detect_format_from_path};
use crate::error::{Error, Result};
use crate::model::Document;

use super::body::{get_attr, parse_body};
use super::core_props::parse_core_properties;

/// Package relationships part.
const PACKAGE_RELS: &str = "_rels/.rels";
/// Core properties part.
const CORE_PROPERTIES: &str = "docProps/core.xml";
/// Main part used when the package relationships do not name one.
const DEFAULT_MAIN_PART: &str = "word/document.xml";
/// Relationship type suffix of the main document part.
const OFFICE_DOCUMENT_REL: &str = "/officeDocument";

/// DOCX document parser.
///
/// The package parts needed for parsing are read eagerly when the parser is
/// created, so parsing itself never touches the archive.
pub struct DocxParser {
    main_part: String,
    document_xml: String,
    core_xml: Option<String>,
}

impl DocxParser {
    /// Open a DOCX file.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        // Verify it's a zip container before reading the whole file
        detect_format_from_path(path)?;

        let data = std::fs::read(path)?;
        Self::from_bytes(&data)
    }

    /// Parse a DOCX from bytes.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        detect_format_from_bytes(data)?;
        let mut archive = ZipArchive::new(Cursor::new(data))?;
        Self::from_archive(&mut archive)
    }

    /// Parse a DOCX from a reader.
    pub fn from_reader<R: Read>(mut reader: R) -> Result<Self> {
        let mut data = Vec::new();
        reader.read_to_end(&mut data)?;
        Self::from_bytes(&data)
    }

    fn from_archive<R: Read + Seek>(archive: &mut ZipArchive<R>) -> Result<Self> {
        let main_part = match read_part(archive, PACKAGE_RELS)? {
            Some(rels) => find_main_part(&rels)?.unwrap_or_else(|| DEFAULT_MAIN_PART.to_string()),
            None => DEFAULT_MAIN_PART.to_string(),
        };
        log::debug!("main document part: {}", main_part);

        let document_xml =
            read_part(archive, &main_part)?.ok_or_else(|| Error::MissingPart(main_part.clone()))?;
        let core_xml = read_part(archive, CORE_PROPERTIES)?;

        Ok(Self {
            main_part,
            document_xml,
            core_xml,
        })
    }

    /// Name of the main document part inside the package.
    pub fn main_part(&self) -> &str {
        &self.main_part
    }

    /// Parse the document and return its metadata and body paragraphs.
    pub fn parse(&self) -> Result<Document> {
        let mut document = Document::new();

        if let Some(ref core) = self.core_xml {
            document.metadata = parse_core_properties(core)?;
        }

        document.paragraphs = parse_body(&self.document_xml)?;
        document.metadata.paragraph_count = document.paragraphs.len();

        Ok(document)
    }
}

/// Read a package part as text, `None` when the part does not exist.
fn read_part<R: Read + Seek>(archive: &mut ZipArchive<R>, name: &str) -> Result<Option<String>> {
    let mut file = match archive.by_name(name) {
        Ok(file) => file,
        Err(ZipError::FileNotFound) => return Ok(None),
        Err(e) => return Err(e.into()),
    };

    let mut buffer = Vec::new();
    file.read_to_end(&mut buffer)?;
    log::debug!("read part {} ({} bytes)", name, buffer.len());
    Ok(Some(String::from_utf8_lossy(&buffer).into_owned()))
}

/// Find the officeDocument relationship target in `_rels/.rels`.
fn find_main_part(rels_xml: &str) -> Result<Option<String>> {
    let mut reader = Reader::from_str(rels_xml);
    reader.trim_text(true);

    loop {
        match reader.read_event()? {
            Event::Start(ref e) | Event::Empty(ref e) if e.name().as_ref() == b"Relationship" => {
                let is_main = get_attr(e, b"Type")
                    .is_some_and(|t| t.ends_with(OFFICE_DOCUMENT_REL));
                if is_main {
                    if let Some(target) = get_attr(e, b"Target") {
                        return Ok(Some(target.trim_start_matches('/').to_string()));
                    }
                }
            }
            Event::Eof => return Ok(None),
            _ => {}
        }
    }
}
