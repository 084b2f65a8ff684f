//! # docxbook
//!
//! Turn a single DOCX manuscript into a static HTML book site.
//!
//! The document is read as a flat stream of paragraphs. Chapters are
//! recovered by matching paragraph text against a catalog of known titles,
//! each chapter body is classified into sub-headings, list items and body
//! paragraphs, and the result is written as one page per chapter plus a
//! cover page.
//!
//! ## Quick Start
//!
//! ```no_run
//! use docxbook::{build_site, Catalog, SiteOptions};
//!
//! fn main() -> docxbook::Result<()> {
//!     let catalog = Catalog::builtin();
//!     let report = build_site("That_Math_Life_Yo.docx", &catalog, SiteOptions::default())?;
//!
//!     for slug in &report.missing {
//!         eprintln!("missing: {}", slug);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **DOCX reading**: body paragraphs with bold/italic runs, straight from the zip package
//! - **Section splitting**: title matching with smart-quote normalization, last occurrence wins
//! - **Classification**: bold-only short paragraphs become sub-headings, bullets become list items
//! - **Configurable catalog**: chapters, boilerplate lines and book info as JSON

pub mod catalog;
pub mod detect;
pub mod error;
pub mod model;
pub mod parser;
pub mod render;
pub mod site;
pub mod split;

// Re-export commonly used types
pub use catalog::{BookInfo, Catalog, SectionDef, BOUNDARY_SLUG};
pub use detect::{detect_format_from_bytes, detect_format_from_path, is_docx, ContainerFormat};
pub use error::{Error, Result};
pub use model::{Document, Metadata, Paragraph, TextRun, TextStyle};
pub use parser::DocxParser;
pub use render::{
    FragmentKind, HeadingExclusion, JsonFormat, PageTemplate, ParagraphClassifier,
    PatternExclusion, RenderOptions, RenderStats, SectionRenderer,
};
pub use site::{BuildReport, PageReport, SectionOutcome, SiteBuilder, SiteOptions};
pub use split::{normalize_text, SectionMap, SectionSplitter};

use std::io::Read;
use std::path::{Path, PathBuf};

/// Parse a DOCX file and return its body paragraphs and metadata.
///
/// # Example
///
/// ```no_run
/// use docxbook::parse_file;
///
/// let doc = parse_file("book.docx").unwrap();
/// println!("Paragraphs: {}", doc.paragraph_count());
/// ```
pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<Document> {
    let parser = DocxParser::open(path)?;
    parser.parse()
}

/// Parse a DOCX from bytes.
pub fn parse_bytes(data: &[u8]) -> Result<Document> {
    let parser = DocxParser::from_bytes(data)?;
    parser.parse()
}

/// Parse a DOCX from a reader.
pub fn parse_reader<R: Read>(reader: R) -> Result<Document> {
    let parser = DocxParser::from_reader(reader)?;
    parser.parse()
}

/// Split a document into the catalog's sections.
pub fn split_sections(document: &Document, catalog: &Catalog) -> SectionMap {
    SectionSplitter::new(catalog).split(&document.paragraphs)
}

/// Render one section's paragraphs to HTML fragments using the catalog's rules.
///
/// # Example
///
/// ```
/// use docxbook::{render_section, Catalog, Paragraph, TextRun};
///
/// let paras = vec![
///     Paragraph::with_text("4. Intro (about math and cool shit)"),
///     Paragraph::from_runs([TextRun::bold("Why bother")]),
///     Paragraph::with_text("- because"),
/// ];
/// let html = render_section(&paras, &Catalog::builtin(), true).unwrap();
/// assert_eq!(html, "<h2>Why bother</h2>\n<p class=\"list-item\">- because</p>");
/// ```
pub fn render_section(paragraphs: &[Paragraph], catalog: &Catalog, skip_title: bool) -> Result<String> {
    let mut renderer = SectionRenderer::from_catalog(catalog)?;
    renderer.options_mut().skip_title = skip_title;
    Ok(renderer.render(paragraphs))
}

/// Build the complete site for a DOCX file.
pub fn build_site<P: AsRef<Path>>(
    path: P,
    catalog: &Catalog,
    options: SiteOptions,
) -> Result<BuildReport> {
    SiteBuilder::new(catalog, options)?.build(path)
}

/// Convert a DOCX to JSON.
pub fn to_json<P: AsRef<Path>>(path: P, format: JsonFormat) -> Result<String> {
    let doc = parse_file(path)?;
    render::to_json(&doc, format)
}

/// Builder for turning a DOCX into a site.
///
/// # Example
///
/// ```no_run
/// use docxbook::Docxbook;
///
/// let report = Docxbook::new()
///     .with_output_dir("site")
///     .with_base_url("/book")
///     .without_source_copy()
///     .build("book.docx")?;
/// println!("{} pages", report.pages.len());
/// # Ok::<(), docxbook::Error>(())
/// ```
pub struct Docxbook {
    catalog: Catalog,
    options: SiteOptions,
}

impl Docxbook {
    /// Create a builder with the built-in catalog.
    pub fn new() -> Self {
        Self {
            catalog: Catalog::builtin(),
            options: SiteOptions::default(),
        }
    }

    /// Use a custom catalog.
    pub fn with_catalog(mut self, catalog: Catalog) -> Self {
        self.catalog = catalog;
        self
    }

    /// Load the catalog from a JSON file.
    pub fn with_catalog_file<P: AsRef<Path>>(mut self, path: P) -> Result<Self> {
        self.catalog = Catalog::from_file(path)?;
        Ok(self)
    }

    /// Set the output directory.
    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.options = self.options.with_output_dir(dir);
        self
    }

    /// Override the base URL of every link.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.options = self.options.with_base_url(base_url);
        self
    }

    /// Don't copy the source document into the output directory.
    pub fn without_source_copy(mut self) -> Self {
        self.options = self.options.with_copy_source(false);
        self
    }

    /// Get the catalog.
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Build the site.
    pub fn build<P: AsRef<Path>>(&self, path: P) -> Result<BuildReport> {
        SiteBuilder::new(&self.catalog, self.options.clone())?.build(path)
    }
}

impl Default for Docxbook {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_docxbook_builder() {
        let book = Docxbook::new()
            .with_output_dir("out")
            .with_base_url("/b")
            .without_source_copy();

        assert_eq!(book.options.output_dir, PathBuf::from("out"));
        assert_eq!(book.options.base_url.as_deref(), Some("/b"));
        assert!(!book.options.copy_source);
        assert_eq!(book.catalog().sections.len(), 14);
    }

    // ==================== Edge Case Tests ====================

    #[test]
    fn test_parse_bytes_empty_data() {
        let data: [u8; 0] = [];
        assert!(matches!(parse_bytes(&data), Err(Error::UnknownFormat)));
    }

    #[test]
    fn test_parse_bytes_empty_archive_signature() {
        let data = b"PK\x05\x06\0\0\0\0\0\0\0\0\0\0\0\0\0\0\0\0\0\0";
        assert!(matches!(parse_bytes(data), Err(Error::UnknownFormat)));
    }

    #[test]
    fn test_parse_bytes_truncated_zip() {
        let data = b"PK\x03\x04 truncated";
        assert!(parse_bytes(data).is_err());
    }

    #[test]
    fn test_parse_file_not_found() {
        let result = parse_file("/nonexistent/book.docx");
        assert!(matches!(result, Err(Error::Io(_))));
    }

    #[test]
    fn test_split_sections_empty_document() {
        let map = split_sections(&Document::new(), &Catalog::builtin());
        assert!(map.is_empty());
    }

    #[test]
    fn test_render_section_without_skip() {
        let paras = vec![Paragraph::with_text("Title"), Paragraph::with_text("it's")];
        let html = render_section(&paras, &Catalog::builtin(), false).unwrap();
        assert_eq!(html, "<p>Title</p>\n<p>it&#x27;s</p>");
    }
}
