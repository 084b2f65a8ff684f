//! Book catalog: the chapters a document is expected to contain.
//!
//! The catalog is the hand-maintained table that drives section splitting
//! and rendering: which title strings start which chapter, which strings are
//! table-of-contents boundaries, and which stray lines to drop. It lives in
//! data (JSON) rather than in the classification code so that an edited
//! manuscript only needs an edited catalog.
//!
//! # Example
//!
//! ```no_run
//! use docxbook::Catalog;
//!
//! fn main() -> docxbook::Result<()> {
//!     let catalog = Catalog::from_file("book.json")?;
//!     for section in &catalog.sections {
//!         println!("{} -> {}", section.slug, section.title);
//!     }
//!     Ok(())
//! }
//! ```

use std::collections::HashSet;
use std::path::Path;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Identifier reserved for table-of-contents boundary markers.
pub const BOUNDARY_SLUG: &str = "_toc";

/// Default pattern for numbered body items that must not become headings.
pub const NUMBERED_ITEM_PATTERN: &str = r"^\d+\.\s+[A-Z].*\w{10,}";

/// One chapter of the book.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionDef {
    /// Stable identifier, also the page file stem
    pub slug: String,

    /// Title strings that mark the start of this chapter in the document
    pub titles: Vec<String>,

    /// Display title
    pub title: String,

    /// Display subtitle
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
}

impl SectionDef {
    /// Create a section recognized by a single title string.
    pub fn new(
        slug: impl Into<String>,
        recognized: impl Into<String>,
        title: impl Into<String>,
    ) -> Self {
        Self {
            slug: slug.into(),
            titles: vec![recognized.into()],
            title: title.into(),
            subtitle: None,
        }
    }

    /// Set the subtitle.
    pub fn with_subtitle(mut self, subtitle: impl Into<String>) -> Self {
        self.subtitle = Some(subtitle.into());
        self
    }

    /// Add another recognized title string (spelling or unicode variant).
    pub fn with_alias(mut self, recognized: impl Into<String>) -> Self {
        self.titles.push(recognized.into());
        self
    }
}

/// Book-level information used by the page templates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookInfo {
    /// Book title
    pub title: String,

    /// Tagline shown on the cover
    #[serde(default)]
    pub tagline: String,

    /// URL prefix of every link (e.g. "/My-Book"; empty for the site root)
    #[serde(default)]
    pub base_url: String,

    /// File name of the source document, offered for download
    pub source_file: String,
}

/// The full book catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    /// Book information
    pub book: BookInfo,

    /// Chapters in reading order
    pub sections: Vec<SectionDef>,

    /// Title strings of the document's own table of contents
    #[serde(default)]
    pub boundary_markers: Vec<String>,

    /// Stray lines dropped wherever they appear inside a chapter
    #[serde(default)]
    pub skip_lines: Vec<String>,

    /// Pattern for numbered body items excluded from heading detection
    #[serde(default = "default_heading_exclusion")]
    pub heading_exclusion: String,
}

fn default_heading_exclusion() -> String {
    NUMBERED_ITEM_PATTERN.to_string()
}

impl Catalog {
    /// Create an empty catalog for a book.
    pub fn new(book: BookInfo) -> Self {
        Self {
            book,
            sections: Vec::new(),
            boundary_markers: Vec::new(),
            skip_lines: Vec::new(),
            heading_exclusion: default_heading_exclusion(),
        }
    }

    /// Add a section.
    pub fn with_section(mut self, section: SectionDef) -> Self {
        self.sections.push(section);
        self
    }

    /// Add a table-of-contents boundary marker.
    pub fn with_boundary_marker(mut self, marker: impl Into<String>) -> Self {
        self.boundary_markers.push(marker.into());
        self
    }

    /// Add a line to the boilerplate denylist.
    pub fn with_skip_line(mut self, line: impl Into<String>) -> Self {
        self.skip_lines.push(line.into());
        self
    }

    /// Set the heading exclusion pattern.
    pub fn with_heading_exclusion(mut self, pattern: impl Into<String>) -> Self {
        self.heading_exclusion = pattern.into();
        self
    }

    /// Parse and validate a catalog from JSON.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let catalog: Catalog = serde_json::from_str(json)?;
        catalog.validate()?;
        Ok(catalog)
    }

    /// Load and validate a catalog from a JSON file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Serialize the catalog as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Look up a section by slug.
    pub fn get(&self, slug: &str) -> Option<&SectionDef> {
        self.sections.iter().find(|s| s.slug == slug)
    }

    /// Position of a section in reading order.
    pub fn position(&self, slug: &str) -> Option<usize> {
        self.sections.iter().position(|s| s.slug == slug)
    }

    /// Slugs in reading order.
    pub fn slugs(&self) -> impl Iterator<Item = &str> {
        self.sections.iter().map(|s| s.slug.as_str())
    }

    /// Check the catalog for structural mistakes.
    pub fn validate(&self) -> Result<()> {
        if self.sections.is_empty() {
            return Err(Error::Catalog("catalog has no sections".into()));
        }
        if self.book.source_file.trim().is_empty() {
            return Err(Error::Catalog("book.source_file is empty".into()));
        }

        let mut seen = HashSet::new();
        for section in &self.sections {
            let slug = section.slug.trim();
            if slug.is_empty() {
                return Err(Error::Catalog(format!(
                    "section \"{}\" has an empty slug",
                    section.title
                )));
            }
            if slug == BOUNDARY_SLUG {
                return Err(Error::Catalog(format!(
                    "slug \"{}\" is reserved for boundary markers",
                    BOUNDARY_SLUG
                )));
            }
            if !seen.insert(slug) {
                return Err(Error::Catalog(format!("duplicate slug \"{}\"", slug)));
            }
            if section.titles.iter().all(|t| t.trim().is_empty()) {
                return Err(Error::Catalog(format!(
                    "section \"{}\" has no recognized titles",
                    slug
                )));
            }
        }

        Regex::new(&self.heading_exclusion).map_err(|e| {
            Error::Catalog(format!("invalid heading_exclusion pattern: {}", e))
        })?;

        Ok(())
    }

    /// The catalog of "That Math Life Yo", the book this tool was written for.
    pub fn builtin() -> Self {
        let book = BookInfo {
            title: "That Math Life Yo".into(),
            tagline: "Math is fucking dope.".into(),
            base_url: "/That-Math-Life-Yo".into(),
            source_file: "That_Math_Life_Yo.docx".into(),
        };

        let chapters: [(&str, &str, &str, &str); 14] = [
            ("preface", "1. Preface (about me and math)", "Preface", "about me and math"),
            ("glossary", "3. Term glossary", "Term Glossary", "a cheat sheet for the casino"),
            ("intro", "4. Intro (about math and cool shit)", "Intro", "about math and cool shit"),
            ("arithmetic", "5. Arithmetic (about function of values)", "Arithmetic", "about function of values"),
            ("algebra", "6. Algebra (about value of functions)", "Algebra", "about value of functions"),
            ("geometry", "7. Geometry (about math and shapes)", "Geometry", "about math and shapes"),
            ("set-theory", "Set Theory (about sets and elements)", "Set Theory", "about sets and elements"),
            ("trigonometry", "9. Trigonometry (the fuckin triangle yo)", "Trigonometry", "the fuckin triangle yo"),
            ("calculus", "10. Calculus (don\u{2019}t be afraid of change)", "Calculus", "don't be afraid of change"),
            ("statistics", "11. Statistics & Probabilities (un+certainty)", "Statistics & Probabilities", "un+certainty"),
            ("linear-algebra", "12. Linear Algebra (Matrix Re-lative)", "Linear Algebra", "Matrix Re-lative"),
            ("boolean-algebra", "13. Boolean Algebra (Not this and that)", "Boolean Algebra", "Not this and that"),
            ("topology", "14. Topology (definitely knot this)", "Topology", "definitely knot this"),
            ("game-theory", "15. Game Theory (we go2 casino)", "Game Theory", "we go2 casino"),
        ];

        let mut catalog = Catalog::new(book).with_boundary_marker("2. Table of contents");
        for (slug, recognized, title, subtitle) in chapters {
            catalog = catalog.with_section(SectionDef::new(slug, recognized, title).with_subtitle(subtitle));
        }

        // Leftover chapter markers between calculus and statistics
        for line in [
            "Statistics & Probabilities (un+certainty)",
            "Linear Algebra (Matrix Re-lative)",
            "Boolean Algebra (Not this and that)",
            "Topology (definitely knot this)",
            "Game Theory (we go2 casino)",
            "Statistics & Probabilies (un+certainty)",
            "Linear Algebra (Relativity Nativity)",
        ] {
            catalog = catalog.with_skip_line(line);
        }

        catalog
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_catalog() -> Catalog {
        Catalog::new(BookInfo {
            title: "Book".into(),
            tagline: String::new(),
            base_url: String::new(),
            source_file: "book.docx".into(),
        })
        .with_section(SectionDef::new("one", "1. One", "One"))
    }

    #[test]
    fn test_builtin_is_valid() {
        let catalog = Catalog::builtin();
        catalog.validate().unwrap();
        assert_eq!(catalog.sections.len(), 14);
        assert_eq!(catalog.position("preface"), Some(0));
        assert_eq!(catalog.position("game-theory"), Some(13));
        assert_eq!(
            catalog.get("calculus").unwrap().titles[0],
            "10. Calculus (don\u{2019}t be afraid of change)"
        );
    }

    #[test]
    fn test_json_round_trip() {
        let catalog = Catalog::builtin();
        let json = catalog.to_json().unwrap();
        let parsed = Catalog::from_json_str(&json).unwrap();
        assert_eq!(parsed, catalog);
    }

    #[test]
    fn test_json_defaults() {
        let json = r#"{
            "book": { "title": "Mini", "source_file": "mini.docx" },
            "sections": [ { "slug": "a", "titles": ["A"], "title": "A" } ]
        }"#;
        let catalog = Catalog::from_json_str(json).unwrap();
        assert_eq!(catalog.heading_exclusion, NUMBERED_ITEM_PATTERN);
        assert!(catalog.boundary_markers.is_empty());
        assert!(catalog.sections[0].subtitle.is_none());
        assert_eq!(catalog.book.base_url, "");
    }

    #[test]
    fn test_rejects_duplicate_slug() {
        let catalog = small_catalog().with_section(SectionDef::new("one", "1b. One", "One again"));
        assert!(matches!(catalog.validate(), Err(Error::Catalog(_))));
    }

    #[test]
    fn test_rejects_reserved_slug() {
        let catalog = small_catalog().with_section(SectionDef::new(BOUNDARY_SLUG, "TOC", "TOC"));
        assert!(matches!(catalog.validate(), Err(Error::Catalog(_))));
    }

    #[test]
    fn test_rejects_section_without_titles() {
        let mut catalog = small_catalog();
        catalog.sections[0].titles = vec!["  ".into()];
        assert!(matches!(catalog.validate(), Err(Error::Catalog(_))));
    }

    #[test]
    fn test_rejects_bad_pattern() {
        let catalog = small_catalog().with_heading_exclusion("([unclosed");
        assert!(matches!(catalog.validate(), Err(Error::Catalog(_))));
    }

    #[test]
    fn test_rejects_empty() {
        let mut catalog = small_catalog();
        catalog.sections.clear();
        assert!(catalog.validate().is_err());
    }
}
