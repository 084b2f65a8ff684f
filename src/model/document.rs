//! Document-level types.

use super::Paragraph;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A parsed DOCX document: package metadata plus the body paragraphs.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Document {
    /// Document metadata (title, author, etc.)
    pub metadata: Metadata,

    /// Body paragraphs in document order
    pub paragraphs: Vec<Paragraph>,
}

impl Document {
    /// Create a new empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a document from paragraphs.
    pub fn from_paragraphs(paragraphs: Vec<Paragraph>) -> Self {
        let mut doc = Self::new();
        doc.metadata.paragraph_count = paragraphs.len();
        doc.paragraphs = paragraphs;
        doc
    }

    /// Add a paragraph to the end of the body.
    pub fn add_paragraph(&mut self, paragraph: Paragraph) {
        self.paragraphs.push(paragraph);
        self.metadata.paragraph_count = self.paragraphs.len();
    }

    /// Number of body paragraphs.
    pub fn paragraph_count(&self) -> usize {
        self.paragraphs.len()
    }

    /// Check if the document has no paragraphs.
    pub fn is_empty(&self) -> bool {
        self.paragraphs.is_empty()
    }

    /// Get plain text content of the entire document, one paragraph per line.
    pub fn plain_text(&self) -> String {
        self.paragraphs
            .iter()
            .map(|p| p.plain_text())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Document metadata from `docProps/core.xml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Metadata {
    /// Document title
    pub title: Option<String>,

    /// Document author (`dc:creator`)
    pub author: Option<String>,

    /// Document subject
    pub subject: Option<String>,

    /// Keywords
    pub keywords: Option<String>,

    /// Last person to modify the document
    pub last_modified_by: Option<String>,

    /// Creation date
    pub created: Option<DateTime<Utc>>,

    /// Last modification date
    pub modified: Option<DateTime<Utc>>,

    /// Number of body paragraphs
    pub paragraph_count: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_paragraphs() {
        let mut doc = Document::new();
        assert!(doc.is_empty());

        doc.add_paragraph(Paragraph::with_text("First"));
        doc.add_paragraph(Paragraph::with_text("Second"));

        assert_eq!(doc.paragraph_count(), 2);
        assert_eq!(doc.metadata.paragraph_count, 2);
        assert_eq!(doc.plain_text(), "First\nSecond");
    }

    #[test]
    fn test_from_paragraphs() {
        let doc = Document::from_paragraphs(vec![Paragraph::new(); 3]);
        assert_eq!(doc.metadata.paragraph_count, 3);
    }
}
