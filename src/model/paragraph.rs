//! Paragraph and text-level types.

use serde::{Deserialize, Serialize};

/// A paragraph of the document body.
///
/// `text` is the paragraph's full text as the reader saw it. It is usually the
/// concatenation of the runs, but may carry text that lives outside any run,
/// so a paragraph can have text and no runs at all.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Paragraph {
    /// Full paragraph text
    pub text: String,

    /// Styled runs in source order
    pub runs: Vec<TextRun>,
}

impl Paragraph {
    /// Create a new empty paragraph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a paragraph that has text but no runs.
    pub fn with_text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            runs: Vec::new(),
        }
    }

    /// Create a paragraph from runs; the text is their concatenation.
    pub fn from_runs(runs: impl IntoIterator<Item = TextRun>) -> Self {
        let mut p = Self::new();
        for run in runs {
            p.add_run(run);
        }
        p
    }

    /// Append a styled run, extending the paragraph text.
    pub fn add_run(&mut self, run: TextRun) {
        self.text.push_str(&run.text);
        self.runs.push(run);
    }

    /// Append text that does not belong to any run.
    pub fn add_text(&mut self, text: &str) {
        self.text.push_str(text);
    }

    /// Get the plain text of the paragraph.
    pub fn plain_text(&self) -> &str {
        &self.text
    }

    /// Text with surrounding whitespace removed.
    pub fn trimmed(&self) -> &str {
        self.text.trim()
    }

    /// Check if the paragraph has no visible text.
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }

    /// Check if the paragraph carries styled runs.
    pub fn has_runs(&self) -> bool {
        !self.runs.is_empty()
    }
}

/// A run of text with consistent styling.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextRun {
    /// The text content
    pub text: String,

    /// Text styling
    pub style: TextStyle,
}

impl TextRun {
    /// Create a new text run with default style.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            style: TextStyle::default(),
        }
    }

    /// Create a text run with the given style.
    pub fn styled(text: impl Into<String>, style: TextStyle) -> Self {
        Self {
            text: text.into(),
            style,
        }
    }

    /// Create a bold text run.
    pub fn bold(text: impl Into<String>) -> Self {
        Self::styled(
            text,
            TextStyle {
                bold: true,
                italic: false,
            },
        )
    }

    /// Create an italic text run.
    pub fn italic(text: impl Into<String>) -> Self {
        Self::styled(
            text,
            TextStyle {
                bold: false,
                italic: true,
            },
        )
    }

    /// Create a bold and italic text run.
    pub fn bold_italic(text: impl Into<String>) -> Self {
        Self::styled(
            text,
            TextStyle {
                bold: true,
                italic: true,
            },
        )
    }

    /// Check if this run is empty.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Check if the run contains any non-whitespace text.
    pub fn has_visible_text(&self) -> bool {
        !self.text.trim().is_empty()
    }
}

/// Direct run formatting.
///
/// Only formatting set on the run itself is recorded; formatting inherited
/// from paragraph or character styles is not resolved.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextStyle {
    /// Bold text
    pub bold: bool,

    /// Italic text
    pub italic: bool,
}

impl TextStyle {
    /// Check if any styling is applied.
    pub fn has_styling(&self) -> bool {
        self.bold || self.italic
    }
}
