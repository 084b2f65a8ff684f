//! Paragraph classification: sub-heading, list item or body paragraph.

use regex::Regex;

use crate::catalog::NUMBERED_ITEM_PATTERN;
use crate::error::{Error, Result};
use crate::model::Paragraph;

/// Predicate that vetoes heading classification for otherwise heading-like text.
pub trait HeadingExclusion: Send + Sync {
    /// Return `true` if `text` (already trimmed) must not become a heading.
    fn excludes(&self, text: &str) -> bool;
}

impl<F> HeadingExclusion for F
where
    F: Fn(&str) -> bool + Send + Sync,
{
    fn excludes(&self, text: &str) -> bool {
        self(text)
    }
}

/// Exclusion by regular expression, matched at the start of the text.
#[derive(Debug, Clone)]
pub struct PatternExclusion {
    pattern: Regex,
}

impl PatternExclusion {
    /// Compile an exclusion pattern.
    pub fn new(pattern: &str) -> Result<Self> {
        let pattern = Regex::new(pattern)
            .map_err(|e| Error::Catalog(format!("invalid heading exclusion: {}", e)))?;
        Ok(Self { pattern })
    }

    /// Numbered body items such as "1. There are three kinds of ...".
    pub fn numbered_items() -> Self {
        Self {
            pattern: Regex::new(NUMBERED_ITEM_PATTERN).unwrap(),
        }
    }

    /// The pattern source.
    pub fn as_str(&self) -> &str {
        self.pattern.as_str()
    }
}

impl HeadingExclusion for PatternExclusion {
    fn excludes(&self, text: &str) -> bool {
        self.pattern
            .find(text)
            .is_some_and(|m| m.start() == 0)
    }
}

/// Kind of markup a paragraph renders to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FragmentKind {
    /// Sub-heading inside a chapter
    Heading,
    /// Bulleted line
    ListItem,
    /// Body paragraph
    Paragraph,
}

/// Default maximum length of a sub-heading, in characters.
pub const MAX_HEADING_CHARS: usize = 100;

/// Classifies paragraphs from their text and run formatting alone.
pub struct ParagraphClassifier {
    max_heading_chars: usize,
    list_prefixes: Vec<String>,
    exclusion: Box<dyn HeadingExclusion>,
}

impl ParagraphClassifier {
    /// Create a classifier with the default rules.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the maximum sub-heading length.
    pub fn with_max_heading_chars(mut self, max: usize) -> Self {
        self.max_heading_chars = max;
        self
    }

    /// Replace the heading exclusion predicate.
    pub fn with_exclusion(mut self, exclusion: impl HeadingExclusion + 'static) -> Self {
        self.exclusion = Box::new(exclusion);
        self
    }

    /// Replace the prefixes that mark a list item.
    pub fn with_list_prefixes<I, S>(mut self, prefixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.list_prefixes = prefixes.into_iter().map(Into::into).collect();
        self
    }

    /// Check whether a paragraph is a sub-heading.
    ///
    /// A sub-heading is short, made only of bold runs (whitespace-only runs
    /// don't count either way), and doesn't look like a numbered body item.
    pub fn is_subheading(&self, para: &Paragraph) -> bool {
        let text = para.trimmed();
        if text.is_empty() || text.chars().count() > self.max_heading_chars {
            return false;
        }
        if !para.has_runs() {
            return false;
        }

        let mut has_bold_text = false;
        for run in para.runs.iter().filter(|r| r.has_visible_text()) {
            if !run.style.bold {
                return false;
            }
            has_bold_text = true;
        }
        if !has_bold_text {
            return false;
        }

        !self.exclusion.excludes(text)
    }

    /// Check whether a paragraph is a list item by its leading characters.
    pub fn is_list_item(&self, para: &Paragraph) -> bool {
        let text = para.trimmed();
        self.list_prefixes.iter().any(|p| text.starts_with(p.as_str()))
    }

    /// Classify a paragraph.
    pub fn classify(&self, para: &Paragraph) -> FragmentKind {
        if self.is_subheading(para) {
            FragmentKind::Heading
        } else if self.is_list_item(para) {
            FragmentKind::ListItem
        } else {
            FragmentKind::Paragraph
        }
    }
}

impl Default for ParagraphClassifier {
    fn default() -> Self {
        Self {
            max_heading_chars: MAX_HEADING_CHARS,
            list_prefixes: vec!["\u{2022}".to_string(), "- ".to_string()],
            exclusion: Box::new(PatternExclusion::numbered_items()),
        }
    }
}
