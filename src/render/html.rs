//! HTML rendering of section bodies.

use std::fmt;

use crate::catalog::Catalog;
use crate::error::Result;
use crate::model::{Paragraph, TextRun};

use super::classify::{FragmentKind, ParagraphClassifier, PatternExclusion};
use super::options::RenderOptions;
use super::result::{RenderResult, RenderStats};

/// Escape text for HTML content and attribute values.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#x27;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Render one run with its emphasis.
pub fn run_to_html(run: &TextRun) -> String {
    if run.is_empty() {
        return String::new();
    }
    let text = escape_html(&run.text);
    match (run.style.bold, run.style.italic) {
        (true, true) => format!("<strong><em>{}</em></strong>", text),
        (true, false) => format!("<strong>{}</strong>", text),
        (false, true) => format!("<em>{}</em>", text),
        (false, false) => text,
    }
}

/// Render a paragraph's runs with inline emphasis.
///
/// Falls back to the paragraph's escaped text when the runs produce nothing.
pub fn runs_to_html(para: &Paragraph) -> String {
    let html: String = para.runs.iter().map(run_to_html).collect();
    if html.is_empty() {
        escape_html(para.plain_text())
    } else {
        html
    }
}

/// One rendered paragraph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fragment {
    /// What the paragraph rendered as
    pub kind: FragmentKind,
    /// Inner markup, without the enclosing element
    pub inner: String,
}

impl Fragment {
    /// Build the fragment for a classified paragraph.
    pub fn from_paragraph(para: &Paragraph, kind: FragmentKind) -> Self {
        let inner = match kind {
            FragmentKind::Heading => escape_html(para.trimmed()),
            FragmentKind::ListItem | FragmentKind::Paragraph => runs_to_html(para),
        };
        Self { kind, inner }
    }
}

impl fmt::Display for Fragment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            FragmentKind::Heading => write!(f, "<h2>{}</h2>", self.inner),
            FragmentKind::ListItem => write!(f, "<p class=\"list-item\">{}</p>", self.inner),
            FragmentKind::Paragraph => write!(f, "<p>{}</p>", self.inner),
        }
    }
}

/// Renders a section's paragraph span into HTML fragments.
pub struct SectionRenderer {
    options: RenderOptions,
    classifier: ParagraphClassifier,
}

impl SectionRenderer {
    /// Create a new renderer.
    pub fn new(options: RenderOptions) -> Self {
        Self {
            options,
            classifier: ParagraphClassifier::default(),
        }
    }

    /// Create a renderer from a catalog's denylist and heading exclusion.
    pub fn from_catalog(catalog: &Catalog) -> Result<Self> {
        let exclusion = PatternExclusion::new(&catalog.heading_exclusion)?;
        Ok(Self::new(RenderOptions::from_catalog(catalog))
            .with_classifier(ParagraphClassifier::new().with_exclusion(exclusion)))
    }

    /// Replace the paragraph classifier.
    pub fn with_classifier(mut self, classifier: ParagraphClassifier) -> Self {
        self.classifier = classifier;
        self
    }

    /// Get the render options.
    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    /// Get mutable access to the render options.
    pub fn options_mut(&mut self) -> &mut RenderOptions {
        &mut self.options
    }

    /// Get the paragraph classifier.
    pub fn classifier(&self) -> &ParagraphClassifier {
        &self.classifier
    }

    /// Render paragraphs to fragments, collecting statistics.
    pub fn render_fragments(&self, paragraphs: &[Paragraph]) -> (Vec<Fragment>, RenderStats) {
        let mut fragments = Vec::with_capacity(paragraphs.len());
        let mut stats = RenderStats::new();
        let mut to_skip = self.options.leading_skip_count();

        for para in paragraphs {
            let text = para.trimmed();
            if text.is_empty() {
                stats.blank_skipped += 1;
                continue;
            }
            if to_skip > 0 {
                to_skip -= 1;
                stats.title_skipped += 1;
                continue;
            }
            if self.options.is_boilerplate(text) {
                log::debug!("dropping boilerplate line: {}", text);
                stats.boilerplate_skipped += 1;
                continue;
            }

            let kind = self.classifier.classify(para);
            match kind {
                FragmentKind::Heading => stats.heading_count += 1,
                FragmentKind::ListItem => stats.list_item_count += 1,
                FragmentKind::Paragraph => stats.paragraph_count += 1,
            }
            fragments.push(Fragment::from_paragraph(para, kind));
        }

        (fragments, stats)
    }

    /// Render paragraphs to HTML with statistics.
    pub fn render_with_stats(&self, paragraphs: &[Paragraph]) -> RenderResult {
        let (fragments, stats) = self.render_fragments(paragraphs);
        let content = fragments
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("\n");
        RenderResult::new(content, stats)
    }

    /// Render paragraphs to HTML.
    pub fn render(&self, paragraphs: &[Paragraph]) -> String {
        self.render_with_stats(paragraphs).content
    }
}

impl Default for SectionRenderer {
    fn default() -> Self {
        Self::new(RenderOptions::default())
    }
}
