//! Section rendering result with statistics.

use serde::{Deserialize, Serialize};

/// Result of rendering one section body.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RenderResult {
    /// The rendered markup fragments, joined by newlines
    pub content: String,

    /// Rendering statistics
    pub stats: RenderStats,
}

impl RenderResult {
    /// Create a new render result.
    pub fn new(content: String, stats: RenderStats) -> Self {
        Self { content, stats }
    }
}

/// Counters collected while rendering a section.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderStats {
    /// Number of sub-headings emitted
    pub heading_count: u32,

    /// Number of list items emitted
    pub list_item_count: u32,

    /// Number of body paragraphs emitted
    pub paragraph_count: u32,

    /// Blank paragraphs dropped
    pub blank_skipped: u32,

    /// Leading title lines dropped
    pub title_skipped: u32,

    /// Boilerplate lines dropped
    pub boilerplate_skipped: u32,
}

impl RenderStats {
    /// Create new empty statistics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of fragments emitted.
    pub fn fragment_count(&self) -> u32 {
        self.heading_count + self.list_item_count + self.paragraph_count
    }

    /// Number of paragraphs dropped for any reason.
    pub fn skipped_count(&self) -> u32 {
        self.blank_skipped + self.title_skipped + self.boilerplate_skipped
    }

    /// Merge another stats instance into this one.
    pub fn merge(&mut self, other: &RenderStats) {
        self.heading_count += other.heading_count;
        self.list_item_count += other.list_item_count;
        self.paragraph_count += other.paragraph_count;
        self.blank_skipped += other.blank_skipped;
        self.title_skipped += other.title_skipped;
        self.boilerplate_skipped += other.boilerplate_skipped;
    }
}
