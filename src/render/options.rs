//! Rendering options and configuration.

use std::collections::HashSet;

use crate::catalog::Catalog;

/// Options for rendering a section body.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Drop the section's own title line (the first non-blank paragraph)
    pub skip_title: bool,

    /// Exact trimmed lines dropped wherever they appear
    pub skip_lines: HashSet<String>,
}

impl RenderOptions {
    /// Create new render options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Options carrying a catalog's boilerplate denylist.
    pub fn from_catalog(catalog: &Catalog) -> Self {
        Self::new().with_skip_lines(catalog.skip_lines.iter().cloned())
    }

    /// Enable or disable dropping the leading title line.
    pub fn with_skip_title(mut self, skip: bool) -> Self {
        self.skip_title = skip;
        self
    }

    /// Add one boilerplate line.
    pub fn with_skip_line(mut self, line: impl Into<String>) -> Self {
        self.skip_lines.insert(line.into().trim().to_string());
        self
    }

    /// Add several boilerplate lines.
    pub fn with_skip_lines<I, S>(mut self, lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for line in lines {
            self.skip_lines.insert(line.into().trim().to_string());
        }
        self
    }

    /// Number of leading non-blank lines to drop.
    pub fn leading_skip_count(&self) -> usize {
        usize::from(self.skip_title)
    }

    /// Check if a trimmed line is boilerplate.
    pub fn is_boilerplate(&self, text: &str) -> bool {
        self.skip_lines.contains(text)
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            skip_title: true,
            skip_lines: HashSet::new(),
        }
    }
}
