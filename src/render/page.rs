//! Full page templates: chapter pages and the cover index.

use crate::catalog::{Catalog, SectionDef};

use super::html::escape_html;

/// Wraps rendered section bodies in complete HTML pages.
///
/// All links are absolute under the base URL, which comes from the catalog
/// unless overridden.
#[derive(Debug, Clone)]
pub struct PageTemplate<'c> {
    catalog: &'c Catalog,
    base_url: String,
}

impl<'c> PageTemplate<'c> {
    /// Create a template using the catalog's base URL.
    pub fn new(catalog: &'c Catalog) -> Self {
        Self {
            catalog,
            base_url: trim_base(&catalog.book.base_url),
        }
    }

    /// Override the base URL.
    pub fn with_base_url(mut self, base_url: impl AsRef<str>) -> Self {
        self.base_url = trim_base(base_url.as_ref());
        self
    }

    /// The base URL, without a trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// URL of a section page.
    pub fn section_url(&self, slug: &str) -> String {
        format!("{}/{}", self.base_url, page_file_name(slug))
    }

    /// Render a chapter page around an already rendered body.
    pub fn chapter_page(&self, section: &SectionDef, body: &str) -> String {
        let base = &self.base_url;
        let book_title = escape_html(&self.catalog.book.title);
        let title = escape_html(&section.title);
        let download = escape_html(&self.catalog.book.source_file);

        let (prev_link, next_link) = self.chapter_links(&section.slug);
        let subtitle_html = match section.subtitle.as_deref() {
            Some(subtitle) if !subtitle.is_empty() => {
                format!("<p class=\"subtitle\">{}</p>", escape_html(subtitle))
            }
            _ => String::new(),
        };

        format!(
            r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="UTF-8">
<meta name="viewport" content="width=device-width, initial-scale=1.0">
<title>{title} — {book_title}</title>
<link rel="stylesheet" href="{base}/style.css">
</head>
<body>
<header>
  <nav class="top-nav">
    <a href="{base}/" class="nav-title">{book_title}</a>
    <div class="nav-links">
      <a href="{base}/">Contents</a>
      <a href="{base}/{download}" class="download-link">Download .docx</a>
    </div>
  </nav>
</header>
<main>
  <h1 class="page-title">{title}</h1>
  {subtitle_html}
  {body}
</main>
<footer>
  <nav class="chapter-nav">
    <div class="nav-prev">{prev_link}</div>
    <div class="nav-toc"><a href="{base}/">Table of Contents</a></div>
    <div class="nav-next">{next_link}</div>
  </nav>
</footer>
</body>
</html>
"#
        )
    }

    /// Render the cover page listing every cataloged section.
    pub fn index_page(&self) -> String {
        let base = &self.base_url;
        let book_title = escape_html(&self.catalog.book.title);
        let tagline = escape_html(&self.catalog.book.tagline);
        let download = escape_html(&self.catalog.book.source_file);

        let toc_items: String = self
            .catalog
            .sections
            .iter()
            .map(|section| self.toc_item(section))
            .collect();

        format!(
            r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="UTF-8">
<meta name="viewport" content="width=device-width, initial-scale=1.0">
<title>{book_title}</title>
<link rel="stylesheet" href="{base}/style.css">
</head>
<body>
<main class="cover">
  <h1 class="book-title">{book_title}</h1>
  <p class="book-subtitle">{tagline}</p>
  <div class="download-section">
    <a href="{base}/{download}" class="btn-download">Download Original (.docx)</a>
  </div>
  <nav class="toc">
    <h2>Contents</h2>
    <ol>
      {toc_items}
    </ol>
  </nav>
</main>
</body>
</html>
"#
        )
    }

    fn toc_item(&self, section: &SectionDef) -> String {
        let subtitle = match section.subtitle.as_deref() {
            Some(subtitle) if !subtitle.is_empty() => format!(
                " <span class=\"chapter-subtitle\">({})</span>",
                escape_html(subtitle)
            ),
            _ => String::new(),
        };
        format!(
            "<li><a href=\"{}\">{}{}</a></li>",
            self.section_url(&section.slug),
            escape_html(&section.title),
            subtitle
        )
    }

    /// Previous/next links in catalog order, empty at either end.
    fn chapter_links(&self, slug: &str) -> (String, String) {
        let sections = &self.catalog.sections;
        let Some(idx) = self.catalog.position(slug) else {
            return (String::new(), String::new());
        };

        let prev = idx
            .checked_sub(1)
            .and_then(|i| sections.get(i))
            .map(|s| {
                format!(
                    "<a href=\"{}\">&larr; {}</a>",
                    self.section_url(&s.slug),
                    escape_html(&s.title)
                )
            })
            .unwrap_or_default();
        let next = sections
            .get(idx + 1)
            .map(|s| {
                format!(
                    "<a href=\"{}\">{} &rarr;</a>",
                    self.section_url(&s.slug),
                    escape_html(&s.title)
                )
            })
            .unwrap_or_default();

        (prev, next)
    }
}

/// File name of a section page.
pub fn page_file_name(slug: &str) -> String {
    format!("{}.html", slug)
}

fn trim_base(base: &str) -> String {
    base.trim().trim_end_matches('/').to_string()
}
