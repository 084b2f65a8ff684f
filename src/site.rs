//! Site building: parse, split, render and write the static pages.

use std::fs;
use std::path::{Path, PathBuf};

use crate::catalog::{Catalog, SectionDef};
use crate::error::{Error, Result};
use crate::model::{Document, Paragraph};
use crate::parser::DocxParser;
use crate::render::{page_file_name, PageTemplate, RenderStats, SectionRenderer};
use crate::split::{SectionMap, SectionSplitter};

/// Name of the cover page.
pub const INDEX_FILE: &str = "index.html";

/// Default output directory.
pub const DEFAULT_OUTPUT_DIR: &str = "docs";

/// Options for building a site.
#[derive(Debug, Clone)]
pub struct SiteOptions {
    /// Directory the pages are written to
    pub output_dir: PathBuf,

    /// Base URL overriding the catalog's
    pub base_url: Option<String>,

    /// Copy the source document next to the pages
    pub copy_source: bool,

    /// Drop each section's own title line from its body
    pub skip_title: bool,
}

impl SiteOptions {
    /// Create new site options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the output directory.
    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    /// Override the base URL of every link.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Enable or disable copying the source document.
    pub fn with_copy_source(mut self, copy: bool) -> Self {
        self.copy_source = copy;
        self
    }

    /// Enable or disable dropping section title lines.
    pub fn with_skip_title(mut self, skip: bool) -> Self {
        self.skip_title = skip;
        self
    }
}

impl Default for SiteOptions {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            base_url: None,
            copy_source: true,
            skip_title: true,
        }
    }
}

/// A written section page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageReport {
    /// Section slug
    pub slug: String,
    /// Path of the written file
    pub path: PathBuf,
    /// Rendering statistics of the section body
    pub stats: RenderStats,
}

/// Outcome of writing one cataloged section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SectionOutcome {
    /// The page was written
    Written(PageReport),
    /// The section's title was not found in the document
    Missing,
}

/// Summary of a site build.
#[derive(Debug, Clone, Default)]
pub struct BuildReport {
    /// Path of the cover page
    pub index: PathBuf,
    /// Written section pages, in catalog order
    pub pages: Vec<PageReport>,
    /// Cataloged slugs absent from the document
    pub missing: Vec<String>,
    /// Path of the copied source document
    pub source_copy: Option<PathBuf>,
}

impl BuildReport {
    /// Combined render statistics over all pages.
    pub fn total_stats(&self) -> RenderStats {
        let mut total = RenderStats::new();
        for page in &self.pages {
            total.merge(&page.stats);
        }
        total
    }

    /// Number of files written, including the index and the source copy.
    pub fn file_count(&self) -> usize {
        1 + self.pages.len() + usize::from(self.source_copy.is_some())
    }
}

/// Builds the static site for one catalog.
pub struct SiteBuilder<'c> {
    catalog: &'c Catalog,
    options: SiteOptions,
    template: PageTemplate<'c>,
    renderer: SectionRenderer,
}

impl<'c> SiteBuilder<'c> {
    /// Create a builder. Fails if the catalog is invalid.
    pub fn new(catalog: &'c Catalog, options: SiteOptions) -> Result<Self> {
        catalog.validate()?;

        let mut template = PageTemplate::new(catalog);
        if let Some(ref base_url) = options.base_url {
            template = template.with_base_url(base_url);
        }

        let mut renderer = SectionRenderer::from_catalog(catalog)?;
        renderer.options_mut().skip_title = options.skip_title;

        Ok(Self {
            catalog,
            options,
            template,
            renderer,
        })
    }

    /// Get the site options.
    pub fn options(&self) -> &SiteOptions {
        &self.options
    }

    /// Get the catalog.
    pub fn catalog(&self) -> &'c Catalog {
        self.catalog
    }

    /// Split a document into the catalog's sections.
    pub fn split(&self, document: &Document) -> SectionMap {
        SectionSplitter::new(self.catalog).split(&document.paragraphs)
    }

    /// Create the output directory.
    pub fn prepare(&self) -> Result<()> {
        fs::create_dir_all(&self.options.output_dir)?;
        Ok(())
    }

    /// Write the cover page.
    pub fn write_index(&self) -> Result<PathBuf> {
        let path = self.options.output_dir.join(INDEX_FILE);
        log::info!("Writing {}", INDEX_FILE);
        fs::write(&path, self.template.index_page())?;
        Ok(path)
    }

    /// Write one section page, or report it missing.
    pub fn write_section(
        &self,
        section: &SectionDef,
        sections: &SectionMap,
        paragraphs: &[Paragraph],
    ) -> Result<SectionOutcome> {
        let file_name = page_file_name(&section.slug);
        log::info!("Writing {}", file_name);

        let Some(span) = sections.paragraphs(&section.slug, paragraphs) else {
            log::warn!("{} not found in document", section.slug);
            return Ok(SectionOutcome::Missing);
        };

        let result = self.renderer.render_with_stats(span);
        let path = self.options.output_dir.join(&file_name);
        fs::write(&path, self.template.chapter_page(section, &result.content))?;

        Ok(SectionOutcome::Written(PageReport {
            slug: section.slug.clone(),
            path,
            stats: result.stats,
        }))
    }

    /// Copy the source document into the output directory under the
    /// catalog's source file name.
    pub fn copy_source(&self, source: &Path) -> Result<PathBuf> {
        let dest = self.options.output_dir.join(&self.catalog.book.source_file);

        if dest.exists() && same_file(source, &dest)? {
            log::debug!("source is already at {}", dest.display());
            return Ok(dest);
        }

        fs::copy(source, &dest)?;
        log::info!("Copied {} to {}", source.display(), dest.display());
        Ok(dest)
    }

    /// Write the index and every section page of a parsed document.
    ///
    /// The source document is not copied.
    pub fn build_document(&self, document: &Document) -> Result<BuildReport> {
        self.prepare()?;
        let sections = self.split(document);

        let mut report = BuildReport {
            index: self.write_index()?,
            ..Default::default()
        };

        for section in &self.catalog.sections {
            match self.write_section(section, &sections, &document.paragraphs)? {
                SectionOutcome::Written(page) => report.pages.push(page),
                SectionOutcome::Missing => report.missing.push(section.slug.clone()),
            }
        }

        Ok(report)
    }

    /// Parse a DOCX file and build the complete site.
    pub fn build<P: AsRef<Path>>(&self, source: P) -> Result<BuildReport> {
        let source = source.as_ref();
        log::info!("Reading {}", source.display());
        let document = DocxParser::open(source)?.parse()?;

        let mut report = self.build_document(&document)?;
        if self.options.copy_source {
            report.source_copy = Some(self.copy_source(source)?);
        }
        Ok(report)
    }
}

fn same_file(a: &Path, b: &Path) -> Result<bool> {
    let a = a.canonicalize().map_err(Error::Io)?;
    let b = b.canonicalize().map_err(Error::Io)?;
    Ok(a == b)
}
