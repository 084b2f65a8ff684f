//! Section splitting: recover chapter spans from the flat paragraph stream.
//!
//! Chapters are found by matching each paragraph's trimmed text against the
//! catalog's title strings. When a title occurs more than once (a front-matter
//! listing and the real chapter start), the last occurrence wins. Each
//! matched title owns the paragraphs up to the next matched title.

use std::borrow::Cow;
use std::collections::HashMap;
use std::ops::Range;

use unicode_normalization::UnicodeNormalization;

use crate::catalog::{Catalog, BOUNDARY_SLUG};
use crate::model::Paragraph;

/// Normalize text for title matching.
///
/// Applies NFC, then maps curly quotes and en/em dashes to their ASCII
/// counterparts. Returns the input unchanged (borrowed) when nothing differs.
pub fn normalize_text(text: &str) -> Cow<'_, str> {
    if text.is_ascii() {
        return Cow::Borrowed(text);
    }

    let normalized: String = text
        .nfc()
        .map(|c| match c {
            '\u{2018}' | '\u{2019}' => '\'',
            '\u{201C}' | '\u{201D}' => '"',
            '\u{2013}' | '\u{2014}' => '-',
            other => other,
        })
        .collect();

    if normalized == text {
        Cow::Borrowed(text)
    } else {
        Cow::Owned(normalized)
    }
}

/// What a matched title string stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Marker {
    /// Index into the catalog's sections
    Section(usize),
    /// Table-of-contents boundary
    Boundary,
}

/// Splits a paragraph sequence into the catalog's sections.
pub struct SectionSplitter<'c> {
    catalog: &'c Catalog,
    lookup: HashMap<String, Marker>,
}

impl<'c> SectionSplitter<'c> {
    /// Build the title lookup for a catalog.
    pub fn new(catalog: &'c Catalog) -> Self {
        let mut lookup = HashMap::new();

        for (idx, section) in catalog.sections.iter().enumerate() {
            for title in &section.titles {
                insert_title(&mut lookup, title, Marker::Section(idx), catalog);
            }
        }
        for marker in &catalog.boundary_markers {
            insert_title(&mut lookup, marker, Marker::Boundary, catalog);
        }

        Self { catalog, lookup }
    }

    /// Number of distinct title strings recognized (including normalized variants).
    pub fn title_count(&self) -> usize {
        self.lookup.len()
    }

    /// Split paragraphs into section spans.
    ///
    /// Never fails: a document without any recognized title yields an empty
    /// map.
    pub fn split(&self, paragraphs: &[Paragraph]) -> SectionMap {
        let mut marker_to_index: HashMap<Marker, usize> = HashMap::new();

        for (i, para) in paragraphs.iter().enumerate() {
            if let Some(marker) = self.match_title(para.trimmed()) {
                if let Some(prev) = marker_to_index.insert(marker, i) {
                    log::debug!(
                        "title of {} seen again at paragraph {} (was {})",
                        self.marker_name(marker),
                        i,
                        prev
                    );
                }
            }
        }

        let mut ordered: Vec<(Marker, usize)> = marker_to_index.into_iter().collect();
        ordered.sort_by_key(|&(_, start)| start);

        let mut spans = HashMap::new();
        for (pos, &(marker, start)) in ordered.iter().enumerate() {
            let end = ordered
                .get(pos + 1)
                .map_or(paragraphs.len(), |&(_, next)| next);
            if let Marker::Section(idx) = marker {
                let slug = self.catalog.sections[idx].slug.clone();
                log::debug!("section {} spans paragraphs {}..{}", slug, start, end);
                spans.insert(slug, start..end);
            }
        }

        SectionMap { spans }
    }

    fn match_title(&self, text: &str) -> Option<Marker> {
        if text.is_empty() {
            return None;
        }
        if let Some(marker) = self.lookup.get(text) {
            return Some(*marker);
        }
        match normalize_text(text) {
            Cow::Owned(normalized) => self.lookup.get(&normalized).copied(),
            Cow::Borrowed(_) => None,
        }
    }

    fn marker_name(&self, marker: Marker) -> &str {
        match marker {
            Marker::Section(idx) => &self.catalog.sections[idx].slug,
            Marker::Boundary => BOUNDARY_SLUG,
        }
    }
}

fn insert_title(
    lookup: &mut HashMap<String, Marker>,
    title: &str,
    marker: Marker,
    catalog: &Catalog,
) {
    let title = title.trim();
    if title.is_empty() {
        return;
    }

    let normalized = normalize_text(title);
    let variants: Vec<String> = match normalized {
        Cow::Owned(n) => vec![title.to_string(), n],
        Cow::Borrowed(_) => vec![title.to_string()],
    };

    for variant in variants {
        if let Some(previous) = lookup.insert(variant.clone(), marker) {
            if previous != marker {
                let name = |m: Marker| match m {
                    Marker::Section(idx) => catalog.sections[idx].slug.clone(),
                    Marker::Boundary => BOUNDARY_SLUG.to_string(),
                };
                log::warn!(
                    "title \"{}\" is claimed by both {} and {}; using {}",
                    variant,
                    name(previous),
                    name(marker),
                    name(marker)
                );
            }
        }
    }
}

/// Section spans keyed by slug.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SectionMap {
    spans: HashMap<String, Range<usize>>,
}

impl SectionMap {
    /// Span of a section, `None` if its title was not found.
    pub fn get(&self, slug: &str) -> Option<Range<usize>> {
        self.spans.get(slug).cloned()
    }

    /// Check if a section was found.
    pub fn contains(&self, slug: &str) -> bool {
        self.spans.contains_key(slug)
    }

    /// The paragraphs of a section.
    pub fn paragraphs<'p>(&self, slug: &str, paragraphs: &'p [Paragraph]) -> Option<&'p [Paragraph]> {
        self.spans
            .get(slug)
            .and_then(|span| paragraphs.get(span.clone()))
    }

    /// Number of sections found.
    pub fn len(&self) -> usize {
        self.spans.len()
    }

    /// Check if no section was found.
    pub fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }

    /// Sections in document order.
    pub fn in_document_order(&self) -> Vec<(&str, Range<usize>)> {
        let mut ordered: Vec<(&str, Range<usize>)> = self
            .spans
            .iter()
            .map(|(slug, span)| (slug.as_str(), span.clone()))
            .collect();
        ordered.sort_by_key(|(_, span)| span.start);
        ordered
    }

    /// Catalog slugs with no span, in catalog order.
    pub fn missing<'c>(&self, catalog: &'c Catalog) -> Vec<&'c str> {
        catalog.slugs().filter(|slug| !self.contains(slug)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{BookInfo, SectionDef};

    fn catalog() -> Catalog {
        Catalog::new(BookInfo {
            title: "Test".into(),
            tagline: String::new(),
            base_url: String::new(),
            source_file: "test.docx".into(),
        })
        .with_section(SectionDef::new("intro", "1. Intro", "Intro"))
        .with_section(SectionDef::new("calc", "2. Calculus (don\u{2019}t panic)", "Calculus"))
        .with_section(SectionDef::new("end", "3. End", "End").with_alias("3. The End"))
        .with_boundary_marker("Contents")
    }

    fn paras(texts: &[&str]) -> Vec<Paragraph> {
        texts.iter().map(|t| Paragraph::with_text(*t)).collect()
    }

    #[test]
    fn test_normalize_text() {
        assert_eq!(normalize_text("don\u{2019}t"), "don't");
        assert_eq!(normalize_text("\u{201C}q\u{201D} \u{2013} \u{2014}"), "\"q\" - -");
        assert!(matches!(normalize_text("plain ascii"), Cow::Borrowed(_)));
        // e + combining acute composes to é
        assert_eq!(normalize_text("Caf\u{0065}\u{0301}"), "Caf\u{00E9}");
    }

    #[test]
    fn test_basic_split() {
        let catalog = catalog();
        let splitter = SectionSplitter::new(&catalog);
        let doc = paras(&["front", "1. Intro", "a", "b", "2. Calculus (don't panic)", "c", "3. The End"]);

        let map = splitter.split(&doc);
        assert_eq!(map.get("intro"), Some(1..4));
        assert_eq!(map.get("calc"), Some(4..6));
        assert_eq!(map.get("end"), Some(6..7));
        assert_eq!(map.len(), 3);
    }

    #[test]
    fn test_curly_quote_in_document_matches_ascii_variant() {
        let catalog = catalog().with_section(SectionDef::new("ascii", "4. It's ascii", "Ascii"));
        let splitter = SectionSplitter::new(&catalog);
        let doc = paras(&["4. It\u{2019}s ascii", "body"]);
        assert_eq!(splitter.split(&doc).get("ascii"), Some(0..2));
    }

    #[test]
    fn test_titles_are_trimmed() {
        let catalog = catalog();
        let splitter = SectionSplitter::new(&catalog);
        let doc = paras(&["   1. Intro \t", "body"]);
        assert_eq!(splitter.split(&doc).get("intro"), Some(0..2));
    }

    #[test]
    fn test_boundary_span_discarded() {
        let catalog = catalog();
        let splitter = SectionSplitter::new(&catalog);
        let doc = paras(&["1. Intro", "x", "Contents", "toc line", "3. End", "y"]);

        let map = splitter.split(&doc);
        assert_eq!(map.get("intro"), Some(0..2));
        assert_eq!(map.get("end"), Some(4..6));
        assert!(!map.contains(BOUNDARY_SLUG));
        assert_eq!(map.len(), 2);
    }

    #[test]
    fn test_missing_sections() {
        let catalog = catalog();
        let map = SectionSplitter::new(&catalog).split(&paras(&["1. Intro"]));
        assert_eq!(map.missing(&catalog), vec!["calc", "end"]);
    }

    #[test]
    fn test_no_titles_gives_empty_map() {
        let catalog = catalog();
        let map = SectionSplitter::new(&catalog).split(&paras(&["a", "b", ""]));
        assert!(map.is_empty());
        assert!(map.in_document_order().is_empty());
    }

    #[test]
    fn test_title_count_includes_variants() {
        let catalog = catalog();
        let splitter = SectionSplitter::new(&catalog);
        // 1. Intro, curly + ascii calculus, two end titles, Contents
        assert_eq!(splitter.title_count(), 6);
    }
}
