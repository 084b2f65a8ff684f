//! Walks `word/document.xml` into body paragraphs.
//!
//! Nesting is tracked by element depth so that only direct children count:
//! paragraphs directly under `body`, runs directly under a paragraph (or
//! under a paragraph-level hyperlink), text directly under a run. Anything
//! deeper (tables, content controls, text boxes, drawings) falls through.
//!
//! Element names are resolved against the WordprocessingML namespace, so the
//! prefix a package binds it to does not matter.

use quick_xml::events::{BytesStart, Event};
use quick_xml::name::{Namespace, ResolveResult};
use quick_xml::NsReader;

use crate::error::Result;
use crate::model::{Paragraph, TextRun, TextStyle};

/// WordprocessingML main namespace.
const WML_NS: &[u8] = b"http://schemas.openxmlformats.org/wordprocessingml/2006/main";

/// Parse the main document part and return its body paragraphs in order.
pub fn parse_body(xml: &str) -> Result<Vec<Paragraph>> {
    let mut reader = NsReader::from_str(xml);
    reader.trim_text(false);

    let mut walker = BodyWalker::default();
    loop {
        let (ns, event) = reader.read_resolved_event()?;
        let in_wml = matches!(ns, ResolveResult::Bound(Namespace(uri)) if uri == WML_NS);

        match event {
            Event::Start(ref e) => {
                walker.depth += 1;
                walker.open(e, wml_name(in_wml, e.local_name().as_ref()));
            }
            Event::Empty(ref e) => {
                let local = e.local_name();
                let name = wml_name(in_wml, local.as_ref());
                walker.depth += 1;
                walker.open(e, name);
                walker.close(name);
                walker.depth -= 1;
            }
            Event::End(ref e) => {
                walker.close(wml_name(in_wml, e.local_name().as_ref()));
                walker.depth = walker.depth.saturating_sub(1);
            }
            Event::Text(ref e) => {
                if walker.wants_text() {
                    let text = e.unescape()?;
                    walker.push_text(&text);
                }
            }
            Event::CData(ref e) => {
                if walker.wants_text() {
                    let text = String::from_utf8_lossy(e).into_owned();
                    walker.push_text(&text);
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if !walker.saw_body {
        log::warn!("no WordprocessingML body found in the main document part");
    }
    log::debug!("parsed {} body paragraphs", walker.paragraphs.len());
    Ok(walker.paragraphs)
}

/// Local name of a WordprocessingML element; empty for any other namespace.
fn wml_name(in_wml: bool, local: &[u8]) -> &[u8] {
    if in_wml {
        local
    } else {
        b""
    }
}

#[derive(Default)]
struct BodyWalker {
    depth: usize,
    body_depth: Option<usize>,
    saw_body: bool,
    paragraph: Option<OpenParagraph>,
    paragraphs: Vec<Paragraph>,
}

struct OpenParagraph {
    depth: usize,
    hyperlink_depth: Option<usize>,
    run: Option<OpenRun>,
    paragraph: Paragraph,
}

struct OpenRun {
    depth: usize,
    /// Hyperlink runs only feed the paragraph text.
    text_only: bool,
    props_depth: Option<usize>,
    change_depth: Option<usize>,
    in_text: bool,
    text: String,
    style: TextStyle,
}

impl OpenRun {
    fn new(depth: usize, text_only: bool) -> Self {
        Self {
            depth,
            text_only,
            props_depth: None,
            change_depth: None,
            in_text: false,
            text: String::new(),
            style: TextStyle::default(),
        }
    }
}

impl BodyWalker {
    fn open(&mut self, e: &BytesStart<'_>, name: &[u8]) {
        let depth = self.depth;

        if name == b"body" && self.body_depth.is_none() {
            self.body_depth = Some(depth);
            self.saw_body = true;
            return;
        }

        if self.paragraph.is_none() {
            if name == b"p" && self.body_depth.map(|d| d + 1) == Some(depth) {
                self.paragraph = Some(OpenParagraph {
                    depth,
                    hyperlink_depth: None,
                    run: None,
                    paragraph: Paragraph::new(),
                });
            }
            return;
        }
        let Some(para) = self.paragraph.as_mut() else {
            return;
        };

        if let Some(run) = para.run.as_mut() {
            if depth == run.depth + 1 {
                match name {
                    b"rPr" => run.props_depth = Some(depth),
                    b"t" => run.in_text = true,
                    b"tab" | b"ptab" => run.text.push('\t'),
                    b"cr" => run.text.push('\n'),
                    b"br" => {
                        if is_text_wrapping_break(e) {
                            run.text.push('\n');
                        }
                    }
                    b"noBreakHyphen" => run.text.push('-'),
                    _ => {}
                }
            } else if run.change_depth.is_none() && run.props_depth.map(|d| d + 1) == Some(depth)
            {
                match name {
                    b"b" => run.style.bold = is_on(e),
                    b"i" => run.style.italic = is_on(e),
                    b"rPrChange" => run.change_depth = Some(depth),
                    _ => {}
                }
            }
            return;
        }

        match name {
            b"hyperlink" if depth == para.depth + 1 => para.hyperlink_depth = Some(depth),
            b"r" if depth == para.depth + 1 => para.run = Some(OpenRun::new(depth, false)),
            b"r" if para.hyperlink_depth.map(|d| d + 1) == Some(depth) => {
                para.run = Some(OpenRun::new(depth, true))
            }
            _ => {}
        }
    }

    fn close(&mut self, name: &[u8]) {
        let depth = self.depth;

        if self.body_depth == Some(depth) && name == b"body" {
            self.body_depth = None;
            return;
        }

        let Some(para) = self.paragraph.as_mut() else {
            return;
        };

        if let Some(run) = para.run.as_mut() {
            if depth == run.depth {
                if let Some(run) = para.run.take() {
                    if run.text_only {
                        para.paragraph.add_text(&run.text);
                    } else {
                        para.paragraph.add_run(TextRun::styled(run.text, run.style));
                    }
                }
            } else if run.change_depth == Some(depth) {
                run.change_depth = None;
            } else if run.props_depth == Some(depth) {
                run.props_depth = None;
            } else if depth == run.depth + 1 && name == b"t" {
                run.in_text = false;
            }
            return;
        }

        if para.hyperlink_depth == Some(depth) {
            para.hyperlink_depth = None;
        } else if para.depth == depth {
            if let Some(open) = self.paragraph.take() {
                self.paragraphs.push(open.paragraph);
            }
        }
    }

    fn wants_text(&self) -> bool {
        self.paragraph
            .as_ref()
            .and_then(|p| p.run.as_ref())
            .is_some_and(|r| r.in_text && r.depth + 1 == self.depth)
    }

    fn push_text(&mut self, text: &str) {
        if let Some(run) = self.paragraph.as_mut().and_then(|p| p.run.as_mut()) {
            run.text.push_str(text);
        }
    }
}

/// Read an attribute value by local name, whatever its prefix.
pub(crate) fn get_attr(e: &BytesStart<'_>, key: &[u8]) -> Option<String> {
    e.attributes()
        .filter_map(|a| a.ok())
        .find(|a| a.key.local_name().as_ref() == key)
        .map(|a| String::from_utf8_lossy(&a.value).into_owned())
}

/// OOXML on/off property: an absent `val` means on.
fn is_on(e: &BytesStart<'_>) -> bool {
    match get_attr(e, b"val").as_deref() {
        None => true,
        Some("false") | Some("0") | Some("off") => false,
        Some(_) => true,
    }
}

/// Page and column breaks carry no text.
fn is_text_wrapping_break(e: &BytesStart<'_>) -> bool {
    matches!(get_attr(e, b"type").as_deref(), None | Some("textWrapping"))
}
