//! Rendering module: paragraph classification, HTML fragments and pages.

mod classify;
mod html;
mod json;
mod options;
mod page;
mod result;

pub use classify::{
    FragmentKind, HeadingExclusion, ParagraphClassifier, PatternExclusion, MAX_HEADING_CHARS,
};
pub use html::{escape_html, run_to_html, runs_to_html, Fragment, SectionRenderer};
pub use json::{to_json, JsonFormat};
pub use options::RenderOptions;
pub use page::{page_file_name, PageTemplate};
pub use result::{RenderResult, RenderStats};
