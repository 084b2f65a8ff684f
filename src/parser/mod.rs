//! DOCX parsing module.

mod body;
mod core_props;
mod docx_parser;

pub use body::parse_body;
pub use core_props::parse_core_properties;
pub use docx_parser::DocxParser;
