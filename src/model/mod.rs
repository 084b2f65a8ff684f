//! Document model types.
//!
//! This module defines the intermediate representation that bridges DOCX
//! reading and book rendering: an ordered sequence of paragraphs, each with
//! its styled runs.

mod document;
mod paragraph;

pub use document::{Document, Metadata};
pub use paragraph::{Paragraph, TextRun, TextStyle};
