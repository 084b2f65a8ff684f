//! Package metadata (`docProps/core.xml`).

use chrono::{DateTime, Utc};
use quick_xml::events::Event;
use quick_xml::Reader;

use crate::error::Result;
use crate::model::Metadata;

/// Parse core properties into document metadata.
///
/// Unknown elements are skipped; dates that are not RFC 3339 are dropped.
pub fn parse_core_properties(xml: &str) -> Result<Metadata> {
    let mut reader = Reader::from_str(xml);
    reader.trim_text(true);

    let mut metadata = Metadata::default();
    let mut current: Option<Vec<u8>> = None;
    let mut value = String::new();

    loop {
        match reader.read_event()? {
            Event::Start(ref e) => {
                current = Some(e.name().as_ref().to_vec());
                value.clear();
            }
            Event::Text(ref e) => {
                if current.is_some() {
                    value.push_str(&e.unescape()?);
                }
            }
            Event::End(_) => {
                if let Some(name) = current.take() {
                    apply_property(&mut metadata, &name, value.trim());
                }
                value.clear();
            }
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(metadata)
}

fn apply_property(metadata: &mut Metadata, name: &[u8], value: &str) {
    if value.is_empty() {
        return;
    }
    match name {
        b"dc:title" => metadata.title = Some(value.to_string()),
        b"dc:creator" => metadata.author = Some(value.to_string()),
        b"dc:subject" => metadata.subject = Some(value.to_string()),
        b"cp:keywords" => metadata.keywords = Some(value.to_string()),
        b"cp:lastModifiedBy" => metadata.last_modified_by = Some(value.to_string()),
        b"dcterms:created" => metadata.created = parse_datetime(value),
        b"dcterms:modified" => metadata.modified = parse_datetime(value),
        _ => {}
    }
}

fn parse_datetime(s: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}
