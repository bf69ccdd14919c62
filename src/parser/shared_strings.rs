//! Shared string table (`xl/sharedStrings.xml`).

use quick_xml::events::Event;

use super::xml::{PartReader, TextCollector};
use crate::error::{Error, Result};

/// Parse the shared string table into an ordered list.
///
/// Each `<si>` item becomes one entry; rich-text runs are flattened.
pub(crate) fn parse_shared_strings(xml: &str, part: &str) -> Result<Vec<String>> {
    let mut reader = PartReader::new(xml, part);
    let mut strings = Vec::new();
    let mut item: Option<TextCollector> = None;

    loop {
        match reader.read_event()? {
            Event::Start(e) => {
                let name = e.local_name();
                if name.as_ref() == b"si" {
                    item = Some(TextCollector::default());
                } else if let Some(collector) = item.as_mut() {
                    collector.start(name.as_ref());
                }
            }
            Event::Empty(e) => {
                if e.local_name().as_ref() == b"si" {
                    strings.push(String::new());
                }
            }
            Event::End(e) => {
                let name = e.local_name();
                if name.as_ref() == b"si" {
                    strings.push(item.take().map(TextCollector::finish).unwrap_or_default());
                } else if let Some(collector) = item.as_mut() {
                    collector.end(name.as_ref());
                }
            }
            Event::Text(t) => {
                if let Some(collector) = item.as_mut() {
                    collector.text(&t).map_err(|e| Error::xml(part, e))?;
                }
            }
            Event::CData(c) => {
                if let Some(collector) = item.as_mut() {
                    collector.cdata(&c);
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    log::debug!("{}: {} shared strings", part, strings.len());
    Ok(strings)
}
