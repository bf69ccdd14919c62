//! Small helpers shared by the XML part parsers.

use quick_xml::events::{BytesStart, BytesText, Event};
use quick_xml::Reader;

use crate::error::{Error, Result};

/// Pull reader over one package part.
///
/// quick-xml reports `Eof` even when elements are still open, so the reader
/// counts nesting depth and turns a premature end into an error for `part`.
pub(crate) struct PartReader<'a> {
    reader: Reader<&'a [u8]>,
    part: &'a str,
    depth: usize,
}

impl<'a> PartReader<'a> {
    pub(crate) fn new(xml: &'a str, part: &'a str) -> Self {
        Self {
            reader: Reader::from_str(strip_bom(xml)),
            part,
            depth: 0,
        }
    }

    pub(crate) fn read_event(&mut self) -> Result<Event<'a>> {
        let event = self
            .reader
            .read_event()
            .map_err(|e| Error::xml(self.part, e))?;
        match event {
            Event::Start(_) => self.depth += 1,
            Event::End(_) => self.depth = self.depth.saturating_sub(1),
            Event::Eof if self.depth > 0 => {
                return Err(Error::xml(
                    self.part,
                    format!("unexpected end of document, {} element(s) still open", self.depth),
                ));
            }
            _ => {}
        }
        Ok(event)
    }
}

/// Look up an attribute by local name (namespace prefix ignored) and unescape it.
pub(crate) fn attr(e: &BytesStart<'_>, name: &[u8]) -> std::result::Result<Option<String>, quick_xml::Error> {
    for a in e.attributes() {
        let a = a?;
        if a.key.local_name().as_ref() == name {
            return Ok(Some(a.unescape_value()?.into_owned()));
        }
    }
    Ok(None)
}

/// Look up an attribute by its full qualified name (prefix included).
pub(crate) fn qualified_attr(
    e: &BytesStart<'_>,
    name: &[u8],
) -> std::result::Result<Option<String>, quick_xml::Error> {
    for a in e.attributes() {
        let a = a?;
        if a.key.as_ref() == name {
            return Ok(Some(a.unescape_value()?.into_owned()));
        }
    }
    Ok(None)
}

/// Collects the text of `<t>` nodes inside a string item (`<si>` or `<is>`).
///
/// Rich-text runs (`<r><t>`) are flattened; phonetic hints (`<rPh>`) are
/// skipped.
#[derive(Debug, Default)]
pub(crate) struct TextCollector {
    text: String,
    in_t: bool,
    phonetic_depth: usize,
}

impl TextCollector {
    pub(crate) fn start(&mut self, local_name: &[u8]) {
        match local_name {
            b"t" if self.phonetic_depth == 0 => self.in_t = true,
            b"rPh" => self.phonetic_depth += 1,
            _ => {}
        }
    }

    pub(crate) fn end(&mut self, local_name: &[u8]) {
        match local_name {
            b"t" => self.in_t = false,
            b"rPh" => self.phonetic_depth = self.phonetic_depth.saturating_sub(1),
            _ => {}
        }
    }

    pub(crate) fn text(&mut self, t: &BytesText<'_>) -> std::result::Result<(), quick_xml::Error> {
        if self.in_t {
            self.text.push_str(&t.unescape()?);
        }
        Ok(())
    }

    pub(crate) fn cdata(&mut self, data: &[u8]) {
        if self.in_t {
            self.text.push_str(&String::from_utf8_lossy(data));
        }
    }

    pub(crate) fn finish(self) -> String {
        self.text
    }
}

/// Strip a leading UTF-8 byte order mark.
fn strip_bom(xml: &str) -> &str {
    xml.strip_prefix('\u{FEFF}').unwrap_or(xml)
}
