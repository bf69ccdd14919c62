//! Workbook part (`xl/workbook.xml`) and its relationships.

use std::collections::HashMap;

use quick_xml::events::Event;

use super::xml::{attr, qualified_attr, PartReader};
use crate::error::{Error, Result};

/// A `<sheet>` declaration from the workbook part.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct SheetEntry {
    pub name: String,
    pub sheet_id: Option<u32>,
    pub rel_id: Option<String>,
}

/// Parse the ordered sheet declarations of the workbook.
pub(crate) fn parse_workbook(xml: &str, part: &str) -> Result<Vec<SheetEntry>> {
    let mut reader = PartReader::new(xml, part);
    let mut entries = Vec::new();

    loop {
        match reader.read_event()? {
            Event::Start(e) | Event::Empty(e) if e.local_name().as_ref() == b"sheet" => {
                let name = attr(&e, b"name").map_err(|err| Error::xml(part, err))?;
                let sheet_id = attr(&e, b"sheetId")
                    .map_err(|err| Error::xml(part, err))?
                    .and_then(|v| v.trim().parse().ok());
                let rel_id = qualified_attr(&e, b"r:id")
                    .map_err(|err| Error::xml(part, err))?
                    .or(attr(&e, b"id").map_err(|err| Error::xml(part, err))?);
                let name = name.unwrap_or_else(|| format!("Sheet{}", entries.len() + 1));
                entries.push(SheetEntry {
                    name,
                    sheet_id,
                    rel_id,
                });
            }
            Event::Eof => break,
            _ => {}
        }
    }

    log::debug!("{}: {} sheets declared", part, entries.len());
    Ok(entries)
}

/// Parse a relationships part into `Id -> archive path`.
///
/// `base_dir` is the directory of the source part (`"xl"` for the workbook);
/// relative targets are resolved against it.
pub(crate) fn parse_relationships(
    xml: &str,
    part: &str,
    base_dir: &str,
) -> Result<HashMap<String, String>> {
    let mut reader = PartReader::new(xml, part);
    let mut rels = HashMap::new();

    loop {
        match reader.read_event()? {
            Event::Start(e) | Event::Empty(e) if e.local_name().as_ref() == b"Relationship" => {
                let id = attr(&e, b"Id").map_err(|err| Error::xml(part, err))?;
                let target = attr(&e, b"Target").map_err(|err| Error::xml(part, err))?;
                if let (Some(id), Some(target)) = (id, target) {
                    rels.insert(id, resolve_target(base_dir, &target));
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(rels)
}

/// Resolve a relationship target against a base directory, folding `.` and
/// `..` segments. Absolute targets (`/xl/...`) are taken from the archive root.
pub(crate) fn resolve_target(base_dir: &str, target: &str) -> String {
    let (mut segments, rest): (Vec<&str>, &str) = match target.strip_prefix('/') {
        Some(abs) => (Vec::new(), abs),
        None => (
            base_dir.split('/').filter(|s| !s.is_empty()).collect(),
            target,
        ),
    };
    for segment in rest.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            s => segments.push(s),
        }
    }
    segments.join("/")
}
