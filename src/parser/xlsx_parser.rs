//! Spreadsheet package reader using `zip` and `quick-xml`.

use std::collections::{HashMap, HashSet};
use std::fs::File;
use std::io::{BufReader, Cursor, Read, Seek};
use std::path::Path;

use zip::result::ZipError;
use zip::ZipArchive;

use super::shared_strings::parse_shared_strings;
use super::styles::{parse_styles, StyleTable};
use super::workbook::{parse_relationships, parse_workbook, SheetEntry};
use super::worksheet::{parse_worksheet, CellContext};
use crate::detect::{detect_format_from_bytes, detect_format_from_path};
use crate::error::{Error, Result};
use crate::model::Sheet;

const WORKBOOK_PART: &str = "xl/workbook.xml";
const WORKBOOK_RELS_PART: &str = "xl/_rels/workbook.xml.rels";
const SHARED_STRINGS_PART: &str = "xl/sharedStrings.xml";
const STYLES_PART: &str = "xl/styles.xml";
const WORKSHEETS_DIR: &str = "xl/worksheets/";

/// Reader for OOXML spreadsheet packages.
///
/// The archive is owned by the parser and released when it is dropped, on
/// success and error paths alike.
pub struct XlsxParser<R> {
    archive: ZipArchive<R>,
}

impl<'a> XlsxParser<Cursor<&'a [u8]>> {
    /// Open a package held in memory.
    pub fn from_bytes(data: &'a [u8]) -> Result<Self> {
        detect_format_from_bytes(data)?;
        Self::from_reader(Cursor::new(data))
    }
}

impl XlsxParser<BufReader<File>> {
    /// Open a package from a file.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        detect_format_from_path(path)?;
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file))
    }
}

impl<R: Read + Seek> XlsxParser<R> {
    /// Open a package from any seekable reader.
    pub fn from_reader(reader: R) -> Result<Self> {
        let archive = ZipArchive::new(reader)?;
        log::debug!("opened package with {} entries", archive.len());
        Ok(Self { archive })
    }

    /// Sheet names in workbook order, without reading any cell data.
    pub fn sheet_names(&mut self) -> Result<Vec<String>> {
        let plan = self.sheet_plan()?;
        Ok(plan.into_iter().map(|(name, _)| name).collect())
    }

    /// Read every sheet in workbook order.
    pub fn parse(mut self) -> Result<Vec<Sheet>> {
        let shared_strings = match self.read_part(SHARED_STRINGS_PART)? {
            Some(xml) => parse_shared_strings(&xml, SHARED_STRINGS_PART)?,
            None => Vec::new(),
        };

        let styles = match self.read_part(STYLES_PART)? {
            Some(xml) => parse_styles(&xml, STYLES_PART).unwrap_or_else(|e| {
                log::warn!("ignoring unreadable styles: {}", e);
                StyleTable::default()
            }),
            None => StyleTable::default(),
        };

        let ctx = CellContext {
            shared_strings: &shared_strings,
            styles: &styles,
        };

        let plan = self.sheet_plan()?;
        let mut sheets = Vec::with_capacity(plan.len());
        for (name, part) in plan {
            let sheet = match part {
                Some(part) => {
                    let xml = self.read_part(&part)?.ok_or_else(|| {
                        Error::Format(format!("worksheet part {} disappeared", part))
                    })?;
                    parse_worksheet(&xml, &part, &name, &ctx)?
                }
                None => {
                    log::warn!("no worksheet part found for sheet {:?}", name);
                    Sheet::new(name)
                }
            };
            sheets.push(sheet);
        }

        log::debug!("read {} sheets", sheets.len());
        Ok(sheets)
    }

    /// Decide which worksheet part backs each sheet.
    fn sheet_plan(&mut self) -> Result<Vec<(String, Option<String>)>> {
        let parts = self.worksheet_parts();

        let entries = match self.read_part(WORKBOOK_PART)? {
            Some(xml) => parse_workbook(&xml, WORKBOOK_PART)?,
            None => {
                log::debug!("no workbook part, using ordinal sheet names");
                return Ok(parts
                    .into_iter()
                    .enumerate()
                    .map(|(i, part)| (format!("Sheet{}", i + 1), Some(part)))
                    .collect());
            }
        };

        if entries.is_empty() {
            return Ok(parts
                .into_iter()
                .next()
                .map(|part| vec![("Sheet1".to_string(), Some(part))])
                .unwrap_or_default());
        }

        let rels = match self.read_part(WORKBOOK_RELS_PART)? {
            Some(xml) => parse_relationships(&xml, WORKBOOK_RELS_PART, "xl").unwrap_or_else(|e| {
                log::warn!("ignoring unreadable workbook relationships: {}", e);
                HashMap::new()
            }),
            None => HashMap::new(),
        };

        Ok(assign_parts(&entries, &rels, &parts, |name| {
            self.find_entry(name).is_some()
        }))
    }

    /// Worksheet parts in the archive, ordered by their trailing number.
    fn worksheet_parts(&self) -> Vec<String> {
        let mut parts: Vec<String> = self
            .archive
            .file_names()
            .filter(|name| is_worksheet_part(name))
            .map(str::to_string)
            .collect();
        parts.sort_by_key(|name| (part_number(name), name.clone()));
        parts
    }

    /// Find the stored entry name for a part, ignoring ASCII case.
    fn find_entry(&self, name: &str) -> Option<String> {
        self.archive
            .file_names()
            .find(|candidate| candidate.eq_ignore_ascii_case(name))
            .map(str::to_string)
    }

    /// Read a part as UTF-8 text; `Ok(None)` if the archive has no such part.
    fn read_part(&mut self, name: &str) -> Result<Option<String>> {
        let Some(entry) = self.find_entry(name) else {
            return Ok(None);
        };
        let mut file = match self.archive.by_name(&entry) {
            Ok(file) => file,
            Err(ZipError::FileNotFound) => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        let mut bytes = Vec::with_capacity(file.size() as usize);
        file.read_to_end(&mut bytes)?;
        let text = String::from_utf8(bytes)
            .map_err(|e| Error::Format(format!("{} is not valid UTF-8: {}", name, e)))?;
        Ok(Some(text))
    }
}

fn is_worksheet_part(name: &str) -> bool {
    name.strip_prefix(WORKSHEETS_DIR)
        .is_some_and(|rest| !rest.contains('/') && rest.to_ascii_lowercase().ends_with(".xml"))
}

/// Trailing number of a part file name (`sheet12.xml` -> 12).
fn part_number(name: &str) -> u32 {
    let stem = name.rsplit('/').next().unwrap_or(name);
    let stem = stem.split('.').next().unwrap_or(stem);
    let digits: String = stem
        .chars()
        .rev()
        .take_while(char::is_ascii_digit)
        .collect::<Vec<_>>()
        .into_iter()
        .rev()
        .collect();
    digits.parse().unwrap_or(u32::MAX)
}

/// Match declared sheets to worksheet parts.
///
/// First pass: relationship target, then `sheet{sheetId}.xml`, then
/// `{name}.xml`. Second pass: sheets still unmatched take the first
/// unclaimed worksheet part. A relationship that points at an existing
/// non-worksheet part (a chartsheet) yields no part.
fn assign_parts(
    entries: &[SheetEntry],
    rels: &HashMap<String, String>,
    parts: &[String],
    exists: impl Fn(&str) -> bool,
) -> Vec<(String, Option<String>)> {
    let find_part = |candidate: &str| {
        parts
            .iter()
            .position(|p| p.eq_ignore_ascii_case(candidate))
    };

    let mut claimed: HashSet<usize> = HashSet::new();
    let mut assigned: Vec<Option<usize>> = vec![None; entries.len()];
    let mut no_worksheet: Vec<bool> = vec![false; entries.len()];

    for (i, entry) in entries.iter().enumerate() {
        let rel_target = entry.rel_id.as_ref().and_then(|id| rels.get(id));
        if let Some(target) = rel_target {
            match find_part(target) {
                Some(idx) if !claimed.contains(&idx) => {
                    claimed.insert(idx);
                    assigned[i] = Some(idx);
                    continue;
                }
                None if exists(target) => {
                    log::debug!("sheet {:?} is not a worksheet ({})", entry.name, target);
                    no_worksheet[i] = true;
                    continue;
                }
                _ => {}
            }
        }

        let mut candidates = Vec::new();
        if let Some(id) = entry.sheet_id {
            candidates.push(format!("{}sheet{}.xml", WORKSHEETS_DIR, id));
        }
        candidates.push(format!("{}{}.xml", WORKSHEETS_DIR, entry.name));

        for candidate in candidates {
            if let Some(idx) = find_part(&candidate).filter(|idx| !claimed.contains(idx)) {
                claimed.insert(idx);
                assigned[i] = Some(idx);
                break;
            }
        }
    }

    for i in 0..entries.len() {
        if assigned[i].is_some() || no_worksheet[i] {
            continue;
        }
        if let Some(idx) = (0..parts.len()).find(|idx| !claimed.contains(idx)) {
            claimed.insert(idx);
            assigned[i] = Some(idx);
        }
    }

    entries
        .iter()
        .zip(assigned)
        .map(|(entry, idx)| (entry.name.clone(), idx.map(|idx| parts[idx].clone())))
        .collect()
}
