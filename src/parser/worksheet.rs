//! Worksheet parts (`xl/worksheets/sheetN.xml`): rows and cells.

use quick_xml::events::{BytesStart, Event};

use super::cell_ref::{column_index, MAX_COLUMNS, MAX_ROWS};
use super::styles::StyleTable;
use super::xml::{attr, PartReader, TextCollector};
use crate::error::{Error, Result};
use crate::model::{Cell, Sheet};

/// Lookup tables shared by every worksheet of one workbook.
pub(crate) struct CellContext<'a> {
    pub shared_strings: &'a [String],
    pub styles: &'a StyleTable,
}

/// A `<c>` element being read.
#[derive(Default)]
struct PendingCell {
    column: Option<usize>,
    kind: Option<String>,
    style: Option<usize>,
    value: String,
    in_value: bool,
    inline: Option<TextCollector>,
}

impl PendingCell {
    fn from_element(e: &BytesStart<'_>) -> std::result::Result<Self, quick_xml::Error> {
        Ok(Self {
            column: attr(e, b"r")?.as_deref().and_then(column_index),
            kind: attr(e, b"t")?,
            style: attr(e, b"s")?.and_then(|v| v.trim().parse().ok()),
            ..Self::default()
        })
    }

    fn into_cell(self, part: &str, ctx: &CellContext<'_>) -> (Option<usize>, Cell) {
        let text = match self.kind.as_deref() {
            Some("s") => shared_string(&self.value, part, ctx.shared_strings),
            Some("inlineStr") => self.inline.map(TextCollector::finish).unwrap_or_default(),
            _ => self.value,
        };
        let color = self.style.and_then(|s| ctx.styles.cell_color(s));
        (self.column, Cell { text, color })
    }
}

fn shared_string(value: &str, part: &str, strings: &[String]) -> String {
    match value.trim().parse::<usize>() {
        Ok(index) => match strings.get(index) {
            Some(s) => s.clone(),
            None => {
                log::warn!(
                    "{}: shared string index {} out of range ({} strings)",
                    part,
                    index,
                    strings.len()
                );
                String::new()
            }
        },
        Err(_) => {
            log::warn!("{}: invalid shared string index {:?}", part, value);
            String::new()
        }
    }
}

/// Place a cell at its column, padding skipped columns with empty cells.
fn place_cell(row: &mut Vec<Cell>, column: Option<usize>, cell: Cell, part: &str) -> Result<()> {
    let column = column.unwrap_or(row.len());
    if column >= MAX_COLUMNS || row.len() >= MAX_COLUMNS {
        return Err(Error::Format(format!(
            "{}: column {} is past the last worksheet column (XFD)",
            part,
            column.max(row.len()) + 1
        )));
    }
    if column > row.len() {
        row.resize_with(column, Cell::empty);
    }
    row.push(cell);
    Ok(())
}

/// Start a row, first materializing any rows skipped since the last one.
fn open_row(rows: &mut Vec<Vec<Cell>>, e: &BytesStart<'_>, part: &str) -> Result<()> {
    let number = attr(e, b"r")
        .map_err(|err| Error::xml(part, err))?
        .and_then(|v| v.trim().parse::<u64>().ok());
    let number = number.unwrap_or(rows.len() as u64 + 1);
    if number > MAX_ROWS as u64 || rows.len() >= MAX_ROWS {
        return Err(Error::Format(format!(
            "{}: row {} is past the last worksheet row ({})",
            part,
            number.max(rows.len() as u64 + 1),
            MAX_ROWS
        )));
    }
    while (rows.len() as u64) + 1 < number {
        rows.push(Vec::new());
    }
    Ok(())
}

/// Parse one worksheet part into a [`Sheet`].
pub(crate) fn parse_worksheet(
    xml: &str,
    part: &str,
    name: &str,
    ctx: &CellContext<'_>,
) -> Result<Sheet> {
    let mut reader = PartReader::new(xml, part);
    let mut sheet = Sheet::new(name);
    let mut row: Option<Vec<Cell>> = None;
    let mut cell: Option<PendingCell> = None;
    let xml_err = |e: quick_xml::Error| Error::xml(part, e);

    loop {
        match reader.read_event()? {
            Event::Start(e) => match e.local_name().as_ref() {
                b"row" => {
                    open_row(&mut sheet.rows, &e, part)?;
                    row = Some(Vec::new());
                }
                b"c" if row.is_some() => cell = Some(PendingCell::from_element(&e).map_err(xml_err)?),
                b"v" => {
                    if let Some(c) = cell.as_mut() {
                        c.in_value = true;
                    }
                }
                b"is" => {
                    if let Some(c) = cell.as_mut() {
                        c.inline = Some(TextCollector::default());
                    }
                }
                other => {
                    if let Some(inline) = cell.as_mut().and_then(|c| c.inline.as_mut()) {
                        inline.start(other);
                    }
                }
            },
            Event::Empty(e) => match e.local_name().as_ref() {
                b"row" => {
                    open_row(&mut sheet.rows, &e, part)?;
                    sheet.push_row(Vec::new());
                }
                b"c" => {
                    if let Some(r) = row.as_mut() {
                        let pending = PendingCell::from_element(&e).map_err(xml_err)?;
                        let (column, c) = pending.into_cell(part, ctx);
                        place_cell(r, column, c, part)?;
                    }
                }
                _ => {}
            },
            Event::End(e) => match e.local_name().as_ref() {
                b"row" => {
                    if let Some(mut r) = row.take() {
                        trim_trailing_empty(&mut r);
                        sheet.push_row(r);
                    }
                }
                b"c" => {
                    if let (Some(r), Some(pending)) = (row.as_mut(), cell.take()) {
                        let (column, c) = pending.into_cell(part, ctx);
                        place_cell(r, column, c, part)?;
                    }
                }
                b"v" => {
                    if let Some(c) = cell.as_mut() {
                        c.in_value = false;
                    }
                }
                other => {
                    if let Some(inline) = cell.as_mut().and_then(|c| c.inline.as_mut()) {
                        inline.end(other);
                    }
                }
            },
            Event::Text(t) => {
                if let Some(c) = cell.as_mut() {
                    if c.in_value {
                        c.value.push_str(&t.unescape().map_err(xml_err)?);
                    } else if let Some(inline) = c.inline.as_mut() {
                        inline.text(&t).map_err(xml_err)?;
                    }
                }
            }
            Event::CData(data) => {
                if let Some(c) = cell.as_mut() {
                    if c.in_value {
                        c.value.push_str(&String::from_utf8_lossy(&data));
                    } else if let Some(inline) = c.inline.as_mut() {
                        inline.cdata(&data);
                    }
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    // Trailing blank rows add nothing but vertical space at the end.
    while sheet.rows.last().is_some_and(|r| r.iter().all(Cell::is_empty)) {
        sheet.rows.pop();
    }

    log::debug!(
        "{}: sheet {:?} has {} rows x {} columns",
        part,
        sheet.name,
        sheet.row_count(),
        sheet.column_count()
    );
    Ok(sheet)
}

/// Drop empty cells at the end of a row so styled-but-blank cells do not
/// widen the sheet.
fn trim_trailing_empty(row: &mut Vec<Cell>) {
    while row.last().is_some_and(Cell::is_empty) {
        row.pop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Color;

    const PART: &str = "xl/worksheets/sheet1.xml";

    fn parse(xml: &str, strings: &[&str], styles: &StyleTable) -> Sheet {
        let shared: Vec<String> = strings.iter().map(|s| s.to_string()).collect();
        let ctx = CellContext {
            shared_strings: &shared,
            styles,
        };
        parse_worksheet(xml, PART, "Sheet1", &ctx).unwrap()
    }

    fn texts(sheet: &Sheet) -> Vec<Vec<&str>> {
        sheet
            .rows
            .iter()
            .map(|r| r.iter().map(|c| c.text.as_str()).collect())
            .collect()
    }

    #[test]
    fn test_shared_and_numeric_cells() {
        let xml = r#"<worksheet><sheetData>
<row r="1"><c r="A1" t="s"><v>0</v></c><c r="B1" t="s"><v>1</v></c></row>
<row r="2"><c r="A2" t="s"><v>2</v></c><c r="B2"><v>30</v></c></row>
</sheetData></worksheet>"#;
        let sheet = parse(xml, &["Name", "Age", "Alice"], &StyleTable::default());
        assert_eq!(texts(&sheet), vec![vec!["Name", "Age"], vec!["Alice", "30"]]);
    }

    #[test]
    fn test_column_gaps_are_filled() {
        let xml = r#"<worksheet><sheetData>
<row r="1"><c r="A1" t="inlineStr"><is><t>left</t></is></c><c r="D1" t="inlineStr"><is><t>right</t></is></c></row>
</sheetData></worksheet>"#;
        let sheet = parse(xml, &[], &StyleTable::default());
        assert_eq!(texts(&sheet), vec![vec!["left", "", "", "right"]]);
        assert!(sheet.rows[0][1].color.is_none());
    }

    #[test]
    fn test_row_gaps_are_filled() {
        let xml = r#"<worksheet><sheetData>
<row r="1"><c r="A1"><v>1</v></c></row>
<row r="4"><c r="A4"><v>4</v></c></row>
</sheetData></worksheet>"#;
        let sheet = parse(xml, &[], &StyleTable::default());
        assert_eq!(texts(&sheet), vec![vec!["1"], vec![], vec![], vec!["4"]]);
    }

    #[test]
    fn test_values_pass_through_unformatted() {
        let xml = r#"<worksheet><sheetData><row r="1">
<c r="A1"><v>3.14159</v></c>
<c r="B1" t="b"><v>1</v></c>
<c r="C1" t="str"><f>A1*2</f><v>6.28318</v></c>
<c r="D1" t="e"><v>#DIV/0!</v></c>
</row></sheetData></worksheet>"#;
        let sheet = parse(xml, &[], &StyleTable::default());
        assert_eq!(texts(&sheet), vec![vec!["3.14159", "1", "6.28318", "#DIV/0!"]]);
    }

    #[test]
    fn test_inline_rich_text() {
        let xml = r#"<worksheet><sheetData><row r="1">
<c r="A1" t="inlineStr"><is><r><t>Hello</t></r><r><t xml:space="preserve"> world</t></r></is></c>
</row></sheetData></worksheet>"#;
        let sheet = parse(xml, &[], &StyleTable::default());
        assert_eq!(texts(&sheet), vec![vec!["Hello world"]]);
    }

    #[test]
    fn test_style_colors() {
        let styles = StyleTable {
            font_colors: vec![None, Some(Color::RED)],
            cell_xf_fonts: vec![0, 1],
        };
        let xml = r#"<worksheet><sheetData><row r="1">
<c r="A1" s="1" t="inlineStr"><is><t>red</t></is></c>
<c r="B1" s="0"><v>plain</v></c>
<c r="C1" s="7"><v>dangling</v></c>
</row></sheetData></worksheet>"#;
        let sheet = parse(xml, &[], &styles);
        let colors: Vec<_> = sheet.rows[0].iter().map(|c| c.color).collect();
        assert_eq!(colors, vec![Some(Color::RED), None, None]);
    }

    #[test]
    fn test_out_of_range_shared_string() {
        let xml = r#"<worksheet><sheetData><row r="1"><c r="A1" t="s"><v>9</v></c><c r="B1"><v>x</v></c></row></sheetData></worksheet>"#;
        let sheet = parse(xml, &["only"], &StyleTable::default());
        assert_eq!(texts(&sheet), vec![vec!["", "x"]]);
    }

    #[test]
    fn test_cells_without_references() {
        let xml = r#"<worksheet><sheetData><row><c><v>a</v></c><c><v>b</v></c></row><row><c><v>c</v></c></row></sheetData></worksheet>"#;
        let sheet = parse(xml, &[], &StyleTable::default());
        assert_eq!(texts(&sheet), vec![vec!["a", "b"], vec!["c"]]);
    }

    #[test]
    fn test_blank_styled_cells_are_trimmed() {
        let xml = r#"<worksheet><sheetData>
<row r="1"><c r="A1"><v>a</v></c><c r="B1" s="1"/><c r="C1" s="1"/></row>
<row r="2"><c r="A2" s="1"/></row>
</sheetData></worksheet>"#;
        let sheet = parse(xml, &[], &StyleTable::default());
        assert_eq!(texts(&sheet), vec![vec!["a"]]);
        assert_eq!(sheet.column_count(), 1);
    }

    #[test]
    fn test_empty_sheet_data() {
        let sheet = parse("<worksheet><sheetData/></worksheet>", &[], &StyleTable::default());
        assert_eq!(sheet.row_count(), 0);
        assert_eq!(sheet.name, "Sheet1");
    }

    #[test]
    fn test_malformed_worksheet_is_error() {
        let ctx = CellContext {
            shared_strings: &[],
            styles: &StyleTable::default(),
        };
        let err = parse_worksheet("<worksheet><sheetData><row></sheetData>", PART, "S", &ctx)
            .unwrap_err();
        assert!(err.is_format_error());
    }

    fn parse_err(xml: &str) -> Error {
        let ctx = CellContext {
            shared_strings: &[],
            styles: &StyleTable::default(),
        };
        parse_worksheet(xml, PART, "S", &ctx).unwrap_err()
    }

    #[test]
    fn test_truncated_worksheet_is_error() {
        let err = parse_err(
            r#"<worksheet><sheetData><row r="1"><c r="A1"><v>1</v></c></row><row r="2"><c r="A2"><v>2</v></c>"#,
        );
        assert!(err.is_format_error());
        assert!(err.to_string().contains(PART));
    }

    #[test]
    fn test_row_past_sheet_limit_is_error() {
        let err = parse_err(
            r#"<worksheet><sheetData><row r="50000000"><c r="A1"><v>1</v></c></row></sheetData></worksheet>"#,
        );
        assert!(err.is_format_error());

        let err = parse_err(r#"<worksheet><sheetData><row r="4000000000"/></sheetData></worksheet>"#);
        assert!(err.is_format_error());
    }

    #[test]
    fn test_column_past_sheet_limit_is_error() {
        let err = parse_err(
            r#"<worksheet><sheetData><row r="1"><c r="AAAAAAAAAA1"><v>1</v></c></row></sheetData></worksheet>"#,
        );
        assert!(err.is_format_error());

        let err = parse_err(
            r#"<worksheet><sheetData><row r="1"><c r="XFE1"><v>1</v></c></row></sheetData></worksheet>"#,
        );
        assert!(err.is_format_error());
    }

    #[test]
    fn test_last_row_and_column_are_accepted() {
        let xml = r#"<worksheet><sheetData><row r="3"><c r="XFD3"><v>edge</v></c></row></sheetData></worksheet>"#;
        let sheet = parse(xml, &[], &StyleTable::default());
        assert_eq!(sheet.row_count(), 3);
        assert_eq!(sheet.column_count(), MAX_COLUMNS);
        assert_eq!(sheet.cell(2, MAX_COLUMNS - 1).unwrap().text, "edge");
    }
}
