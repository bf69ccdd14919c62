//! Helpers for building `.xlsx` packages in memory.

#![allow(dead_code)]

use std::io::{Cursor, Write};

use sheetpdf::parser::column_letters;
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

const MAIN_NS: &str = "http://schemas.openxmlformats.org/spreadsheetml/2006/main";
const REL_NS: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";

/// Builds a minimal but well-formed spreadsheet package.
#[derive(Default)]
pub struct XlsxBuilder {
    sheets: Vec<(String, String)>,
    shared_strings: Vec<String>,
    styles: Option<String>,
    extra: Vec<(String, Vec<u8>)>,
    without_workbook: bool,
}

impl XlsxBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a sheet from plain rows. Numeric text is stored as a raw value,
    /// everything else through the shared string table.
    pub fn sheet(mut self, name: &str, rows: &[&[&str]]) -> Self {
        let mut data = String::new();
        for (r, row) in rows.iter().enumerate() {
            data.push_str(&format!("<row r=\"{}\">", r + 1));
            for (c, text) in row.iter().enumerate() {
                if text.is_empty() {
                    continue;
                }
                let reference = format!("{}{}", column_letters(c), r + 1);
                if text.parse::<f64>().is_ok() {
                    data.push_str(&format!("<c r=\"{}\"><v>{}</v></c>", reference, text));
                } else {
                    let index = self.shared_string(text);
                    data.push_str(&format!(
                        "<c r=\"{}\" t=\"s\"><v>{}</v></c>",
                        reference, index
                    ));
                }
            }
            data.push_str("</row>");
        }
        self.sheet_data(name, &data)
    }

    /// Add a sheet whose `<sheetData>` content is given verbatim.
    pub fn sheet_data(mut self, name: &str, sheet_data: &str) -> Self {
        let xml = format!(
            "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\n\
             <worksheet xmlns=\"{}\"><sheetData>{}</sheetData></worksheet>",
            MAIN_NS, sheet_data
        );
        self.sheets.push((name.to_string(), xml));
        self
    }

    /// Use this `xl/styles.xml`.
    pub fn styles(mut self, xml: &str) -> Self {
        self.styles = Some(xml.to_string());
        self
    }

    /// Add an arbitrary part, replacing a generated one with the same name.
    pub fn part(mut self, name: &str, data: impl Into<Vec<u8>>) -> Self {
        self.extra.push((name.to_string(), data.into()));
        self
    }

    /// Leave out `xl/workbook.xml` and its relationships.
    pub fn without_workbook(mut self) -> Self {
        self.without_workbook = true;
        self
    }

    fn shared_string(&mut self, text: &str) -> usize {
        if let Some(i) = self.shared_strings.iter().position(|s| s == text) {
            return i;
        }
        self.shared_strings.push(text.to_string());
        self.shared_strings.len() - 1
    }

    pub fn build(self) -> Vec<u8> {
        let mut parts: Vec<(String, Vec<u8>)> = Vec::new();

        parts.push((
            "[Content_Types].xml".into(),
            b"<?xml version=\"1.0\" encoding=\"UTF-8\"?>\
<Types xmlns=\"http://schemas.openxmlformats.org/package/2006/content-types\">\
<Default Extension=\"xml\" ContentType=\"application/xml\"/>\
<Default Extension=\"rels\" ContentType=\"application/vnd.openxmlformats-package.relationships+xml\"/>\
</Types>"
                .to_vec(),
        ));

        if !self.without_workbook {
            let mut sheets = String::new();
            let mut rels = String::new();
            for (i, (name, _)) in self.sheets.iter().enumerate() {
                sheets.push_str(&format!(
                    "<sheet name=\"{}\" sheetId=\"{}\" r:id=\"rId{}\"/>",
                    escape(name),
                    i + 1,
                    i + 1
                ));
                rels.push_str(&format!(
                    "<Relationship Id=\"rId{}\" Type=\"{}/worksheet\" Target=\"worksheets/sheet{}.xml\"/>",
                    i + 1,
                    REL_NS,
                    i + 1
                ));
            }
            parts.push((
                "xl/workbook.xml".into(),
                format!(
                    "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\
<workbook xmlns=\"{}\" xmlns:r=\"{}\"><sheets>{}</sheets></workbook>",
                    MAIN_NS, REL_NS, sheets
                )
                .into_bytes(),
            ));
            parts.push((
                "xl/_rels/workbook.xml.rels".into(),
                format!(
                    "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\
<Relationships xmlns=\"http://schemas.openxmlformats.org/package/2006/relationships\">{}</Relationships>",
                    rels
                )
                .into_bytes(),
            ));
        }

        for (i, (_, xml)) in self.sheets.iter().enumerate() {
            parts.push((format!("xl/worksheets/sheet{}.xml", i + 1), xml.clone().into_bytes()));
        }

        if !self.shared_strings.is_empty() {
            let items: String = self
                .shared_strings
                .iter()
                .map(|s| format!("<si><t xml:space=\"preserve\">{}</t></si>", escape(s)))
                .collect();
            parts.push((
                "xl/sharedStrings.xml".into(),
                format!(
                    "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\
<sst xmlns=\"{}\" count=\"{}\" uniqueCount=\"{}\">{}</sst>",
                    MAIN_NS,
                    self.shared_strings.len(),
                    self.shared_strings.len(),
                    items
                )
                .into_bytes(),
            ));
        }

        if let Some(styles) = self.styles {
            parts.push(("xl/styles.xml".into(), styles.into_bytes()));
        }

        for (name, data) in self.extra {
            parts.retain(|(existing, _)| existing != &name);
            parts.push((name, data));
        }

        zip_parts(&parts)
    }
}

/// Write parts into a ZIP archive.
pub fn zip_parts(parts: &[(String, Vec<u8>)]) -> Vec<u8> {
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default();
    for (name, data) in parts {
        writer.start_file(name.as_str(), options).unwrap();
        writer.write_all(data).unwrap();
    }
    writer.finish().unwrap().into_inner()
}

/// Styles with font 0 default, font 1 red (`FFFF0000`), font 2 with a
/// malformed rgb; cellXfs 0..=2 map to fonts 0..=2.
pub fn red_font_styles() -> String {
    format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\
<styleSheet xmlns=\"{}\">\
<fonts count=\"3\">\
<font><sz val=\"11\"/><name val=\"Calibri\"/></font>\
<font><sz val=\"11\"/><color rgb=\"FFFF0000\"/><name val=\"Calibri\"/></font>\
<font><color rgb=\"xyz\"/></font>\
</fonts>\
<cellXfs count=\"3\"><xf fontId=\"0\"/><xf fontId=\"1\" applyFont=\"1\"/><xf fontId=\"2\"/></cellXfs>\
</styleSheet>",
        MAIN_NS
    )
}

pub fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Byte offset of `needle` in `haystack`.
pub fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack.windows(needle.len()).position(|w| w == needle)
}

/// Number of page objects in a serialized PDF.
pub fn page_count(pdf: &[u8]) -> usize {
    let needle = b"/Type /Page /Parent";
    pdf.windows(needle.len()).filter(|w| *w == needle).count()
}
