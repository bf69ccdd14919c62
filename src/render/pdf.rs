//! PDF 1.4 serialization.
//!
//! Object layout:
//! 1 Catalog, 2 Pages, 3 Helvetica, then one (page, content stream) pair per
//! page, and finally the optional document information dictionary.

use super::content::{content_stream, encode_text, escape_literal, format_number};
use crate::error::Result;
use crate::model::{Document, Metadata, Page};

const HEADER: &[u8] = b"%PDF-1.4\n%\xE2\xE3\xCF\xD3\n";

const CATALOG_ID: usize = 1;
const PAGES_ID: usize = 2;
const FONT_ID: usize = 3;
const FIRST_PAGE_ID: usize = 4;

/// Serialize a laid-out document to PDF bytes.
///
/// Output is deterministic: the same document always yields the same bytes.
pub fn to_pdf(doc: &Document) -> Result<Vec<u8>> {
    let page_count = doc.pages.len();
    let mut writer = PdfWriter::new(page_count);

    writer.write_object(
        CATALOG_ID,
        format!("<< /Type /Catalog /Pages {} 0 R >>", PAGES_ID).as_bytes(),
    );

    let kids = (0..page_count)
        .map(|i| format!("{} 0 R", page_id(i)))
        .collect::<Vec<_>>()
        .join(" ");
    writer.write_object(
        PAGES_ID,
        format!("<< /Type /Pages /Kids [{}] /Count {} >>", kids, page_count).as_bytes(),
    );

    writer.write_object(
        FONT_ID,
        b"<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica /Encoding /WinAnsiEncoding >>",
    );

    for (i, page) in doc.pages.iter().enumerate() {
        writer.write_object(page_id(i), page_dict(page, content_id(i)).as_bytes());
        writer.write_object(content_id(i), &stream_object(&content_stream(page)));
    }

    let info_id = doc.metadata.as_ref().map(|metadata| {
        let id = FIRST_PAGE_ID + 2 * page_count;
        writer.write_object(id, &info_dict(metadata));
        id
    });

    log::debug!(
        "serialized {} pages into {} objects",
        page_count,
        writer.object_count()
    );
    Ok(writer.finish(info_id))
}

fn page_id(index: usize) -> usize {
    FIRST_PAGE_ID + 2 * index
}

fn content_id(index: usize) -> usize {
    FIRST_PAGE_ID + 2 * index + 1
}

fn page_dict(page: &Page, contents: usize) -> String {
    format!(
        "<< /Type /Page /Parent {} 0 R /MediaBox [0 0 {} {}] /Resources << /Font << /F1 {} 0 R >> >> /Contents {} 0 R >>",
        PAGES_ID,
        format_number(page.width()),
        format_number(page.height()),
        FONT_ID,
        contents
    )
}

fn stream_object(data: &[u8]) -> Vec<u8> {
    let mut body = format!("<< /Length {} >>\nstream\n", data.len()).into_bytes();
    body.extend_from_slice(data);
    body.extend_from_slice(b"\nendstream");
    body
}

/// Information dictionary with only the fields that are set.
fn info_dict(metadata: &Metadata) -> Vec<u8> {
    let mut body = b"<<".to_vec();
    let fields = [
        ("Title", metadata.title.as_deref()),
        ("Author", metadata.author.as_deref()),
        ("Subject", metadata.subject.as_deref()),
        ("Keywords", metadata.keywords.as_deref()),
        ("Creator", metadata.creator.as_deref()),
    ];
    for (key, value) in fields {
        if let Some(value) = value {
            push_text_entry(&mut body, key, value);
        }
    }
    if let Some(created) = metadata.created {
        let date = created.format("D:%Y%m%d%H%M%SZ").to_string();
        push_text_entry(&mut body, "CreationDate", &date);
    }
    body.extend_from_slice(b" >>");
    body
}

fn push_text_entry(body: &mut Vec<u8>, key: &str, value: &str) {
    body.extend_from_slice(format!(" /{} (", key).as_bytes());
    body.extend(escape_literal(&encode_text(value)));
    body.push(b')');
}

/// Byte sink that records object offsets for the cross-reference table.
struct PdfWriter {
    buf: Vec<u8>,
    offsets: Vec<usize>,
}

impl PdfWriter {
    fn new(page_count: usize) -> Self {
        let mut buf = Vec::with_capacity(1024 + page_count * 2048);
        buf.extend_from_slice(HEADER);
        Self {
            buf,
            offsets: Vec::with_capacity(FIRST_PAGE_ID + 2 * page_count),
        }
    }

    /// Write `id 0 obj ... endobj`. Objects must be written in id order.
    fn write_object(&mut self, id: usize, body: &[u8]) {
        debug_assert_eq!(id, self.offsets.len() + 1);
        self.offsets.push(self.buf.len());
        self.buf.extend_from_slice(format!("{} 0 obj\n", id).as_bytes());
        self.buf.extend_from_slice(body);
        self.buf.extend_from_slice(b"\nendobj\n");
    }

    fn object_count(&self) -> usize {
        self.offsets.len()
    }

    fn finish(mut self, info_id: Option<usize>) -> Vec<u8> {
        let count = self.offsets.len();
        let xref_start = self.buf.len();

        let mut xref = format!("xref\n0 {}\n0000000000 65535 f \n", count + 1);
        for offset in &self.offsets {
            xref.push_str(&format!("{:010} 00000 n \n", offset));
        }
        xref.push_str(&format!(
            "trailer\n<< /Size {} /Root {} 0 R",
            count + 1,
            CATALOG_ID
        ));
        if let Some(id) = info_id {
            xref.push_str(&format!(" /Info {} 0 R", id));
        }
        xref.push_str(&format!(" >>\nstartxref\n{}\n%%EOF\n", xref_start));

        self.buf.extend_from_slice(xref.as_bytes());
        self.buf
    }
}
