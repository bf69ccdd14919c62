//! # sheetpdf
//!
//! Spreadsheet (`.xlsx`) to PDF conversion library for Rust.
//!
//! The workbook is read from its ZIP/XML package, each sheet is laid out on
//! fixed-size pages (column sizing, word wrapping, pagination) and the result
//! is written as a PDF 1.4 file using the standard Helvetica font.
//!
//! ## Quick Start
//!
//! ```no_run
//! use sheetpdf::{convert_to_pdf, ConvertOptions};
//!
//! fn main() -> sheetpdf::Result<()> {
//!     let data = std::fs::read("report.xlsx")?;
//!     let pdf = convert_to_pdf(&data, &ConvertOptions::default())?;
//!     std::fs::write("report.pdf", pdf)?;
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Self-contained PDF writer**: no PDF library, byte-exact output
//! - **Column groups**: sheets too wide for the page continue on extra pages
//! - **Font colors**: cell font colors resolved through the style table
//! - **Sheet selection**: by index or case-insensitive name
//! - **JSON dump**: inspect the laid-out pages

pub mod convert;
pub mod detect;
pub mod error;
pub mod layout;
pub mod model;
pub mod parser;
pub mod render;

// Re-export commonly used types
pub use convert::{convert, convert_file, convert_file_to_pdf, convert_to_pdf, ConvertOptions};
pub use detect::{detect_format_from_bytes, detect_format_from_path, is_xlsx, ContainerFormat};
pub use error::{Error, Result};
pub use layout::{layout_sheet, wrap_text, LayoutOptions};
pub use model::{parse_color, Cell, Color, Document, Metadata, Page, Sheet, TextRun};
pub use parser::{read_sheets, XlsxParser};
pub use render::JsonFormat;

use std::path::Path;

/// Serialize a laid-out document to PDF bytes.
///
/// # Example
///
/// ```
/// use sheetpdf::{serialize, Document};
///
/// let mut doc = Document::new();
/// doc.add_page(612.0, 792.0)?.add_text("Hello", 50.0, 742.0, 12.0)?;
/// let pdf = serialize(&doc)?;
/// assert!(pdf.starts_with(b"%PDF-1.4"));
/// # Ok::<(), sheetpdf::Error>(())
/// ```
pub fn serialize(doc: &Document) -> Result<Vec<u8>> {
    render::to_pdf(doc)
}

/// Convert an `.xlsx` file to the JSON dump of its laid-out pages.
///
/// # Example
///
/// ```no_run
/// use sheetpdf::{to_json, JsonFormat};
///
/// let json = to_json("report.xlsx", JsonFormat::Pretty).unwrap();
/// std::fs::write("report.json", json).unwrap();
/// ```
pub fn to_json<P: AsRef<Path>>(path: P, format: JsonFormat) -> Result<String> {
    let doc = convert_file(path, &ConvertOptions::default())?;
    render::to_json(&doc, format)
}

/// Builder for converting spreadsheets.
///
/// # Example
///
/// ```no_run
/// use sheetpdf::SheetPdf;
///
/// let data = std::fs::read("report.xlsx")?;
/// let pdf = SheetPdf::new()
///     .with_font_size(9.0)
///     .landscape()
///     .with_sheets([0, 2])
///     .convert_bytes(&data)?
///     .to_pdf()?;
/// std::fs::write("report.pdf", pdf)?;
/// # Ok::<(), sheetpdf::Error>(())
/// ```
pub struct SheetPdf {
    options: ConvertOptions,
}

impl SheetPdf {
    /// Create a new builder with default options.
    pub fn new() -> Self {
        Self {
            options: ConvertOptions::default(),
        }
    }

    /// Replace all layout options.
    pub fn with_layout(mut self, layout: LayoutOptions) -> Self {
        self.options.layout = layout;
        self
    }

    /// Set the body font size.
    pub fn with_font_size(mut self, size: f32) -> Self {
        self.options.layout = self.options.layout.with_font_size(size);
        self
    }

    /// Set all four page margins.
    pub fn with_margins(mut self, margin: f32) -> Self {
        self.options.layout = self.options.layout.with_margins(margin);
        self
    }

    /// Set the page size in points.
    pub fn with_page_size(mut self, width: f32, height: f32) -> Self {
        self.options.layout = self.options.layout.with_page_size(width, height);
        self
    }

    /// Use landscape orientation for the current page size.
    pub fn landscape(mut self) -> Self {
        let layout = &self.options.layout;
        if layout.page_height > layout.page_width {
            self.options.layout = self.options.layout.rotated();
        }
        self
    }

    /// Omit the sheet name header.
    pub fn without_sheet_name(mut self) -> Self {
        self.options.layout = self.options.layout.without_sheet_name();
        self
    }

    /// Convert only the sheets at these indices.
    pub fn with_sheets(mut self, indices: impl IntoIterator<Item = usize>) -> Self {
        self.options = self.options.with_sheets(indices);
        self
    }

    /// Convert only the sheets with these names.
    pub fn with_sheet_names<S: Into<String>>(mut self, names: impl IntoIterator<Item = S>) -> Self {
        self.options = self.options.with_sheet_names(names);
        self
    }

    /// Set document metadata.
    pub fn with_metadata(mut self, metadata: Metadata) -> Self {
        self.options = self.options.with_metadata(metadata);
        self
    }

    /// Get the accumulated options.
    pub fn options(&self) -> &ConvertOptions {
        &self.options
    }

    /// Convert an `.xlsx` file.
    pub fn convert_file<P: AsRef<Path>>(self, path: P) -> Result<SheetPdfResult> {
        let document = convert_file(path, &self.options)?;
        Ok(SheetPdfResult { document })
    }

    /// Convert an in-memory `.xlsx` package.
    pub fn convert_bytes(self, data: &[u8]) -> Result<SheetPdfResult> {
        let document = convert(data, &self.options)?;
        Ok(SheetPdfResult { document })
    }
}

impl Default for SheetPdf {
    fn default() -> Self {
        Self::new()
    }
}

/// Result of a conversion.
pub struct SheetPdfResult {
    /// The laid-out document
    pub document: Document,
}

impl SheetPdfResult {
    /// Serialize to PDF bytes.
    pub fn to_pdf(&self) -> Result<Vec<u8>> {
        render::to_pdf(&self.document)
    }

    /// Serialize to JSON.
    pub fn to_json(&self, format: JsonFormat) -> Result<String> {
        render::to_json(&self.document, format)
    }

    /// Write the PDF to a file and return the number of pages.
    pub fn write_pdf<P: AsRef<Path>>(&self, path: P) -> Result<usize> {
        std::fs::write(path, self.to_pdf()?)?;
        Ok(self.document.page_count())
    }

    /// Number of pages.
    pub fn page_count(&self) -> usize {
        self.document.page_count()
    }

    /// Text of every run, page by page.
    pub fn plain_text(&self) -> String {
        self.document.plain_text()
    }

    /// Get the document.
    pub fn document(&self) -> &Document {
        &self.document
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_defaults() {
        let builder = SheetPdf::default();
        assert_eq!(builder.options().layout, LayoutOptions::default());
        assert!(!builder.options().has_selection());
    }

    #[test]
    fn test_builder_chained() {
        let builder = SheetPdf::new()
            .with_font_size(8.0)
            .with_margins(30.0)
            .landscape()
            .without_sheet_name()
            .with_sheets([1])
            .with_metadata(Metadata::new().with_author("Ops"));

        let options = builder.options();
        assert_eq!(options.layout.font_size, 8.0);
        assert_eq!(options.layout.margin_top, 30.0);
        assert_eq!(options.layout.page_width, 792.0);
        assert!(!options.layout.include_sheet_name);
        assert_eq!(options.sheet_indices, Some(vec![1]));
        assert!(options.metadata.is_some());
    }

    #[test]
    fn test_landscape_is_idempotent() {
        let builder = SheetPdf::new().landscape().landscape();
        assert_eq!(builder.options().layout.page_width, 792.0);
    }

    #[test]
    fn test_builder_with_page_size() {
        let builder = SheetPdf::new().with_page_size(595.0, 842.0).landscape();
        assert_eq!(builder.options().layout.page_width, 842.0);
        assert_eq!(builder.options().layout.page_height, 595.0);
    }

    // ==================== Edge Case Tests ====================

    #[test]
    fn test_convert_empty_data() {
        let data: [u8; 0] = [];
        let err = convert(&data, &ConvertOptions::default()).unwrap_err();
        assert!(err.is_format_error());
    }

    #[test]
    fn test_convert_truncated_zip() {
        // Local header magic without a readable archive behind it
        let err = convert(b"PK\x03\x04\x14\x00", &ConvertOptions::default()).unwrap_err();
        assert!(err.is_format_error());
    }

    #[test]
    fn test_builder_invalid_bytes() {
        let result = SheetPdf::new().convert_bytes(b"not a workbook");
        assert!(result.is_err());
    }

    #[test]
    fn test_serialize_empty_document() {
        let pdf = serialize(&Document::new()).unwrap();
        assert!(pdf.starts_with(b"%PDF-1.4"));
        assert!(pdf.ends_with(b"%%EOF\n"));
    }

    #[test]
    fn test_json_format_variants() {
        assert_eq!(JsonFormat::default(), JsonFormat::Pretty);
        let _compact = JsonFormat::Compact;
    }
}
