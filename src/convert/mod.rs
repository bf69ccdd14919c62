//! Spreadsheet to PDF conversion pipeline.
//!
//! Reading, sheet selection, layout and serialization wired together.
//!
//! # Example
//!
//! ```no_run
//! use sheetpdf::convert::{convert_file_to_pdf, ConvertOptions};
//! use sheetpdf::layout::LayoutOptions;
//!
//! fn main() -> sheetpdf::Result<()> {
//!     let options = ConvertOptions::new()
//!         .with_layout(LayoutOptions::a4().with_font_size(9.0))
//!         .with_sheet_names(["Summary"]);
//!
//!     let pages = convert_file_to_pdf("report.xlsx", "report.pdf", &options)?;
//!     println!("wrote {} pages", pages);
//!     Ok(())
//! }
//! ```

use std::path::Path;

use crate::error::{Error, Result};
use crate::layout::{layout_sheet, LayoutOptions};
use crate::model::{Document, Metadata, Page, Sheet};
use crate::parser::XlsxParser;
use crate::render::to_pdf;

/// Options for spreadsheet conversion.
#[derive(Debug, Clone, Default)]
pub struct ConvertOptions {
    /// Page geometry and typography
    pub layout: LayoutOptions,

    /// Sheets to convert by 0-based index; takes precedence over names
    pub sheet_indices: Option<Vec<usize>>,

    /// Sheets to convert by name, compared case-insensitively
    pub sheet_names: Option<Vec<String>>,

    /// Document information written to the PDF
    pub metadata: Option<Metadata>,
}

impl ConvertOptions {
    /// Create new conversion options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set layout options.
    pub fn with_layout(mut self, layout: LayoutOptions) -> Self {
        self.layout = layout;
        self
    }

    /// Convert only the sheets at these indices.
    pub fn with_sheets(mut self, indices: impl IntoIterator<Item = usize>) -> Self {
        self.sheet_indices = Some(indices.into_iter().collect());
        self
    }

    /// Convert only the sheets with these names.
    pub fn with_sheet_names<S: Into<String>>(mut self, names: impl IntoIterator<Item = S>) -> Self {
        self.sheet_names = Some(names.into_iter().map(Into::into).collect());
        self
    }

    /// Set document metadata.
    pub fn with_metadata(mut self, metadata: Metadata) -> Self {
        self.metadata = Some(metadata);
        self
    }

    /// Check if a sheet filter is set.
    pub fn has_selection(&self) -> bool {
        self.sheet_indices.is_some() || self.sheet_names.is_some()
    }
}

/// Keep the sheets picked by the options, in workbook order.
///
/// Unknown indices and names are skipped; a filter that matches nothing is an
/// error.
pub fn select_sheets(sheets: Vec<Sheet>, options: &ConvertOptions) -> Result<Vec<Sheet>> {
    let selected: Vec<Sheet> = if let Some(indices) = &options.sheet_indices {
        sheets
            .into_iter()
            .enumerate()
            .filter(|(i, _)| indices.contains(i))
            .map(|(_, sheet)| sheet)
            .collect()
    } else if let Some(names) = &options.sheet_names {
        sheets
            .into_iter()
            .filter(|sheet| {
                let name = sheet.name.to_lowercase();
                names.iter().any(|n| n.to_lowercase() == name)
            })
            .collect()
    } else {
        return Ok(sheets);
    };

    if selected.is_empty() {
        return Err(Error::InvalidArgument(
            "sheet selection does not match any sheet in the workbook".to_string(),
        ));
    }
    Ok(selected)
}

/// Lay out already-read sheets into a document.
///
/// Sheet selection is applied first. With no sheets left the document gets
/// one blank page so the output is always a viewable PDF.
pub fn convert_sheets(sheets: Vec<Sheet>, options: &ConvertOptions) -> Result<Document> {
    options.layout.validate()?;
    let sheets = select_sheets(sheets, options)?;

    let mut doc = Document::new();
    doc.metadata = options.metadata.clone();

    for sheet in &sheets {
        log::debug!(
            "laying out sheet {:?} ({} rows x {} columns)",
            sheet.name,
            sheet.row_count(),
            sheet.column_count()
        );
        doc.extend_pages(layout_sheet(sheet, &options.layout)?);
    }

    if doc.pages.is_empty() {
        doc.push_page(Page::new(
            options.layout.page_width,
            options.layout.page_height,
        )?);
    }

    log::debug!("converted {} sheets into {} pages", sheets.len(), doc.page_count());
    Ok(doc)
}

/// Convert an in-memory `.xlsx` package into a laid-out document.
pub fn convert(data: &[u8], options: &ConvertOptions) -> Result<Document> {
    options.layout.validate()?;
    let sheets = XlsxParser::from_bytes(data)?.parse()?;
    convert_sheets(sheets, options)
}

/// Convert an in-memory `.xlsx` package straight to PDF bytes.
pub fn convert_to_pdf(data: &[u8], options: &ConvertOptions) -> Result<Vec<u8>> {
    let doc = convert(data, options)?;
    to_pdf(&doc)
}

/// Convert an `.xlsx` file into a laid-out document.
pub fn convert_file<P: AsRef<Path>>(path: P, options: &ConvertOptions) -> Result<Document> {
    options.layout.validate()?;
    let sheets = XlsxParser::open(path)?.parse()?;
    convert_sheets(sheets, options)
}

/// Convert an `.xlsx` file and write the PDF to `output`.
///
/// Returns the number of pages written.
pub fn convert_file_to_pdf<P: AsRef<Path>, Q: AsRef<Path>>(
    input: P,
    output: Q,
    options: &ConvertOptions,
) -> Result<usize> {
    let doc = convert_file(input, options)?;
    let bytes = to_pdf(&doc)?;
    std::fs::write(output.as_ref(), bytes)?;
    log::debug!("wrote {}", output.as_ref().display());
    Ok(doc.page_count())
}
