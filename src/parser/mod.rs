//! Spreadsheet (OOXML `.xlsx`) reading module.

mod cell_ref;
mod shared_strings;
mod styles;
mod workbook;
mod worksheet;
mod xlsx_parser;
mod xml;

pub use cell_ref::{column_index, column_letters, row_number};
pub use xlsx_parser::XlsxParser;

use crate::error::Result;
use crate::model::Sheet;

/// Read all sheets of an in-memory `.xlsx` package, in workbook order.
pub fn read_sheets(data: &[u8]) -> Result<Vec<Sheet>> {
    XlsxParser::from_bytes(data)?.parse()
}
