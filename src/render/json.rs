//! JSON dumps of parsed sheets and laid-out documents.
//!
//! Neither dump is a stable interchange format; they exist so a conversion
//! can be inspected at either side of the layout step.

use serde::Serialize;

use crate::error::{Error, Result};
use crate::model::{Document, Sheet};

/// JSON output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonFormat {
    /// Pretty-printed JSON with indentation
    #[default]
    Pretty,
    /// Compact JSON without extra whitespace
    Compact,
}

/// Dump a laid-out document: metadata, then every page with its runs.
pub fn to_json(doc: &Document, format: JsonFormat) -> Result<String> {
    encode(doc, format)
}

/// Dump the cell grid of parsed sheets, before any layout happens.
pub fn sheets_to_json(sheets: &[Sheet], format: JsonFormat) -> Result<String> {
    encode(sheets, format)
}

fn encode<T: Serialize + ?Sized>(value: &T, format: JsonFormat) -> Result<String> {
    match format {
        JsonFormat::Pretty => serde_json::to_string_pretty(value),
        JsonFormat::Compact => serde_json::to_string(value),
    }
    .map_err(|e| Error::Render(format!("JSON serialization error: {}", e)))
}
