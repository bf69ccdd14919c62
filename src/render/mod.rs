//! Rendering module for converting laid-out documents to output formats.

mod content;
mod json;
mod pdf;

pub use json::{sheets_to_json, to_json, JsonFormat};
pub use pdf::to_pdf;
