//! Data model types.
//!
//! Two families live here: the spreadsheet side ([`Sheet`], [`Cell`]) produced
//! by the parser, and the document side ([`Document`], [`Page`], [`TextRun`],
//! [`Color`]) produced by layout and consumed by the PDF writer. Ownership is
//! strictly top-down: a document owns its pages, a page owns its runs.

mod color;
mod document;
mod page;
mod sheet;

pub use color::{parse_color, Color};
pub use document::{Document, Metadata};
pub use page::{Page, TextRun, A4, LETTER};
pub use sheet::{Cell, Sheet};
