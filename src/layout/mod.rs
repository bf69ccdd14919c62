//! Sheet layout: column sizing, wrapping and pagination.
//!
//! Widths are estimated from an average Helvetica glyph width of half the
//! font size; no font metrics are consulted.

mod columns;
mod options;
mod paginate;
mod wrap;

pub use columns::{plan_columns, ColumnGroup, ColumnPlan};
pub use options::LayoutOptions;
pub use paginate::layout_sheet;
pub use wrap::wrap_text;
