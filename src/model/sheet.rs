//! Parsed spreadsheet cell grid.

use super::Color;
use serde::Serialize;

/// A single spreadsheet cell.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Cell {
    /// Display text (raw value for numbers and booleans)
    pub text: String,

    /// Font color, if the cell style resolves to one
    pub color: Option<Color>,
}

impl Cell {
    /// Create a cell with text and no color.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            color: None,
        }
    }

    /// Create an empty placeholder cell.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Create a cell with a font color.
    pub fn with_color(text: impl Into<String>, color: Color) -> Self {
        Self {
            text: text.into(),
            color: Some(color),
        }
    }

    /// Check if the cell has no text.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

/// A worksheet: a name plus rows of cells.
///
/// Column index equals vector index within each row; gaps in the source are
/// filled with empty cells.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Sheet {
    /// Sheet name as declared in the workbook
    pub name: String,

    /// Rows in source order
    pub rows: Vec<Vec<Cell>>,
}

impl Sheet {
    /// Create an empty sheet.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            rows: Vec::new(),
        }
    }

    /// Append a row.
    pub fn push_row(&mut self, row: Vec<Cell>) {
        self.rows.push(row);
    }

    /// Number of rows, including materialized empty rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Number of columns (length of the longest row).
    pub fn column_count(&self) -> usize {
        self.rows.iter().map(Vec::len).max().unwrap_or(0)
    }

    /// Get a cell by zero-based row and column.
    pub fn cell(&self, row: usize, col: usize) -> Option<&Cell> {
        self.rows.get(row).and_then(|r| r.get(col))
    }

    /// Check if the sheet holds no text at all.
    pub fn is_empty(&self) -> bool {
        self.rows.iter().flatten().all(Cell::is_empty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sheet_dimensions() {
        let mut sheet = Sheet::new("Data");
        sheet.push_row(vec![Cell::new("a")]);
        sheet.push_row(vec![Cell::new("b"), Cell::empty(), Cell::new("c")]);

        assert_eq!(sheet.row_count(), 2);
        assert_eq!(sheet.column_count(), 3);
        assert_eq!(sheet.cell(1, 2).map(|c| c.text.as_str()), Some("c"));
        assert!(sheet.cell(0, 2).is_none());
        assert!(!sheet.is_empty());
    }

    #[test]
    fn test_empty_sheet() {
        let mut sheet = Sheet::new("Empty");
        assert!(sheet.is_empty());
        assert_eq!(sheet.column_count(), 0);

        sheet.push_row(vec![Cell::empty(), Cell::empty()]);
        assert!(sheet.is_empty());
        assert_eq!(sheet.column_count(), 2);
    }

    #[test]
    fn test_cell_color() {
        let cell = Cell::with_color("warn", Color::RED);
        assert_eq!(cell.color, Some(Color::RED));
        assert!(Cell::new("x").color.is_none());
    }
}
