//! Logical sheet grids fed to the workbook builder.

use serde::Serialize;
use std::fmt;

/// One spreadsheet cell value.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Cell {
    Text(String),
    Number(f64),
    #[default]
    Empty,
}

impl Cell {
    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Cell::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Cell::Number(value) => Some(*value),
            _ => None,
        }
    }

    /// Length of the rendered value used for column sizing.
    ///
    /// Numbers are measured with two decimals, empty cells have no length.
    pub fn display_len(&self) -> Option<usize> {
        match self {
            Cell::Text(text) => Some(text.chars().count()),
            Cell::Number(value) => Some(format!("{:.2}", value).chars().count()),
            Cell::Empty => None,
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Text(text) => write!(f, "{}", text),
            Cell::Number(value) => write!(f, "{:.2}", value),
            Cell::Empty => Ok(()),
        }
    }
}

impl From<&str> for Cell {
    fn from(value: &str) -> Self {
        Cell::Text(value.to_string())
    }
}

impl From<String> for Cell {
    fn from(value: String) -> Self {
        Cell::Text(value)
    }
}

impl From<f64> for Cell {
    fn from(value: f64) -> Self {
        Cell::Number(value)
    }
}

impl From<usize> for Cell {
    fn from(value: usize) -> Self {
        Cell::Number(value as f64)
    }
}

impl From<Option<f64>> for Cell {
    fn from(value: Option<f64>) -> Self {
        value.map_or(Cell::Empty, Cell::Number)
    }
}

/// A named grid of cells; row 0 is the header.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SheetGrid {
    pub name: String,
    pub rows: Vec<Vec<Cell>>,
}

impl SheetGrid {
    pub fn new(name: impl Into<String>, rows: Vec<Vec<Cell>>) -> Self {
        Self { name: name.into(), rows }
    }

    pub fn header(&self) -> Option<&[Cell]> {
        self.rows.first().map(Vec::as_slice)
    }

    /// Number of columns, taken from the header.
    pub fn width(&self) -> usize {
        self.header().map_or(0, <[Cell]>::len)
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Rows padded with empty cells or cut so each matches the header width.
    pub fn normalized_rows(&self) -> Vec<Vec<Cell>> {
        let width = self.width();
        self.rows
            .iter()
            .map(|row| {
                let mut row = row.clone();
                row.resize(width, Cell::Empty);
                row
            })
            .collect()
    }

    /// Row whose first cell is the given text, e.g. `"TOTAL"`.
    pub fn row_labelled(&self, label: &str) -> Option<&[Cell]> {
        self.rows
            .iter()
            .skip(1)
            .find(|row| row.first().and_then(Cell::as_text) == Some(label))
            .map(Vec::as_slice)
    }
}

/// Builds a row of cells from heterogeneous values.
#[macro_export]
macro_rules! cells {
    ($($value:expr),* $(,)?) => {
        vec![$($crate::libs::sheet::Cell::from($value)),*]
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_len() {
        assert_eq!(Cell::from("Alice").display_len(), Some(5));
        assert_eq!(Cell::from(12.5).display_len(), Some(5));
        assert_eq!(Cell::Empty.display_len(), None);
    }

    #[test]
    fn test_normalized_rows_match_header_width() {
        let grid = SheetGrid::new(
            "Sheet",
            vec![cells!["A", "B", "C"], cells!["x"], cells!["x", "y", "z", "extra"]],
        );
        let rows = grid.normalized_rows();
        assert!(rows.iter().all(|row| row.len() == 3));
        assert_eq!(rows[1][2], Cell::Empty);
    }

    #[test]
    fn test_row_labelled() {
        let grid = SheetGrid::new("Sheet", vec![cells!["TOTAL", "H"], cells!["TOTAL", 1.0]]);
        assert_eq!(grid.row_labelled("TOTAL").unwrap()[1], Cell::Number(1.0));
    }
}
