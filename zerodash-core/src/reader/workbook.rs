//! Workbook data structures

use serde::Serialize;
use std::collections::HashMap;
use std::fmt;
use std::path::PathBuf;

/// Represents a complete workbook
#[derive(Debug, Clone, Default)]
pub struct Workbook {
    pub path: PathBuf,
    pub sheets: Vec<Sheet>,
}

impl Workbook {
    /// Get a sheet by name
    pub fn get_sheet(&self, name: &str) -> Option<&Sheet> {
        self.sheets.iter().find(|s| s.name == name)
    }

    /// Get all sheet names
    pub fn sheet_names(&self) -> Vec<&str> {
        self.sheets.iter().map(|s| s.name.as_str()).collect()
    }
}

/// Represents a worksheet
#[derive(Debug, Clone, Default)]
pub struct Sheet {
    pub name: String,
    pub cells: HashMap<(u32, u32), Cell>,
    /// Top-left and bottom-right corners of the populated area (0-based, inclusive)
    pub bounds: Option<((u32, u32), (u32, u32))>,
    /// Error message if the sheet could not be read
    pub parse_error: Option<String>,
}

impl Sheet {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Build a sheet from dense rows anchored at A1. Empty values are not stored.
    pub fn from_rows(name: impl Into<String>, rows: Vec<Vec<CellValue>>) -> Self {
        let mut sheet = Self::new(name);
        for (r, row) in rows.into_iter().enumerate() {
            for (c, value) in row.into_iter().enumerate() {
                sheet.insert(r as u32, c as u32, value);
            }
        }
        sheet
    }

    /// Store a value and grow the bounds to include it
    pub fn insert(&mut self, row: u32, col: u32, value: CellValue) {
        if value.is_empty() {
            return;
        }
        self.bounds = Some(match self.bounds {
            None => ((row, col), (row, col)),
            Some(((r0, c0), (r1, c1))) => ((r0.min(row), c0.min(col)), (r1.max(row), c1.max(col))),
        });
        self.cells.insert((row, col), Cell { row, col, value });
    }

    /// Get a cell at the given position
    pub fn get_cell(&self, row: u32, col: u32) -> Option<&Cell> {
        self.cells.get(&(row, col))
    }

    /// Dense rows of the populated area, top to bottom.
    ///
    /// Rows with no value at all are dropped, so the first returned row is the header.
    pub fn rows(&self) -> Vec<Vec<CellValue>> {
        let Some(((r0, c0), (r1, c1))) = self.bounds else {
            return Vec::new();
        };

        (r0..=r1)
            .map(|row| {
                (c0..=c1)
                    .map(|col| {
                        self.get_cell(row, col)
                            .map(|c| c.value.clone())
                            .unwrap_or_default()
                    })
                    .collect::<Vec<_>>()
            })
            .filter(|values| values.iter().any(|v| !v.is_empty()))
            .collect()
    }
}

/// Represents a single cell
#[derive(Debug, Clone, Default)]
pub struct Cell {
    pub row: u32,
    pub col: u32,
    pub value: CellValue,
}

/// Cell value types
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(untagged)]
pub enum CellValue {
    #[default]
    Empty,
    Number(f64),
    Text(String),
    Boolean(bool),
    Error(String),
}

impl CellValue {
    /// Check if the cell is empty
    pub fn is_empty(&self) -> bool {
        matches!(self, CellValue::Empty)
    }

    /// Check if the cell contains an error
    pub fn is_error(&self) -> bool {
        matches!(self, CellValue::Error(_))
    }

    /// Numeric value, if the cell holds one
    pub fn as_number(&self) -> Option<f64> {
        match self {
            CellValue::Number(n) => Some(*n),
            _ => None,
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Empty => Ok(()),
            CellValue::Number(n) => write!(f, "{}", format_number(*n)),
            CellValue::Text(s) => write!(f, "{s}"),
            CellValue::Boolean(b) => write!(f, "{b}"),
            CellValue::Error(e) => write!(f, "{e}"),
        }
    }
}

/// Whole numbers print without a fractional part; everything else uses the shortest
/// representation that parses back to the same `f64`.
pub fn format_number(n: f64) -> String {
    if n.is_finite() && n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        format!("{n}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rows_skip_blank_lines_and_keep_gaps() {
        let mut sheet = Sheet::new("Data");
        sheet.insert(1, 1, CellValue::Text("name".into()));
        sheet.insert(1, 2, CellValue::Text("score".into()));
        sheet.insert(3, 1, CellValue::Text("Acme".into()));

        let rows = sheet.rows();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0][0], CellValue::Text("name".into()));
        assert_eq!(rows[1], vec![CellValue::Text("Acme".into()), CellValue::Empty]);
    }

    #[test]
    fn test_empty_sheet_has_no_rows() {
        let sheet = Sheet::from_rows("Empty", vec![vec![CellValue::Empty]]);
        assert!(sheet.bounds.is_none());
        assert!(sheet.rows().is_empty());
    }

    #[test]
    fn test_number_display() {
        assert_eq!(CellValue::Number(90.0).to_string(), "90");
        assert_eq!(CellValue::Number(87.25).to_string(), "87.25");
        assert_eq!(CellValue::Number(-3.0).to_string(), "-3");
        assert_eq!(CellValue::Empty.to_string(), "");
    }
}
