use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// A single cell value from a source sheet.
///
/// Missing cells are represented by `Empty` and are never coerced to a
/// token downstream.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub enum CellValue {
    #[default]
    Empty,
    Text(String),
    Number(f64),
}

impl CellValue {
    pub fn from_input(input: &str) -> Self {
        let trimmed = input.trim();

        if trimmed.is_empty() {
            return CellValue::Empty;
        }

        if let Ok(num) = trimmed.parse::<f64>() {
            return CellValue::Number(num);
        }

        CellValue::Text(trimmed.to_string())
    }

    pub fn raw_display(&self) -> String {
        match self {
            CellValue::Empty => String::new(),
            CellValue::Text(s) => s.clone(),
            CellValue::Number(n) => {
                if n.fract() == 0.0 && n.abs() < 1e15 {
                    format!("{}", *n as i64)
                } else {
                    format!("{}", n)
                }
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, CellValue::Empty)
    }
}

/// The two-dimensional content of one source sheet.
///
/// Cells are stored sparsely; `rows`/`cols` track the data extent so that
/// iteration order is well defined.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Grid {
    pub name: String,
    cells: HashMap<(usize, usize), CellValue>,
    pub rows: usize,
    pub cols: usize,
}

impl Grid {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            cells: HashMap::new(),
            rows: 0,
            cols: 0,
        }
    }

    /// Store a cell value, growing the tracked extent. Empty values are
    /// dropped so the sparse map only ever holds real content.
    pub fn set(&mut self, row: usize, col: usize, value: CellValue) {
        if value.is_empty() {
            return;
        }
        self.rows = self.rows.max(row + 1);
        self.cols = self.cols.max(col + 1);
        self.cells.insert((row, col), value);
    }

    pub fn set_input(&mut self, row: usize, col: usize, input: &str) {
        self.set(row, col, CellValue::from_input(input));
    }

    pub fn get(&self, row: usize, col: usize) -> Option<&CellValue> {
        self.cells.get(&(row, col))
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// Flatten the grid into its non-empty cell values in row-major order.
    ///
    /// Row-major is the documented, reproducible flattening order; it is what
    /// fixes the first-seen ranking used by the dedup strategies.
    pub fn values(&self) -> impl Iterator<Item = &CellValue> + '_ {
        (0..self.rows).flat_map(move |row| {
            (0..self.cols).filter_map(move |col| self.cells.get(&(row, col)))
        })
    }
}

/// Where to find a grid's primary keyword: two cells on one row, joined with
/// a single space.
///
/// The default matches the common sheet template (5th row, first two
/// columns), but the rule is configurable since the positional contract is
/// template-specific.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct PrimaryKeywordRule {
    pub row: usize,
    pub cols: (usize, usize),
}

impl Default for PrimaryKeywordRule {
    fn default() -> Self {
        Self { row: 4, cols: (0, 1) }
    }
}

impl PrimaryKeywordRule {
    /// Extract the primary keyword from a grid.
    ///
    /// Lookup failure is non-fatal: cells outside the grid's extent simply
    /// contribute nothing, and a grid too small for the rule yields `""`.
    pub fn extract(&self, grid: &Grid) -> String {
        let part = |col: usize| {
            grid.get(self.row, col)
                .map(CellValue::raw_display)
                .unwrap_or_default()
        };
        let joined = format!("{} {}", part(self.cols.0), part(self.cols.1));
        joined.trim().to_string()
    }
}
