use crate::cell::CellValue;

/// A 2-D grid of untyped cells (row-major storage)
///
/// Rows may be ragged; out-of-range lookups answer null rather than
/// panicking, because layout detection probes positions speculatively.
#[derive(Debug, Clone, Default)]
pub struct Grid {
    rows: Vec<Vec<CellValue>>,
}

impl Grid {
    /// Create an empty grid
    #[must_use]
    pub fn new() -> Self {
        Grid::default()
    }

    /// Create a grid from row data
    #[must_use]
    pub fn from_rows(rows: Vec<Vec<CellValue>>) -> Self {
        Grid { rows }
    }

    /// Number of rows
    #[must_use]
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Number of columns in the widest row
    #[must_use]
    pub fn col_count(&self) -> usize {
        self.rows.iter().map(Vec::len).max().unwrap_or(0)
    }

    /// Get a cell, or `None` when the position is outside the grid
    #[must_use]
    pub fn cell(&self, row: usize, col: usize) -> Option<&CellValue> {
        self.rows.get(row).and_then(|r| r.get(col))
    }

    /// Get a cell as a trimmed string; empty for null or out-of-range
    #[must_use]
    pub fn cell_str(&self, row: usize, col: usize) -> String {
        self.cell(row, col).map(CellValue::as_str).unwrap_or_default()
    }

    /// Borrow a full row, if present
    #[must_use]
    pub fn row(&self, row: usize) -> Option<&[CellValue]> {
        self.rows.get(row).map(Vec::as_slice)
    }

    /// Iterate over rows
    pub fn iter_rows(&self) -> impl Iterator<Item = &[CellValue]> {
        self.rows.iter().map(Vec::as_slice)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Grid {
        Grid::from_rows(vec![
            vec![CellValue::from("a"), CellValue::from("b")],
            vec![CellValue::from(1)],
        ])
    }

    #[test]
    fn test_dimensions() {
        let grid = sample();
        assert_eq!(grid.row_count(), 2);
        assert_eq!(grid.col_count(), 2);
    }

    #[test]
    fn test_out_of_range_is_empty() {
        let grid = sample();
        assert_eq!(grid.cell(1, 1), None);
        assert_eq!(grid.cell_str(1, 1), "");
        assert_eq!(grid.cell_str(9, 9), "");
    }

    #[test]
    fn test_cell_str() {
        let grid = sample();
        assert_eq!(grid.cell_str(0, 1), "b");
        assert_eq!(grid.cell_str(1, 0), "1");
    }
}
