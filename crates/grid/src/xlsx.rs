use crate::cell::CellValue;
use crate::error::{GridError, Result};
use crate::grid::Grid;
use calamine::{open_workbook_auto, Data, Reader};
use std::path::Path;
use tracing::debug;

/// Convert calamine Data to CellValue
///
/// Excel datetimes come through as serial numbers (days since 1899-12-30);
/// the legacy layout detector relies on seeing them that way.
fn data_to_cell_value(data: &Data) -> CellValue {
    match data {
        Data::Empty => CellValue::Null,
        Data::Bool(b) => CellValue::Bool(*b),
        Data::Int(i) => CellValue::Int(*i),
        Data::Float(f) => CellValue::Float(*f),
        Data::String(s) => CellValue::String(s.clone()),
        Data::DateTime(dt) => CellValue::Float(dt.as_f64()),
        Data::DateTimeIso(s) => CellValue::String(s.clone()),
        Data::DurationIso(s) => CellValue::String(s.clone()),
        Data::Error(e) => CellValue::String(format!("#ERROR: {e:?}")),
    }
}

impl Grid {
    /// Load the first worksheet of an `.xls`/`.xlsx` file into a grid
    ///
    /// # Errors
    ///
    /// Returns [`GridError::Unreadable`] if the file cannot be opened or
    /// parsed, and [`GridError::NoWorksheet`] for a workbook with no sheets.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let mut workbook = open_workbook_auto(path).map_err(|e| GridError::Unreadable {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let sheet_names = workbook.sheet_names().to_vec();
        let first = sheet_names.first().ok_or_else(|| GridError::NoWorksheet {
            path: path.to_path_buf(),
        })?;

        let range = workbook
            .worksheet_range(first)
            .map_err(|e| GridError::Unreadable {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?;

        let rows: Vec<Vec<CellValue>> = range
            .rows()
            .map(|row| row.iter().map(data_to_cell_value).collect())
            .collect();

        debug!(rows = rows.len(), sheet = %first, "loaded worksheet");
        Ok(Grid::from_rows(rows))
    }
}
