//! Header-row and column detection for matrix-format attendance files
//!
//! Source files carry title and metadata rows above the table, vary in
//! column count and spacing, and never label their layout. Detection is a
//! pure scan over the grid: find the first row with enough day-header
//! tokens, then resolve the identity columns by label with positional
//! fallbacks.

use crate::error::{EngineError, Result};
use regex::Regex;
use rollcall_grid::{CellValue, Grid};
use std::sync::LazyLock;
use tracing::debug;

/// Rows scanned for a header before giving up
const HEADER_SCAN_LIMIT: usize = 50;

/// Day columns must sit to the right of the identity columns
const MIN_DAY_COLUMN: usize = 3;

/// Minimum day-header matches for a row to qualify as the header
const MIN_DAY_HEADERS: usize = 3;

static DAY_HEADER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*\d{1,2}\s+[A-Za-z]+\s*$").unwrap());

static DAY_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d{1,2})\s+(\w+)$").unwrap());

/// One detected day column
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayColumn {
    pub column: usize,
    /// Normalized `"DD Weekday"` label (day number zero-padded), or the raw
    /// header text when it does not parse
    pub label: String,
    pub weekday: String,
}

/// The detected shape of a matrix-format sheet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedLayout {
    pub header_row: usize,
    pub serial_column: usize,
    pub id_column: usize,
    pub name_column: usize,
    pub designation_column: usize,
    pub row_label_column: usize,
    /// Strictly increasing by column index
    pub day_columns: Vec<DayColumn>,
}

/// Normalize a raw day header into `(label, weekday)`
///
/// `"1 Mon"` -> `("01 Mon", "Mon")`. Headers that match neither the strict
/// pattern nor the two-token fallback keep their raw text in both slots.
#[must_use]
pub fn parse_day_token(raw: &str) -> (String, String) {
    let text = raw.trim();
    if let Some(caps) = DAY_TOKEN.captures(text) {
        let number = format!("{:0>2}", &caps[1]);
        let weekday = caps[2].to_string();
        return (format!("{number} {weekday}"), weekday);
    }
    let parts: Vec<&str> = text.split_whitespace().collect();
    if parts.len() >= 2 && parts[0].chars().all(|c| c.is_ascii_digit()) {
        let number = format!("{:0>2}", parts[0]);
        let weekday = parts[1].to_string();
        return (format!("{number} {weekday}"), weekday);
    }
    (text.to_string(), text.to_string())
}

fn is_day_header(value: &CellValue) -> bool {
    matches!(value, CellValue::String(s) if DAY_HEADER.is_match(s))
}

/// Resolve a column by case-insensitive label match, else the fallback index
fn find_column(header: &[CellValue], labels: &[&str], fallback: usize) -> usize {
    header
        .iter()
        .position(|cell| {
            let text = cell.as_str().to_lowercase();
            labels.contains(&text.as_str())
        })
        .unwrap_or(fallback)
}

/// Detect the matrix layout of a grid
///
/// # Errors
///
/// Returns [`EngineError::LayoutNotFound`] when no row within the scan
/// window carries enough day headers and none can be recovered from the
/// header row afterwards.
pub fn detect(grid: &Grid) -> Result<ParsedLayout> {
    let scan_limit = grid.row_count().min(HEADER_SCAN_LIMIT);
    let mut found: Option<(usize, Vec<usize>)> = None;

    for row_idx in 0..scan_limit {
        let Some(row) = grid.row(row_idx) else { continue };
        let matches: Vec<usize> = row
            .iter()
            .enumerate()
            .filter(|(col, cell)| *col >= MIN_DAY_COLUMN && is_day_header(cell))
            .map(|(col, _)| col)
            .collect();
        if matches.len() >= MIN_DAY_HEADERS {
            found = Some((row_idx, matches));
            break;
        }
    }

    let Some((header_row, mut day_cols)) = found else {
        return Err(EngineError::LayoutNotFound);
    };

    let header = grid.row(header_row).unwrap_or(&[]);

    let serial_column = find_column(header, &["sn", "sn.", "s.n."], 0);
    let id_column = find_column(
        header,
        &["emp id", "empid", "employee id", "emp no", "emp no."],
        1,
    );
    let name_column = find_column(header, &["name", "employee name", "emp name"], 2);
    let designation_column = find_column(header, &["post", "designation", "desig"], 3);
    let row_label_column = find_column(header, &["time"], 4);

    // The scan already produced day columns; re-derive from the header only
    // if it somehow did not.
    if day_cols.is_empty() {
        day_cols = header
            .iter()
            .enumerate()
            .filter(|(col, cell)| *col > row_label_column && is_day_header(cell))
            .map(|(col, _)| col)
            .collect();
    }

    if day_cols.is_empty() {
        return Err(EngineError::LayoutNotFound);
    }

    let day_columns: Vec<DayColumn> = day_cols
        .into_iter()
        .map(|column| {
            let (label, weekday) = parse_day_token(&grid.cell_str(header_row, column));
            DayColumn {
                column,
                label,
                weekday,
            }
        })
        .collect();

    debug!(
        header_row,
        day_columns = day_columns.len(),
        "detected matrix layout"
    );

    Ok(ParsedLayout {
        header_row,
        serial_column,
        id_column,
        name_column,
        designation_column,
        row_label_column,
        day_columns,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header_grid(leading_blank_rows: usize) -> Grid {
        let mut rows: Vec<Vec<CellValue>> = (0..leading_blank_rows)
            .map(|_| vec![CellValue::Null])
            .collect();
        rows.push(vec![
            CellValue::from("SN"),
            CellValue::from("Emp ID"),
            CellValue::from("Name"),
            CellValue::from("Post"),
            CellValue::from("Time"),
            CellValue::from("1 Mon"),
            CellValue::from("2 Tue"),
            CellValue::from("3 Wed"),
        ]);
        Grid::from_rows(rows)
    }

    #[test]
    fn test_detects_header_row() {
        let layout = detect(&header_grid(0)).unwrap();
        assert_eq!(layout.header_row, 0);
        assert_eq!(layout.row_label_column, 4);
        assert_eq!(
            layout.day_columns.iter().map(|d| d.column).collect::<Vec<_>>(),
            vec![5, 6, 7]
        );
    }

    #[test]
    fn test_header_row_independent_of_leading_rows() {
        let layout = detect(&header_grid(7)).unwrap();
        assert_eq!(layout.header_row, 7);
        assert_eq!(layout.day_columns.len(), 3);
    }

    #[test]
    fn test_day_columns_strictly_increasing() {
        let layout = detect(&header_grid(0)).unwrap();
        let cols: Vec<usize> = layout.day_columns.iter().map(|d| d.column).collect();
        assert!(cols.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_two_day_headers_is_not_a_layout() {
        let grid = Grid::from_rows(vec![vec![
            CellValue::from("SN"),
            CellValue::from("Emp ID"),
            CellValue::from("Name"),
            CellValue::from("Post"),
            CellValue::from("Time"),
            CellValue::from("1 Mon"),
            CellValue::from("2 Tue"),
        ]]);
        assert!(matches!(detect(&grid), Err(EngineError::LayoutNotFound)));
    }

    #[test]
    fn test_day_headers_before_column_three_ignored() {
        let grid = Grid::from_rows(vec![vec![
            CellValue::from("1 Mon"),
            CellValue::from("2 Tue"),
            CellValue::from("3 Wed"),
            CellValue::from("4 Thu"),
        ]]);
        // Only "4 Thu" sits at column >= 3, so no header row qualifies.
        assert!(matches!(detect(&grid), Err(EngineError::LayoutNotFound)));
    }

    #[test]
    fn test_label_resolution_beats_position() {
        let grid = Grid::from_rows(vec![vec![
            CellValue::from("S.N."),
            CellValue::from("Name"),
            CellValue::from("Emp No."),
            CellValue::from("Time"),
            CellValue::from("Desig"),
            CellValue::from("1 Mon"),
            CellValue::from("2 Tue"),
            CellValue::from("3 Wed"),
        ]]);
        let layout = detect(&grid).unwrap();
        assert_eq!(layout.id_column, 2);
        assert_eq!(layout.name_column, 1);
        assert_eq!(layout.designation_column, 4);
        assert_eq!(layout.row_label_column, 3);
    }

    #[test]
    fn test_parse_day_token() {
        assert_eq!(parse_day_token("1 Mon"), ("01 Mon".into(), "Mon".into()));
        assert_eq!(parse_day_token(" 12 Fri "), ("12 Fri".into(), "Fri".into()));
        // Two-token fallback for extra trailing text
        assert_eq!(parse_day_token("3 Wed X"), ("03 Wed".into(), "Wed".into()));
        // Unparseable headers keep their raw text
        assert_eq!(
            parse_day_token("Saturday"),
            ("Saturday".into(), "Saturday".into())
        );
    }
}
