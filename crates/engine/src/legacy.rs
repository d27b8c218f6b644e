//! Legacy-strategy extraction
//!
//! The older terminal export puts one employee per row and one composite
//! token per day column (`"P 09:00 18:00"`, `"A"`, `"L"`). The layout is
//! near-fixed: a period line in cell A9 and a header row of real dates
//! around row 11. This strategy is only attempted when the matrix parser
//! fails and [`looks_like_legacy`] matches.

use crate::error::{EngineError, Result};
use crate::record::AttendanceRecord;
use chrono::{Duration, NaiveDate, NaiveTime};
use regex::Regex;
use rollcall_grid::{CellValue, Grid};
use std::sync::LazyLock;
use tracing::debug;

/// Grid position of the period metadata line ("Period: 2082/03/01 - ...")
pub const PERIOD_CELL: (usize, usize) = (8, 0);

/// Default header row when the scan finds nothing better
const DEFAULT_HEADER_ROW: usize = 10;

/// Day columns start at column F
const FIRST_DAY_COLUMN: usize = 5;

/// Excel's day-serial epoch
const EXCEL_EPOCH: (i32, u32, u32) = (1899, 12, 30);

static DATE_SUBSTRING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d{1,2}[/-]\d{1,2}[/-]\d{2,4}").unwrap());

static CLOCK_TIME: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d{1,2}:\d{2}").unwrap());

/// Heuristic: does a header cell look like a date?
fn is_date_like(value: &CellValue) -> bool {
    match value {
        // Excel serial dates, rough plausible bounds (1954..2036)
        CellValue::Int(i) => (20000..=50000).contains(i),
        CellValue::Float(f) => (20000.0..=50000.0).contains(f),
        CellValue::String(s) => DATE_SUBSTRING.is_match(s),
        _ => false,
    }
}

/// Sniff whether a grid is a legacy attendance export
///
/// True when the period cell mentions "period", or when row 11 carries
/// date-looking text in the day-column range.
#[must_use]
pub fn looks_like_legacy(grid: &Grid) -> bool {
    let period_text = grid.cell_str(PERIOD_CELL.0, PERIOD_CELL.1).to_lowercase();
    if period_text.contains("period") {
        return true;
    }
    for col in FIRST_DAY_COLUMN..grid.col_count().min(15) {
        let text = grid.cell_str(DEFAULT_HEADER_ROW, col);
        if text.chars().any(|c| c.is_ascii_digit()) && (text.contains('/') || text.contains('-')) {
            return true;
        }
    }
    false
}

/// Locate the header row: scan a narrow window below the default position
/// for a row with at least three date-like cells from column F onward.
fn find_header_row(grid: &Grid) -> usize {
    let end = grid.row_count().min(DEFAULT_HEADER_ROW + 10);
    for row in DEFAULT_HEADER_ROW..end {
        let mut date_like = 0;
        for col in FIRST_DAY_COLUMN..grid.col_count() {
            if grid.cell(row, col).is_some_and(is_date_like) {
                date_like += 1;
                if date_like >= 3 {
                    return row;
                }
            }
        }
    }
    DEFAULT_HEADER_ROW
}

/// Parse a header cell into a calendar date
fn parse_header_date(value: &CellValue) -> Option<NaiveDate> {
    match value {
        CellValue::String(s) => {
            let text = s.trim();
            for fmt in ["%d/%m/%Y", "%d-%m-%Y", "%Y-%m-%d", "%m/%d/%Y"] {
                if let Ok(date) = NaiveDate::parse_from_str(text, fmt) {
                    return Some(date);
                }
            }
            None
        }
        CellValue::Int(i) => excel_serial_to_date(*i as f64),
        CellValue::Float(f) => excel_serial_to_date(*f),
        _ => None,
    }
}

fn excel_serial_to_date(serial: f64) -> Option<NaiveDate> {
    let (y, m, d) = EXCEL_EPOCH;
    NaiveDate::from_ymd_opt(y, m, d).map(|epoch| epoch + Duration::days(serial as i64))
}

/// Parse one composite day token into (status, in, out)
fn parse_day_token(token: &str) -> (String, String, String) {
    let mut in_time = String::new();
    let mut out_time = String::new();
    let status;

    if token.contains('P') || token.contains("Present") {
        status = "Present";
        let times: Vec<&str> = CLOCK_TIME.find_iter(token).map(|m| m.as_str()).collect();
        if times.len() >= 2 {
            if parse_clock(times[0]).is_some() && parse_clock(times[1]).is_some() {
                in_time = times[0].to_string();
                out_time = times[1].to_string();
            }
        } else if times.len() == 1 {
            in_time = times[0].to_string();
        }
    } else if token.contains('A') || token.contains("Absent") {
        status = "Absent";
    } else if token.contains('L') || token.contains("Leave") {
        status = "Leave";
    } else if token.contains('H') || token.contains("Holiday") {
        status = "Holiday";
    } else {
        status = "Present";
    }

    (status.to_string(), in_time, out_time)
}

fn parse_clock(text: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(text, "%H:%M").ok()
}

/// Worked hours from an in/out pair, adding 24h for overnight shifts
#[must_use]
pub fn worked_hours(in_time: &str, out_time: &str) -> f64 {
    let (Some(start), Some(end)) = (parse_clock(in_time), parse_clock(out_time)) else {
        return 0.0;
    };
    let mut minutes = (end - start).num_minutes();
    if minutes < 0 {
        minutes += 24 * 60;
    }
    minutes as f64 / 60.0
}

/// Extract attendance records from a legacy-format grid
///
/// # Errors
///
/// Returns [`EngineError::LayoutNotFound`] when no date columns exist in
/// the header row, and [`EngineError::NoDataExtracted`] when parsing
/// produces zero records.
pub fn extract(grid: &Grid) -> Result<Vec<AttendanceRecord>> {
    let header_row = find_header_row(grid);
    if grid.row_count() <= header_row {
        return Err(EngineError::LayoutNotFound);
    }

    let mut day_columns: Vec<(usize, NaiveDate)> = Vec::new();
    let mut date_like_columns = 0;
    for col in FIRST_DAY_COLUMN..grid.col_count() {
        let Some(cell) = grid.cell(header_row, col) else { continue };
        if is_date_like(cell) {
            date_like_columns += 1;
            if let Some(date) = parse_header_date(cell) {
                day_columns.push((col, date));
            }
        }
    }
    if date_like_columns == 0 {
        return Err(EngineError::LayoutNotFound);
    }
    debug!(header_row, date_columns = date_like_columns, "legacy layout");

    let mut records = Vec::new();
    for row in (header_row + 1)..grid.row_count() {
        let employee_id = grid.cell_str(row, 0);
        if employee_id.is_empty() {
            continue;
        }
        let employee_name = grid.cell_str(row, 1);
        let designation = grid.cell_str(row, 2);

        for &(col, date) in &day_columns {
            let token = grid.cell_str(row, col);
            if token.is_empty() {
                continue;
            }
            let (status, in_time, out_time) = parse_day_token(&token);
            let hours = if !in_time.is_empty() && !out_time.is_empty() {
                worked_hours(&in_time, &out_time)
            } else {
                0.0
            };

            records.push(AttendanceRecord {
                employee_id: employee_id.clone(),
                employee_name: employee_name.clone(),
                designation: designation.clone(),
                date_label: date.format("%Y-%m-%d").to_string(),
                weekday: date.format("%A").to_string(),
                in_time,
                out_time,
                status,
                worked_hours: hours,
            });
        }
    }

    if records.is_empty() {
        return Err(EngineError::NoDataExtracted);
    }
    Ok(records)
}

/// The period metadata string, with any leading "Period:" prefix stripped
#[must_use]
pub fn period_string(grid: &Grid) -> Option<String> {
    let raw = grid.cell_str(PERIOD_CELL.0, PERIOD_CELL.1);
    if raw.is_empty() {
        return None;
    }
    static PERIOD_PREFIX: LazyLock<Regex> =
        LazyLock::new(|| Regex::new(r"(?i)^\s*period\s*:?,?\s*").unwrap());
    let stripped = PERIOD_PREFIX.replace(&raw, "").trim().to_string();
    if stripped.is_empty() {
        None
    } else {
        Some(stripped)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn legacy_grid() -> Grid {
        let mut rows: Vec<Vec<CellValue>> = (0..8).map(|_| vec![CellValue::Null]).collect();
        rows.push(vec![CellValue::from("Period: 2082/03/01 - 2082/03/03")]);
        rows.push(vec![CellValue::Null]);
        rows.push(vec![
            CellValue::from("Emp ID"),
            CellValue::from("Name"),
            CellValue::from("Designation"),
            CellValue::Null,
            CellValue::Null,
            CellValue::from("01/07/2025"),
            CellValue::from("02/07/2025"),
            CellValue::from("03/07/2025"),
        ]);
        rows.push(vec![
            CellValue::from("101"),
            CellValue::from("Asha"),
            CellValue::from("Clerk"),
            CellValue::Null,
            CellValue::Null,
            CellValue::from("P 09:00 18:00"),
            CellValue::from("A"),
            CellValue::from("P 22:00 06:00"),
        ]);
        Grid::from_rows(rows)
    }

    #[test]
    fn test_looks_like_legacy() {
        assert!(looks_like_legacy(&legacy_grid()));
        assert!(!looks_like_legacy(&Grid::new()));
    }

    #[test]
    fn test_extract_composite_tokens() {
        let records = extract(&legacy_grid()).unwrap();
        assert_eq!(records.len(), 3);

        assert_eq!(records[0].status, "Present");
        assert_eq!(records[0].in_time, "09:00");
        assert_eq!(records[0].out_time, "18:00");
        assert_eq!(records[0].worked_hours, 9.0);
        assert_eq!(records[0].date_label, "2025-07-01");
        assert_eq!(records[0].weekday, "Tuesday");

        assert_eq!(records[1].status, "Absent");
        assert_eq!(records[1].in_time, "");
    }

    #[test]
    fn test_overnight_wraparound() {
        let records = extract(&legacy_grid()).unwrap();
        // 22:00 -> 06:00 spans midnight.
        assert_eq!(records[2].worked_hours, 8.0);
    }

    #[test]
    fn test_single_time_is_in_only() {
        let (status, in_time, out_time) = parse_day_token("P 09:12");
        assert_eq!(status, "Present");
        assert_eq!(in_time, "09:12");
        assert_eq!(out_time, "");
    }

    #[test]
    fn test_holiday_and_leave_tokens() {
        assert_eq!(parse_day_token("L").0, "Leave");
        assert_eq!(parse_day_token("H").0, "Holiday");
    }

    #[test]
    fn test_no_date_columns_is_layout_not_found() {
        let rows: Vec<Vec<CellValue>> = (0..12).map(|_| vec![CellValue::from("x")]).collect();
        assert!(matches!(
            extract(&Grid::from_rows(rows)),
            Err(EngineError::LayoutNotFound)
        ));
    }

    #[test]
    fn test_period_string_strips_prefix() {
        assert_eq!(
            period_string(&legacy_grid()).as_deref(),
            Some("2082/03/01 - 2082/03/03")
        );
        assert_eq!(period_string(&Grid::new()), None);
    }

    #[test]
    fn test_excel_serial_headers() {
        // 45474 == 2024-07-01
        let date = excel_serial_to_date(45474.0).unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2024, 7, 1).unwrap());
    }
}
