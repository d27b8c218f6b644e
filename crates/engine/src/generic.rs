//! Generic-strategy extraction
//!
//! Last-resort path for plain wide tables: the first row must name the
//! expected columns exactly, one data row per employee-day. Status is
//! derived from worked hours alone since these files carry no status
//! tokens.

use crate::error::{EngineError, Result};
use crate::record::AttendanceRecord;
use chrono::{Duration, NaiveDate, NaiveTime};
use rollcall_grid::{CellValue, Grid};
use tracing::debug;

const REQUIRED_COLUMNS: [&str; 6] = [
    "Employee ID",
    "Employee Name",
    "Designation",
    "Date",
    "In Time",
    "Out Time",
];

/// Hours at or above which a day counts as Present
const FULL_DAY_HOURS: f64 = 8.0;
/// Hours at or above which a day counts as Half Day
const HALF_DAY_HOURS: f64 = 4.0;

fn parse_date(value: &CellValue) -> Option<NaiveDate> {
    match value {
        CellValue::String(s) => {
            let text = s.trim();
            for fmt in ["%Y-%m-%d", "%d/%m/%Y", "%d-%m-%Y", "%m/%d/%Y"] {
                if let Ok(date) = NaiveDate::parse_from_str(text, fmt) {
                    return Some(date);
                }
            }
            None
        }
        CellValue::Int(i) => serial_date(*i as f64),
        CellValue::Float(f) => serial_date(*f),
        _ => None,
    }
}

fn serial_date(serial: f64) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(1899, 12, 30).map(|epoch| epoch + Duration::days(serial as i64))
}

/// Normalize a time cell to `HH:MM`
///
/// Handles both text times and Excel day-fraction floats (0.375 -> 09:00).
fn parse_time(value: &CellValue) -> Option<NaiveTime> {
    match value {
        CellValue::String(s) => {
            let text = s.trim();
            NaiveTime::parse_from_str(text, "%H:%M")
                .or_else(|_| NaiveTime::parse_from_str(text, "%H:%M:%S"))
                .ok()
        }
        CellValue::Float(f) => {
            let fraction = f.fract();
            let seconds = (fraction * 86_400.0).round() as u32;
            NaiveTime::from_num_seconds_from_midnight_opt(seconds, 0)
        }
        _ => None,
    }
}

fn status_for_hours(hours: f64) -> &'static str {
    if hours >= FULL_DAY_HOURS {
        "Present"
    } else if hours >= HALF_DAY_HOURS {
        "Half Day"
    } else {
        "Absent"
    }
}

/// Extract attendance records from a generic wide-format grid
///
/// # Errors
///
/// Returns [`EngineError::MissingColumns`] when the first row lacks any of
/// the required headers, and [`EngineError::NoDataExtracted`] when no data
/// row yields a record.
pub fn extract(grid: &Grid) -> Result<Vec<AttendanceRecord>> {
    let Some(header) = grid.row(0) else {
        return Err(EngineError::MissingColumns(
            REQUIRED_COLUMNS.iter().map(ToString::to_string).collect(),
        ));
    };

    let find = |label: &str| header.iter().position(|c| c.as_str() == label);
    let missing: Vec<String> = REQUIRED_COLUMNS
        .iter()
        .filter(|label| find(label).is_none())
        .map(ToString::to_string)
        .collect();
    if !missing.is_empty() {
        return Err(EngineError::MissingColumns(missing));
    }

    let id_col = find("Employee ID").unwrap_or(0);
    let name_col = find("Employee Name").unwrap_or(1);
    let designation_col = find("Designation").unwrap_or(2);
    let date_col = find("Date").unwrap_or(3);
    let in_col = find("In Time").unwrap_or(4);
    let out_col = find("Out Time").unwrap_or(5);

    let mut records = Vec::new();
    for row in 1..grid.row_count() {
        let employee_id = grid.cell_str(row, id_col);
        if employee_id.is_empty() {
            continue;
        }
        let Some(date) = grid.cell(row, date_col).and_then(parse_date) else {
            continue;
        };

        let in_time = grid.cell(row, in_col).and_then(parse_time);
        let out_time = grid.cell(row, out_col).and_then(parse_time);

        let hours = match (in_time, out_time) {
            (Some(start), Some(end)) => {
                let raw = (end - start).num_minutes() as f64 / 60.0;
                (raw * 100.0).round() / 100.0
            }
            _ => 0.0,
        };

        records.push(AttendanceRecord {
            employee_id,
            employee_name: grid.cell_str(row, name_col),
            designation: grid.cell_str(row, designation_col),
            date_label: date.format("%Y-%m-%d").to_string(),
            weekday: date.format("%A").to_string(),
            in_time: in_time.map(|t| t.format("%H:%M").to_string()).unwrap_or_default(),
            out_time: out_time.map(|t| t.format("%H:%M").to_string()).unwrap_or_default(),
            status: status_for_hours(hours).to_string(),
            worked_hours: hours,
        });
    }

    if records.is_empty() {
        return Err(EngineError::NoDataExtracted);
    }
    debug!(records = records.len(), "generic extraction complete");
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cells(values: &[&str]) -> Vec<CellValue> {
        values.iter().map(|v| CellValue::from(*v)).collect()
    }

    fn generic_grid() -> Grid {
        Grid::from_rows(vec![
            cells(&[
                "Employee ID",
                "Employee Name",
                "Designation",
                "Date",
                "In Time",
                "Out Time",
            ]),
            cells(&["101", "Asha", "Clerk", "2025-07-01", "09:00", "17:30"]),
            cells(&["102", "Bimal", "Guard", "2025-07-01", "09:00", "13:30"]),
            cells(&["103", "Chitra", "Peon", "2025-07-01", "09:00", "10:00"]),
        ])
    }

    #[test]
    fn test_threshold_statuses() {
        let records = extract(&generic_grid()).unwrap();
        assert_eq!(records[0].status, "Present");
        assert_eq!(records[0].worked_hours, 8.5);
        assert_eq!(records[1].status, "Half Day");
        assert_eq!(records[1].worked_hours, 4.5);
        assert_eq!(records[2].status, "Absent");
    }

    #[test]
    fn test_missing_columns_reported() {
        let grid = Grid::from_rows(vec![cells(&["Employee ID", "Date"])]);
        let err = extract(&grid).unwrap_err();
        match err {
            EngineError::MissingColumns(cols) => {
                assert!(cols.contains(&"Employee Name".to_string()));
                assert!(cols.contains(&"Out Time".to_string()));
                assert!(!cols.contains(&"Date".to_string()));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_day_fraction_times() {
        let grid = Grid::from_rows(vec![
            cells(&[
                "Employee ID",
                "Employee Name",
                "Designation",
                "Date",
                "In Time",
                "Out Time",
            ]),
            vec![
                CellValue::from("101"),
                CellValue::from("Asha"),
                CellValue::from("Clerk"),
                CellValue::from("2025-07-01"),
                CellValue::Float(0.375), // 09:00
                CellValue::Float(0.75),  // 18:00
            ],
        ]);
        let records = extract(&grid).unwrap();
        assert_eq!(records[0].in_time, "09:00");
        assert_eq!(records[0].out_time, "18:00");
        assert_eq!(records[0].worked_hours, 9.0);
    }

    #[test]
    fn test_rows_without_dates_skipped() {
        let mut grid_rows = vec![cells(&[
            "Employee ID",
            "Employee Name",
            "Designation",
            "Date",
            "In Time",
            "Out Time",
        ])];
        grid_rows.push(cells(&["101", "Asha", "Clerk", "not a date", "09:00", "17:00"]));
        assert!(matches!(
            extract(&Grid::from_rows(grid_rows)),
            Err(EngineError::NoDataExtracted)
        ));
    }
}
