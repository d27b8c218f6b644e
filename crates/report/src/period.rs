//! Reporting-period helpers
//!
//! The period string is free text lifted from the source file, usually
//! `"2082/03/01 - 2082/03/31"`. When both endpoints carry a day component
//! the span is arithmetic; otherwise the distinct dates in the record set
//! stand in for it.

use rollcall_engine::AttendanceRecord;
use std::collections::HashSet;

/// Fallback shown when the source file carries no period cell
pub const UNKNOWN_PERIOD: &str = "Unknown";

/// Day component (third `/`-separated field) of one period endpoint
fn day_component(date: &str) -> Option<i64> {
    date.trim().split('/').nth(2)?.trim().parse().ok()
}

fn day_span(period: &str) -> Option<i64> {
    let (start, end) = period.split_once(" - ")?;
    Some(day_component(end)? - day_component(start)? + 1)
}

/// Number of days covered by the report
///
/// Computed from the period endpoints when they parse as `Y/M/D`,
/// otherwise the number of distinct date labels in the records.
#[must_use]
pub fn total_days(period: &str, records: &[AttendanceRecord]) -> i64 {
    if let Some(days) = day_span(period) {
        return days;
    }
    let distinct: HashSet<&str> = records
        .iter()
        .map(|record| record.date_label.as_str())
        .collect();
    distinct.len() as i64
}

/// Distinct date labels in sorted order; the day-column axis of a report
#[must_use]
pub fn unique_dates(records: &[AttendanceRecord]) -> Vec<String> {
    let mut dates: Vec<String> = records
        .iter()
        .map(|record| record.date_label.clone())
        .collect::<HashSet<_>>()
        .into_iter()
        .collect();
    dates.sort();
    dates
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: &str, date: &str) -> AttendanceRecord {
        AttendanceRecord {
            employee_id: id.to_string(),
            employee_name: String::new(),
            designation: String::new(),
            date_label: date.to_string(),
            weekday: String::new(),
            in_time: String::new(),
            out_time: String::new(),
            status: "P".to_string(),
            worked_hours: 0.0,
        }
    }

    #[test]
    fn test_total_days_from_period_endpoints() {
        assert_eq!(total_days("2082/03/01 - 2082/03/31", &[]), 31);
        assert_eq!(total_days("2082/3/5 - 2082/3/7", &[]), 3);
    }

    #[test]
    fn test_total_days_falls_back_to_distinct_dates() {
        let records = vec![
            record("1", "01 Mon"),
            record("2", "01 Mon"),
            record("1", "02 Tue"),
        ];
        assert_eq!(total_days("July 2082", &records), 2);
        assert_eq!(total_days(UNKNOWN_PERIOD, &records), 2);
    }

    #[test]
    fn test_unique_dates_sorted() {
        let records = vec![
            record("1", "02 Tue"),
            record("1", "01 Mon"),
            record("2", "02 Tue"),
        ];
        assert_eq!(unique_dates(&records), vec!["01 Mon", "02 Tue"]);
    }
}
