use serde::{Deserialize, Serialize};

/// One attendance fact: one employee, one day
///
/// Records are created by an extraction strategy and consumed read-only by
/// the aggregator and the renderers. `date_label` keeps the source form:
/// a zero-padded `"DD Weekday"` token for matrix files, an ISO date for
/// the legacy and generic layouts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttendanceRecord {
    pub employee_id: String,
    pub employee_name: String,
    pub designation: String,
    pub date_label: String,
    pub weekday: String,
    /// `HH:MM`, or empty when the terminal recorded nothing
    pub in_time: String,
    /// `HH:MM`, or empty when the terminal recorded nothing
    pub out_time: String,
    /// Raw status token (matrix) or canonical word (legacy/generic)
    pub status: String,
    /// 0.0 when unknown
    pub worked_hours: f64,
}

impl AttendanceRecord {
    /// Leading 1-2 digit day number of the date label, or the whole label
    ///
    /// `"05 Mon"` -> `"05"`, `"2082-03-05"` -> `"20"` is avoided by taking
    /// at most two leading digits only when they are followed by a
    /// non-digit or the end of the label.
    #[must_use]
    pub fn day_number(&self) -> String {
        let label = self.date_label.trim();
        let digits: String = label.chars().take_while(char::is_ascii_digit).collect();
        if (1..=2).contains(&digits.len()) {
            digits
        } else {
            label.to_string()
        }
    }

    /// True when either an in or an out time was recorded
    #[must_use]
    pub fn has_clock_time(&self) -> bool {
        !self.in_time.trim().is_empty() || !self.out_time.trim().is_empty()
    }
}
