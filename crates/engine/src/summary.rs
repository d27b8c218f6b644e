//! Per-employee aggregation
//!
//! Folds the flat record sequence into one summary per employee: counters
//! per category plus the date lists that feed the remarks column of the
//! template report.

use crate::record::AttendanceRecord;
use crate::status::{classify, Category};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Per-category day counters
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryCounts {
    pub present: u32,
    pub absent: u32,
    pub weekly_off: u32,
    pub allowance: u32,
    pub personal_leave: u32,
    pub sick_leave: u32,
    pub casual_leave: u32,
    pub substitute_leave: u32,
    pub duty_leave: u32,
    pub other_leave: u32,
}

/// Monthly summary for one employee, recomputed per report request
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EmployeeSummary {
    pub employee_id: String,
    pub name: String,
    pub designation: String,
    pub counts: CategoryCounts,
    pub personal_leave_dates: Vec<String>,
    pub casual_leave_dates: Vec<String>,
    pub sick_leave_dates: Vec<String>,
    pub substitute_leave_dates: Vec<String>,
    pub duty_leave_dates: Vec<String>,
    pub other_leave_dates: Vec<String>,
    pub absent_dates: Vec<String>,
}

impl EmployeeSummary {
    fn apply(&mut self, record: &AttendanceRecord) {
        let day = record.day_number();
        match classify(&record.status) {
            Category::Present => {
                self.counts.present += 1;
                self.counts.allowance += 1;
            }
            Category::Absent => {
                self.counts.absent += 1;
                self.absent_dates.push(day);
            }
            Category::WeeklyOff => {
                self.counts.present += 1;
                self.counts.weekly_off += 1;
                // Working on a weekly off earns the allowance.
                if record.has_clock_time() {
                    self.counts.allowance += 1;
                }
            }
            Category::PersonalLeave => {
                self.counts.personal_leave += 1;
                self.personal_leave_dates.push(day);
            }
            Category::SickLeave => {
                self.counts.sick_leave += 1;
                self.sick_leave_dates.push(day);
            }
            Category::CasualLeave => {
                self.counts.casual_leave += 1;
                self.casual_leave_dates.push(day);
            }
            Category::SubstituteLeave => {
                self.counts.substitute_leave += 1;
                self.substitute_leave_dates.push(day);
            }
            Category::DutyLeave => {
                // Duty leave is double-counted into the other-leave column
                // but its dates stay off the other-leave remark list.
                self.counts.duty_leave += 1;
                self.counts.other_leave += 1;
                self.duty_leave_dates.push(day);
            }
            Category::OtherLeave => {
                self.counts.other_leave += 1;
                self.other_leave_dates.push(day);
            }
        }
    }

    /// The free-text remarks column: one `"<CODE> on <days>"` fragment per
    /// non-empty leave category, then absences
    #[must_use]
    pub fn remarks(&self) -> String {
        let mut fragments: Vec<String> = Vec::new();
        let mut push = |code: &str, dates: &[String]| {
            if !dates.is_empty() {
                fragments.push(format!("{code} on {}", dates.join(", ")));
            }
        };
        push("PL", &self.personal_leave_dates);
        push("CL", &self.casual_leave_dates);
        push("SL", &self.sick_leave_dates);
        push("SUBSTITUTE", &self.substitute_leave_dates);
        push("DUTY", &self.duty_leave_dates);
        push("Other", &self.other_leave_dates);
        push("Absent", &self.absent_dates);
        fragments.join(", ")
    }
}

/// Group records by employee id (first-seen order) and aggregate
#[must_use]
pub fn summarize(records: &[AttendanceRecord]) -> Vec<EmployeeSummary> {
    let mut by_employee: IndexMap<String, EmployeeSummary> = IndexMap::new();

    for record in records {
        if record.employee_id.trim().is_empty() {
            continue;
        }
        let summary = by_employee
            .entry(record.employee_id.clone())
            .or_insert_with(|| EmployeeSummary {
                employee_id: record.employee_id.clone(),
                name: record.employee_name.clone(),
                designation: record.designation.clone(),
                ..EmployeeSummary::default()
            });
        summary.apply(record);
    }

    by_employee.into_values().collect()
}

/// Find the summary for one employee id
#[must_use]
pub fn summary_for<'a>(
    summaries: &'a [EmployeeSummary],
    employee_id: &str,
) -> Option<&'a EmployeeSummary> {
    summaries.iter().find(|s| s.employee_id == employee_id)
}
