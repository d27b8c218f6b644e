//! Matrix-strategy extraction
//!
//! A matrix file expresses one employee as an implicit group of four
//! labelled sub-rows (In Time, Out Time, Status, Worked Hours) with no
//! grouping key: identity cells appear only on the first row of a block.
//! The extractor is a small state machine: identity values carry forward
//! until replaced, and the Worked Hours row (or the start of the next
//! block, or the end of the grid) flushes the accumulated block.

use crate::error::{EngineError, Result};
use crate::layout::ParsedLayout;
use crate::record::AttendanceRecord;
use rollcall_grid::Grid;
use tracing::debug;

/// Accumulator for one employee block between flushes
#[derive(Debug, Default)]
struct PendingBlock {
    employee_id: String,
    employee_name: String,
    designation: String,
    in_times: Option<Vec<String>>,
    out_times: Option<Vec<String>>,
    statuses: Option<Vec<String>>,
    hours: Option<Vec<String>>,
}

impl PendingBlock {
    fn is_empty(&self) -> bool {
        self.in_times.is_none()
            && self.out_times.is_none()
            && self.statuses.is_none()
            && self.hours.is_none()
    }

    fn day_value(slot: Option<&Vec<String>>, day: usize) -> String {
        slot.and_then(|v| v.get(day)).cloned().unwrap_or_default()
    }

    /// Emit one record per day column holding any data, then reset
    fn flush(&mut self, layout: &ParsedLayout, out: &mut Vec<AttendanceRecord>) {
        if self.is_empty() {
            return;
        }
        for (day, column) in layout.day_columns.iter().enumerate() {
            let in_time = Self::day_value(self.in_times.as_ref(), day);
            let out_time = Self::day_value(self.out_times.as_ref(), day);
            let status = Self::day_value(self.statuses.as_ref(), day);
            let hours = Self::day_value(self.hours.as_ref(), day);

            if in_time.is_empty() && out_time.is_empty() && status.is_empty() && hours.is_empty() {
                continue;
            }

            out.push(AttendanceRecord {
                employee_id: self.employee_id.clone(),
                employee_name: self.employee_name.clone(),
                designation: self.designation.clone(),
                date_label: column.label.clone(),
                weekday: column.weekday.clone(),
                in_time,
                out_time,
                status,
                worked_hours: hours.trim().parse().unwrap_or(0.0),
            });
        }
        self.in_times = None;
        self.out_times = None;
        self.statuses = None;
        self.hours = None;
    }
}

fn day_values(grid: &Grid, row: usize, layout: &ParsedLayout) -> Vec<String> {
    layout
        .day_columns
        .iter()
        .map(|d| grid.cell_str(row, d.column))
        .collect()
}

/// Extract attendance records from a matrix-format grid
///
/// # Errors
///
/// Returns [`EngineError::NoDataExtracted`] when no day cell below the
/// header carries data.
pub fn extract(grid: &Grid, layout: &ParsedLayout) -> Result<Vec<AttendanceRecord>> {
    let mut records = Vec::new();
    let mut block = PendingBlock::default();

    for row in (layout.header_row + 1)..grid.row_count() {
        let id = grid.cell_str(row, layout.id_column);
        let name = grid.cell_str(row, layout.name_column);
        let designation = grid.cell_str(row, layout.designation_column);

        let label = grid.cell_str(row, layout.row_label_column).to_lowercase();

        // A new In Time row opens a new block: whatever is pending belongs
        // to the previous employee and must flush before the identity
        // carry-forward below overwrites it.
        if label.starts_with("intime") || label == "in time" {
            block.flush(layout, &mut records);
        }

        if !id.is_empty() {
            block.employee_id = id;
        }
        if !name.is_empty() {
            block.employee_name = name;
        }
        if !designation.is_empty() {
            block.designation = designation;
        }

        if label.starts_with("intime") || label == "in time" {
            block.in_times = Some(day_values(grid, row, layout));
        } else if label.starts_with("out") {
            block.out_times = Some(day_values(grid, row, layout));
        } else if label.contains("status") {
            block.statuses = Some(
                day_values(grid, row, layout)
                    .into_iter()
                    .map(|s| s.to_uppercase())
                    .collect(),
            );
        } else if label.contains("work") {
            block.hours = Some(day_values(grid, row, layout));
            // Worked Hours is the terminal row of a block.
            block.flush(layout, &mut records);
        }
    }

    // Files missing a trailing Worked Hours row still flush at the end.
    block.flush(layout, &mut records);

    if records.is_empty() {
        return Err(EngineError::NoDataExtracted);
    }
    debug!(records = records.len(), "matrix extraction complete");
    Ok(records)
}
