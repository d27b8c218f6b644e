//! Template-filling summary report
//!
//! Opens a fixed-layout workbook template and writes one row of
//! per-employee aggregates per staff entry. The template owns all the
//! styling; this writer only fills values. Writes aimed at a merged cell
//! land on the top-left anchor of the merge, matching how spreadsheet
//! applications treat merged ranges.

use crate::error::{ReportError, Result};
use crate::period::total_days;
use rollcall_engine::summary::{summarize, summary_for, EmployeeSummary};
use rollcall_engine::{AttendanceRecord, EmploymentType, StaffDirectory};
use std::collections::HashSet;
use std::path::Path;
use tracing::info;
use umya_spreadsheet::Worksheet;

const TEMPLATE_SHEET: &str = "Template Sheet";
const FIRST_STAFF_ROW: u32 = 4;

// 1-based template columns. K, O, P and Q are left to the template.
const COL_NAME: u32 = 2;
const COL_ID: u32 = 3;
const COL_DESIGNATION: u32 = 4;
const COL_LEVEL: u32 = 5;
const COL_PRESENT: u32 = 6;
const COL_PERSONAL_LEAVE: u32 = 7;
const COL_SICK_LEAVE: u32 = 8;
const COL_CASUAL_LEAVE: u32 = 9;
const COL_SUBSTITUTE_LEAVE: u32 = 10;
const COL_ABSENT: u32 = 12;
const COL_OTHER_LEAVE: u32 = 13;
const COL_ALLOWANCE: u32 = 14;
const COL_WEEKLY_OFF: u32 = 18;
const COL_REMARKS: u32 = 19;

const PERIOD_CELL: (u32, u32) = (5, 1); // E1
const TOTAL_DAYS_CELL: (u32, u32) = (6, 2); // F2

/// Which employment-type subset a template report covers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportKind {
    /// Permanent and contract staff
    Detailed,
    /// Monthly-wages staff only
    MonthlyWages,
}

impl ReportKind {
    fn employment_types(self) -> &'static [EmploymentType] {
        match self {
            ReportKind::Detailed => &[EmploymentType::Permanent, EmploymentType::Contract],
            ReportKind::MonthlyWages => &[EmploymentType::MonthlyWages],
        }
    }
}

/// Fill the template at `template_path` with per-employee aggregates and
/// save the result to `output_path`
///
/// # Errors
///
/// Returns [`ReportError::TemplateNotFound`] when the template file does
/// not exist and [`ReportError::TemplateSheetMissing`] when it has no
/// "Template Sheet" worksheet.
pub fn fill_template<P: AsRef<Path>, Q: AsRef<Path>>(
    template_path: P,
    output_path: Q,
    records: &[AttendanceRecord],
    directory: &dyn StaffDirectory,
    period: &str,
    department: Option<&str>,
    kind: ReportKind,
) -> Result<()> {
    let template_path = template_path.as_ref();
    if !template_path.exists() {
        return Err(ReportError::TemplateNotFound {
            path: template_path.to_path_buf(),
        });
    }

    let mut book = umya_spreadsheet::reader::xlsx::read(template_path)
        .map_err(|err| ReportError::Render(err.to_string()))?;
    let worksheet = book.get_sheet_by_name_mut(TEMPLATE_SHEET).ok_or_else(|| {
        ReportError::TemplateSheetMissing {
            name: TEMPLATE_SHEET.to_string(),
        }
    })?;
    let merges = merged_ranges(worksheet);

    set_text(
        worksheet,
        &merges,
        PERIOD_CELL,
        &format!("Period: {period}"),
    );
    set_number(worksheet, &merges, TOTAL_DAYS_CELL, total_days(period, records) as f64);

    let ids: HashSet<String> = records
        .iter()
        .map(|r| r.employee_id.trim().to_string())
        .filter(|id| !id.is_empty())
        .collect();
    let staff = directory.lookup(&ids, kind.employment_types(), department);
    let summaries = summarize(records);
    let empty = EmployeeSummary::default();

    for (i, entry) in staff.iter().enumerate() {
        let row = FIRST_STAFF_ROW + i as u32;
        let summary = summary_for(&summaries, &entry.staff_id).unwrap_or(&empty);
        let counts = &summary.counts;

        set_text(worksheet, &merges, (COL_NAME, row), &title_case(&entry.name));
        set_text(worksheet, &merges, (COL_ID, row), &entry.staff_id);
        set_text(worksheet, &merges, (COL_DESIGNATION, row), &entry.designation);
        set_text(worksheet, &merges, (COL_LEVEL, row), &entry.level);
        set_number(worksheet, &merges, (COL_PRESENT, row), f64::from(counts.present));
        set_number(worksheet, &merges, (COL_PERSONAL_LEAVE, row), f64::from(counts.personal_leave));
        set_number(worksheet, &merges, (COL_SICK_LEAVE, row), f64::from(counts.sick_leave));
        set_number(worksheet, &merges, (COL_CASUAL_LEAVE, row), f64::from(counts.casual_leave));
        set_number(worksheet, &merges, (COL_SUBSTITUTE_LEAVE, row), f64::from(counts.substitute_leave));
        set_number(worksheet, &merges, (COL_ABSENT, row), f64::from(counts.absent));
        set_number(worksheet, &merges, (COL_OTHER_LEAVE, row), f64::from(counts.other_leave));
        set_number(worksheet, &merges, (COL_ALLOWANCE, row), f64::from(counts.allowance));
        set_text(worksheet, &merges, (COL_WEEKLY_OFF, row), &title_case(&entry.weekly_off));
        set_text(worksheet, &merges, (COL_REMARKS, row), &summary.remarks());
    }

    umya_spreadsheet::writer::xlsx::write(&book, output_path.as_ref())
        .map_err(|err| ReportError::Render(err.to_string()))?;
    info!(
        staff = staff.len(),
        kind = ?kind,
        path = %output_path.as_ref().display(),
        "filled template report"
    );
    Ok(())
}

/// Merged ranges as `(col1, row1, col2, row2)` in 1-based coordinates
fn merged_ranges(worksheet: &Worksheet) -> Vec<(u32, u32, u32, u32)> {
    worksheet
        .get_merge_cells()
        .iter()
        .filter_map(|range| parse_range(&range.get_range()))
        .collect()
}

/// Top-left anchor for a cell, unwinding merges
fn anchor(merges: &[(u32, u32, u32, u32)], cell: (u32, u32)) -> (u32, u32) {
    let (col, row) = cell;
    for &(c1, r1, c2, r2) in merges {
        if (c1..=c2).contains(&col) && (r1..=r2).contains(&row) {
            return (c1, r1);
        }
    }
    (col, row)
}

fn set_text(
    worksheet: &mut Worksheet,
    merges: &[(u32, u32, u32, u32)],
    cell: (u32, u32),
    value: &str,
) {
    let (col, row) = anchor(merges, cell);
    worksheet.get_cell_mut((col, row)).set_value(value);
}

fn set_number(
    worksheet: &mut Worksheet,
    merges: &[(u32, u32, u32, u32)],
    cell: (u32, u32),
    value: f64,
) {
    let (col, row) = anchor(merges, cell);
    worksheet.get_cell_mut((col, row)).set_value_number(value);
}

/// Parse `"A1"` or `"A1:C3"` into 1-based `(col1, row1, col2, row2)`
fn parse_range(range: &str) -> Option<(u32, u32, u32, u32)> {
    match range.split_once(':') {
        Some((start, end)) => {
            let (c1, r1) = parse_cell(start)?;
            let (c2, r2) = parse_cell(end)?;
            Some((c1, r1, c2, r2))
        }
        None => {
            let (col, row) = parse_cell(range)?;
            Some((col, row, col, row))
        }
    }
}

/// Parse an `A1`-style reference into 1-based `(col, row)`
fn parse_cell(cell: &str) -> Option<(u32, u32)> {
    let cell: String = cell.trim().chars().filter(|c| *c != '$').collect();
    let split = cell.find(|c: char| c.is_ascii_digit())?;
    let (letters, digits) = cell.split_at(split);

    let mut col: u32 = 0;
    for c in letters.chars() {
        if !c.is_ascii_alphabetic() {
            return None;
        }
        col = col * 26 + (c.to_ascii_uppercase() as u32 - 'A' as u32 + 1);
    }
    if col == 0 {
        return None;
    }
    let row: u32 = digits.parse().ok()?;
    Some((col, row))
}

/// First letter of each word uppercased, the rest lowercased
fn title_case(text: &str) -> String {
    text.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => {
                    first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase()
                }
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
