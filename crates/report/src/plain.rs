//! Plain tabular workbook
//!
//! One row per attendance record, one column per record field. This is
//! the "processed data" download: no grouping, no aggregation, just the
//! normalized facts with a readable theme.

use crate::error::Result;
use crate::style;
use rollcall_engine::AttendanceRecord;
use rust_xlsxwriter::{Format, FormatAlign, Workbook};
use std::path::Path;
use tracing::info;

const SHEET_NAME: &str = "Processed Data";

const HEADERS: [&str; 9] = [
    "Employee_ID",
    "Employee_Name",
    "Designation",
    "Date",
    "Day_Name",
    "InTime",
    "OutTime",
    "Status",
    "WorkedHours",
];

/// Render the records as a new workbook, returned as xlsx bytes
pub fn workbook_bytes(records: &[AttendanceRecord]) -> Result<Vec<u8>> {
    let mut workbook = build(records)?;
    Ok(workbook.save_to_buffer()?)
}

/// Render the records as a new workbook at `path`
pub fn write_workbook<P: AsRef<Path>>(records: &[AttendanceRecord], path: P) -> Result<()> {
    let mut workbook = build(records)?;
    workbook.save(path.as_ref())?;
    info!(records = records.len(), path = %path.as_ref().display(), "wrote plain workbook");
    Ok(())
}

fn build(records: &[AttendanceRecord]) -> Result<Workbook> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(SHEET_NAME)?;

    let header_format = Format::new()
        .set_bold()
        .set_font_color(style::WHITE)
        .set_background_color(style::HEADER_BLUE)
        .set_align(FormatAlign::Center);
    for (col, header) in HEADERS.iter().enumerate() {
        worksheet.write_string_with_format(0, col as u16, *header, &header_format)?;
    }

    let even_format = Format::new().set_background_color(style::LIGHT_BLUE);
    let odd_format = Format::new().set_background_color(style::LIGHT_RED);

    for (i, record) in records.iter().enumerate() {
        let row = (i + 1) as u32;
        let format = if i % 2 == 0 { &even_format } else { &odd_format };
        let text_cells = [
            record.employee_id.as_str(),
            record.employee_name.as_str(),
            record.designation.as_str(),
            record.date_label.as_str(),
            record.weekday.as_str(),
            record.in_time.as_str(),
            record.out_time.as_str(),
            record.status.as_str(),
        ];
        for (col, value) in text_cells.iter().enumerate() {
            worksheet.write_string_with_format(row, col as u16, *value, format)?;
        }
        worksheet.write_number_with_format(row, 8, record.worked_hours, format)?;
    }

    Ok(workbook)
}
