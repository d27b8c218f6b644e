//! Per-section attendance archive
//!
//! Groups the raw records by each employee's section and renders one
//! workbook per section, bundled into a single ZIP. The workbook is a
//! day matrix: one column per distinct date, one 4-row block per employee
//! (In Time / Out Time / Status / Worked Hours) with the identity cells
//! merged across the block.

use crate::error::Result;
use crate::period::unique_dates;
use crate::style;
use indexmap::IndexMap;
use rollcall_engine::staff::{numeric_id_key, StaffEntry};
use rollcall_engine::{AttendanceRecord, EmploymentType, StaffDirectory};
use rust_xlsxwriter::{Format, FormatAlign, FormatBorder, Workbook};
use std::collections::{HashMap, HashSet};
use std::io::Write as _;
use std::path::Path;
use tracing::{debug, info};

/// Section assigned to employees missing from the staff directory
const UNKNOWN_SECTION: &str = "Unknown Section";
/// Sort-last priority for employees missing from the staff directory
const UNKNOWN_PRIORITY: i64 = 999;

const TITLE_COLUMNS: u16 = 26;
const HEADER_ROW: u32 = 2;
const FIRST_BLOCK_ROW: u32 = 4;
const FIRST_DAY_COLUMN: u16 = 4;
const ROW_HEIGHT: f64 = 20.0;

const BLOCK_LABELS: [&str; 4] = ["In Time", "Out Time", "Status", "Worked Hours"];

struct SectionEmployee<'a> {
    id: &'a str,
    name: &'a str,
    designation: &'a str,
    priority: i64,
    employment_rank: u8,
    by_date: HashMap<&'a str, &'a AttendanceRecord>,
}

/// Render the per-section archive and return the ZIP bytes
pub fn archive_bytes(
    records: &[AttendanceRecord],
    directory: &dyn StaffDirectory,
    period: &str,
) -> Result<Vec<u8>> {
    let sections = group_by_section(records, directory);
    let dates = unique_dates(records);

    let mut zip = zip::ZipWriter::new(std::io::Cursor::new(Vec::new()));
    let options = zip::write::SimpleFileOptions::default()
        .compression_method(zip::CompressionMethod::Deflated);

    for (section, employees) in &sections {
        debug!(section, employees = employees.len(), "rendering section workbook");
        let bytes = section_workbook(section, employees, &dates, period)?;
        let filename = format!("{}_Attendance_Report.xlsx", sanitize_filename(section));
        zip.start_file(filename, options)?;
        zip.write_all(&bytes)?;
    }

    let cursor = zip.finish()?;
    info!(sections = sections.len(), "section archive rendered");
    Ok(cursor.into_inner())
}

/// Render the per-section archive to a file at `path`
pub fn write_archive<P: AsRef<Path>>(
    records: &[AttendanceRecord],
    directory: &dyn StaffDirectory,
    period: &str,
    path: P,
) -> Result<()> {
    let bytes = archive_bytes(records, directory, period)?;
    std::fs::write(path.as_ref(), bytes)?;
    Ok(())
}

/// Employees in first-seen order, bucketed by section, sorted within each
/// section by priority, employment type, then numeric id
fn group_by_section<'a>(
    records: &'a [AttendanceRecord],
    directory: &dyn StaffDirectory,
) -> IndexMap<String, Vec<SectionEmployee<'a>>> {
    let mut ids: Vec<&str> = Vec::new();
    let mut seen: HashSet<&str> = HashSet::new();
    for record in records {
        let id = record.employee_id.trim();
        if !id.is_empty() && seen.insert(id) {
            ids.push(id);
        }
    }

    let id_set: HashSet<String> = ids.iter().map(ToString::to_string).collect();
    let details: HashMap<String, StaffEntry> = directory
        .lookup(
            &id_set,
            &[EmploymentType::Permanent, EmploymentType::Contract],
            None,
        )
        .into_iter()
        .map(|entry| (entry.staff_id.clone(), entry))
        .collect();

    let mut sections: IndexMap<String, Vec<SectionEmployee<'a>>> = IndexMap::new();
    for id in ids {
        let employee_records: Vec<&AttendanceRecord> = records
            .iter()
            .filter(|r| r.employee_id.trim() == id)
            .collect();
        let first = employee_records[0];

        let (section, priority, rank) = match details.get(id) {
            Some(entry) => {
                let section = if entry.section.trim().is_empty() {
                    UNKNOWN_SECTION.to_string()
                } else {
                    entry.section.clone()
                };
                (section, entry.priority, entry.employment_type.rank())
            }
            None => (
                UNKNOWN_SECTION.to_string(),
                UNKNOWN_PRIORITY,
                EmploymentType::MonthlyWages.rank(),
            ),
        };

        let mut by_date: HashMap<&str, &AttendanceRecord> = HashMap::new();
        for record in &employee_records {
            by_date.insert(record.date_label.as_str(), record);
        }

        sections.entry(section).or_default().push(SectionEmployee {
            id,
            name: &first.employee_name,
            designation: &first.designation,
            priority,
            employment_rank: rank,
            by_date,
        });
    }

    for employees in sections.values_mut() {
        employees.sort_by_key(|e| (e.priority, e.employment_rank, numeric_id_key(e.id)));
    }
    sections
}

fn section_workbook(
    section: &str,
    employees: &[SectionEmployee],
    dates: &[String],
    period: &str,
) -> Result<Vec<u8>> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(sheet_name(section))?;

    let title_format = Format::new()
        .set_bold()
        .set_font_size(14)
        .set_font_color(style::WHITE)
        .set_background_color(style::HEADER_BLUE);
    worksheet.merge_range(
        0,
        0,
        0,
        TITLE_COLUMNS - 1,
        &format!("Attendance Record of {section} for the period {period}"),
        &title_format,
    )?;

    let header_format = Format::new()
        .set_bold()
        .set_font_color(style::WHITE)
        .set_background_color(style::HEADER_BLUE)
        .set_align(FormatAlign::Center)
        .set_border(FormatBorder::Thin);
    for (col, header) in ["Emp ID", "Emp Name", "Designation", "Time"]
        .iter()
        .enumerate()
    {
        worksheet.write_string_with_format(HEADER_ROW, col as u16, *header, &header_format)?;
    }
    for (i, date) in dates.iter().enumerate() {
        let col = FIRST_DAY_COLUMN + i as u16;
        let label = day_header(date, employees);
        worksheet.write_string_with_format(HEADER_ROW, col, &label, &header_format)?;
    }
    worksheet.set_row_height(HEADER_ROW, ROW_HEIGHT)?;

    let block_format = |fill| {
        Format::new()
            .set_background_color(fill)
            .set_border(FormatBorder::Thin)
            .set_align(FormatAlign::Center)
            .set_align(FormatAlign::VerticalCenter)
    };
    let label_format = |fill| block_format(fill).set_bold();

    for (ordinal, employee) in employees.iter().enumerate() {
        let top = FIRST_BLOCK_ROW + 4 * ordinal as u32;
        let fill = if ordinal % 2 == 0 {
            style::LIGHT_BLUE
        } else {
            style::LIGHT_RED
        };
        let data = block_format(fill);
        let label = label_format(fill);

        worksheet.merge_range(top, 0, top + 3, 0, employee.id, &data)?;
        worksheet.merge_range(top, 1, top + 3, 1, employee.name, &data)?;
        worksheet.merge_range(top, 2, top + 3, 2, employee.designation, &data)?;

        for (offset, text) in BLOCK_LABELS.iter().enumerate() {
            worksheet.write_string_with_format(top + offset as u32, 3, *text, &label)?;
        }

        for (i, date) in dates.iter().enumerate() {
            let col = FIRST_DAY_COLUMN + i as u16;
            match employee.by_date.get(date.as_str()) {
                Some(record) => {
                    worksheet.write_string_with_format(top, col, &record.in_time, &data)?;
                    worksheet.write_string_with_format(top + 1, col, &record.out_time, &data)?;
                    worksheet.write_string_with_format(top + 2, col, &record.status, &data)?;
                    worksheet.write_number_with_format(top + 3, col, record.worked_hours, &data)?;
                }
                None => {
                    for offset in 0..4 {
                        worksheet.write_blank(top + offset, col, &data)?;
                    }
                }
            }
        }

        for offset in 0..4 {
            worksheet.set_row_height(top + offset, ROW_HEIGHT)?;
        }
    }

    worksheet.set_column_width(0, 12)?;
    worksheet.set_column_width(1, 30)?;
    worksheet.set_column_width(2, 25)?;
    worksheet.set_column_width(3, 15)?;
    for i in 0..dates.len() {
        worksheet.set_column_width(FIRST_DAY_COLUMN + i as u16, 12)?;
    }

    Ok(workbook.save_to_buffer()?)
}

/// Header label for one day column: the day number from the date label
/// plus the weekday recorded on that date
fn day_header(date: &str, employees: &[SectionEmployee]) -> String {
    let recorded_weekday = employees
        .iter()
        .find_map(|e| e.by_date.get(date))
        .map(|r| r.weekday.as_str())
        .unwrap_or_default();

    static DAY_LABEL: std::sync::LazyLock<regex::Regex> = std::sync::LazyLock::new(|| {
        regex::Regex::new(r"^\s*(\d{1,2})\s+([A-Za-z]+)\s*$").unwrap()
    });

    let (number, weekday) = match DAY_LABEL.captures(date) {
        Some(caps) => {
            let weekday = if recorded_weekday.is_empty() {
                caps.get(2).map_or("", |m| m.as_str())
            } else {
                recorded_weekday
            };
            (caps[1].to_string(), weekday.to_string())
        }
        None => (date.to_string(), recorded_weekday.to_string()),
    };
    format!("{number} {weekday}").trim().to_string()
}

/// Worksheet names reject `[]:*?/\` and cap at 31 characters
fn sheet_name(section: &str) -> String {
    format!("{section}_Attendance")
        .chars()
        .map(|c| {
            if matches!(c, '[' | ']' | ':' | '*' | '?' | '/' | '\\') {
                '_'
            } else {
                c
            }
        })
        .take(31)
        .collect()
}

/// Archive entry names keep alphanumerics, spaces, hyphens and underscores
fn sanitize_filename(section: &str) -> String {
    section
        .chars()
        .filter(|c| c.is_alphanumeric() || matches!(c, ' ' | '-' | '_'))
        .collect::<String>()
        .trim_end()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rollcall_engine::InMemoryStaffDirectory;
    use std::io::Read as _;

    fn record(id: &str, name: &str, date: &str, status: &str) -> AttendanceRecord {
        AttendanceRecord {
            employee_id: id.to_string(),
            employee_name: name.to_string(),
            designation: "Clerk".to_string(),
            date_label: date.to_string(),
            weekday: "Mon".to_string(),
            in_time: "09:00".to_string(),
            out_time: "17:00".to_string(),
            status: status.to_string(),
            worked_hours: 8.0,
        }
    }

    fn staff(id: &str, section: &str, priority: i64) -> rollcall_engine::StaffEntry {
        rollcall_engine::StaffEntry {
            staff_id: id.to_string(),
            name: id.to_string(),
            designation: "Clerk".to_string(),
            section: section.to_string(),
            department: String::new(),
            level: String::new(),
            weekly_off: "saturday".to_string(),
            employment_type: EmploymentType::Permanent,
            priority,
        }
    }

    fn entry_names(bytes: &[u8]) -> Vec<String> {
        let mut archive = zip::ZipArchive::new(std::io::Cursor::new(bytes)).unwrap();
        (0..archive.len())
            .map(|i| archive.by_index(i).unwrap().name().to_string())
            .collect()
    }

    #[test]
    fn test_one_entry_per_section() {
        let records = vec![
            record("N-1", "Asha", "01 Mon", "P"),
            record("N-2", "Bimal", "01 Mon", "A"),
        ];
        let directory = InMemoryStaffDirectory::new(vec![
            staff("N-1", "Admin", 1),
            staff("N-2", "Security", 1),
        ]);
        let bytes = archive_bytes(&records, &directory, "2082/03/01 - 2082/03/31").unwrap();
        let names = entry_names(&bytes);
        assert_eq!(names.len(), 2);
        assert!(names.contains(&"Admin_Attendance_Report.xlsx".to_string()));
        assert!(names.contains(&"Security_Attendance_Report.xlsx".to_string()));
    }

    #[test]
    fn test_unknown_employee_lands_in_unknown_section() {
        let records = vec![record("GHOST", "Ghost", "01 Mon", "P")];
        let directory = InMemoryStaffDirectory::new(vec![]);
        let bytes = archive_bytes(&records, &directory, "Unknown").unwrap();
        assert_eq!(
            entry_names(&bytes),
            vec!["Unknown Section_Attendance_Report.xlsx".to_string()]
        );
    }

    #[test]
    fn test_entry_is_a_valid_workbook() {
        use calamine::Reader as _;

        let records = vec![record("N-1", "Asha", "01 Mon", "P")];
        let directory = InMemoryStaffDirectory::new(vec![staff("N-1", "Admin", 1)]);
        let bytes = archive_bytes(&records, &directory, "2082/03").unwrap();

        let mut archive = zip::ZipArchive::new(std::io::Cursor::new(bytes.as_slice())).unwrap();
        let mut entry = archive.by_index(0).unwrap();
        let mut workbook_bytes = Vec::new();
        entry.read_to_end(&mut workbook_bytes).unwrap();

        let workbook: calamine::Xlsx<_> =
            calamine::open_workbook_from_rs(std::io::Cursor::new(workbook_bytes)).unwrap();
        assert_eq!(workbook.sheet_names(), vec!["Admin_Attendance".to_string()]);
    }

    #[test]
    fn test_filename_sanitization() {
        assert_eq!(sanitize_filename("R&D / Labs"), "RD  Labs");
        assert_eq!(sanitize_filename("Admin"), "Admin");
    }

    #[test]
    fn test_sheet_name_capped_at_31_chars() {
        let name = sheet_name("A Very Long Section Name Indeed Yes");
        assert_eq!(name.chars().count(), 31);
        assert!(!name.contains('/'));
    }

    #[test]
    fn test_day_header_prefers_recorded_weekday() {
        let records = vec![record("N-1", "Asha", "05 Mon", "P")];
        let directory = InMemoryStaffDirectory::new(vec![staff("N-1", "Admin", 1)]);
        let sections = group_by_section(&records, &directory);
        let employees = sections.get("Admin").unwrap();
        assert_eq!(day_header("05 Mon", employees), "05 Mon");
        assert_eq!(day_header("2082-03-05", employees), "2082-03-05");
    }
}
