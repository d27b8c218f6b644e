//! Staff directory types and lookup
//!
//! The engine never queries storage itself; it consumes a narrow read-only
//! directory interface. Sorting lives here because every report orders its
//! rows the same way: priority first, then employment type, then the
//! numeric part of the staff id.

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

/// Sort key for staff ids with no digits; sorts after every real id
const NON_NUMERIC_ID_RANK: u64 = 999_999;

/// Employment type, ranked permanent < contract < monthly wages for sorting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmploymentType {
    Permanent,
    Contract,
    #[serde(alias = "monthly wages")]
    MonthlyWages,
}

impl EmploymentType {
    /// Report ordering rank
    #[must_use]
    pub fn rank(self) -> u8 {
        match self {
            EmploymentType::Permanent => 0,
            EmploymentType::Contract => 1,
            EmploymentType::MonthlyWages => 2,
        }
    }
}

/// One staff directory entry (external input, read-only to the engine)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StaffEntry {
    #[serde(rename = "staffid")]
    pub staff_id: String,
    pub name: String,
    #[serde(default)]
    pub designation: String,
    #[serde(default)]
    pub section: String,
    #[serde(default)]
    pub department: String,
    #[serde(default)]
    pub level: String,
    #[serde(default)]
    pub weekly_off: String,
    #[serde(rename = "type_of_employment")]
    pub employment_type: EmploymentType,
    #[serde(default = "default_priority")]
    pub priority: i64,
}

fn default_priority() -> i64 {
    1
}

/// Digits of a staff id concatenated and parsed, non-numeric ids last
#[must_use]
pub fn numeric_id_key(staff_id: &str) -> u64 {
    let digits: String = staff_id.chars().filter(char::is_ascii_digit).collect();
    digits.parse().unwrap_or(NON_NUMERIC_ID_RANK)
}

/// The canonical report row ordering
#[must_use]
pub fn sort_key(entry: &StaffEntry) -> (i64, u8, u64) {
    (
        entry.priority,
        entry.employment_type.rank(),
        numeric_id_key(&entry.staff_id),
    )
}

/// Read-only staff lookup supplied by the caller
pub trait StaffDirectory {
    /// Entries for the given ids, filtered by employment type and
    /// (optionally) department, in report order
    fn lookup(
        &self,
        ids: &HashSet<String>,
        employment_types: &[EmploymentType],
        department: Option<&str>,
    ) -> Vec<StaffEntry>;
}

/// In-memory directory, typically loaded from a CSV snapshot
#[derive(Debug, Clone, Default)]
pub struct InMemoryStaffDirectory {
    entries: Vec<StaffEntry>,
}

impl InMemoryStaffDirectory {
    #[must_use]
    pub fn new(entries: Vec<StaffEntry>) -> Self {
        InMemoryStaffDirectory { entries }
    }

    /// Load entries from a CSV file with a header row
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or a row fails to
    /// deserialize.
    pub fn from_csv_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut reader = csv::Reader::from_path(path.as_ref())?;
        let entries = reader
            .deserialize()
            .collect::<std::result::Result<Vec<StaffEntry>, csv::Error>>()?;
        Ok(InMemoryStaffDirectory { entries })
    }

    #[must_use]
    pub fn entries(&self) -> &[StaffEntry] {
        &self.entries
    }
}

impl StaffDirectory for InMemoryStaffDirectory {
    fn lookup(
        &self,
        ids: &HashSet<String>,
        employment_types: &[EmploymentType],
        department: Option<&str>,
    ) -> Vec<StaffEntry> {
        let mut matches: Vec<StaffEntry> = self
            .entries
            .iter()
            .filter(|e| ids.contains(&e.staff_id))
            .filter(|e| employment_types.contains(&e.employment_type))
            .filter(|e| department.is_none_or(|d| e.department == d))
            .cloned()
            .collect();
        matches.sort_by_key(sort_key);
        matches
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(id: &str, priority: i64, employment: EmploymentType) -> StaffEntry {
        StaffEntry {
            staff_id: id.to_string(),
            name: id.to_string(),
            designation: String::new(),
            section: "Admin".to_string(),
            department: String::new(),
            level: String::new(),
            weekly_off: "saturday".to_string(),
            employment_type: employment,
            priority,
        }
    }

    fn ids(values: &[&str]) -> HashSet<String> {
        values.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn test_sort_priority_then_type_then_numeric_id() {
        let directory = InMemoryStaffDirectory::new(vec![
            entry("A10", 1, EmploymentType::Contract),
            entry("B2", 1, EmploymentType::Permanent),
            entry("C5", 0, EmploymentType::Permanent),
        ]);
        let sorted = directory.lookup(
            &ids(&["A10", "B2", "C5"]),
            &[EmploymentType::Permanent, EmploymentType::Contract],
            None,
        );
        let order: Vec<&str> = sorted.iter().map(|e| e.staff_id.as_str()).collect();
        assert_eq!(order, vec!["C5", "B2", "A10"]);
    }

    #[test]
    fn test_non_numeric_ids_sort_last() {
        let directory = InMemoryStaffDirectory::new(vec![
            entry("XYZ", 1, EmploymentType::Permanent),
            entry("N-30", 1, EmploymentType::Permanent),
            entry("N-4", 1, EmploymentType::Permanent),
        ]);
        let sorted = directory.lookup(
            &ids(&["XYZ", "N-30", "N-4"]),
            &[EmploymentType::Permanent],
            None,
        );
        let order: Vec<&str> = sorted.iter().map(|e| e.staff_id.as_str()).collect();
        assert_eq!(order, vec!["N-4", "N-30", "XYZ"]);
    }

    #[test]
    fn test_employment_type_filter() {
        let directory = InMemoryStaffDirectory::new(vec![
            entry("1", 1, EmploymentType::Permanent),
            entry("2", 1, EmploymentType::MonthlyWages),
        ]);
        let wages = directory.lookup(&ids(&["1", "2"]), &[EmploymentType::MonthlyWages], None);
        assert_eq!(wages.len(), 1);
        assert_eq!(wages[0].staff_id, "2");
    }

    #[test]
    fn test_department_filter() {
        let mut in_dept = entry("1", 1, EmploymentType::Permanent);
        in_dept.department = "Finance".to_string();
        let out_dept = entry("2", 1, EmploymentType::Permanent);

        let directory = InMemoryStaffDirectory::new(vec![in_dept, out_dept]);
        let filtered = directory.lookup(
            &ids(&["1", "2"]),
            &[EmploymentType::Permanent],
            Some("Finance"),
        );
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].staff_id, "1");
    }

    #[test]
    fn test_csv_round_trip() {
        use std::io::Write as _;
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "staffid,name,designation,section,department,level,weekly_off,type_of_employment,priority"
        )
        .unwrap();
        writeln!(file, "N-7,Asha,Clerk,Admin,HQ,5,saturday,permanent,1").unwrap();
        writeln!(file, "N-8,Bimal,Guard,Security,HQ,,sunday,monthly wages,2").unwrap();

        let directory = InMemoryStaffDirectory::from_csv_path(file.path()).unwrap();
        assert_eq!(directory.entries().len(), 2);
        assert_eq!(
            directory.entries()[1].employment_type,
            EmploymentType::MonthlyWages
        );
    }
}
