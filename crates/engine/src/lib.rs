//! Attendance extraction engine for rollcall
//!
//! Turns loosely structured biometric attendance exports into a flat
//! sequence of per-employee-per-day facts, then into per-employee monthly
//! summaries. Three extraction strategies are supported:
//!
//! - **matrix** — one header row with day columns like `"1 Mon"`, each
//!   employee spread over four labelled sub-rows (In Time, Out Time,
//!   Status, Worked Hours);
//! - **legacy** — one row per employee, one composite token per day
//!   (`"P 09:00 18:00"`);
//! - **generic** — a plain wide table with named columns.
//!
//! [`pipeline::extract_records`] tries them in that order and keeps the
//! first success.

pub mod generic;
pub mod layout;
pub mod legacy;
pub mod matrix;
pub mod pipeline;
pub mod staff;
pub mod status;
pub mod summary;

mod error;
mod record;

pub use error::{EngineError, Result};
pub use layout::{DayColumn, ParsedLayout};
pub use pipeline::{extract_from_path, extract_records, ProgressFn, Strategy};
pub use record::AttendanceRecord;
pub use staff::{EmploymentType, InMemoryStaffDirectory, StaffDirectory, StaffEntry};
pub use status::Category;
pub use summary::{summarize, CategoryCounts, EmployeeSummary};
