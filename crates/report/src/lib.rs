//! Report renderers for rollcall
//!
//! Three independent renderers over the extracted attendance records:
//!
//! - [`plain`] — a flat "processed data" workbook, one row per record;
//! - [`section`] — a ZIP of per-section day-matrix workbooks;
//! - [`template`] — a fixed-layout template filled with per-employee
//!   aggregates.
//!
//! All three consume the engine's records and staff directory read-only.

pub mod period;
pub mod plain;
pub mod section;
pub mod template;

mod error;
mod style;

pub use error::{ReportError, Result};
pub use template::ReportKind;
