//! Strategy dispatch
//!
//! One dispatcher tries the extraction strategies in a fixed order and
//! keeps the first success. The matrix format is the primary supported
//! input; legacy and generic are best-effort compatibility paths. Output
//! is never a blend of two strategies.

use crate::error::Result;
use crate::record::AttendanceRecord;
use crate::{generic, layout, legacy, matrix};
use rollcall_grid::Grid;
use std::fmt;
use std::path::Path;
use tracing::{debug, info};

/// Optional caller-side progress hook: `(percent, message)`
///
/// Invoked synchronously at fixed milestones with non-decreasing percents.
/// Purely informational; carries no backpressure or cancellation.
pub type ProgressFn<'a> = &'a dyn Fn(u8, &str);

/// Which extraction strategy produced the records
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    Matrix,
    Legacy,
    Generic,
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Strategy::Matrix => write!(f, "matrix"),
            Strategy::Legacy => write!(f, "legacy"),
            Strategy::Generic => write!(f, "generic"),
        }
    }
}

fn report(progress: Option<ProgressFn>, percent: u8, message: &str) {
    if let Some(hook) = progress {
        hook(percent, message);
    }
}

/// Extract attendance records from a grid, trying matrix, then legacy
/// (when the grid sniffs as a legacy export), then generic
///
/// # Errors
///
/// Propagates the last attempted strategy's error when every strategy
/// fails; earlier failures are logged and swallowed.
pub fn extract_records(
    grid: &Grid,
    progress: Option<ProgressFn>,
) -> Result<(Vec<AttendanceRecord>, Strategy)> {
    report(progress, 40, "Processing attendance data...");

    let matrix_result = layout::detect(grid).and_then(|parsed| {
        report(progress, 50, "Layout detected, extracting records...");
        matrix::extract(grid, &parsed)
    });
    match matrix_result {
        Ok(records) => {
            report(progress, 70, "Extraction complete");
            info!(records = records.len(), "matrix strategy succeeded");
            return Ok((records, Strategy::Matrix));
        }
        Err(err) => debug!(%err, "matrix strategy failed"),
    }

    if legacy::looks_like_legacy(grid) {
        match legacy::extract(grid) {
            Ok(records) => {
                report(progress, 70, "Extraction complete");
                info!(records = records.len(), "legacy strategy succeeded");
                return Ok((records, Strategy::Legacy));
            }
            Err(err) => debug!(%err, "legacy strategy failed"),
        }
    }

    // The last attempted strategy's error is the one that surfaces.
    let records = generic::extract(grid)?;
    report(progress, 70, "Extraction complete");
    info!(records = records.len(), "generic strategy succeeded");
    Ok((records, Strategy::Generic))
}

/// Load a spreadsheet and extract records from it
///
/// # Errors
///
/// Returns [`crate::EngineError::Grid`] when the file cannot be read, or
/// the dispatch error from [`extract_records`].
pub fn extract_from_path<P: AsRef<Path>>(
    path: P,
    progress: Option<ProgressFn>,
) -> Result<(Vec<AttendanceRecord>, Strategy)> {
    report(progress, 10, "Reading spreadsheet...");
    let grid = Grid::from_path(path)?;
    report(progress, 30, "Spreadsheet loaded");
    extract_records(&grid, progress)
}
