use thiserror::Error;

/// Errors produced while detecting layouts and extracting records
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Could not locate a header row with day columns like '1 Mon'")]
    LayoutNotFound,

    #[error("Layout detected but extraction produced 0 records; verify the header row and day columns")]
    NoDataExtracted,

    #[error("Missing required columns: {}", .0.join(", "))]
    MissingColumns(Vec<String>),

    #[error(transparent)]
    Grid(#[from] rollcall_grid::GridError),

    #[error("Could not read staff directory: {0}")]
    StaffDirectory(#[from] csv::Error),
}

pub type Result<T> = std::result::Result<T, EngineError>;
