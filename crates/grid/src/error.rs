use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading or addressing a grid
#[derive(Error, Debug)]
pub enum GridError {
    #[error("Could not read spreadsheet {path}: {reason}")]
    Unreadable { path: PathBuf, reason: String },

    #[error("Spreadsheet {path} contains no worksheets")]
    NoWorksheet { path: PathBuf },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, GridError>;
