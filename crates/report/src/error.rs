use std::path::PathBuf;
use thiserror::Error;

/// Errors from the report renderers
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("template not found: {path}")]
    TemplateNotFound { path: PathBuf },

    #[error("template has no sheet named {name:?}")]
    TemplateSheetMissing { name: String },

    #[error("workbook rendering failed: {0}")]
    Render(String),

    #[error("archive error: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<rust_xlsxwriter::XlsxError> for ReportError {
    fn from(err: rust_xlsxwriter::XlsxError) -> Self {
        ReportError::Render(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ReportError>;
