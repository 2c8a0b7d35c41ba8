//! Load-time error type

use std::path::PathBuf;
use thiserror::Error;

/// Everything that can go wrong while turning a workbook into a [`crate::DataContext`].
///
/// Loading either yields all four tables or one of these; there is no partial result.
#[derive(Error, Debug)]
pub enum DataLoadError {
    #[error("workbook not found: {}", path.display())]
    FileNotFound { path: PathBuf },

    #[error("failed to open workbook {}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: calamine::Error,
    },

    #[error("sheet '{sheet}' not found in workbook")]
    MissingSheet { sheet: String },

    #[error("sheet '{sheet}' could not be read as a table: {reason}")]
    MalformedSheet { sheet: String, reason: String },

    #[error("sheet '{sheet}' is missing required column '{column}'")]
    MissingColumn { sheet: String, column: String },

    #[error("sheet '{sheet}', row {row}, column '{column}': {reason}")]
    InvalidValue {
        sheet: String,
        /// 1-based data row (the header is row 0)
        row: usize,
        column: String,
        reason: String,
    },

    #[error("sheet '{sheet}' needs at least {expected} rows, found {found}")]
    TooFewRows {
        sheet: String,
        expected: usize,
        found: usize,
    },
}

pub type LoadResult<T> = Result<T, DataLoadError>;
