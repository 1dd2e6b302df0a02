//! Dataset error types
//!
//! Defines all errors that can occur while fetching, parsing and querying
//! the observation table.

use thiserror::Error;

/// Errors that can occur in the dataset layer
#[derive(Error, Debug)]
pub enum DatasetError {
    /// I/O operation failed (local file source)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// HTTP request failed before a response arrived
    #[error("Fetch error: {0}")]
    Fetch(#[from] reqwest::Error),

    /// Remote answered with a non-success status
    #[error("Unexpected HTTP status {status} from {url}")]
    Status { url: String, status: u16 },

    /// CSV parsing failed
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Workbook parsing failed
    #[error("Workbook error: {0}")]
    Workbook(String),

    /// The source contained no header row
    #[error("Dataset is empty: no header row")]
    Empty,

    /// A column required for rendering is absent
    #[error("Column not found: {0}")]
    ColumnNotFound(String),
}

impl From<calamine::XlsxError> for DatasetError {
    fn from(err: calamine::XlsxError) -> Self {
        DatasetError::Workbook(err.to_string())
    }
}

/// Result type alias for dataset operations
pub type DatasetResult<T> = Result<T, DatasetError>;
