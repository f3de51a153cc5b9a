use thiserror::Error;
use tracing::{debug, error};

/// Errors raised while building a [`crate::engine::table::Table`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TableError {
    #[error("Duplicate column: {0}")]
    DuplicateColumn(String),

    #[error("Column '{column}' has {actual} rows, expected {expected}")]
    RaggedColumns {
        column: String,
        expected: usize,
        actual: usize,
    },

    #[error("Invalid record: {0}")]
    InvalidRecord(String),
}

/// Errors that can occur while running an intent or one of its table operations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum IntentError {
    #[error("Column not found: {column}")]
    MissingColumn { column: String },

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Cannot parse date '{value}' with format '{format}'")]
    DateParse { value: String, format: String },

    #[error("Table error: {0}")]
    Table(#[from] TableError),
}

impl IntentError {
    pub fn missing_column(column: impl Into<String>) -> Self {
        IntentError::MissingColumn {
            column: column.into(),
        }
    }

    pub fn log_error(&self) {
        match self {
            IntentError::MissingColumn { column } => {
                error!("Column not found: {}", column);
                debug!("Missing column error details: {:?}", self);
            }
            IntentError::InvalidParameter(e) => {
                error!("Invalid parameter: {}", e);
                debug!("Invalid parameter error details: {}", e);
            }
            IntentError::DateParse { value, format } => {
                error!("Date parse failed: {}", value);
                debug!("Date parse error details: value={:?} format={:?}", value, format);
            }
            IntentError::Table(e) => {
                error!("Table error: {}", e);
                debug!("Table error details: {:?}", e);
            }
        }
    }
}
