//! Error handling

use std::path::PathBuf;

pub type AppResult<T> = Result<T, AppError>;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    // Configuration errors
    #[error("Invalid configuration: {0}")]
    Config(String),

    // File errors
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV error in {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    // Data errors
    #[error("Line {line}: mandatory column '{column}' is missing or empty")]
    MissingField { line: u64, column: &'static str },

    #[error("Line {line}: column '{column}' is not an integer within range: '{value}'")]
    InvalidInteger {
        line: u64,
        column: &'static str,
        value: String,
    },

    #[error("Line {line}: column '{column}' must be a non-negative integer, got '{value}'")]
    NegativeInteger {
        line: u64,
        column: &'static str,
        value: String,
    },

    #[error("Failed to encode bulk line: {0}")]
    Encode(#[from] serde_json::Error),

    // Datastore errors
    #[error("Network error talking to {url}: {message}")]
    Network { url: String, message: String },

    #[error("Datastore rejected request to {url} ({status}): {body}")]
    Rejected { url: String, status: u16, body: String },

    #[error("Failed to parse datastore response: {0}")]
    Parse(String),
}

impl AppError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        AppError::Io { path: path.into(), source }
    }

    pub fn csv(path: impl Into<PathBuf>, source: csv::Error) -> Self {
        AppError::Csv { path: path.into(), source }
    }

    /// True for row-level data problems (as opposed to IO or datastore failures)
    pub fn is_data_error(&self) -> bool {
        matches!(
            self,
            AppError::MissingField { .. }
                | AppError::InvalidInteger { .. }
                | AppError::NegativeInteger { .. }
        )
    }
}
