// errors.rs
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by any stage of the forecasting pipeline.
/// None of them are recovered from: the run aborts on the first one.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("Database error: {0}")]
    Db(#[from] rusqlite::Error),

    #[error("Failed to read schema file {path}: {source}")]
    Schema {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Model serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Spreadsheet error: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),

    #[error("Learning error: {0}")]
    Learn(#[from] smartcore::error::Failed),

    #[error("Database not found at {0}")]
    MissingDatabase(PathBuf),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Not enough data: {0}")]
    InsufficientData(String),

    #[error("Model error: {0}")]
    Model(String),
}

pub type Result<T> = std::result::Result<T, PipelineError>;
