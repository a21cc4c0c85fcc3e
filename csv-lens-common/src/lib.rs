pub mod config;
pub use config::{delimiter_byte, Config, DisplayConfig, InputConfig, OutputFormat};

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CsvLensError {
    #[error("file not found: {}", .0.display())]
    NotFound(PathBuf),
    #[error("no data to process")]
    EmptyData,
    #[error("unsupported filter condition, use one of: ['>', '<', '=']")]
    UnsupportedOperator,
    #[error("column '{0}' not found in data")]
    UnknownColumn(String),
    #[error("no rows match the filter condition")]
    NoMatch,
    #[error("aggregate condition must look like column=reducer, for example rating=avg")]
    MalformedAggregate,
    #[error("unsupported aggregate reducer: {0}, use one of: ['avg', 'min', 'max']")]
    UnsupportedReducer(String),
    #[error("column '{0}' contains non-numeric values")]
    NonNumericColumn(String),
    #[error("row {row} has {found} cells, header has {expected}")]
    RowArity { row: usize, expected: usize, found: usize },
    #[error("no input file given, pass --file <path>")]
    MissingInput,
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("Arrow error: {0}")]
    Arrow(#[from] arrow::error::ArrowError),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("config error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, CsvLensError>;
