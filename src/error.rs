//! Error types for skillscope
//!
//! Loader failures are reported as [`DatasetError`] and carry enough position
//! information (line, column name) to fix the input file. Everything else
//! funnels into [`AnalysisError`].

use thiserror::Error;

/// Errors raised while reading or validating a student dataset
#[derive(Error, Debug)]
pub enum DatasetError {
    #[error("Dataset is empty: at least one student record is required")]
    Empty,

    #[error("Invalid CSV header: expected `{expected}`, found `{found}`")]
    InvalidHeader { expected: String, found: String },

    #[error("Line {line}: expected {expected} fields, found {found}")]
    FieldCount {
        line: usize,
        expected: usize,
        found: usize,
    },

    #[error("Line {line}: field `{field}` is not a valid number: `{value}`")]
    NotNumeric {
        line: usize,
        field: String,
        value: String,
    },

    #[error("Record {student_id}: field `{field}` must be finite, got {value}")]
    NonFinite {
        student_id: i64,
        field: String,
        value: f64,
    },

    #[error("Duplicate student_id {0}")]
    DuplicateId(i64),

    #[error("Input too large: {size} bytes exceeds limit of {limit} bytes")]
    TooLarge { size: u64, limit: u64 },

    #[error("Unsupported input format `{0}` (expected json or csv)")]
    UnsupportedFormat(String),

    #[error("Malformed JSON dataset: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Malformed CSV dataset: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Top-level error type for analysis runs
#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error(transparent)]
    Dataset(#[from] DatasetError),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Failed to parse configuration: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("Singular matrix: zero pivot in column {column} (strict pivot mode)")]
    SingularMatrix { column: usize },

    #[error("Dimension mismatch: {0}")]
    Dimension(String),

    #[error("Failed to serialize artifact: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for analysis operations
pub type Result<T> = std::result::Result<T, AnalysisError>;
