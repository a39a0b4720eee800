//! Error types for finstatements-loader

use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Ledger source not found: {path}")]
    NotFound { path: String },

    #[error("Ledger is missing required column '{column}'")]
    MissingColumn { column: String },

    #[error("Row {row}: cannot parse date '{value}'")]
    InvalidDate { row: usize, value: String },

    #[error("Row {row}: '{value}' is not a valid {column} amount")]
    InvalidAmount {
        row: usize,
        column: String,
        value: String,
    },

    #[error("Row {row}: {column} amount {value} is negative")]
    NegativeAmount {
        row: usize,
        column: String,
        value: String,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] io::Error),
}

/// Result type with LoadError
pub type LoadResult<T> = Result<T, LoadError>;
