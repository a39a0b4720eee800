//! Ledger source loading
//!
//! Reads a flat trial balance table (Date, Account Type, Account Name,
//! Debit, Credit) into typed records. Sources are read fully into memory;
//! there is no streaming.

use std::path::{Path, PathBuf};

pub mod error;
pub mod parser;
pub mod types;

pub use error::{LoadError, LoadResult};
pub use parser::CsvLedgerParser;
pub use types::{LedgerRecord, LoadOptions, REQUIRED_COLUMNS};

// ==================== Source Trait ====================

/// Trait for ledger sources
pub trait LedgerSource: Send + Sync {
    /// Human-readable name of the source for messages
    fn describe(&self) -> String;

    /// Raw bytes of the source
    fn read_bytes(&self) -> LoadResult<Vec<u8>>;

    /// Read and parse every record
    fn load(&self, options: &LoadOptions) -> LoadResult<Vec<LedgerRecord>> {
        let content = self.read_bytes()?;
        let records = CsvLedgerParser::parse(&content, options)?;
        log::info!("Loaded {} ledger rows from {}", records.len(), self.describe());
        Ok(records)
    }
}

/// CSV file on disk
#[derive(Debug, Clone)]
pub struct CsvFileSource {
    path: PathBuf,
}

impl CsvFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl LedgerSource for CsvFileSource {
    fn describe(&self) -> String {
        self.path.to_string_lossy().to_string()
    }

    fn read_bytes(&self) -> LoadResult<Vec<u8>> {
        if !self.path.exists() {
            return Err(LoadError::NotFound { path: self.describe() });
        }
        Ok(std::fs::read(&self.path)?)
    }
}

/// CSV text held in memory
#[derive(Debug, Clone)]
pub struct CsvTextSource {
    name: String,
    content: String,
}

impl CsvTextSource {
    pub fn new(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
        }
    }
}

impl LedgerSource for CsvTextSource {
    fn describe(&self) -> String {
        self.name.clone()
    }

    fn read_bytes(&self) -> LoadResult<Vec<u8>> {
        Ok(self.content.as_bytes().to_vec())
    }
}
