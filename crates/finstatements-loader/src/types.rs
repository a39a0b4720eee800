//! Record types produced by the loader

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Column names every ledger source must provide
pub const REQUIRED_COLUMNS: [&str; 5] = ["Date", "Account Type", "Account Name", "Debit", "Credit"];

/// One ledger row, typed but not yet categorised
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerRecord {
    /// 1-based data row number in the source (header excluded)
    pub row: usize,
    pub date: NaiveDate,
    /// Raw account type, e.g. "Asset" or "Cash Flow Operating"
    pub account_type: String,
    pub account_name: String,
    pub debit: Decimal,
    pub credit: Decimal,
}

/// Options controlling how raw cells are interpreted
#[derive(Debug, Clone, PartialEq)]
pub struct LoadOptions {
    /// `chrono` formats tried in order for the Date column
    pub date_formats: Vec<String>,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            date_formats: vec![
                "%Y-%m-%d".to_string(),
                "%Y-%m-%d %H:%M:%S".to_string(),
                "%d/%m/%Y".to_string(),
            ],
        }
    }
}

impl LoadOptions {
    pub fn with_date_formats(date_formats: Vec<String>) -> Self {
        Self { date_formats }
    }
}
