//! Ledger fixtures shared by unit tests

use chrono::NaiveDate;
use finstatements_loader::LedgerRecord;
use rust_decimal::Decimal;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::models::Ledger;
use crate::types::CategoryMap;

static NEXT_ROW: AtomicUsize = AtomicUsize::new(1);

/// Raw record dated `date` (YYYY-MM-DD)
pub fn entry(date: &str, account_type: &str, account_name: &str, debit: Decimal, credit: Decimal) -> LedgerRecord {
    LedgerRecord {
        row: NEXT_ROW.fetch_add(1, Ordering::Relaxed),
        date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
        account_type: account_type.to_string(),
        account_name: account_name.to_string(),
        debit,
        credit,
    }
}

/// Categorised ledger over the fixed account type table
pub fn ledger(records: Vec<LedgerRecord>) -> Ledger {
    Ledger::from_records(records, &CategoryMap::default()).unwrap()
}
