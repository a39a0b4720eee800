//! Core data models for the ledger

use chrono::NaiveDate;
use finstatements_config::Granularity;
use finstatements_loader::LedgerRecord;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::CoreResult;
use crate::period::Period;
use crate::types::{Category, CategoryMap};

/// One categorised ledger line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerEntry {
    /// Source row number (1-based, header excluded)
    pub row: usize,
    pub date: NaiveDate,
    /// Raw account type from the source
    pub account_type: String,
    pub account_name: String,
    /// Derived from `account_type`
    pub category: Category,
    pub debit: Decimal,
    pub credit: Decimal,
}

impl LedgerEntry {
    /// Debit minus credit
    pub fn net(&self) -> Decimal {
        self.debit - self.credit
    }

    pub fn period(&self, granularity: Granularity) -> Period {
        Period::of(self.date, granularity)
    }
}

/// Immutable, categorised snapshot of a ledger source.
///
/// Categories are derived into the snapshot when it is built; the loaded
/// records are consumed, never patched in place, so two requests holding
/// different snapshots cannot observe each other's categorisation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Ledger {
    entries: Vec<LedgerEntry>,
}

impl Ledger {
    /// Categorise every record, failing on the first unmapped account type
    pub fn from_records(records: Vec<LedgerRecord>, categories: &CategoryMap) -> CoreResult<Self> {
        let mut entries = Vec::with_capacity(records.len());
        for record in records {
            let category = categories.categorize(&record)?;
            entries.push(LedgerEntry {
                row: record.row,
                date: record.date,
                account_type: record.account_type,
                account_name: record.account_name,
                category,
                debit: record.debit,
                credit: record.credit,
            });
        }
        Ok(Self { entries })
    }

    pub fn entries(&self) -> &[LedgerEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries whose date falls in `period`
    pub fn entries_in(&self, period: Period) -> impl Iterator<Item = &LedgerEntry> {
        self.entries.iter().filter(move |e| period.contains(e.date))
    }

    /// Distinct periods present in the ledger, ascending
    pub fn periods(&self, granularity: Granularity) -> Vec<Period> {
        let mut periods: Vec<Period> = self.entries.iter().map(|e| e.period(granularity)).collect();
        periods.sort();
        periods.dedup();
        periods
    }

    /// Earliest and latest entry dates
    pub fn date_range(&self) -> Option<(NaiveDate, NaiveDate)> {
        let first = self.entries.iter().map(|e| e.date).min()?;
        let last = self.entries.iter().map(|e| e.date).max()?;
        Some((first, last))
    }
}

/// Signed net amount of one account within one period
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregateRow {
    pub category: Category,
    pub account_name: String,
    pub net_amount: Decimal,
}

/// One account compared across two periods
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComparativeRow {
    pub category: Category,
    pub account_name: String,
    pub current: Decimal,
    pub previous: Decimal,
    pub delta: Decimal,
    /// Zero when `previous` is zero
    pub pct_change: Decimal,
}
