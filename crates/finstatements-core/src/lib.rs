//! Comparative financial statement engine
//!
//! Data flows one way: loaded records are categorised into a [`Ledger`]
//! snapshot, aggregated per period, merged into comparative sections and
//! assembled into statements.

pub mod aggregate;
pub mod cache;
pub mod compare;
pub mod error;
pub mod format;
pub mod models;
pub mod period;
pub mod reports;
pub mod statements;
pub mod trend;
pub mod types;
pub mod validate;

#[cfg(test)]
pub(crate) mod test_support;

use finstatements_config::Config;
use finstatements_loader::{LedgerSource, LoadOptions};
use serde::{Deserialize, Serialize};

pub use aggregate::{account_balance, aggregate, Aggregation, AggregationRule};
pub use cache::SnapshotCache;
pub use compare::{line_item_pct, merge, total_pct, ComparativeSection, ComparativeTotal};
pub use error::{CoreError, CoreResult, DefaultErrorLogger, ErrorContext, ErrorLogger, ErrorSeverity};
pub use format::{format_percent, CurrencyFormat, Formatted, ToAmount};
pub use models::{AggregateRow, ComparativeRow, Ledger, LedgerEntry};
pub use period::{Comparison, Period, PeriodSelector, YearMonth};
pub use reports::{RenderedRow, RenderedStatement, ReportRow, RowKind, Statement, StatementKind};
pub use statements::{
    balance_sheet, build_statement, cash_flow_statement, cash_flow_summary, income_statement, net_income,
    CashFlowSummary, StatementSettings,
};
pub use trend::{trend_series, MetricSpec, TrendPoint, TrendSeries};
pub use types::{Category, CategoryMap};
pub use validate::{check_balance, reconcile_cash, CashReconciliation, LedgerBalance};

/// Loader options from the ledger config section
pub fn load_options(config: &Config) -> LoadOptions {
    LoadOptions::with_date_formats(config.ledger.date_formats.clone())
}

/// Category table from the categories config section
pub fn category_map(config: &Config) -> CoreResult<CategoryMap> {
    CategoryMap::with_aliases(&config.categories.aliases)
}

/// Load and categorise a ledger without caching
pub fn load_ledger(source: &dyn LedgerSource, options: &LoadOptions, categories: &CategoryMap) -> CoreResult<Ledger> {
    let records = source
        .load(options)
        .map_err(|e| CoreError::data_unavailable(source.describe(), &e))?;
    Ledger::from_records(records, categories)
}

// ==================== Ledger Operations ====================

/// Read-only queries over a ledger snapshot
pub trait LedgerOperations {
    /// Get ledger summary
    fn summary(&self) -> LedgerSummary;
}

/// Ledger summary
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerSummary {
    pub total_entries: usize,
    pub total_accounts: usize,
    pub total_months: usize,
    pub period_start: Option<String>,
    pub period_end: Option<String>,
}

impl LedgerOperations for Ledger {
    fn summary(&self) -> LedgerSummary {
        let mut accounts: Vec<&str> = self.entries().iter().map(|e| e.account_name.as_str()).collect();
        accounts.sort_unstable();
        accounts.dedup();

        let range = self.date_range();
        LedgerSummary {
            total_entries: self.len(),
            total_accounts: accounts.len(),
            total_months: self.periods(finstatements_config::Granularity::Month).len(),
            period_start: range.map(|(start, _)| start.format("%Y-%m-%d").to_string()),
            period_end: range.map(|(_, end)| end.format("%Y-%m-%d").to_string()),
        }
    }
}

// ==================== Tests ====================
