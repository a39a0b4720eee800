//! Period aggregation
//!
//! Groups a period's entries by (category, account name) and turns the
//! debit and credit totals into one signed amount per account. How the
//! totals become a signed amount depends on the statement, see
//! [`AggregationRule`].

use rust_decimal::Decimal;
use std::collections::BTreeMap;

use crate::models::{AggregateRow, Ledger};
use crate::period::Period;
use crate::types::Category;

/// Sign convention turning debit/credit totals into a net amount
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AggregationRule {
    /// Σdebit − Σcredit for every account
    DebitMinusCredit,
    /// Revenue is Σcredit, Expenses is Σdebit; anything else falls back to
    /// Σdebit − Σcredit.
    ///
    /// Expenses stay positive so that Net Income is Revenue minus Expenses.
    IncomeStatement,
}

impl AggregationRule {
    /// Net amount for an account with the given totals
    pub fn net(&self, category: Category, debit: Decimal, credit: Decimal) -> Decimal {
        match (self, category) {
            (AggregationRule::IncomeStatement, Category::Revenue) => credit,
            (AggregationRule::IncomeStatement, Category::Expenses) => debit,
            _ => debit - credit,
        }
    }
}

/// What to aggregate and how
#[derive(Debug, Clone, Copy)]
pub struct Aggregation<'a> {
    pub rule: AggregationRule,
    /// Only these categories; `None` keeps all
    pub categories: Option<&'a [Category]>,
    /// Skip accounts whose name contains this text
    pub exclude_containing: Option<&'a str>,
}

impl<'a> Aggregation<'a> {
    pub fn new(rule: AggregationRule) -> Self {
        Self {
            rule,
            categories: None,
            exclude_containing: None,
        }
    }

    pub fn only(mut self, categories: &'a [Category]) -> Self {
        self.categories = Some(categories);
        self
    }

    pub fn excluding(mut self, marker: &'a str) -> Self {
        self.exclude_containing = Some(marker);
        self
    }

    fn admits(&self, category: Category, account_name: &str) -> bool {
        if let Some(categories) = self.categories {
            if !categories.contains(&category) {
                return false;
            }
        }
        match self.exclude_containing {
            Some(marker) if !marker.is_empty() => !account_name.contains(marker),
            _ => true,
        }
    }
}

/// Net amount per (category, account name) for entries in `period`.
///
/// Rows come back ordered by category, then account name. A period with no
/// matching entries yields an empty vector.
pub fn aggregate(ledger: &Ledger, period: Period, aggregation: &Aggregation<'_>) -> Vec<AggregateRow> {
    let mut totals: BTreeMap<(Category, &str), (Decimal, Decimal)> = BTreeMap::new();

    for entry in ledger.entries_in(period) {
        if !aggregation.admits(entry.category, &entry.account_name) {
            continue;
        }
        let slot = totals
            .entry((entry.category, entry.account_name.as_str()))
            .or_insert((Decimal::ZERO, Decimal::ZERO));
        slot.0 += entry.debit;
        slot.1 += entry.credit;
    }

    log::debug!(
        "Aggregated {} account(s) for {} with {:?}",
        totals.len(),
        period,
        aggregation.rule
    );

    totals
        .into_iter()
        .map(|((category, account_name), (debit, credit))| AggregateRow {
            category,
            account_name: account_name.to_string(),
            net_amount: aggregation.rule.net(category, debit, credit),
        })
        .collect()
}

/// Σdebit − Σcredit of one account name within `period`, across categories
pub fn account_balance(ledger: &Ledger, period: Period, account_name: &str) -> Decimal {
    ledger
        .entries_in(period)
        .filter(|e| e.account_name == account_name)
        .map(|e| e.net())
        .sum()
}
