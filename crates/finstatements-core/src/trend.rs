//! Monthly trend series for the dashboard

use finstatements_config::{Granularity, MetricConfig};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::models::{Ledger, LedgerEntry};
use crate::period::Period;

/// A named group of accounts summed into one series
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricSpec {
    pub name: String,
    pub accounts: Vec<String>,
    pub account_types: Vec<String>,
}

impl MetricSpec {
    pub fn new(name: impl Into<String>, accounts: &[&str]) -> Self {
        Self {
            name: name.into(),
            accounts: accounts.iter().map(|a| a.to_string()).collect(),
            account_types: Vec::new(),
        }
    }

    /// Also count entries whose raw account type is one of `account_types`
    pub fn with_account_types(mut self, account_types: &[&str]) -> Self {
        self.account_types = account_types.iter().map(|t| t.to_string()).collect();
        self
    }

    fn includes(&self, entry: &LedgerEntry) -> bool {
        self.accounts.iter().any(|a| *a == entry.account_name)
            || self.account_types.iter().any(|t| *t == entry.account_type)
    }
}

impl From<&MetricConfig> for MetricSpec {
    fn from(config: &MetricConfig) -> Self {
        Self {
            name: config.name.clone(),
            accounts: config.accounts.clone(),
            account_types: config.account_types.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrendPoint {
    pub period: Period,
    pub amount: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrendSeries {
    pub metric: String,
    pub points: Vec<TrendPoint>,
}

/// One series per metric over the last `window` months present in the ledger.
///
/// Each point is Σdebit − Σcredit of the entries the metric includes, by
/// account name or raw account type. Months inside the window with no
/// matching entries report zero.
pub fn trend_series(ledger: &Ledger, metrics: &[MetricSpec], window: usize) -> Vec<TrendSeries> {
    let months = ledger.periods(Granularity::Month);
    let months = &months[months.len().saturating_sub(window)..];

    let mut series = Vec::with_capacity(metrics.len());
    for metric in metrics {
        let mut totals: BTreeMap<Period, Decimal> = months.iter().map(|m| (*m, Decimal::ZERO)).collect();
        for entry in ledger.entries() {
            if !metric.includes(entry) {
                continue;
            }
            if let Some(total) = totals.get_mut(&entry.period(Granularity::Month)) {
                *total += entry.net();
            }
        }

        series.push(TrendSeries {
            metric: metric.name.clone(),
            points: totals
                .into_iter()
                .map(|(period, amount)| TrendPoint { period, amount })
                .collect(),
        });
    }

    log::debug!("Built {} trend series over {} month(s)", series.len(), months.len());
    series
}
