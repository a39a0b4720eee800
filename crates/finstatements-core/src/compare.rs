//! Comparative merge of two periods
//!
//! Outer-joins the current and previous aggregates on (category, account
//! name), groups the result into the caller's sections and totals each
//! section.
//!
//! Percent change has two rules. Line items report `0` when the previous
//! amount is zero; totals and derived rows report nothing at all. The two
//! rules render differently ("0.0%" versus a blank cell) and are kept as
//! separate functions.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::models::{AggregateRow, ComparativeRow};
use crate::types::Category;

/// Percent change for a line item: zero when `previous` is zero
pub fn line_item_pct(delta: Decimal, previous: Decimal) -> Decimal {
    ratio_pct(delta, previous).unwrap_or(Decimal::ZERO)
}

/// Percent change for a total or derived row: absent when `previous` is zero
pub fn total_pct(delta: Decimal, previous: Decimal) -> Option<Decimal> {
    ratio_pct(delta, previous)
}

fn ratio_pct(delta: Decimal, previous: Decimal) -> Option<Decimal> {
    if previous.is_zero() {
        return None;
    }
    delta
        .checked_div(previous)
        .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
}

/// Current/previous pair for a subtotal or derived figure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComparativeTotal {
    pub current: Decimal,
    pub previous: Decimal,
    pub delta: Decimal,
    pub pct_change: Option<Decimal>,
}

impl ComparativeTotal {
    /// Delta and percent are derived from the two figures themselves
    pub fn new(current: Decimal, previous: Decimal) -> Self {
        let delta = current - previous;
        Self {
            current,
            previous,
            delta,
            pct_change: total_pct(delta, previous),
        }
    }

    pub fn zero() -> Self {
        Self::new(Decimal::ZERO, Decimal::ZERO)
    }

    /// Sum of two figures, percent recomputed from the sums
    pub fn plus(&self, other: &ComparativeTotal) -> Self {
        Self::new(self.current + other.current, self.previous + other.previous)
    }

    /// Difference of two figures, percent recomputed from the differences
    pub fn minus(&self, other: &ComparativeTotal) -> Self {
        Self::new(self.current - other.current, self.previous - other.previous)
    }
}

/// One statement section: its line items and their total
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComparativeSection {
    pub category: Category,
    pub rows: Vec<ComparativeRow>,
    pub total: ComparativeTotal,
}

impl ComparativeSection {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Outer-join two periods' aggregates into sections, in `section_order`.
///
/// Accounts missing from one side count as zero there. Categories not named
/// in `section_order` are dropped; every listed category gets a section,
/// possibly empty. Line items within a section are ordered by account name.
pub fn merge(
    current: &[AggregateRow],
    previous: &[AggregateRow],
    section_order: &[Category],
) -> Vec<ComparativeSection> {
    let mut joined: BTreeMap<(Category, &str), (Decimal, Decimal)> = BTreeMap::new();

    for row in current {
        joined
            .entry((row.category, row.account_name.as_str()))
            .or_insert((Decimal::ZERO, Decimal::ZERO))
            .0 += row.net_amount;
    }
    for row in previous {
        joined
            .entry((row.category, row.account_name.as_str()))
            .or_insert((Decimal::ZERO, Decimal::ZERO))
            .1 += row.net_amount;
    }

    let mut sections: Vec<ComparativeSection> = Vec::with_capacity(section_order.len());
    for &category in section_order {
        if sections.iter().any(|s| s.category == category) {
            continue;
        }

        let rows: Vec<ComparativeRow> = joined
            .iter()
            .filter(|((c, _), _)| *c == category)
            .map(|((_, name), (curr, prev))| {
                let delta = *curr - *prev;
                ComparativeRow {
                    category,
                    account_name: name.to_string(),
                    current: *curr,
                    previous: *prev,
                    delta,
                    pct_change: line_item_pct(delta, *prev),
                }
            })
            .collect();

        let total_current: Decimal = rows.iter().map(|r| r.current).sum();
        let total_previous: Decimal = rows.iter().map(|r| r.previous).sum();

        sections.push(ComparativeSection {
            category,
            rows,
            total: ComparativeTotal::new(total_current, total_previous),
        });
    }

    sections
}
