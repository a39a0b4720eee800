//! Property-based tests for statement generation.
//!
//! Run with: cargo test -p finstatements-core --test properties

use chrono::NaiveDate;
use finstatements_config::Granularity;
use finstatements_core::{
    aggregate, balance_sheet, build_statement, cash_flow_summary, check_balance, income_statement, merge,
    Aggregation, AggregationRule, Category, CategoryMap, Comparison, CurrencyFormat, Ledger, Period,
    PeriodSelector, ReportRow, RowKind, StatementKind, StatementSettings,
};
use finstatements_loader::LedgerRecord;
use proptest::prelude::*;
use rust_decimal::Decimal;
use std::collections::BTreeSet;

// ============================================================================
// Arbitrary generators
// ============================================================================

const ACCOUNT_TYPES: [&str; 8] = [
    "Asset",
    "Liability",
    "Equity",
    "Revenue",
    "Expense",
    "Cash Flow Operating",
    "Cash Flow Investing",
    "Cash Flow Financing",
];

const ACCOUNT_NAMES: [&str; 8] = [
    "Cash at Bank",
    "Service Revenue",
    "Salaries Expense",
    "Rent Expense",
    "Bank Loan",
    "Owner Capital",
    "Net Income",
    "Equipment",
];

fn arb_amount() -> impl Strategy<Value = Decimal> {
    (0i64..10_000_000i64).prop_map(|n| Decimal::new(n, 2))
}

/// Month index 0..24 covering 2024-01 ..= 2025-12
fn month_of(index: u32) -> (i32, u32) {
    (2024 + (index / 12) as i32, index % 12 + 1)
}

fn arb_date() -> impl Strategy<Value = NaiveDate> {
    (0u32..24, 1u32..29).prop_map(|(index, day)| {
        let (year, month) = month_of(index);
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    })
}

fn arb_record() -> impl Strategy<Value = LedgerRecord> {
    (
        arb_date(),
        0usize..ACCOUNT_TYPES.len(),
        0usize..ACCOUNT_NAMES.len(),
        arb_amount(),
        arb_amount(),
    )
        .prop_map(|(date, t, n, debit, credit)| LedgerRecord {
            row: 0,
            date,
            account_type: ACCOUNT_TYPES[t].to_string(),
            account_name: ACCOUNT_NAMES[n].to_string(),
            debit,
            credit,
        })
}

fn number_rows(mut records: Vec<LedgerRecord>) -> Vec<LedgerRecord> {
    for (i, record) in records.iter_mut().enumerate() {
        record.row = i + 1;
    }
    records
}

fn arb_ledger() -> impl Strategy<Value = Ledger> {
    prop::collection::vec(arb_record(), 0..60)
        .prop_map(|records| Ledger::from_records(number_rows(records), &CategoryMap::default()).unwrap())
}

/// Ledger built from pairs of equal debit and credit lines
fn arb_balanced_ledger() -> impl Strategy<Value = Ledger> {
    prop::collection::vec((arb_record(), 0usize..ACCOUNT_TYPES.len(), 0usize..ACCOUNT_NAMES.len()), 0..30)
        .prop_map(|pairs| {
            let mut records = Vec::new();
            for (record, t, n) in pairs {
                let amount = record.debit;
                records.push(LedgerRecord {
                    credit: Decimal::ZERO,
                    ..record.clone()
                });
                records.push(LedgerRecord {
                    account_type: ACCOUNT_TYPES[t].to_string(),
                    account_name: ACCOUNT_NAMES[n].to_string(),
                    debit: Decimal::ZERO,
                    credit: amount,
                    ..record
                });
            }
            Ledger::from_records(number_rows(records), &CategoryMap::default()).unwrap()
        })
}

fn arb_comparison() -> impl Strategy<Value = Comparison> {
    (0u32..24, 0u32..24)
        .prop_filter("distinct months", |(a, b)| a != b)
        .prop_map(|(a, b)| {
            let (current, previous) = if a > b { (a, b) } else { (b, a) };
            let (cy, cm) = month_of(current);
            let (py, pm) = month_of(previous);
            Comparison::new(Period::month(cy, cm).unwrap(), Period::month(py, pm).unwrap()).unwrap()
        })
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn prop_paired_ledger_balances(ledger in arb_balanced_ledger()) {
        let balance = check_balance(&ledger);
        prop_assert!(balance.balanced);
        prop_assert_eq!(balance.total_debit, balance.total_credit);
    }

    #[test]
    fn prop_statements_are_idempotent(ledger in arb_ledger(), comparison in arb_comparison()) {
        let settings = StatementSettings::default();
        let currency = CurrencyFormat::default();
        for kind in StatementKind::ALL {
            let first = build_statement(kind, &ledger, comparison, &settings);
            let second = build_statement(kind, &ledger, comparison, &settings);
            prop_assert_eq!(&first, &second);
            prop_assert_eq!(first.render(&currency), second.render(&currency));
        }
    }

    #[test]
    fn prop_merge_lists_every_account_once(ledger in arb_ledger(), comparison in arb_comparison()) {
        let aggregation = Aggregation::new(AggregationRule::DebitMinusCredit);
        let current = aggregate(&ledger, comparison.current(), &aggregation);
        let previous = aggregate(&ledger, comparison.previous(), &aggregation);
        let sections = merge(&current, &previous, &Category::ALL);

        let expected: BTreeSet<(Category, String)> = current
            .iter()
            .chain(previous.iter())
            .map(|r| (r.category, r.account_name.clone()))
            .collect();
        let merged: Vec<(Category, String)> = sections
            .iter()
            .flat_map(|s| s.rows.iter().map(|r| (r.category, r.account_name.clone())))
            .collect();

        prop_assert_eq!(merged.len(), expected.len());
        let merged: BTreeSet<(Category, String)> = merged.into_iter().collect();
        prop_assert_eq!(merged, expected);
    }

    #[test]
    fn prop_rows_stay_in_their_sections(ledger in arb_ledger(), comparison in arb_comparison()) {
        let settings = StatementSettings::default();
        for kind in StatementKind::ALL {
            let statement = build_statement(kind, &ledger, comparison, &settings);
            for row in &statement.rows {
                if let Some(category) = row.category {
                    prop_assert!(kind.section_order().contains(&category));
                } else {
                    prop_assert_eq!(row.kind, RowKind::Derived);
                }
            }
        }
    }

    #[test]
    fn prop_net_income_identity(ledger in arb_ledger(), comparison in arb_comparison()) {
        let statement = income_statement(&ledger, comparison);
        let figures = |row: Option<&ReportRow>| {
            row.and_then(|r| Some((r.current?, r.previous?)))
                .unwrap_or((Decimal::ZERO, Decimal::ZERO))
        };

        let (rev_c, rev_p) = figures(statement.subtotal(Category::Revenue));
        let (exp_c, exp_p) = figures(statement.subtotal(Category::Expenses));
        let net = statement.derived("Net Income");
        prop_assert!(net.is_some());
        let (net_c, net_p) = figures(net);

        prop_assert_eq!(net_c, rev_c - exp_c);
        prop_assert_eq!(net_p, rev_p - exp_p);
    }

    #[test]
    fn prop_cash_roll_forward(ledger in arb_ledger(), comparison in arb_comparison()) {
        let summary = cash_flow_summary(&ledger, comparison, &StatementSettings::default());
        prop_assert_eq!(
            summary.ending_cash.current,
            summary.beginning_cash.current + summary.net_activities.current
        );
        prop_assert_eq!(
            summary.ending_cash.previous,
            summary.beginning_cash.previous + summary.net_activities.previous
        );
        let activities: Decimal = summary.activities.iter().map(|s| s.total.current).sum();
        prop_assert_eq!(summary.net_activities.current, summary.net_income.current + activities);
    }

    #[test]
    fn prop_balance_sheet_never_shows_flows(ledger in arb_ledger(), comparison in arb_comparison()) {
        let statement = balance_sheet(&ledger, comparison);
        prop_assert!(statement
            .rows
            .iter()
            .filter_map(|r| r.category)
            .all(|c| !c.is_cash_flow()));
    }

    #[test]
    fn prop_selector_never_offers_inverted_pair(ledger in arb_ledger(), yearly in any::<bool>()) {
        let granularity = if yearly { Granularity::Year } else { Granularity::Month };
        let selector = PeriodSelector::new(&ledger, granularity);
        for current in selector.current_choices() {
            for previous in selector.previous_choices(current) {
                prop_assert!(previous < current);
                prop_assert!(selector.select(current, previous).is_ok());
            }
            prop_assert!(selector.select(current, current).is_err());
        }
    }

    #[test]
    fn prop_line_item_pct_is_never_blank(ledger in arb_ledger(), comparison in arb_comparison()) {
        let statement = income_statement(&ledger, comparison);
        for row in statement.rows.iter().filter(|r| r.kind == RowKind::LineItem) {
            prop_assert!(row.pct_change.is_some());
            if row.previous == Some(Decimal::ZERO) {
                prop_assert_eq!(row.pct_change, Some(Decimal::ZERO));
            }
        }
        for row in statement.rows.iter().filter(|r| r.kind != RowKind::LineItem && r.kind != RowKind::Header) {
            prop_assert_eq!(row.pct_change.is_none(), row.previous == Some(Decimal::ZERO));
        }
    }
}
