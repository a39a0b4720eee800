//! Statement builders
//!
//! Each builder is a pure function of a ledger snapshot, a validated
//! [`Comparison`] and, for the cash flow statement, the [`StatementSettings`].
//! Nothing reads an ambient period selection.

use finstatements_config::ReportConfig;
use serde::{Deserialize, Serialize};

use crate::aggregate::{account_balance, aggregate, Aggregation, AggregationRule};
use crate::compare::{merge, ComparativeSection, ComparativeTotal};
use crate::models::Ledger;
use crate::period::Comparison;
use crate::reports::{Statement, StatementKind};
use crate::types::Category;

pub const NET_INCOME_LABEL: &str = "Net Income";
pub const NET_ACTIVITIES_LABEL: &str = "Net Activities";

/// Names the cash flow statement depends on
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatementSettings {
    /// Account rolled forward as beginning/ending cash
    pub cash_account: String,
    /// Activity lines whose name contains this are skipped
    pub net_income_marker: String,
}

impl Default for StatementSettings {
    fn default() -> Self {
        Self::from_config(&ReportConfig::default())
    }
}

impl StatementSettings {
    pub fn from_config(config: &ReportConfig) -> Self {
        Self {
            cash_account: config.cash_account.clone(),
            net_income_marker: config.net_income_marker.clone(),
        }
    }

    pub fn beginning_label(&self) -> String {
        format!("Beginning {}", self.cash_account)
    }

    pub fn ending_label(&self) -> String {
        format!("Ending {}", self.cash_account)
    }
}

fn compare_sections(
    ledger: &Ledger,
    comparison: Comparison,
    aggregation: &Aggregation<'_>,
    order: &[Category],
) -> Vec<ComparativeSection> {
    let current = aggregate(ledger, comparison.current(), aggregation);
    let previous = aggregate(ledger, comparison.previous(), aggregation);
    merge(&current, &previous, order)
}

fn income_sections(ledger: &Ledger, comparison: Comparison) -> Vec<ComparativeSection> {
    let order = StatementKind::IncomeStatement.section_order();
    let aggregation = Aggregation::new(AggregationRule::IncomeStatement).only(order);
    compare_sections(ledger, comparison, &aggregation, order)
}

fn section_total(sections: &[ComparativeSection], category: Category) -> ComparativeTotal {
    sections
        .iter()
        .find(|s| s.category == category)
        .map(|s| s.total)
        .unwrap_or_else(ComparativeTotal::zero)
}

/// Revenue total minus Expenses total, for both periods
pub fn net_income(ledger: &Ledger, comparison: Comparison) -> ComparativeTotal {
    let sections = income_sections(ledger, comparison);
    net_income_of(&sections)
}

fn net_income_of(sections: &[ComparativeSection]) -> ComparativeTotal {
    section_total(sections, Category::Revenue).minus(&section_total(sections, Category::Expenses))
}

/// Assets, Liabilities, Equity. Sections without accounts are left out.
pub fn balance_sheet(ledger: &Ledger, comparison: Comparison) -> Statement {
    let order = StatementKind::BalanceSheet.section_order();
    let aggregation = Aggregation::new(AggregationRule::DebitMinusCredit).only(order);
    let sections = compare_sections(ledger, comparison, &aggregation, order);

    let mut statement = Statement::new(StatementKind::BalanceSheet, comparison);
    for section in sections.iter().filter(|s| !s.is_empty()) {
        statement.push_section(section);
    }
    log_built(&statement);
    statement
}

/// Revenue and Expenses under the income statement sign rule, then Net Income
pub fn income_statement(ledger: &Ledger, comparison: Comparison) -> Statement {
    let sections = income_sections(ledger, comparison);

    let mut statement = Statement::new(StatementKind::IncomeStatement, comparison);
    for section in sections.iter().filter(|s| !s.is_empty()) {
        statement.push_section(section);
    }
    statement.push_derived(NET_INCOME_LABEL, &net_income_of(&sections));
    log_built(&statement);
    statement
}

/// Figures behind the cash flow statement
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CashFlowSummary {
    pub comparison: Comparison,
    pub net_income: ComparativeTotal,
    /// Operating, Investing, Financing; always all three
    pub activities: Vec<ComparativeSection>,
    pub net_activities: ComparativeTotal,
    pub beginning_cash: ComparativeTotal,
    pub ending_cash: ComparativeTotal,
}

/// Net Income, the three activity sections and the cash roll-forward.
///
/// Beginning cash for each column is the cash account's Σdebit − Σcredit
/// within the calendar period just before that column's period, zero when
/// there are no entries there.
pub fn cash_flow_summary(ledger: &Ledger, comparison: Comparison, settings: &StatementSettings) -> CashFlowSummary {
    let net_income = net_income(ledger, comparison);

    let order = StatementKind::CashFlow.section_order();
    let aggregation = Aggregation::new(AggregationRule::DebitMinusCredit)
        .only(order)
        .excluding(&settings.net_income_marker);
    let activities = compare_sections(ledger, comparison, &aggregation, order);

    let net_activities = activities
        .iter()
        .fold(net_income, |acc, section| acc.plus(&section.total));

    let beginning_cash = ComparativeTotal::new(
        account_balance(ledger, comparison.current().pred(), &settings.cash_account),
        account_balance(ledger, comparison.previous().pred(), &settings.cash_account),
    );
    let ending_cash = beginning_cash.plus(&net_activities);

    CashFlowSummary {
        comparison,
        net_income,
        activities,
        net_activities,
        beginning_cash,
        ending_cash,
    }
}

impl CashFlowSummary {
    pub fn to_statement(&self, settings: &StatementSettings) -> Statement {
        let mut statement = Statement::new(StatementKind::CashFlow, self.comparison);
        statement.push_derived(NET_INCOME_LABEL, &self.net_income);
        for section in &self.activities {
            statement.push_section(section);
        }
        statement.push_derived(NET_ACTIVITIES_LABEL, &self.net_activities);
        statement.push_derived(settings.beginning_label(), &self.beginning_cash);
        statement.push_derived(settings.ending_label(), &self.ending_cash);
        statement
    }
}

pub fn cash_flow_statement(ledger: &Ledger, comparison: Comparison, settings: &StatementSettings) -> Statement {
    let statement = cash_flow_summary(ledger, comparison, settings).to_statement(settings);
    log_built(&statement);
    statement
}

/// Build one statement by kind
pub fn build_statement(
    kind: StatementKind,
    ledger: &Ledger,
    comparison: Comparison,
    settings: &StatementSettings,
) -> Statement {
    match kind {
        StatementKind::BalanceSheet => balance_sheet(ledger, comparison),
        StatementKind::IncomeStatement => income_statement(ledger, comparison),
        StatementKind::CashFlow => cash_flow_statement(ledger, comparison, settings),
    }
}

fn log_built(statement: &Statement) {
    log::debug!(
        "Built {} for {} vs {} ({} rows)",
        statement.title,
        statement.comparison.current(),
        statement.comparison.previous(),
        statement.rows.len()
    );
}
