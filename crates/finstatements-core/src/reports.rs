//! Report rows and rendered statements

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::compare::{ComparativeSection, ComparativeTotal};
use crate::format::{percent_cell, CurrencyFormat};
use crate::models::ComparativeRow;
use crate::period::Comparison;
use crate::types::Category;

/// The three statements
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StatementKind {
    BalanceSheet,
    IncomeStatement,
    CashFlow,
}

impl StatementKind {
    pub const ALL: [StatementKind; 3] = [
        StatementKind::BalanceSheet,
        StatementKind::IncomeStatement,
        StatementKind::CashFlow,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            StatementKind::BalanceSheet => "Balance Sheet",
            StatementKind::IncomeStatement => "Income Statement",
            StatementKind::CashFlow => "Cash Flow Statement",
        }
    }

    /// Sections shown on the statement, in order
    pub fn section_order(&self) -> &'static [Category] {
        match self {
            StatementKind::BalanceSheet => &[Category::Assets, Category::Liabilities, Category::Equity],
            StatementKind::IncomeStatement => &[Category::Revenue, Category::Expenses],
            StatementKind::CashFlow => &[
                Category::OperatingActivities,
                Category::InvestingActivities,
                Category::FinancingActivities,
            ],
        }
    }
}

impl std::fmt::Display for StatementKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.title())
    }
}

/// What a report row represents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RowKind {
    Header,
    LineItem,
    Subtotal,
    /// Net Income, Net Activities, Beginning/Ending Cash
    Derived,
}

/// One statement row, unformatted
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportRow {
    pub kind: RowKind,
    pub label: String,
    /// Section the row belongs to; `None` for derived rows
    pub category: Option<Category>,
    pub current: Option<Decimal>,
    pub previous: Option<Decimal>,
    pub delta: Option<Decimal>,
    /// Always present on line items; absent on totals with a zero previous
    pub pct_change: Option<Decimal>,
}

impl ReportRow {
    pub fn header(category: Category) -> Self {
        Self {
            kind: RowKind::Header,
            label: category.label().to_string(),
            category: Some(category),
            current: None,
            previous: None,
            delta: None,
            pct_change: None,
        }
    }

    pub fn line_item(row: &ComparativeRow) -> Self {
        Self {
            kind: RowKind::LineItem,
            label: row.account_name.clone(),
            category: Some(row.category),
            current: Some(row.current),
            previous: Some(row.previous),
            delta: Some(row.delta),
            pct_change: Some(row.pct_change),
        }
    }

    pub fn subtotal(section: &ComparativeSection) -> Self {
        Self::from_total(
            RowKind::Subtotal,
            format!("Total {}", section.category.label()),
            Some(section.category),
            &section.total,
        )
    }

    pub fn derived(label: impl Into<String>, total: &ComparativeTotal) -> Self {
        Self::from_total(RowKind::Derived, label.into(), None, total)
    }

    fn from_total(kind: RowKind, label: String, category: Option<Category>, total: &ComparativeTotal) -> Self {
        Self {
            kind,
            label,
            category,
            current: Some(total.current),
            previous: Some(total.previous),
            delta: Some(total.delta),
            pct_change: total.pct_change,
        }
    }

    pub fn is_emphasized(&self) -> bool {
        !matches!(self.kind, RowKind::LineItem)
    }
}

/// A built statement: ordered rows for one comparison
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Statement {
    pub kind: StatementKind,
    pub title: String,
    pub comparison: Comparison,
    pub rows: Vec<ReportRow>,
}

impl Statement {
    pub fn new(kind: StatementKind, comparison: Comparison) -> Self {
        Self {
            kind,
            title: kind.title().to_string(),
            comparison,
            rows: Vec::new(),
        }
    }

    /// Header, line items, subtotal
    pub fn push_section(&mut self, section: &ComparativeSection) {
        self.rows.push(ReportRow::header(section.category));
        self.rows.extend(section.rows.iter().map(ReportRow::line_item));
        self.rows.push(ReportRow::subtotal(section));
    }

    pub fn push_derived(&mut self, label: impl Into<String>, total: &ComparativeTotal) {
        self.rows.push(ReportRow::derived(label, total));
    }

    /// Row of the given kind and label.
    ///
    /// Account names may repeat a derived or subtotal label, so the kind is
    /// part of the key.
    pub fn find(&self, kind: RowKind, label: &str) -> Option<&ReportRow> {
        self.rows.iter().find(|r| r.kind == kind && r.label == label)
    }

    pub fn line_item(&self, label: &str) -> Option<&ReportRow> {
        self.find(RowKind::LineItem, label)
    }

    /// Subtotal closing the section for `category`
    pub fn subtotal(&self, category: Category) -> Option<&ReportRow> {
        self.rows
            .iter()
            .find(|r| r.kind == RowKind::Subtotal && r.category == Some(category))
    }

    pub fn derived(&self, label: &str) -> Option<&ReportRow> {
        self.find(RowKind::Derived, label)
    }

    /// Format every cell for display
    pub fn render(&self, currency: &CurrencyFormat) -> RenderedStatement {
        let headings = [
            "Account Name".to_string(),
            format!("Amount ({})", self.comparison.current().label()),
            format!("Amount ({})", self.comparison.previous().label()),
            format!("{} Change", currency.symbol()),
            "% Change".to_string(),
        ];

        let rows = self
            .rows
            .iter()
            .map(|row| RenderedRow {
                label: row.label.clone(),
                current: currency.cell(row.current),
                previous: currency.cell(row.previous),
                change: currency.cell(row.delta),
                percent: percent_cell(row.pct_change),
                emphasis: row.is_emphasized(),
            })
            .collect();

        RenderedStatement {
            title: self.title.clone(),
            headings,
            rows,
        }
    }
}

/// A display-ready row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderedRow {
    pub label: String,
    pub current: String,
    pub previous: String,
    pub change: String,
    pub percent: String,
    pub emphasis: bool,
}

impl RenderedRow {
    pub fn cells(&self) -> [&str; 5] {
        [&self.label, &self.current, &self.previous, &self.change, &self.percent]
    }
}

/// A display-ready statement
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderedStatement {
    pub title: String,
    pub headings: [String; 5],
    pub rows: Vec<RenderedRow>,
}
