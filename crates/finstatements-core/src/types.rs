//! Account categories and the account type mapping

use finstatements_loader::LedgerRecord;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::{CoreError, CoreResult};

/// Report section an account belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Category {
    Assets,
    Liabilities,
    Equity,
    Revenue,
    Expenses,
    OperatingActivities,
    InvestingActivities,
    FinancingActivities,
}

impl Category {
    /// Every category, in declaration order
    pub const ALL: [Category; 8] = [
        Category::Assets,
        Category::Liabilities,
        Category::Equity,
        Category::Revenue,
        Category::Expenses,
        Category::OperatingActivities,
        Category::InvestingActivities,
        Category::FinancingActivities,
    ];

    /// Section label shown on statements
    pub fn label(&self) -> &'static str {
        match self {
            Category::Assets => "Assets",
            Category::Liabilities => "Liabilities",
            Category::Equity => "Equity",
            Category::Revenue => "Revenue",
            Category::Expenses => "Expenses",
            Category::OperatingActivities => "Operating Activities",
            Category::InvestingActivities => "Investing Activities",
            Category::FinancingActivities => "Financing Activities",
        }
    }

    /// Look a category up by its section label
    pub fn from_label(label: &str) -> Option<Category> {
        Category::ALL.iter().copied().find(|c| c.label() == label)
    }

    /// Whether the category is one of the three cash flow activity sections
    pub fn is_cash_flow(&self) -> bool {
        matches!(
            self,
            Category::OperatingActivities | Category::InvestingActivities | Category::FinancingActivities
        )
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Total mapping from raw account type to category.
///
/// Lookups are exact. A type missing from the table is a data error and is
/// reported as [`CoreError::UnmappedAccountType`]; nothing is silently dropped.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryMap {
    table: BTreeMap<String, Category>,
}

impl Default for CategoryMap {
    fn default() -> Self {
        let table = [
            ("Asset", Category::Assets),
            ("Liability", Category::Liabilities),
            ("Equity", Category::Equity),
            ("Revenue", Category::Revenue),
            ("Expense", Category::Expenses),
            ("Cash Flow Operating", Category::OperatingActivities),
            ("Cash Flow Investing", Category::InvestingActivities),
            ("Cash Flow Financing", Category::FinancingActivities),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect();
        Self { table }
    }
}

impl CategoryMap {
    /// Fixed table extended with configured aliases (`account type -> category label`)
    pub fn with_aliases(aliases: &BTreeMap<String, String>) -> CoreResult<Self> {
        let mut map = Self::default();
        for (account_type, label) in aliases {
            let category = Category::from_label(label).ok_or_else(|| CoreError::ConfigError {
                message: format!("alias '{}' points at unknown category '{}'", account_type, label),
            })?;
            map.table.insert(account_type.clone(), category);
        }
        Ok(map)
    }

    /// Category for a raw account type, if mapped
    pub fn lookup(&self, account_type: &str) -> Option<Category> {
        self.table.get(account_type).copied()
    }

    /// Category for a ledger record, failing on unmapped types
    pub fn categorize(&self, record: &LedgerRecord) -> CoreResult<Category> {
        self.lookup(&record.account_type)
            .ok_or_else(|| CoreError::UnmappedAccountType {
                account_type: record.account_type.clone(),
                row: record.row,
            })
    }
}
