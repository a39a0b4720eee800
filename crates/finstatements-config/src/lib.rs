//! Configuration management for finstatements
//!
//! This module handles loading, validation, and management of
//! finstatements configuration from YAML files.

pub mod error;

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

pub use error::{ConfigError, ConfigResult};

/// Report section labels an account type alias may point at.
pub const CATEGORY_LABELS: [&str; 8] = [
    "Assets",
    "Liabilities",
    "Equity",
    "Revenue",
    "Expenses",
    "Operating Activities",
    "Investing Activities",
    "Financing Activities",
];

// ==================== Configuration Types ====================

/// Ledger source configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedgerConfig {
    /// Path to the ledger CSV file
    #[serde(default = "default_ledger_path")]
    pub path: PathBuf,
    /// Date formats tried in order for every row
    #[serde(default = "default_date_formats")]
    pub date_formats: Vec<String>,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            path: default_ledger_path(),
            date_formats: default_date_formats(),
        }
    }
}

fn default_ledger_path() -> PathBuf {
    PathBuf::from("./data/trial_balance.csv")
}

fn default_date_formats() -> Vec<String> {
    vec![
        "%Y-%m-%d".to_string(),
        "%Y-%m-%d %H:%M:%S".to_string(),
        "%d/%m/%Y".to_string(),
    ]
}

/// Statement generation settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Default comparison granularity
    #[serde(default)]
    pub granularity: Granularity,
    /// Account name whose balance is rolled forward on the cash flow statement
    #[serde(default = "default_cash_account")]
    pub cash_account: String,
    /// Cash flow lines whose name contains this marker are skipped
    #[serde(default = "default_net_income_marker")]
    pub net_income_marker: String,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            granularity: Granularity::Month,
            cash_account: default_cash_account(),
            net_income_marker: default_net_income_marker(),
        }
    }
}

fn default_cash_account() -> String {
    "Cash at Bank".to_string()
}

fn default_net_income_marker() -> String {
    "Net Income".to_string()
}

/// Comparison granularity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    /// Calendar month
    Month,
    /// Calendar year
    Year,
}

impl Default for Granularity {
    fn default() -> Self {
        Granularity::Month
    }
}

impl std::str::FromStr for Granularity {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "month" | "monthly" => Ok(Granularity::Month),
            "year" | "yearly" => Ok(Granularity::Year),
            _ => Err(format!("Invalid granularity: {}", s)),
        }
    }
}

impl std::fmt::Display for Granularity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Granularity::Month => write!(f, "month"),
            Granularity::Year => write!(f, "year"),
        }
    }
}

/// Currency formatting
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrencyConfig {
    /// Symbol prefixed to every amount
    #[serde(default = "default_symbol")]
    pub symbol: String,
    /// Thousands separator
    #[serde(default = "default_thousands_sep")]
    pub thousands_separator: String,
}

impl Default for CurrencyConfig {
    fn default() -> Self {
        Self {
            symbol: default_symbol(),
            thousands_separator: default_thousands_sep(),
        }
    }
}

fn default_symbol() -> String {
    "₹".to_string()
}

fn default_thousands_sep() -> String {
    ",".to_string()
}

/// Extra account type mappings layered over the fixed table
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct CategoriesConfig {
    /// Raw account type -> category label
    #[serde(default)]
    pub aliases: BTreeMap<String, String>,
}

/// A named group of accounts plotted on the dashboard.
///
/// An entry counts toward the metric when its account name is in `accounts`
/// or its raw account type is in `account_types`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricConfig {
    pub name: String,
    #[serde(default)]
    pub accounts: Vec<String>,
    #[serde(default)]
    pub account_types: Vec<String>,
}

impl MetricConfig {
    fn new(name: &str, accounts: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            accounts: accounts.iter().map(|a| a.to_string()).collect(),
            account_types: Vec::new(),
        }
    }

    fn of_types(name: &str, account_types: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            accounts: Vec::new(),
            account_types: account_types.iter().map(|t| t.to_string()).collect(),
        }
    }
}

/// Dashboard trend settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardConfig {
    /// Number of most recent months to include
    #[serde(default = "default_window")]
    pub window: usize,
    /// Metrics in display order
    #[serde(default = "default_metrics")]
    pub metrics: Vec<MetricConfig>,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            window: default_window(),
            metrics: default_metrics(),
        }
    }
}

fn default_window() -> usize {
    15
}

fn default_metrics() -> Vec<MetricConfig> {
    vec![
        MetricConfig::new("Cash", &["Cash", "Cash at Bank"]),
        MetricConfig::new("Revenue", &["Service Revenue"]),
        MetricConfig::new("Expenses", &["Salaries Expense"]),
        MetricConfig::of_types("Net Assets", &["Asset", "Liability"]),
        MetricConfig::new("Investments", &["Investments"]),
    ]
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level: debug, info, warn, error
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Ledger source settings
    #[serde(default)]
    pub ledger: LedgerConfig,
    /// Statement settings
    #[serde(default)]
    pub report: ReportConfig,
    /// Currency settings
    #[serde(default)]
    pub currency: CurrencyConfig,
    /// Account type aliases
    #[serde(default)]
    pub categories: CategoriesConfig,
    /// Dashboard settings
    #[serde(default)]
    pub dashboard: DashboardConfig,
    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a YAML file
    pub fn load(path: PathBuf) -> ConfigResult<Self> {
        if !path.exists() {
            return Err(ConfigError::FileNotFound {
                path: path.to_string_lossy().to_string(),
            });
        }

        let content = std::fs::read_to_string(&path)?;
        let config = Self::from_yaml(&content)?;
        Ok(config)
    }

    /// Parse and validate configuration from YAML text
    pub fn from_yaml(content: &str) -> ConfigResult<Self> {
        let config: Config = serde_yaml::from_str(content)
            .map_err(|e| ConfigError::InvalidYaml { message: e.to_string() })?;

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> ConfigResult<()> {
        if self.ledger.date_formats.is_empty() {
            return Err(ConfigError::MissingField {
                field: "ledger.date_formats".to_string(),
            });
        }

        if self.report.cash_account.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "report.cash_account".to_string(),
                reason: "Cash account name must not be empty".to_string(),
            });
        }

        if self.currency.symbol.is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "currency.symbol".to_string(),
                reason: "Currency symbol must not be empty".to_string(),
            });
        }

        if self.dashboard.window == 0 {
            return Err(ConfigError::InvalidValue {
                field: "dashboard.window".to_string(),
                reason: "Dashboard window must be at least 1".to_string(),
            });
        }

        for metric in &self.dashboard.metrics {
            if metric.accounts.is_empty() && metric.account_types.is_empty() {
                return Err(ConfigError::InvalidValue {
                    field: format!("dashboard.metrics.{}", metric.name),
                    reason: "Metric must list at least one account or account type".to_string(),
                });
            }
        }

        for (account_type, target) in &self.categories.aliases {
            if !CATEGORY_LABELS.contains(&target.as_str()) {
                return Err(ConfigError::InvalidValue {
                    field: format!("categories.aliases.{}", account_type),
                    reason: format!(
                        "'{}' is not a category; expected one of: {}",
                        target,
                        CATEGORY_LABELS.join(", ")
                    ),
                });
            }
        }

        Ok(())
    }

    /// Generate a default configuration file
    pub fn generate_default() -> &'static str {
        include_str!("../templates/default_config.yaml")
    }

    /// Get the path to the ledger file
    pub fn ledger_path(&self) -> PathBuf {
        self.ledger.path.clone()
    }
}

// ==================== Tests ====================
