//! Error types for finstatements-core
//!
//! Every fatal condition a statement request can hit, with error codes,
//! severities and suggestions for the person running the report.

use finstatements_config::ConfigError;
use finstatements_loader::LoadError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error codes for programmatic error handling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Ledger source missing or unreadable
    DataUnavailable,
    /// Account type without a category
    UnmappedAccountType,
    /// Not enough periods to compare
    InsufficientPeriods,
    /// Period string or pair is malformed
    InvalidPeriod,
    /// Configuration error
    ConfigError,
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorCode::DataUnavailable => write!(f, "DATA_UNAVAILABLE"),
            ErrorCode::UnmappedAccountType => write!(f, "UNMAPPED_ACCOUNT_TYPE"),
            ErrorCode::InsufficientPeriods => write!(f, "INSUFFICIENT_PERIODS"),
            ErrorCode::InvalidPeriod => write!(f, "INVALID_PERIOD"),
            ErrorCode::ConfigError => write!(f, "CONFIG_ERROR"),
        }
    }
}

/// Detailed error information for display
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorDetails {
    /// Error code
    pub code: ErrorCode,
    /// Human-readable message
    pub message: String,
    /// Additional details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
    /// Suggestions for resolution
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub suggestions: Vec<String>,
}

impl ErrorDetails {
    /// Create a new error detail
    pub fn new(code: ErrorCode, message: String) -> Self {
        Self {
            code,
            message,
            details: None,
            suggestions: vec![],
        }
    }

    /// Add detail information
    pub fn with_detail(mut self, detail: serde_json::Value) -> Self {
        self.details = Some(detail);
        self
    }

    /// Add a suggestion
    pub fn with_suggestion(mut self, suggestion: String) -> Self {
        self.suggestions.push(suggestion);
        self
    }
}

impl std::fmt::Display for ErrorDetails {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)?;
        if let Some(ref details) = self.details {
            write!(f, "\nDetails: {}", details)?;
        }
        if !self.suggestions.is_empty() {
            write!(f, "\nSuggestions:")?;
            for suggestion in &self.suggestions {
                write!(f, "\n  - {}", suggestion)?;
            }
        }
        Ok(())
    }
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorSeverity {
    /// Warning - the report cannot be produced but nothing is broken
    Warning,
    /// Error - the input data is wrong
    Error,
    /// Critical - nothing can be reported at all
    Critical,
}

impl std::fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorSeverity::Warning => write!(f, "warning"),
            ErrorSeverity::Error => write!(f, "error"),
            ErrorSeverity::Critical => write!(f, "critical"),
        }
    }
}

/// Main error type for finstatements-core
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Ledger data unavailable from {origin}: {reason}")]
    DataUnavailable { origin: String, reason: String },

    #[error("Unmapped account type '{account_type}' on ledger row {row}")]
    UnmappedAccountType { account_type: String, row: usize },

    #[error("Insufficient periods: {reason}")]
    InsufficientPeriods { reason: String },

    #[error("Invalid period '{value}': {reason}")]
    InvalidPeriod { value: String, reason: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },
}

impl CoreError {
    /// Wrap a loader failure for a named source
    pub fn data_unavailable(origin: impl Into<String>, error: &LoadError) -> Self {
        CoreError::DataUnavailable {
            origin: origin.into(),
            reason: error.to_string(),
        }
    }

    /// Get the error code
    pub fn code(&self) -> ErrorCode {
        match self {
            CoreError::DataUnavailable { .. } => ErrorCode::DataUnavailable,
            CoreError::UnmappedAccountType { .. } => ErrorCode::UnmappedAccountType,
            CoreError::InsufficientPeriods { .. } => ErrorCode::InsufficientPeriods,
            CoreError::InvalidPeriod { .. } => ErrorCode::InvalidPeriod,
            CoreError::ConfigError { .. } => ErrorCode::ConfigError,
        }
    }

    /// Get the severity level
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            CoreError::DataUnavailable { .. } => ErrorSeverity::Critical,
            CoreError::UnmappedAccountType { .. } => ErrorSeverity::Error,
            CoreError::InsufficientPeriods { .. } => ErrorSeverity::Warning,
            CoreError::InvalidPeriod { .. } => ErrorSeverity::Warning,
            CoreError::ConfigError { .. } => ErrorSeverity::Critical,
        }
    }

    /// Convert to detailed error info
    pub fn to_details(&self) -> ErrorDetails {
        let mut details = ErrorDetails::new(self.code(), self.to_string());

        match self {
            CoreError::DataUnavailable { origin, .. } => {
                details = details.with_detail(serde_json::json!({ "origin": origin }));
                details = details.with_suggestion(
                    "Check that the ledger file exists and is readable.".to_string()
                );
                details = details.with_suggestion(
                    "The ledger needs the columns Date, Account Type, Account Name, Debit and Credit.".to_string()
                );
            }
            CoreError::UnmappedAccountType { account_type, row } => {
                details = details.with_detail(serde_json::json!({
                    "account_type": account_type,
                    "row": row,
                }));
                details = details.with_suggestion(format!(
                    "Correct the account type on row {} or map '{}' under categories.aliases.",
                    row, account_type
                ));
            }
            CoreError::InsufficientPeriods { .. } => {
                details = details.with_suggestion(
                    "Comparisons need at least two periods of ledger data.".to_string()
                );
                details = details.with_suggestion(
                    "Pick a previous period earlier than the current one.".to_string()
                );
            }
            CoreError::InvalidPeriod { .. } => {
                details = details.with_suggestion(
                    "Months are written YYYY-MM and years YYYY; both periods must use the same form.".to_string()
                );
            }
            CoreError::ConfigError { .. } => {}
        }

        details
    }
}

/// Result type with CoreError
pub type CoreResult<T> = Result<T, CoreError>;

impl From<LoadError> for CoreError {
    fn from(error: LoadError) -> Self {
        let origin = match &error {
            LoadError::NotFound { path } => path.clone(),
            _ => "ledger".to_string(),
        };
        CoreError::data_unavailable(origin, &error)
    }
}

impl From<ConfigError> for CoreError {
    fn from(error: ConfigError) -> Self {
        CoreError::ConfigError {
            message: error.to_string(),
        }
    }
}

/// Error context for reporting
#[derive(Debug, Clone, Default)]
pub struct ErrorContext {
    /// Operation being performed
    pub operation: String,
    /// Additional context data
    pub data: serde_json::Value,
}

impl ErrorContext {
    /// Create a new error context
    pub fn new(operation: String) -> Self {
        Self {
            operation,
            data: serde_json::json!({}),
        }
    }

    /// Add context data
    pub fn with_data(mut self, key: &str, value: serde_json::Value) -> Self {
        self.data[key] = value;
        self
    }
}

/// Error logger trait
pub trait ErrorLogger {
    /// Log an error
    fn log_error(&self, error: &CoreError, context: &ErrorContext);
}

/// Default error logger using log crate
#[derive(Default)]
pub struct DefaultErrorLogger;

impl ErrorLogger for DefaultErrorLogger {
    fn log_error(&self, error: &CoreError, context: &ErrorContext) {
        let details = error.to_details();
        match error.severity() {
            ErrorSeverity::Warning => log::warn!(
                target: "finstatements::error",
                "{} - Operation: {} - Context: {}",
                details,
                context.operation,
                context.data
            ),
            ErrorSeverity::Error | ErrorSeverity::Critical => log::error!(
                target: "finstatements::error",
                "{} - Operation: {} - Context: {}",
                details,
                context.operation,
                context.data
            ),
        }
    }
}

// ==================== Tests ====================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_display() {
        assert_eq!(ErrorCode::DataUnavailable.to_string(), "DATA_UNAVAILABLE");
        assert_eq!(ErrorCode::UnmappedAccountType.to_string(), "UNMAPPED_ACCOUNT_TYPE");
        assert_eq!(ErrorCode::InsufficientPeriods.to_string(), "INSUFFICIENT_PERIODS");
    }

    #[test]
    fn test_core_error_severity() {
        let error = CoreError::InsufficientPeriods { reason: "one month".to_string() };
        assert_eq!(error.severity(), ErrorSeverity::Warning);

        let error = CoreError::DataUnavailable {
            origin: "ledger.csv".to_string(),
            reason: "missing".to_string(),
        };
        assert_eq!(error.severity(), ErrorSeverity::Critical);

        let error = CoreError::UnmappedAccountType { account_type: "Misc".to_string(), row: 3 };
        assert_eq!(error.severity(), ErrorSeverity::Error);
    }

    #[test]
    fn test_from_load_error() {
        let error: CoreError = LoadError::NotFound { path: "trial_balance.csv".to_string() }.into();
        assert_eq!(error.code(), ErrorCode::DataUnavailable);
        assert!(error.to_string().contains("trial_balance.csv"));

        let error: CoreError = LoadError::MissingColumn { column: "Credit".to_string() }.into();
        assert!(error.to_string().contains("Credit"));
    }

    #[test]
    fn test_unmapped_details() {
        let error = CoreError::UnmappedAccountType { account_type: "Misc".to_string(), row: 7 };
        let details = error.to_details();
        assert_eq!(details.code, ErrorCode::UnmappedAccountType);
        assert!(details.details.is_some());
        assert!(details.suggestions[0].contains("row 7"));
        assert!(details.to_string().starts_with("[UNMAPPED_ACCOUNT_TYPE]"));
    }

    #[test]
    fn test_error_context() {
        let context = ErrorContext::new("statements".to_string())
            .with_data("current", serde_json::json!("2025-05"));
        assert_eq!(context.operation, "statements");
        assert_eq!(context.data["current"], "2025-05");
    }
}
