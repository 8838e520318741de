//! Structured configuration issues.
//!
//! Loaders validate raw values and report every problem at once as a list of
//! [`ConfigIssue`]s instead of failing on the first one.
//!
//! # Examples
//!
//! ```
//! use agora_domain::config::{ConfigIssue, Severity};
//!
//! let issue = ConfigIssue::out_of_range("completion.temperature", "must be between 0 and 2");
//! assert_eq!(issue.severity, Severity::Error);
//! ```

/// Severity level of a configuration issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Fatal: the configuration cannot work at all.
    Error,
    /// Non-fatal: the configuration works but may not behave as expected.
    Warning,
}

/// Identifies a specific configuration issue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigIssueCode {
    /// A numeric value lies outside its accepted range.
    OutOfRange { field: String },
    /// A required text value is empty.
    EmptyValue { field: String },
    /// A value is accepted but unusual.
    Suspicious { field: String },
}

/// A detected issue in the configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigIssue {
    pub severity: Severity,
    pub code: ConfigIssueCode,
    pub message: String,
}

impl ConfigIssue {
    pub fn out_of_range(field: &str, detail: &str) -> Self {
        Self {
            severity: Severity::Error,
            code: ConfigIssueCode::OutOfRange {
                field: field.to_string(),
            },
            message: format!("{}: {}", field, detail),
        }
    }

    pub fn empty_value(field: &str) -> Self {
        Self {
            severity: Severity::Error,
            code: ConfigIssueCode::EmptyValue {
                field: field.to_string(),
            },
            message: format!("{}: must not be empty", field),
        }
    }

    pub fn suspicious(field: &str, detail: &str) -> Self {
        Self {
            severity: Severity::Warning,
            code: ConfigIssueCode::Suspicious {
                field: field.to_string(),
            },
            message: format!("{}: {}", field, detail),
        }
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}
