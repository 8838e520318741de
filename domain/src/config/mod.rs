//! Configuration concepts shared by the outer layers.
//!
//! - [`validation::ConfigIssue`]: a detected problem with a configured value

pub mod validation;

pub use validation::{ConfigIssue, ConfigIssueCode, Severity};
