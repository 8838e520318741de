//! Logging configuration from TOML (`[logging]` section)

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileLoggingConfig {
    /// JSONL transcript of dialogue events
    pub transcript: Option<String>,
    /// Diagnostic log file; diagnostics go to stderr when unset
    pub file: Option<String>,
}
