//! Presentation-level configuration
//!
//! Configuration for output formatting and REPL behavior.

use std::path::PathBuf;

/// Output configuration for the presentation layer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputConfig {
    /// Enable colored terminal output
    pub color: bool,
    /// Show a spinner while a persona is thinking
    pub show_progress: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            color: true,
            show_progress: true,
        }
    }
}

/// REPL configuration for the presentation layer
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReplConfig {
    /// Path to history file; `None` uses the data directory
    pub history_file: Option<PathBuf>,
}

impl ReplConfig {
    /// Resolved history location
    pub fn history_path(&self) -> Option<PathBuf> {
        self.history_file
            .clone()
            .or_else(|| dirs::data_dir().map(|p| p.join("agora").join("history.txt")))
    }
}
