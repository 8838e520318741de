//! Configuration file loading for agora
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. Environment: `AGORA_<SECTION>__<KEY>` (e.g. `AGORA_COMPLETION__MODEL`)
//! 2. `--config <path>` specified file
//! 3. Project root: `./agora.toml` or `./.agora.toml`
//! 4. XDG config: `$XDG_CONFIG_HOME/agora/config.toml`
//!    (fallback `~/.config/agora/config.toml`)
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{
    FileCompletionConfig, FileConfig, FileDialogueConfig, FileLoggingConfig, FileOutputConfig,
    FilePacingConfig, FileReplConfig,
};
pub use loader::{ConfigError, ConfigLoader, expand_home};
