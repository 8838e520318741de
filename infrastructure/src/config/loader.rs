//! Configuration file loader with multi-source merging

use super::file_config::FileConfig;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use std::path::{Path, PathBuf};
use thiserror::Error;

const PROJECT_FILES: [&str; 2] = ["agora.toml", ".agora.toml"];
const ENV_PREFIX: &str = "AGORA_";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    Extract(#[from] Box<figment::Error>),

    #[error("Config file not found: {0}")]
    NotFound(PathBuf),
}

/// Configuration loader that handles file discovery and merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from all sources with proper priority
    pub fn load(config_path: Option<&Path>) -> Result<FileConfig, ConfigError> {
        if let Some(path) = config_path
            && !path.exists()
        {
            return Err(ConfigError::NotFound(path.to_path_buf()));
        }

        Self::figment(
            Self::global_config_path().as_deref(),
            Self::project_config_path().as_deref(),
            config_path,
        )
        .extract()
        .map_err(|e| ConfigError::Extract(Box::new(e)))
    }

    /// Load only default configuration (for --no-config)
    pub fn load_defaults() -> FileConfig {
        FileConfig::default()
    }

    fn figment(global: Option<&Path>, project: Option<&Path>, explicit: Option<&Path>) -> Figment {
        let mut figment = Figment::new().merge(Serialized::defaults(FileConfig::default()));

        if let Some(path) = global
            && path.exists()
        {
            figment = figment.merge(Toml::file(path));
        }
        if let Some(path) = project {
            figment = figment.merge(Toml::file(path));
        }
        if let Some(path) = explicit {
            figment = figment.merge(Toml::file(path));
        }

        figment.merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    /// Get the global config file path
    ///
    /// Returns XDG_CONFIG_HOME/agora/config.toml if set,
    /// otherwise falls back to ~/.config/agora/config.toml
    pub fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("agora").join("config.toml"))
    }

    /// Get the project-level config file path (if it exists)
    pub fn project_config_path() -> Option<PathBuf> {
        PROJECT_FILES
            .iter()
            .map(PathBuf::from)
            .find(|path| path.exists())
    }

    /// Print the config file locations being used (for debugging)
    pub fn print_config_sources(explicit: Option<&Path>) {
        println!("Configuration sources (in priority order):");

        println!("  [ENV  ] Environment: {}<SECTION>__<KEY>", ENV_PREFIX);

        if let Some(path) = explicit {
            let mark = if path.exists() { "FOUND" } else { "MISS " };
            println!("  [{}] Explicit: {}", mark, path.display());
        }

        if let Some(path) = Self::project_config_path() {
            println!("  [FOUND] Project: {}", path.display());
        } else {
            println!("  [     ] Project: ./agora.toml or ./.agora.toml");
        }

        if let Some(path) = Self::global_config_path() {
            if path.exists() {
                println!("  [FOUND] Global:  {}", path.display());
            } else {
                println!("  [     ] Global:  {}", path.display());
            }
        }

        println!("  [     ] Default: built-in defaults");
    }
}

/// Expand a leading `~/` to the home directory
pub fn expand_home(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/")
        && let Some(home) = dirs::home_dir()
    {
        return home.join(rest);
    }
    PathBuf::from(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;

    #[test]
    fn test_load_defaults() {
        let config = ConfigLoader::load_defaults();
        assert_eq!(config.completion.model, "gpt-4o-mini");
        assert_eq!(config.dialogue.clarification_limit, 3);
    }

    #[test]
    fn test_global_config_path_returns_some() {
        let path = ConfigLoader::global_config_path();
        assert!(path.is_some());
        let path = path.unwrap();
        assert!(path.to_string_lossy().contains("agora"));
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let result = ConfigLoader::load(Some(Path::new("/definitely/not/here/agora.toml")));
        assert!(matches!(result, Err(ConfigError::NotFound(_))));
    }

    #[test]
    fn test_sources_merge_in_priority_order() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "global.toml",
                r#"
[completion]
model = "gpt-4o"
temperature = 0.5

[pacing]
turn_ms = 100
"#,
            )?;
            jail.create_file(
                "agora.toml",
                r#"
[completion]
temperature = 0.7
"#,
            )?;
            jail.create_file(
                "explicit.toml",
                r#"
[dialogue]
discussion_rounds = 2
"#,
            )?;
            jail.set_env("AGORA_COMPLETION__MAX_TOKENS", "250");

            let config: FileConfig = ConfigLoader::figment(
                Some(Path::new("global.toml")),
                Some(Path::new("agora.toml")),
                Some(Path::new("explicit.toml")),
            )
            .extract()?;

            assert_eq!(config.completion.model, "gpt-4o");
            assert_eq!(config.completion.temperature, 0.7);
            assert_eq!(config.completion.max_tokens, 250);
            assert_eq!(config.pacing.turn_ms, 100);
            assert_eq!(config.pacing.announce_ms, 1000);
            assert_eq!(config.dialogue.discussion_rounds, 2);
            Ok(())
        });
    }

    #[test]
    fn test_expand_home() {
        assert_eq!(expand_home("/tmp/x"), PathBuf::from("/tmp/x"));
        if let Some(home) = dirs::home_dir() {
            assert_eq!(expand_home("~/notes.txt"), home.join("notes.txt"));
        }
    }
}
