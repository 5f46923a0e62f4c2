//! Configuration management for Journey.
//!
//! Configuration is loaded from `$JOURNEY_CONFIG` or the platform config
//! directory. Unlike most sections, `[tools]` has no default: the path to the
//! image-processing executable must be supplied, so a missing file is fatal.

mod types;
mod validate;

pub use types::*;

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable that overrides the config file location.
pub const CONFIG_ENV: &str = "JOURNEY_CONFIG";

/// Root configuration structure for Journey.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// External tool locations
    pub tools: ToolsConfig,

    /// Thumbnail generation settings
    #[serde(default)]
    pub thumbnail: ThumbnailConfig,

    /// Report settings
    #[serde(default)]
    pub report: ReportConfig,

    /// Enrichment settings
    #[serde(default)]
    pub enrichment: EnrichmentConfig,

    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Build a configuration with defaults for everything but the image tool.
    pub fn with_tool(graphicsmagick: impl Into<PathBuf>) -> Self {
        Self {
            tools: ToolsConfig {
                graphicsmagick: graphicsmagick.into(),
            },
            thumbnail: ThumbnailConfig::default(),
            report: ReportConfig::default(),
            enrichment: EnrichmentConfig::default(),
            logging: LoggingConfig::default(),
        }
    }

    /// Load configuration from the default location.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::default_path())
    }

    /// Load configuration from a specific file path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.to_path_buf()));
        }
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Parse and validate configuration from TOML text.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Get the config file path.
    ///
    /// `$JOURNEY_CONFIG` wins when set. Otherwise uses platform-appropriate
    /// directories:
    /// - macOS: ~/Library/Application Support/com.journey.journey/config.toml
    /// - Linux: ~/.config/journey/config.toml
    /// - Windows: C:\Users\<User>\AppData\Roaming\journey\config\config.toml
    ///
    /// Falls back to ~/.journey/config.toml if directory detection fails.
    pub fn default_path() -> PathBuf {
        if let Some(path) = std::env::var_os(CONFIG_ENV).filter(|v| !v.is_empty()) {
            return PathBuf::from(path);
        }
        directories::ProjectDirs::from("com", "journey", "journey")
            .map(|dirs| dirs.config_dir().to_path_buf().join("config.toml"))
            .unwrap_or_else(|| {
                let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
                PathBuf::from(home).join(".journey").join("config.toml")
            })
    }

    /// Get the resolved image tool path (with ~ expansion).
    pub fn graphicsmagick_path(&self) -> PathBuf {
        expand(&self.tools.graphicsmagick)
    }

    /// Get the resolved custom template path, if one is configured.
    pub fn template_path(&self) -> Option<PathBuf> {
        self.report.template.as_deref().map(expand)
    }
}

fn expand(path: &Path) -> PathBuf {
    let path_str = path.to_string_lossy();
    let expanded = shellexpand::tilde(&path_str);
    PathBuf::from(expanded.into_owned())
}
