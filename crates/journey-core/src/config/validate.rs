//! Configuration validation with range checks.

use std::path::{Component, Path};
use tokio::sync::Semaphore;

use crate::error::ConfigError;

use super::Config;

const LOG_LEVELS: &[&str] = &["error", "warn", "info", "debug", "trace"];
const LOG_FORMATS: &[&str] = &["pretty", "json"];

impl Config {
    /// Validate configuration values are within acceptable ranges.
    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        if self.tools.graphicsmagick.as_os_str().is_empty() {
            return Err(ConfigError::ValidationError(
                "tools.graphicsmagick must not be empty".into(),
            ));
        }
        if self.thumbnail.max_width == 0 || self.thumbnail.max_height == 0 {
            return Err(ConfigError::ValidationError(
                "thumbnail.max_width and thumbnail.max_height must be > 0".into(),
            ));
        }
        if !is_single_component(&self.thumbnail.dir_name) {
            return Err(ConfigError::ValidationError(
                "thumbnail.dir_name must be a plain directory name".into(),
            ));
        }
        if !is_single_component(&self.report.output_name) {
            return Err(ConfigError::ValidationError(
                "report.output_name must be a plain file name".into(),
            ));
        }
        if self.thumbnail.dir_name == self.report.output_name {
            return Err(ConfigError::ValidationError(
                "thumbnail.dir_name and report.output_name must differ".into(),
            ));
        }
        if let Some(max) = self.enrichment.max_concurrent {
            if max == 0 || max > Semaphore::MAX_PERMITS {
                return Err(ConfigError::ValidationError(format!(
                    "enrichment.max_concurrent must be between 1 and {} when set",
                    Semaphore::MAX_PERMITS
                )));
            }
        }
        if !LOG_LEVELS.contains(&self.logging.level.as_str()) {
            return Err(ConfigError::ValidationError(format!(
                "logging.level must be one of {}",
                LOG_LEVELS.join(", ")
            )));
        }
        if !LOG_FORMATS.contains(&self.logging.format.as_str()) {
            return Err(ConfigError::ValidationError(format!(
                "logging.format must be one of {}",
                LOG_FORMATS.join(", ")
            )));
        }
        Ok(())
    }
}

fn is_single_component(name: &str) -> bool {
    let mut components = Path::new(name).components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    )
}
