//! Sub-configuration structs with their defaults.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// External tool locations. The only section without defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolsConfig {
    /// Path to the GraphicsMagick `gm` executable
    pub graphicsmagick: PathBuf,
}

/// Thumbnail generation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ThumbnailConfig {
    /// Maximum thumbnail width in pixels (shrink only)
    pub max_width: u32,

    /// Maximum thumbnail height in pixels (shrink only)
    pub max_height: u32,

    /// Name of the thumbnails directory created inside the input directory
    pub dir_name: String,
}

impl Default for ThumbnailConfig {
    fn default() -> Self {
        Self {
            max_width: 1280,
            max_height: 720,
            dir_name: "thumbnails".to_string(),
        }
    }
}

/// Report rendering settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// File name of the rendered report inside the input directory
    pub output_name: String,

    /// Template file to render instead of the built-in one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template: Option<PathBuf>,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            output_name: "index.html".to_string(),
            template: None,
        }
    }
}

/// Timestamp enrichment settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EnrichmentConfig {
    /// Maximum concurrent metadata reads (unset = one task per photo)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_concurrent: Option<usize>,
}

/// Logging settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level: error, warn, info, debug, trace
    pub level: String,

    /// Log format: "pretty" or "json"
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}
