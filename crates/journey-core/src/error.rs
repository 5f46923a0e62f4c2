//! Error types for the Journey report pipeline.
//!
//! Errors are organized by stage so that the single terminal message shown to
//! the operator names the failing stage and the file or directory involved.

use std::path::PathBuf;
use thiserror::Error;

/// Top-level error type for Journey operations.
#[derive(Error, Debug)]
pub enum JourneyError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Pipeline processing errors
    #[error("Pipeline error: {0}")]
    Pipeline(#[from] PipelineError),

    /// General I/O errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// No config file at the resolved location
    #[error("Config file not found at {0}")]
    NotFound(PathBuf),

    /// Failed to read the config file from disk
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    /// Failed to parse TOML configuration (includes missing required fields)
    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    /// Configuration values are invalid
    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

/// Pipeline processing errors, organized by stage.
#[derive(Error, Debug)]
pub enum PipelineError {
    /// Input directory is missing or not a directory
    #[error("Invalid input directory {path}: {reason}")]
    DirectoryInvalid { path: PathBuf, reason: String },

    /// Input directory listing could not be obtained
    #[error("Failed to read directory {path}: {source}")]
    DirectoryRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// File has no readable metadata container
    #[error("No metadata available for {path}: {message}")]
    MetadataUnavailable { path: PathBuf, message: String },

    /// Metadata container exists but carries no Exif section
    #[error("No EXIF section in {path}")]
    ExifMissing { path: PathBuf },

    /// Exif section exists but has no DateTimeOriginal
    #[error("No capture time recorded in {path}")]
    CaptureTimeMissing { path: PathBuf },

    /// DateTimeOriginal present but not a valid date-time
    #[error("Malformed capture time in {path}: {value:?}")]
    CaptureTimeMalformed { path: PathBuf, value: String },

    /// Output directory could not be created (already exists, permissions)
    #[error("Failed to create directory {path}: {source}")]
    DirectoryCreate {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The external thumbnail batch did not complete successfully
    #[error("Thumbnail batch failed: {0}")]
    ThumbnailBatch(#[from] BatchFailure),

    /// Report template could not be read
    #[error("Failed to read template {path}: {source}")]
    TemplateRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Report template is malformed
    #[error("Failed to render template: {message}")]
    TemplateRender { message: String },

    /// Report document could not be written
    #[error("Failed to write report {path}: {source}")]
    OutputWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Why a thumbnail batch job failed.
#[derive(Error, Debug)]
pub enum BatchFailure {
    /// The image tool could not be started
    #[error("could not launch {program}: {source}")]
    Launch {
        program: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The image tool exited unsuccessfully (`code` is `None` when killed by a signal)
    #[error("image tool exited with {}{}", exit_label(.code), stderr_suffix(.stderr))]
    Exit { code: Option<i32>, stderr: String },

    /// Streaming directives or collecting output failed
    #[error("subprocess I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// A path cannot be expressed as a single directive line
    #[error("path cannot be passed to the batch: {0:?}")]
    UnrepresentablePath(PathBuf),
}

fn exit_label(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("status {code}"),
        None => "no status (terminated by signal)".to_string(),
    }
}

fn stderr_suffix(stderr: &str) -> String {
    let trimmed = stderr.trim();
    if trimmed.is_empty() {
        String::new()
    } else {
        format!(": {trimmed}")
    }
}

/// Convenience type alias for Journey results.
pub type Result<T> = std::result::Result<T, JourneyError>;
