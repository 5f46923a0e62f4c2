//! Core data types for the Journey report pipeline.
//!
//! A run owns one [`RunContext`]; every stage receives it by reference and
//! there is no state outside it.

use serde::Serialize;
use std::path::{Path, PathBuf};

use crate::config::Config;

/// One discovered entry of the input directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PhotoRecord {
    /// Base name, unique within a run
    pub filename: String,

    /// Absolute path to the original file
    pub source_path: PathBuf,

    /// Canonical capture time (`YYYY-MM-DDTHH:MM:SS`), set by enrichment
    #[serde(skip_serializing_if = "Option::is_none")]
    pub capture_timestamp: Option<String>,
}

impl PhotoRecord {
    /// Create a catalog record that has not been enriched yet.
    pub fn new(filename: impl Into<String>, source_path: impl Into<PathBuf>) -> Self {
        Self {
            filename: filename.into(),
            source_path: source_path.into(),
            capture_timestamp: None,
        }
    }

    /// Where this photo's thumbnail lands inside `thumbnails_dir`.
    pub fn thumbnail_path(&self, thumbnails_dir: &Path) -> PathBuf {
        thumbnails_dir.join(&self.filename)
    }

    /// Caption used as the image alt text in the report.
    pub fn alt_text(&self) -> String {
        format!(
            "Photo captured at {}.",
            self.capture_timestamp.as_deref().unwrap_or_default()
        )
    }
}

/// Everything a single run needs: derived paths, tool location, photo records.
#[derive(Debug, Clone)]
pub struct RunContext {
    /// Canonical input directory
    pub input_dir: PathBuf,

    /// Directory receiving one thumbnail per photo
    pub thumbnails_dir: PathBuf,

    /// Rendered report document
    pub report_path: PathBuf,

    /// Image-processing executable
    pub graphicsmagick: PathBuf,

    /// Photo records in catalog order
    pub photos: Vec<PhotoRecord>,
}

impl RunContext {
    /// Derive the run's output locations from an already validated input directory.
    pub fn new(input_dir: impl Into<PathBuf>, config: &Config) -> Self {
        let input_dir = input_dir.into();
        Self {
            thumbnails_dir: input_dir.join(&config.thumbnail.dir_name),
            report_path: input_dir.join(&config.report.output_name),
            graphicsmagick: config.graphicsmagick_path(),
            input_dir,
            photos: Vec::new(),
        }
    }

    /// Names inside the input directory that the run itself produces.
    pub fn output_names(&self) -> Vec<&std::ffi::OsStr> {
        [&self.thumbnails_dir, &self.report_path]
            .into_iter()
            .filter_map(|p| p.file_name())
            .collect()
    }
}

/// What a successful run produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    /// Number of photos listed in the report
    pub photos: usize,

    /// Directory holding the thumbnails
    pub thumbnails_dir: PathBuf,

    /// Rendered report document
    pub report_path: PathBuf,
}
