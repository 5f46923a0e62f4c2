//! Journey Core - photo ingestion and batch-thumbnail pipeline.
//!
//! Journey turns a directory of photographs into a browsable report: an HTML
//! page listing every photo with its capture time, next to a directory of
//! downsized, correctly oriented thumbnails.
//!
//! # Architecture
//!
//! ```text
//! Catalog → Enrich (EXIF, concurrent) → Thumbnails (one gm batch) → Report
//! ```
//!
//! Every stage is all-or-nothing: the first failure ends the run, and no
//! report is ever produced for a partially processed directory.
//!
//! # Usage
//!
//! ```rust,ignore
//! use journey_core::{validate_input_dir, Config, JourneyPipeline, RunContext};
//!
//! #[tokio::main]
//! async fn main() -> journey_core::Result<()> {
//!     let input = validate_input_dir("./lisbon".as_ref())?;
//!     let config = Config::load()?;
//!     let mut ctx = RunContext::new(input, &config);
//!
//!     let summary = JourneyPipeline::new(&config).run(&mut ctx).await?;
//!     println!("Report: {}", summary.report_path.display());
//!     Ok(())
//! }
//! ```

// Module declarations
pub mod config;
pub mod error;
pub mod pipeline;
pub mod report;
pub mod types;

#[cfg(test)]
pub(crate) mod testing;

// Re-exports for convenient access
pub use config::Config;
pub use error::{BatchFailure, ConfigError, JourneyError, PipelineError, Result};
pub use pipeline::{validate_input_dir, JourneyPipeline, MetadataExtractor, ThumbnailBatch};
pub use report::{ReportView, ReportWriter, Template};
pub use types::{PhotoRecord, RunContext, RunSummary};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
