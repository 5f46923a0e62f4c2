//! Journey pipeline components.
//!
//! This module contains all the stages of a run:
//! - **validate**: Check and canonicalize the input directory
//! - **discovery**: Build the ordered photo catalog
//! - **metadata**: Extract capture times from EXIF
//! - **enrich**: Concurrently attach capture times to the catalog
//! - **thumbnail**: Drive the GraphicsMagick batch job
//! - **processor**: Orchestrates the full pipeline

pub mod discovery;
pub mod enrich;
pub mod metadata;
pub mod processor;
pub mod thumbnail;
pub mod validate;

// Re-exports for convenient access
pub use discovery::PhotoCatalog;
pub use enrich::{enrich_timestamps, EnrichOptions};
pub use metadata::MetadataExtractor;
pub use processor::JourneyPipeline;
pub use thumbnail::ThumbnailBatch;
pub use validate::validate_input_dir;
