//! Concurrent capture-time enrichment of catalog records.
//!
//! One task per photo, all-or-nothing: timestamps are written back only once
//! every extraction has succeeded, so a failed run never leaves a partially
//! enriched catalog behind.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

use crate::config::EnrichmentConfig;
use crate::error::PipelineError;
use crate::types::PhotoRecord;

use super::metadata::MetadataExtractor;

/// Options for the enrichment fan-out.
#[derive(Debug, Clone, Default)]
pub struct EnrichOptions {
    /// Maximum concurrent metadata reads; `None` spawns every read at once
    pub max_concurrent: Option<usize>,
}

impl From<&EnrichmentConfig> for EnrichOptions {
    fn from(config: &EnrichmentConfig) -> Self {
        Self {
            max_concurrent: config.max_concurrent,
        }
    }
}

/// Attach a capture timestamp to every record.
///
/// Fails with the first extraction error observed. Dropping the task set on
/// failure aborts reads that have not started; reads already running finish
/// in the background and their results are discarded.
pub async fn enrich_timestamps(
    records: &mut [PhotoRecord],
    options: &EnrichOptions,
) -> Result<(), PipelineError> {
    let permits = options
        .max_concurrent
        .unwrap_or(Semaphore::MAX_PERMITS)
        .clamp(1, Semaphore::MAX_PERMITS);
    let semaphore = Arc::new(Semaphore::new(permits));
    let mut tasks = JoinSet::new();

    for record in records.iter() {
        let path = record.source_path.clone();
        let semaphore = semaphore.clone();
        tasks.spawn(async move {
            let _permit = semaphore.acquire_owned().await;
            let read_path = path.clone();
            let result =
                tokio::task::spawn_blocking(move || MetadataExtractor::capture_timestamp(&read_path))
                    .await;
            (path, result)
        });
    }

    let mut timestamps: HashMap<PathBuf, String> = HashMap::with_capacity(records.len());
    while let Some(joined) = tasks.join_next().await {
        let (path, result) = joined.map_err(|e| task_failure(None, &e))?;
        let timestamp = result.map_err(|e| task_failure(Some(path.clone()), &e))??;
        tracing::debug!("Captured {:?} at {}", path, timestamp);
        timestamps.insert(path, timestamp);
    }

    for record in records.iter_mut() {
        record.capture_timestamp = timestamps.remove(&record.source_path);
    }

    tracing::info!("Read capture times for {} photo(s)", records.len());
    Ok(())
}

fn task_failure(path: Option<PathBuf>, err: &tokio::task::JoinError) -> PipelineError {
    PipelineError::MetadataUnavailable {
        path: path.unwrap_or_default(),
        message: format!("extraction task failed: {err}"),
    }
}
