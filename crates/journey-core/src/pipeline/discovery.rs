//! Photo catalog construction from the input directory listing.

use std::ffi::OsStr;
use std::path::Path;
use walkdir::WalkDir;

use crate::error::PipelineError;
use crate::types::PhotoRecord;

/// Builds the ordered photo catalog for a run.
pub struct PhotoCatalog;

impl PhotoCatalog {
    /// List every entry of `input_dir` as a [`PhotoRecord`].
    ///
    /// No filtering by type or extension: anything that is not a photo fails
    /// later, at metadata extraction. Only names in `exclude` (the run's own
    /// outputs) are skipped. Entries are sorted by file name so the order is
    /// the same on every run and every platform.
    pub fn build(input_dir: &Path, exclude: &[&OsStr]) -> Result<Vec<PhotoRecord>, PipelineError> {
        let mut records = Vec::new();

        for entry in WalkDir::new(input_dir)
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name()
        {
            let entry = entry.map_err(|e| PipelineError::DirectoryRead {
                path: input_dir.to_path_buf(),
                source: e.into(),
            })?;

            let name = entry.file_name();
            if exclude.iter().any(|skip| *skip == name) {
                tracing::debug!("Skipping run output {:?}", entry.path());
                continue;
            }

            records.push(PhotoRecord::new(
                name.to_string_lossy().into_owned(),
                entry.path(),
            ));
        }

        tracing::debug!("Cataloged {} entries in {:?}", records.len(), input_dir);
        Ok(records)
    }
}
