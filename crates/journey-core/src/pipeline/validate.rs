//! Input directory validation before a run starts.

use std::path::{Path, PathBuf};

use crate::error::PipelineError;

/// Check that `path` exists and is a directory, returning its canonical form.
///
/// Canonicalizing here gives every later stage absolute source paths.
pub fn validate_input_dir(path: &Path) -> Result<PathBuf, PipelineError> {
    let invalid = |reason: String| PipelineError::DirectoryInvalid {
        path: path.to_path_buf(),
        reason,
    };

    let metadata = std::fs::metadata(path).map_err(|e| invalid(e.to_string()))?;
    if !metadata.is_dir() {
        return Err(invalid("not a directory".to_string()));
    }

    std::fs::canonicalize(path).map_err(|e| invalid(e.to_string()))
}
