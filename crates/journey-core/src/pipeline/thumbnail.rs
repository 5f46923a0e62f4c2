//! Thumbnail generation through one GraphicsMagick batch job.
//!
//! All photos go through a single `gm batch` subprocess: the directives are
//! streamed on stdin, one line per photo, and the job succeeds only if the
//! process exits with status zero.

use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

use crate::config::ThumbnailConfig;
use crate::error::{BatchFailure, PipelineError};
use crate::types::RunContext;

/// Arguments putting `gm` into batch mode reading from stdin, stopping at the first failure.
const BATCH_ARGS: &[&str] = &["batch", "-stop-on-error", "on", "-"];

/// Produces orientation-corrected, size-bounded thumbnails for a whole run.
pub struct ThumbnailBatch {
    config: ThumbnailConfig,
}

impl ThumbnailBatch {
    /// Create a new batch processor with the given configuration.
    pub fn new(config: ThumbnailConfig) -> Self {
        Self { config }
    }

    /// Shrink-only geometry, e.g. `1280x720>`.
    pub fn geometry(&self) -> String {
        format!("{}x{}>", self.config.max_width, self.config.max_height)
    }

    /// Create the thumbnails directory. An existing directory is an error.
    pub async fn create_dir(&self, ctx: &RunContext) -> Result<(), PipelineError> {
        tokio::fs::create_dir(&ctx.thumbnails_dir)
            .await
            .map_err(|source| PipelineError::DirectoryCreate {
                path: ctx.thumbnails_dir.clone(),
                source,
            })
    }

    /// Build the newline-terminated directive script, one line per photo in catalog order.
    pub fn directives(&self, ctx: &RunContext) -> Result<String, BatchFailure> {
        let geometry = self.geometry();
        let mut script = String::new();
        for photo in &ctx.photos {
            let destination = photo.thumbnail_path(&ctx.thumbnails_dir);
            script.push_str(&format!(
                "convert -auto-orient -resize {} +profile {} {} {}\n",
                quote(&geometry),
                quote("*"),
                quote_path(&photo.source_path)?,
                quote_path(&destination)?,
            ));
        }
        Ok(script)
    }

    /// Run the batch job for every photo in `ctx`.
    ///
    /// The thumbnails directory must already exist. Thumbnails written before
    /// a failure are left on disk.
    pub async fn run(&self, ctx: &RunContext) -> Result<(), PipelineError> {
        let script = self.directives(ctx)?;
        let program = ctx.graphicsmagick.clone();
        tracing::debug!(
            "Launching {:?} {} for {} photo(s)",
            program,
            BATCH_ARGS.join(" "),
            ctx.photos.len()
        );

        let mut child = Command::new(&program)
            .args(BATCH_ARGS)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|source| BatchFailure::Launch {
                program: program.clone(),
                source,
            })?;

        let mut stdin = child
            .stdin
            .take()
            .ok_or_else(|| BatchFailure::Io(std::io::Error::other("child stdin not captured")))?;

        // Feed directives while output is drained, so a chatty tool can't stall on a full pipe.
        let writer = tokio::spawn(async move {
            stdin.write_all(script.as_bytes()).await?;
            stdin.shutdown().await
        });

        let output = child.wait_with_output().await.map_err(BatchFailure::Io)?;
        let written = writer
            .await
            .map_err(|e| BatchFailure::Io(std::io::Error::other(e)))?;

        let stderr = String::from_utf8_lossy(&output.stderr).into_owned();
        if !output.status.success() {
            return Err(BatchFailure::Exit {
                code: output.status.code(),
                stderr,
            }
            .into());
        }
        // A broken pipe with a zero exit still means some directives never arrived.
        written.map_err(BatchFailure::Io)?;

        if !stderr.trim().is_empty() {
            tracing::debug!("gm batch stderr: {}", stderr.trim());
        }
        tracing::info!(
            "Created {} thumbnail(s) in {:?}",
            ctx.photos.len(),
            ctx.thumbnails_dir
        );
        Ok(())
    }
}

/// Double-quote an argument for the batch line parser.
fn quote(arg: &str) -> String {
    let mut quoted = String::with_capacity(arg.len() + 2);
    quoted.push('"');
    for c in arg.chars() {
        if c == '"' || c == '\\' {
            quoted.push('\\');
        }
        quoted.push(c);
    }
    quoted.push('"');
    quoted
}

fn quote_path(path: &Path) -> Result<String, BatchFailure> {
    let text = path
        .to_str()
        .filter(|s| !s.contains(['\n', '\r']))
        .ok_or_else(|| BatchFailure::UnrepresentablePath(PathBuf::from(path)))?;
    Ok(quote(text))
}
