//! Journey report assembly.
//!
//! Builds a view model from the enriched catalog and renders it through a
//! logic-less template into the report document.

mod template;

pub use template::{escape_html_into, Template};

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;
use std::path::PathBuf;

use crate::config::Config;
use crate::error::PipelineError;
use crate::types::{PhotoRecord, RunContext};

/// Template compiled into the library, used when no template is configured.
pub const BUILTIN_TEMPLATE: &str = include_str!("../../templates/index.html");

/// Everything the template can see.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportView {
    /// When the report was generated (ISO 8601, UTC)
    pub generated_at: String,

    /// Thumbnail directory, relative to the report
    pub thumbnails_dir: String,

    /// One entry per photo, in catalog order
    pub photos: Vec<ReportEntry>,
}

/// One photo as shown in the report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportEntry {
    pub filename: String,
    /// Percent-encoded thumbnail URL, relative to the report
    pub thumbnail_href: String,
    pub alt_text: String,
    pub timestamp: String,
}

impl ReportView {
    /// Build the view model. Record order is preserved.
    pub fn build(records: &[PhotoRecord], thumbnails_dir: &str, now: DateTime<Utc>) -> Self {
        Self {
            generated_at: now.to_rfc3339_opts(SecondsFormat::Millis, true),
            thumbnails_dir: thumbnails_dir.to_string(),
            photos: records
                .iter()
                .map(|record| ReportEntry {
                    filename: record.filename.clone(),
                    thumbnail_href: format!(
                        "{}/{}",
                        encode_path_segment(thumbnails_dir),
                        encode_path_segment(&record.filename)
                    ),
                    alt_text: record.alt_text(),
                    timestamp: record.capture_timestamp.clone().unwrap_or_default(),
                })
                .collect(),
        }
    }
}

/// Percent-encode one URL path segment, keeping only RFC 3986 unreserved bytes.
fn encode_path_segment(segment: &str) -> String {
    let mut encoded = String::with_capacity(segment.len());
    for byte in segment.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'.' | b'_' | b'~' => {
                encoded.push(byte as char)
            }
            _ => encoded.push_str(&format!("%{byte:02X}")),
        }
    }
    encoded
}

/// Renders and writes the report document for a run.
pub struct ReportWriter {
    template_path: Option<PathBuf>,
}

impl ReportWriter {
    /// Create a writer using the configured template, or the built-in one.
    pub fn new(config: &Config) -> Self {
        Self {
            template_path: config.template_path(),
        }
    }

    /// Load and parse the template.
    pub async fn load_template(&self) -> Result<Template, PipelineError> {
        match &self.template_path {
            Some(path) => {
                let source = tokio::fs::read_to_string(path).await.map_err(|source| {
                    PipelineError::TemplateRead {
                        path: path.clone(),
                        source,
                    }
                })?;
                Template::parse(&source)
            }
            None => Template::parse(BUILTIN_TEMPLATE),
        }
    }

    /// Render the report text for `ctx` without touching the filesystem output.
    pub async fn render(&self, ctx: &RunContext, now: DateTime<Utc>) -> Result<String, PipelineError> {
        let template = self.load_template().await?;
        let thumbnails_dir = ctx
            .thumbnails_dir
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        let view = ReportView::build(&ctx.photos, &thumbnails_dir, now);
        let data = serde_json::to_value(&view).map_err(|e| PipelineError::TemplateRender {
            message: e.to_string(),
        })?;
        Ok(template.render(&data))
    }

    /// Render the report and write it to `ctx.report_path`.
    pub async fn write(&self, ctx: &RunContext, now: DateTime<Utc>) -> Result<(), PipelineError> {
        let html = self.render(ctx, now).await?;
        tokio::fs::write(&ctx.report_path, html)
            .await
            .map_err(|source| PipelineError::OutputWrite {
                path: ctx.report_path.clone(),
                source,
            })?;
        tracing::info!(
            "Report with {} photo(s) written to {:?}",
            ctx.photos.len(),
            ctx.report_path
        );
        Ok(())
    }
}
