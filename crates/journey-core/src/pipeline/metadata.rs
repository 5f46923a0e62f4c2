//! EXIF capture-time extraction from photos.

use chrono::NaiveDateTime;
use exif::{Context, Exif, In, Reader, Tag, Value};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::error::PipelineError;

/// Canonical capture timestamp layout: local time, seconds precision, no zone.
pub const CANONICAL_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Layouts accepted for `DateTimeOriginal`. The first is the EXIF standard.
const EXIF_FORMATS: &[&str] = &["%Y:%m:%d %H:%M:%S", "%Y-%m-%d %H:%M:%S"];

/// Extracts capture metadata from photo files.
pub struct MetadataExtractor;

impl MetadataExtractor {
    /// Read the capture time of a photo as `YYYY-MM-DDTHH:MM:SS`.
    ///
    /// The value is the camera's local clock as recorded in `DateTimeOriginal`;
    /// sub-second and offset tags are not applied. Blocking.
    pub fn capture_timestamp(path: &Path) -> Result<String, PipelineError> {
        let exif = Self::read(path)?;

        if !exif.fields().any(|f| f.tag.context() == Context::Exif) {
            return Err(PipelineError::ExifMissing {
                path: path.to_path_buf(),
            });
        }

        let field = exif
            .get_field(Tag::DateTimeOriginal, In::PRIMARY)
            .ok_or_else(|| PipelineError::CaptureTimeMissing {
                path: path.to_path_buf(),
            })?;

        let raw = match &field.value {
            Value::Ascii(values) => values
                .first()
                .map(|bytes| String::from_utf8_lossy(bytes).into_owned())
                .unwrap_or_default(),
            other => format!("{:?}", other),
        };

        normalize(&raw).ok_or_else(|| PipelineError::CaptureTimeMalformed {
            path: path.to_path_buf(),
            value: raw,
        })
    }

    /// Open the file and parse its metadata container.
    fn read(path: &Path) -> Result<Exif, PipelineError> {
        let unavailable = |message: String| PipelineError::MetadataUnavailable {
            path: path.to_path_buf(),
            message,
        };

        let file = File::open(path).map_err(|e| unavailable(e.to_string()))?;
        let mut reader = BufReader::new(file);
        Reader::new()
            .read_from_container(&mut reader)
            .map_err(|e| unavailable(e.to_string()))
    }
}

/// Convert an EXIF date-time string into the canonical layout.
///
/// Trailing NULs and whitespace (common camera padding) are ignored.
pub fn normalize(raw: &str) -> Option<String> {
    let trimmed = raw.trim_matches(|c: char| c == '\0' || c.is_whitespace());
    EXIF_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(trimmed, fmt).ok())
        .map(|dt| dt.format(CANONICAL_FORMAT).to_string())
}
