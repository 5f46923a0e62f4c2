//! In-memory photo fixtures for tests.
//!
//! Builds minimal JPEG files (SOI, optional APP1/Exif segment, EOI) with a
//! little-endian TIFF structure, so tests don't depend on binary assets.

use std::path::{Path, PathBuf};

/// What metadata the generated JPEG carries.
pub enum ExifFixture {
    /// No APP1 segment at all
    None,
    /// IFD0 only (orientation), no Exif sub-IFD
    TiffOnly,
    /// Exif sub-IFD with ExifVersion but no DateTimeOriginal
    NoCaptureTime,
    /// Exif sub-IFD with the given DateTimeOriginal (`YYYY:MM:DD HH:MM:SS`)
    Captured(String),
}

impl ExifFixture {
    pub fn captured(datetime: &str) -> Self {
        Self::Captured(datetime.to_string())
    }
}

const TYPE_ASCII: u16 = 2;
const TYPE_SHORT: u16 = 3;
const TYPE_LONG: u16 = 4;
const TYPE_UNDEFINED: u16 = 7;

const TAG_ORIENTATION: u16 = 0x0112;
const TAG_EXIF_POINTER: u16 = 0x8769;
const TAG_EXIF_VERSION: u16 = 0x9000;
const TAG_DATETIME_ORIGINAL: u16 = 0x9003;

/// Encode a JPEG carrying the requested metadata.
pub fn jpeg_with_exif(fixture: ExifFixture) -> Vec<u8> {
    let tiff = match fixture {
        ExifFixture::None => None,
        ExifFixture::TiffOnly => Some(tiff_ifd0_only()),
        ExifFixture::NoCaptureTime => Some(tiff_with_exif(None)),
        ExifFixture::Captured(dt) => Some(tiff_with_exif(Some(&dt))),
    };

    let mut jpeg = vec![0xFF, 0xD8];
    if let Some(tiff) = tiff {
        let payload_len = 6 + tiff.len();
        jpeg.extend_from_slice(&[0xFF, 0xE1]);
        jpeg.extend_from_slice(&((payload_len + 2) as u16).to_be_bytes());
        jpeg.extend_from_slice(b"Exif\0\0");
        jpeg.extend_from_slice(&tiff);
    }
    jpeg.extend_from_slice(&[0xFF, 0xD9]);
    jpeg
}

/// Write a captured-at JPEG into `dir` and return its path.
pub fn write_photo(dir: &Path, name: &str, datetime: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, jpeg_with_exif(ExifFixture::captured(datetime)))
        .expect("write fixture photo");
    path
}

fn tiff_header() -> Vec<u8> {
    let mut buf = b"II".to_vec();
    buf.extend_from_slice(&42u16.to_le_bytes());
    buf.extend_from_slice(&8u32.to_le_bytes());
    buf
}

fn entry(buf: &mut Vec<u8>, tag: u16, typ: u16, count: u32, value: [u8; 4]) {
    buf.extend_from_slice(&tag.to_le_bytes());
    buf.extend_from_slice(&typ.to_le_bytes());
    buf.extend_from_slice(&count.to_le_bytes());
    buf.extend_from_slice(&value);
}

fn tiff_ifd0_only() -> Vec<u8> {
    let mut buf = tiff_header();
    buf.extend_from_slice(&1u16.to_le_bytes());
    entry(&mut buf, TAG_ORIENTATION, TYPE_SHORT, 1, [1, 0, 0, 0]);
    buf.extend_from_slice(&0u32.to_le_bytes());
    buf
}

fn tiff_with_exif(datetime: Option<&str>) -> Vec<u8> {
    // IFD0 at 8: count + one entry + next offset = 18 bytes.
    let exif_ifd_offset: u32 = 8 + 2 + 12 + 4;
    let exif_entries: u16 = if datetime.is_some() { 2 } else { 1 };
    let data_offset = exif_ifd_offset + 2 + 12 * exif_entries as u32 + 4;

    let mut buf = tiff_header();
    buf.extend_from_slice(&1u16.to_le_bytes());
    entry(
        &mut buf,
        TAG_EXIF_POINTER,
        TYPE_LONG,
        1,
        exif_ifd_offset.to_le_bytes(),
    );
    buf.extend_from_slice(&0u32.to_le_bytes());

    buf.extend_from_slice(&exif_entries.to_le_bytes());
    entry(&mut buf, TAG_EXIF_VERSION, TYPE_UNDEFINED, 4, *b"0230");

    let mut data = Vec::new();
    if let Some(dt) = datetime {
        data.extend_from_slice(dt.as_bytes());
        data.push(0);
        entry(
            &mut buf,
            TAG_DATETIME_ORIGINAL,
            TYPE_ASCII,
            data.len() as u32,
            data_offset.to_le_bytes(),
        );
    }
    buf.extend_from_slice(&0u32.to_le_bytes());
    buf.extend_from_slice(&data);
    buf
}

/// Install an executable shell script standing in for `gm`.
#[cfg(unix)]
pub fn fake_tool(dir: &Path, body: &str) -> PathBuf {
    use std::os::unix::fs::PermissionsExt;

    let path = dir.join("fake-gm");
    std::fs::write(&path, format!("#!/bin/sh\n{body}\n")).expect("write fake tool");
    let mut perms = std::fs::metadata(&path).expect("stat fake tool").permissions();
    perms.set_mode(0o755);
    std::fs::set_permissions(&path, perms).expect("chmod fake tool");
    path
}

/// A fake `gm batch` that logs each directive and touches its destination file.
#[cfg(unix)]
pub const TOUCHING_BATCH: &str = r#"log="$(dirname "$0")/directives.log"
while IFS= read -r line; do
  printf '%s\n' "$line" >> "$log"
  eval "set -- $line"
  eval "dst=\${$#}"
  : > "$dst"
done
exit 0"#;
