//! Output path resolution
//!
//! Turns a directory, a base filename and a format into a concrete output
//! path. Filenames are sanitized so any label the host hands over becomes a
//! portable file name.

use super::formats::FormatDescriptor;
use crate::domain::{ObjectHandle, Selection, ValidationError};
use std::path::{Path, PathBuf};

/// Base filename used when sanitizing leaves nothing usable
pub const FALLBACK_FILENAME: &str = "export";

/// Characters rejected by at least one mainstream file system
const RESERVED_CHARS: &[char] = &['<', '>', ':', '"', '/', '\\', '|', '?', '*'];

/// Device names Windows refuses as file stems
const RESERVED_STEMS: &[&str] = &[
    "CON", "PRN", "AUX", "NUL", "COM1", "COM2", "COM3", "COM4", "COM5", "COM6", "COM7", "COM8",
    "COM9", "LPT1", "LPT2", "LPT3", "LPT4", "LPT5", "LPT6", "LPT7", "LPT8", "LPT9",
];

/// Sanitizes a label for use as a base filename (without extension)
///
/// Reserved characters become `_`, control characters are dropped, leading
/// and trailing whitespace and dots are trimmed, and Windows device names get
/// an `_` suffix on their stem. Returns [`FALLBACK_FILENAME`] if nothing is
/// left. Idempotent.
///
/// # Examples
///
/// ```
/// use multi_export::core::paths::sanitize_filename;
///
/// assert_eq!(sanitize_filename("Part: v2/final"), "Part_ v2_final");
/// assert_eq!(sanitize_filename("..."), "export");
/// ```
pub fn sanitize_filename(raw: &str) -> String {
    let replaced: String = raw
        .chars()
        .filter(|c| !c.is_control())
        .map(|c| if RESERVED_CHARS.contains(&c) { '_' } else { c })
        .collect();

    let trimmed = replaced.trim_matches(|c: char| c.is_whitespace() || c == '.');
    if trimmed.is_empty() {
        return FALLBACK_FILENAME.to_string();
    }

    let stem_len = trimmed.find('.').unwrap_or(trimmed.len());
    let (stem, rest) = trimmed.split_at(stem_len);
    if RESERVED_STEMS
        .iter()
        .any(|reserved| stem.eq_ignore_ascii_case(reserved))
    {
        return format!("{stem}_{rest}");
    }

    trimmed.to_string()
}

/// Checks that `path` is an existing, writable directory and returns it in
/// absolute form
///
/// Writability is probed by creating (and immediately removing) a hidden
/// temporary file inside the directory.
///
/// # Errors
///
/// Returns [`ValidationError::InvalidDirectory`] if the path is empty, does
/// not exist, is not a directory, or cannot be written to
pub fn resolve_directory(path: &Path) -> Result<PathBuf, ValidationError> {
    let invalid = |reason: String| ValidationError::InvalidDirectory {
        path: path.to_path_buf(),
        reason,
    };

    if path.as_os_str().is_empty() {
        return Err(invalid("no output directory specified".to_string()));
    }

    let absolute = std::path::absolute(path).map_err(|e| invalid(e.to_string()))?;

    let metadata = match std::fs::metadata(&absolute) {
        Ok(m) => m,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(invalid("does not exist".to_string()));
        }
        Err(e) => return Err(invalid(e.to_string())),
    };
    if !metadata.is_dir() {
        return Err(invalid("is not a directory".to_string()));
    }

    tempfile::Builder::new()
        .prefix(".multi-export-probe")
        .tempfile_in(&absolute)
        .map_err(|e| invalid(format!("is not writable: {e}")))?;

    Ok(absolute)
}

/// Joins `directory/base_name.extension`
///
/// Existing files at the returned path are overwritten at export time.
pub fn build_path(directory: &Path, base_name: &str, format: &FormatDescriptor) -> PathBuf {
    directory.join(format!("{base_name}.{}", format.extension))
}

/// Default base filename: the object's label for a single object, the
/// document label otherwise. The result is sanitized.
pub fn default_base_name(objects: &[ObjectHandle], document_label: &str) -> String {
    match objects {
        [single] => sanitize_filename(&single.label),
        _ => sanitize_filename(document_label),
    }
}

/// Default output directory: the one containing the active document
pub fn default_directory(selection: &Selection) -> Option<PathBuf> {
    selection.document_directory().map(Path::to_path_buf)
}
