//! Output staging
//!
//! With atomic writes enabled the exporter writes into a hidden file next to
//! the target, which is renamed over the target only after the exporter
//! succeeds. A failed job therefore never leaves a truncated file at the
//! planned path.

use crate::domain::GeometryError;
use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempPath;

/// Where a job writes, and how the result reaches the target path
#[derive(Debug)]
pub enum WriteTarget {
    /// Write straight to the target path
    Direct(PathBuf),
    /// Write to a staging file, then move it into place
    Staged {
        /// Staging file, removed on drop unless persisted
        staging: TempPath,
        /// Final path
        target: PathBuf,
    },
}

impl WriteTarget {
    /// Prepare the write location for `target`
    pub fn prepare(target: &Path, atomic: bool) -> Result<Self, GeometryError> {
        if !atomic {
            return Ok(WriteTarget::Direct(target.to_path_buf()));
        }

        let dir = target
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        let stem = target
            .file_stem()
            .and_then(OsStr::to_str)
            .unwrap_or("export");
        let prefix = format!(".{stem}.");
        // Keep the extension: some writers pick the encoding from it.
        let suffix = target
            .extension()
            .and_then(OsStr::to_str)
            .map(|ext| format!(".{ext}"))
            .unwrap_or_default();

        let mut builder = tempfile::Builder::new();
        builder.prefix(&prefix).suffix(&suffix);
        // 0666 minus umask, as for a direct write; tempfile defaults to 0600
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            builder.permissions(fs::Permissions::from_mode(0o666));
        }

        let staging = builder
            .tempfile_in(dir)
            .map_err(|e| {
                GeometryError::IoFailure(format!(
                    "cannot create staging file in {}: {e}",
                    dir.display()
                ))
            })?
            .into_temp_path();

        tracing::trace!(
            staging = %staging.display(),
            target = %target.display(),
            "Staging file created"
        );

        Ok(WriteTarget::Staged {
            staging,
            target: target.to_path_buf(),
        })
    }

    /// Path the exporter should write to
    pub fn write_path(&self) -> &Path {
        match self {
            WriteTarget::Direct(path) => path,
            WriteTarget::Staged { staging, .. } => staging,
        }
    }

    /// Move a staged file over the target
    ///
    /// Replaces any existing file at the target path, keeping its permissions.
    pub fn commit(self) -> Result<PathBuf, GeometryError> {
        match self {
            WriteTarget::Direct(path) => Ok(path),
            WriteTarget::Staged { staging, target } => {
                if let Ok(existing) = fs::metadata(&target) {
                    fs::set_permissions(&staging, existing.permissions()).map_err(|e| {
                        GeometryError::IoFailure(format!(
                            "cannot copy permissions of {}: {e}",
                            target.display()
                        ))
                    })?;
                }
                staging.persist(&target).map_err(|e| {
                    GeometryError::IoFailure(format!(
                        "cannot move staged file to {}: {}",
                        target.display(),
                        e.error
                    ))
                })?;
                Ok(target)
            }
        }
    }
}
