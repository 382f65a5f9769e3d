//! Logging and observability
//!
//! This module provides structured logging with support for:
//! - Human-readable console output
//! - Configurable log levels
//! - Local JSON log files with rotation
//!
//! # Example
//!
//! ```no_run
//! use multi_export::logging::init_logging;
//! use multi_export::config::LoggingConfig;
//!
//! let config = LoggingConfig::default();
//! let _guard = init_logging("info", &config).expect("Failed to initialize logging");
//!
//! tracing::info!("Application started");
//! ```

pub mod structured;

pub use structured::{init_logging, parse_log_level, LoggingGuard};

/// Log the start of one format export
///
/// # Example
///
/// ```no_run
/// use multi_export::log_job_start;
/// use std::path::Path;
///
/// log_job_start!("STL", Path::new("/tmp/bracket.stl").display());
/// ```
#[macro_export]
macro_rules! log_job_start {
    ($format:expr, $target:expr) => {
        tracing::info!(
            format = %$format,
            target = %$target,
            "Starting format export"
        );
    };
}

/// Log a written file
///
/// # Example
///
/// ```no_run
/// use multi_export::log_job_complete;
///
/// log_job_complete!("STEP", Some(2048u64));
/// ```
#[macro_export]
macro_rules! log_job_complete {
    ($format:expr, $bytes:expr) => {
        tracing::info!(
            format = %$format,
            bytes_written = ?$bytes,
            "Format exported"
        );
    };
}

/// Log a failed format export
///
/// # Example
///
/// ```no_run
/// use multi_export::log_job_failed;
/// use multi_export::domain::GeometryError;
///
/// let error = GeometryError::InvalidGeometry("open shell".to_string());
/// log_job_failed!("3MF", &error);
/// ```
#[macro_export]
macro_rules! log_job_failed {
    ($format:expr, $error:expr) => {
        tracing::warn!(
            format = %$format,
            error_kind = %$error.kind(),
            error = %$error,
            "Format export failed"
        );
    };
}

/// Log batch progress
///
/// # Example
///
/// ```no_run
/// use multi_export::log_progress;
///
/// log_progress!(2, 3);
/// ```
#[macro_export]
macro_rules! log_progress {
    ($completed:expr, $total:expr) => {
        tracing::debug!(
            completed = $completed,
            total = $total,
            progress_pct = ($completed as f64 / $total as f64 * 100.0),
            "Export progress"
        );
    };
}
