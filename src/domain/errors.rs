//! Domain error types
//!
//! This module defines the error hierarchy for Multi Export. Validation errors
//! stop a plan from being built; geometry errors are recorded per job and never
//! abort a batch.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Main Multi Export error type
///
/// This is the primary error type used throughout the application.
#[derive(Debug, Error)]
pub enum MultiExportError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Plan validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Generic errors with context
    #[error("{0}")]
    Other(String),
}

/// Errors raised while building an export plan
///
/// Always fatal to the build attempt and surfaced to the user before any file
/// is written.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// Nothing was selected
    #[error("No objects selected")]
    EmptySelection,

    /// The selection holds no solid or mesh geometry
    #[error("None of the selected objects can be exported")]
    NoExportableObjects,

    /// No output format was chosen
    #[error("No export formats selected")]
    NoFormatsSelected,

    /// Output directory is missing, not a directory, or not writable
    #[error("Invalid output directory {}: {reason}", path.display())]
    InvalidDirectory {
        /// The rejected directory
        path: PathBuf,
        /// Why it was rejected
        reason: String,
    },

    /// Format id not present in the registry
    #[error("Unknown format: {0}")]
    UnknownFormat(String),

    /// Mesh tolerance or deflection outside the accepted range
    #[error("Invalid mesh {parameter}: {value} (must be between 0.001 and 10)")]
    InvalidMeshQuality {
        /// Which parameter was rejected
        parameter: &'static str,
        /// The rejected value
        value: f64,
    },
}

/// Failure reported by the geometry exporter for a single job
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GeometryError {
    /// Geometry could not be combined, tessellated or written
    #[error("Invalid geometry: {0}")]
    InvalidGeometry(String),

    /// The format cannot represent something in the geometry
    #[error("Unsupported feature: {0}")]
    UnsupportedFeature(String),

    /// Disk full, permission denied and similar
    #[error("I/O failure: {0}")]
    IoFailure(String),
}

impl GeometryError {
    /// Classifies the error for reporting
    pub fn kind(&self) -> ExecutionErrorKind {
        match self {
            GeometryError::InvalidGeometry(_) => ExecutionErrorKind::InvalidGeometry,
            GeometryError::UnsupportedFeature(_) => ExecutionErrorKind::UnsupportedFeature,
            GeometryError::IoFailure(_) => ExecutionErrorKind::IoFailure,
        }
    }

    /// Returns the error message without the kind prefix
    pub fn message(&self) -> &str {
        match self {
            GeometryError::InvalidGeometry(msg)
            | GeometryError::UnsupportedFeature(msg)
            | GeometryError::IoFailure(msg) => msg,
        }
    }
}

impl From<std::io::Error> for GeometryError {
    fn from(err: std::io::Error) -> Self {
        GeometryError::IoFailure(err.to_string())
    }
}

/// Kind of a per-job execution failure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExecutionErrorKind {
    /// See [`GeometryError::InvalidGeometry`]
    InvalidGeometry,
    /// See [`GeometryError::UnsupportedFeature`]
    UnsupportedFeature,
    /// See [`GeometryError::IoFailure`]
    IoFailure,
}

impl fmt::Display for ExecutionErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ExecutionErrorKind::InvalidGeometry => "invalid geometry",
            ExecutionErrorKind::UnsupportedFeature => "unsupported feature",
            ExecutionErrorKind::IoFailure => "I/O failure",
        };
        f.write_str(name)
    }
}

// Conversion from std::io::Error
impl From<std::io::Error> for MultiExportError {
    fn from(err: std::io::Error) -> Self {
        MultiExportError::Io(err.to_string())
    }
}

// Conversion from serde_json::Error
impl From<serde_json::Error> for MultiExportError {
    fn from(err: serde_json::Error) -> Self {
        MultiExportError::Serialization(err.to_string())
    }
}

// Conversion from toml parse errors
impl From<toml::de::Error> for MultiExportError {
    fn from(err: toml::de::Error) -> Self {
        MultiExportError::Configuration(format!("TOML parse error: {err}"))
    }
}
