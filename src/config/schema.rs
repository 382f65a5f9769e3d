//! Configuration schema types
//!
//! This module defines the configuration structure for Multi Export. Every
//! section and key has a default, so an empty file is a valid configuration.

use crate::core::formats::FormatRegistry;
use crate::domain::quality::{MAX_MESH_VALUE, MIN_MESH_VALUE};
use crate::domain::{MeshQuality, ValidationError};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main Multi Export configuration
///
/// This is the root configuration structure that maps to the TOML file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MultiExportConfig {
    /// Application-level settings
    #[serde(default)]
    pub application: ApplicationConfig,

    /// Default export choices
    #[serde(default)]
    pub export: ExportConfig,

    /// Tessellation settings for mesh-based formats
    #[serde(default)]
    pub mesh: MeshConfig,

    /// Status message settings
    #[serde(default)]
    pub report: ReportConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl MultiExportConfig {
    /// Validates the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid
    pub fn validate(&self) -> Result<(), String> {
        self.application.validate()?;
        self.export.validate()?;
        self.mesh.validate()?;
        self.report.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}

/// Application-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl ApplicationConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.log_level.as_str()) {
            return Err(format!(
                "Invalid log_level '{}'. Must be one of: {}",
                self.log_level,
                valid_levels.join(", ")
            ));
        }
        Ok(())
    }
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

/// Default export choices
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Format ids selected by default
    #[serde(default = "default_formats")]
    pub formats: Vec<String>,

    /// Output directory; unset means the document's directory
    #[serde(default)]
    pub output_directory: Option<PathBuf>,

    /// Base filename; unset means the naming policy decides
    #[serde(default)]
    pub base_filename: Option<String>,

    /// Write through a staging file and move it into place on success
    #[serde(default = "default_true")]
    pub atomic_writes: bool,
}

impl ExportConfig {
    fn validate(&self) -> Result<(), String> {
        if self.formats.is_empty() {
            return Err("export.formats cannot be empty".to_string());
        }

        let registry = FormatRegistry::standard();
        for id in &self.formats {
            if registry.get(id).is_err() {
                return Err(format!(
                    "Invalid export.formats entry '{}'. Must be one of: {}",
                    id,
                    registry.ids().join(", ")
                ));
            }
        }

        if let Some(dir) = &self.output_directory {
            if dir.as_os_str().is_empty() {
                return Err("export.output_directory cannot be empty when set".to_string());
            }
        }

        Ok(())
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            formats: default_formats(),
            output_directory: None,
            base_filename: None,
            atomic_writes: true,
        }
    }
}

/// Tessellation settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MeshConfig {
    /// Maximum chordal deviation in millimetres
    #[serde(default = "default_surface_tolerance")]
    pub surface_tolerance: f64,

    /// Maximum angle between adjacent facet normals
    #[serde(default = "default_angular_deflection")]
    pub angular_deflection: f64,
}

impl MeshConfig {
    fn validate(&self) -> Result<(), String> {
        self.to_mesh_quality().map(|_| ()).map_err(|e| match e {
            ValidationError::InvalidMeshQuality { parameter, value } => format!(
                "mesh.{} must be between {} and {} (got {})",
                parameter, MIN_MESH_VALUE, MAX_MESH_VALUE, value
            ),
            other => other.to_string(),
        })
    }

    /// Converts to the validated domain type
    pub fn to_mesh_quality(&self) -> Result<MeshQuality, ValidationError> {
        MeshQuality::new(self.surface_tolerance, self.angular_deflection)
    }
}

impl Default for MeshConfig {
    fn default() -> Self {
        Self {
            surface_tolerance: default_surface_tolerance(),
            angular_deflection: default_angular_deflection(),
        }
    }
}

/// Status message settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Exported file names listed before "... and N more"
    #[serde(default = "default_max_files_shown")]
    pub max_files_shown: usize,

    /// Failures listed before "... and N more"
    #[serde(default = "default_max_errors_shown")]
    pub max_errors_shown: usize,
}

impl ReportConfig {
    fn validate(&self) -> Result<(), String> {
        if self.max_files_shown == 0 {
            return Err("report.max_files_shown must be > 0".to_string());
        }
        if self.max_errors_shown == 0 {
            return Err("report.max_errors_shown must be > 0".to_string());
        }
        Ok(())
    }
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            max_files_shown: default_max_files_shown(),
            max_errors_shown: default_max_errors_shown(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Write JSON logs to rotating local files
    #[serde(default)]
    pub local_enabled: bool,

    /// Directory for log files
    #[serde(default = "default_local_path")]
    pub local_path: String,

    /// Rotation policy (daily, hourly)
    #[serde(default = "default_local_rotation")]
    pub local_rotation: String,
}

impl LoggingConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_rotations = ["daily", "hourly"];
        if !valid_rotations.contains(&self.local_rotation.as_str()) {
            return Err(format!(
                "Invalid logging.local_rotation '{}'. Must be one of: {}",
                self.local_rotation,
                valid_rotations.join(", ")
            ));
        }

        if self.local_enabled && self.local_path.trim().is_empty() {
            return Err("logging.local_path cannot be empty when local logging is enabled".to_string());
        }

        Ok(())
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            local_enabled: false,
            local_path: default_local_path(),
            local_rotation: default_local_rotation(),
        }
    }
}

// Default value functions
fn default_log_level() -> String {
    "info".to_string()
}

fn default_formats() -> Vec<String> {
    FormatRegistry::standard().default_ids()
}

fn default_true() -> bool {
    true
}

fn default_surface_tolerance() -> f64 {
    0.1
}

fn default_angular_deflection() -> f64 {
    0.5
}

fn default_max_files_shown() -> usize {
    5
}

fn default_max_errors_shown() -> usize {
    3
}

fn default_local_path() -> String {
    "./logs".to_string()
}

fn default_local_rotation() -> String {
    "daily".to_string()
}
