//! Configuration management for Multi Export.
//!
//! This module provides TOML-based configuration loading, parsing, and
//! validation.
//!
//! # Overview
//!
//! Multi Export uses TOML configuration files with support for:
//! - Environment variable substitution (`${VAR_NAME}`)
//! - `MULTI_EXPORT_<SECTION>_<KEY>` environment overrides
//! - Default values for every setting
//! - Validation on load
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use multi_export::config::load_config;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("multi-export.toml")?;
//!
//! println!("Default formats: {:?}", config.export.formats);
//! println!("Surface tolerance: {}", config.mesh.surface_tolerance);
//! # Ok(())
//! # }
//! ```
//!
//! # Configuration Structure
//!
//! - [`ApplicationConfig`] - Application settings (log level)
//! - [`ExportConfig`] - Default formats, directory, filename, atomic writes
//! - [`MeshConfig`] - Tessellation settings for mesh-based formats
//! - [`ReportConfig`] - Status message truncation limits
//! - [`LoggingConfig`] - Logging configuration
//!
//! # Example Configuration
//!
//! ```toml
//! [application]
//! log_level = "info"
//!
//! [export]
//! formats = ["stl", "step", "3mf"]
//! output_directory = "${HOME}/exports"
//! atomic_writes = true
//!
//! [mesh]
//! surface_tolerance = 0.1
//! angular_deflection = 0.5
//! ```

pub mod loader;
pub mod schema;

pub use loader::{load_config, parse_config};
pub use schema::{
    ApplicationConfig, ExportConfig, LoggingConfig, MeshConfig, MultiExportConfig, ReportConfig,
};
