//! CLI command implementations
//!
//! This module contains all CLI command implementations.

pub mod formats;
pub mod init;
pub mod plan;
pub mod validate;

use crate::config::{load_config, MultiExportConfig};
use crate::domain::Result;
use std::path::Path;

/// Loads the configuration file, or the defaults when it does not exist
///
/// # Errors
///
/// Returns an error if the file exists but cannot be loaded or is invalid.
pub fn load_or_default(config_path: &str) -> Result<MultiExportConfig> {
    if Path::new(config_path).exists() {
        load_config(config_path)
    } else {
        tracing::debug!(
            config_path = %config_path,
            "Configuration file not found, using defaults"
        );
        Ok(MultiExportConfig::default())
    }
}
