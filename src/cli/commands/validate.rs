//! Validate config command implementation
//!
//! This module implements the `validate-config` command for validating
//! the Multi Export configuration file.

use crate::config::load_config;
use clap::Args;

/// Arguments for the validate-config command
#[derive(Args, Debug)]
pub struct ValidateArgs {}

impl ValidateArgs {
    /// Execute the validate-config command
    pub fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(config_path = %config_path, "Validating configuration");

        println!("🔍 Validating configuration file: {config_path}");
        println!();

        // load_config validates before returning
        let config = match load_config(config_path) {
            Ok(c) => c,
            Err(e) => {
                println!("❌ Configuration is invalid");
                println!("   Error: {e}");
                return Ok(2);
            }
        };

        println!("✅ Configuration is valid");
        println!();
        println!("Configuration Summary:");
        println!("  Log Level: {}", config.application.log_level);
        println!("  Formats: {}", config.export.formats.join(", "));
        match &config.export.output_directory {
            Some(dir) => println!("  Output Directory: {}", dir.display()),
            None => println!("  Output Directory: (document directory)"),
        }
        match &config.export.base_filename {
            Some(name) => println!("  Base Filename: {name}"),
            None => println!("  Base Filename: (object or document label)"),
        }
        println!("  Atomic Writes: {}", config.export.atomic_writes);
        println!(
            "  Mesh Quality: tolerance {} mm, deflection {}",
            config.mesh.surface_tolerance, config.mesh.angular_deflection
        );
        println!(
            "  Report Limits: {} files, {} errors",
            config.report.max_files_shown, config.report.max_errors_shown
        );
        if config.logging.local_enabled {
            println!(
                "  File Logging: {} ({})",
                config.logging.local_path, config.logging.local_rotation
            );
        } else {
            println!("  File Logging: disabled");
        }
        println!();
        Ok(0)
    }
}
