//! Init command implementation
//!
//! This module implements the `init` command for generating a sample
//! configuration file.

use clap::Args;
use std::fs;
use std::path::Path;

/// Arguments for the init command
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Path where to create the configuration file
    #[arg(short, long, default_value = "multi-export.toml")]
    pub output: String,

    /// Overwrite existing file
    #[arg(long)]
    pub force: bool,
}

impl InitArgs {
    /// Execute the init command
    pub fn execute(&self) -> anyhow::Result<i32> {
        tracing::info!(output = %self.output, "Initializing configuration file");

        println!("📝 Initializing Multi Export configuration");
        println!();

        if Path::new(&self.output).exists() && !self.force {
            println!("❌ Configuration file already exists: {}", self.output);
            println!("   Use --force to overwrite");
            return Ok(2);
        }

        match fs::write(&self.output, Self::sample_config()) {
            Ok(_) => {
                println!("✅ Configuration file created: {}", self.output);
                println!();
                println!("Next steps:");
                println!("  1. Edit {} with your default formats", self.output);
                println!("  2. Validate configuration: multi-export validate-config");
                println!("  3. Preview an export: multi-export plan --object Body --dir ./out");
                println!();
                Ok(0)
            }
            Err(e) => {
                println!("❌ Failed to write configuration file");
                println!("   Error: {}", e);
                Ok(5)
            }
        }
    }

    /// Sample configuration with every setting at its default
    fn sample_config() -> String {
        r#"# Multi Export Configuration File
#
# Every setting is optional; the values below are the defaults.
# Use ${VAR_NAME} to substitute environment variables, and
# MULTI_EXPORT_<SECTION>_<KEY> variables to override single settings.

# ============================================================================
# Application Settings
# ============================================================================
[application]
# Log level (trace, debug, info, warn, error)
log_level = "info"

# ============================================================================
# Export Defaults
# ============================================================================
[export]
# Formats selected by default: stl, step, 3mf, obj, iges, brep, ply, amf
formats = ["stl", "step", "3mf"]

# Output directory (default: directory of the saved document)
# output_directory = "${HOME}/exports"

# Base filename (default: object label, or document label for several objects)
# base_filename = "assembly"

# Write through a hidden staging file so failed exports leave nothing behind
atomic_writes = true

# ============================================================================
# Mesh Quality (STL, 3MF, OBJ, PLY, AMF)
# ============================================================================
[mesh]
# Maximum chordal deviation in millimetres (0.001 - 10)
surface_tolerance = 0.1

# Maximum angle between adjacent facet normals (0.001 - 10)
angular_deflection = 0.5

# ============================================================================
# Status Message
# ============================================================================
[report]
# Exported files listed before "... and N more"
max_files_shown = 5

# Failures listed before "... and N more"
max_errors_shown = 3

# ============================================================================
# Logging Configuration
# ============================================================================
[logging]
# Write JSON logs to rotating files
local_enabled = false

# Log directory
local_path = "./logs"

# Log rotation (daily or hourly)
local_rotation = "daily"
"#
        .to_string()
    }
}
