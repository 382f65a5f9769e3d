//! Configuration loader with TOML parsing and environment variable overrides

use super::schema::MultiExportConfig;
use crate::domain::errors::MultiExportError;
use crate::domain::result::Result;
use regex::Regex;
use std::fs;
use std::path::{Path, PathBuf};

/// Prefix for environment variable overrides
pub const ENV_PREFIX: &str = "MULTI_EXPORT";

/// Loads configuration from a TOML file
///
/// This function:
/// 1. Reads the TOML file
/// 2. Performs environment variable substitution (${VAR} syntax)
/// 3. Parses the TOML into MultiExportConfig
/// 4. Applies environment variable overrides (MULTI_EXPORT_* prefix)
/// 5. Validates the configuration
///
/// # Errors
///
/// Returns an error if:
/// - File cannot be read
/// - TOML parsing fails
/// - A referenced environment variable is not set
/// - Configuration validation fails
///
/// # Examples
///
/// ```no_run
/// use multi_export::config::loader::load_config;
///
/// let config = load_config("multi-export.toml").expect("Failed to load config");
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<MultiExportConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(MultiExportError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        MultiExportError::Configuration(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    parse_config(&contents)
}

/// Parses configuration text, applying substitution, overrides and validation
///
/// # Errors
///
/// Same as [`load_config`], minus file access.
pub fn parse_config(contents: &str) -> Result<MultiExportConfig> {
    let contents = substitute_env_vars(contents)?;

    let mut config: MultiExportConfig = toml::from_str(&contents)
        .map_err(|e| MultiExportError::Configuration(format!("Failed to parse TOML: {}", e)))?;

    apply_env_overrides(&mut config)?;

    config.validate().map_err(|e| {
        MultiExportError::Configuration(format!("Configuration validation failed: {}", e))
    })?;

    Ok(config)
}

/// Substitutes environment variables in the format ${VAR_NAME}
///
/// Comment lines are left untouched. All missing variables are reported
/// together.
fn substitute_env_vars(input: &str) -> Result<String> {
    let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}").map_err(|e| {
        MultiExportError::Configuration(format!("Invalid placeholder pattern: {}", e))
    })?;
    let mut result = String::with_capacity(input.len());
    let mut missing_vars: Vec<String> = Vec::new();

    for line in input.lines() {
        if line.trim_start().starts_with('#') {
            result.push_str(line);
            result.push('\n');
            continue;
        }

        let mut processed_line = line.to_string();
        for cap in re.captures_iter(line) {
            let var_name = &cap[1];
            match std::env::var(var_name) {
                Ok(value) => {
                    let placeholder = format!("${{{}}}", var_name);
                    processed_line = processed_line.replace(&placeholder, &value);
                }
                Err(_) => {
                    if !missing_vars.iter().any(|v| v == var_name) {
                        missing_vars.push(var_name.to_string());
                    }
                }
            }
        }
        result.push_str(&processed_line);
        result.push('\n');
    }

    if !missing_vars.is_empty() {
        return Err(MultiExportError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(result)
}

fn env_var(section: &str, key: &str) -> Option<String> {
    std::env::var(format!("{ENV_PREFIX}_{section}_{key}")).ok()
}

fn parse_override<T: std::str::FromStr>(name: &str, value: &str) -> Result<T> {
    value.trim().parse().map_err(|_| {
        MultiExportError::Configuration(format!(
            "Invalid value '{}' for {}_{}",
            value, ENV_PREFIX, name
        ))
    })
}

/// Applies environment variable overrides using the MULTI_EXPORT_* prefix
///
/// Environment variables follow the pattern: MULTI_EXPORT_<SECTION>_<KEY>,
/// for example MULTI_EXPORT_EXPORT_FORMATS or MULTI_EXPORT_MESH_SURFACE_TOLERANCE.
/// List values are comma separated.
fn apply_env_overrides(config: &mut MultiExportConfig) -> Result<()> {
    // Application overrides
    if let Some(val) = env_var("APPLICATION", "LOG_LEVEL") {
        config.application.log_level = val;
    }

    // Export overrides
    if let Some(val) = env_var("EXPORT", "FORMATS") {
        config.export.formats = val
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect();
    }
    if let Some(val) = env_var("EXPORT", "OUTPUT_DIRECTORY") {
        config.export.output_directory = Some(PathBuf::from(val));
    }
    if let Some(val) = env_var("EXPORT", "BASE_FILENAME") {
        config.export.base_filename = Some(val);
    }
    if let Some(val) = env_var("EXPORT", "ATOMIC_WRITES") {
        config.export.atomic_writes = parse_override("EXPORT_ATOMIC_WRITES", &val)?;
    }

    // Mesh overrides
    if let Some(val) = env_var("MESH", "SURFACE_TOLERANCE") {
        config.mesh.surface_tolerance = parse_override("MESH_SURFACE_TOLERANCE", &val)?;
    }
    if let Some(val) = env_var("MESH", "ANGULAR_DEFLECTION") {
        config.mesh.angular_deflection = parse_override("MESH_ANGULAR_DEFLECTION", &val)?;
    }

    // Report overrides
    if let Some(val) = env_var("REPORT", "MAX_FILES_SHOWN") {
        config.report.max_files_shown = parse_override("REPORT_MAX_FILES_SHOWN", &val)?;
    }
    if let Some(val) = env_var("REPORT", "MAX_ERRORS_SHOWN") {
        config.report.max_errors_shown = parse_override("REPORT_MAX_ERRORS_SHOWN", &val)?;
    }

    // Logging overrides
    if let Some(val) = env_var("LOGGING", "LOCAL_ENABLED") {
        config.logging.local_enabled = parse_override("LOGGING_LOCAL_ENABLED", &val)?;
    }
    if let Some(val) = env_var("LOGGING", "LOCAL_PATH") {
        config.logging.local_path = val;
    }
    if let Some(val) = env_var("LOGGING", "LOCAL_ROTATION") {
        config.logging.local_rotation = val;
    }

    Ok(())
}
