//! CLI interface and argument parsing
//!
//! This module provides the command-line interface for Multi Export using clap.

pub mod commands;

use crate::core::export::{ExportOutcome, ExportReport};
use clap::{Parser, Subcommand};

/// Multi Export - plan CAD exports to several formats at once
#[derive(Parser, Debug)]
#[command(name = "multi-export")]
#[command(version, about, long_about = None)]
#[command(author = "Multi Export Contributors")]
pub struct Cli {
    /// Path to configuration file
    #[arg(
        short,
        long,
        default_value = "multi-export.toml",
        env = "MULTI_EXPORT_CONFIG"
    )]
    pub config: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "MULTI_EXPORT_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List supported export formats
    Formats(commands::formats::FormatsArgs),

    /// Build an export plan and print its preview without writing files
    Plan(commands::plan::PlanArgs),

    /// Validate configuration file
    ValidateConfig(commands::validate::ValidateArgs),

    /// Initialize a new configuration file
    Init(commands::init::InitArgs),
}

/// Process exit code for a finished export run
///
/// 0 when every planned file was written (or nothing was planned), 1 when
/// any job failed, 130 when the run was cancelled.
pub fn exit_code(report: &ExportReport) -> i32 {
    if report.is_cancelled() {
        return 130;
    }
    match report.summarize().outcome() {
        ExportOutcome::AllSucceeded | ExportOutcome::NothingExported => 0,
        ExportOutcome::PartialSuccess | ExportOutcome::AllFailed => 1,
    }
}
