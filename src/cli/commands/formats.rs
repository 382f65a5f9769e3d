//! Formats command implementation
//!
//! Lists the format registry.

use crate::core::formats::{FormatDescriptor, FormatRegistry};
use clap::Args;

/// Arguments for the formats command
#[derive(Args, Debug)]
pub struct FormatsArgs {
    /// Print the registry as JSON
    #[arg(long)]
    pub json: bool,
}

impl FormatsArgs {
    /// Execute the formats command
    pub fn execute(&self) -> anyhow::Result<i32> {
        let registry = FormatRegistry::standard();

        if self.json {
            println!("{}", serde_json::to_string_pretty(registry.list_formats())?);
            return Ok(0);
        }

        println!("Supported formats (* = selected by default):");
        println!();
        for format in registry.list_formats() {
            println!("{}", Self::format_line(format));
        }
        println!();
        Ok(0)
    }

    fn format_line(format: &FormatDescriptor) -> String {
        let kind = if format.is_mesh_based { "mesh" } else { "exact" };
        let marker = if format.default_selected { '*' } else { ' ' };
        format!(
            "  {} {:<5} {:<5} .{:<5} {}",
            marker, format.id, kind, format.extension, format.description
        )
    }
}
