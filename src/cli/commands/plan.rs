//! Plan command implementation
//!
//! Builds an export plan for a described selection and prints its preview.
//! Nothing is written; the binary carries no geometry kernel.

use super::load_or_default;
use crate::adapters::StaticSelection;
use crate::core::export::ExportCoordinator;
use crate::core::plan::ExportRequest;
use crate::domain::{MeshQuality, ObjectHandle, Selection, ValidationError};
use clap::Args;
use std::path::PathBuf;

/// Arguments for the plan command
#[derive(Args, Debug)]
pub struct PlanArgs {
    /// Label of the source document
    #[arg(long, default_value = "Unnamed")]
    pub document: String,

    /// Path of the saved document; its directory is the default output directory
    #[arg(long)]
    pub document_path: Option<PathBuf>,

    /// Label of a selected object (repeat for several objects)
    #[arg(long = "object")]
    pub objects: Vec<String>,

    /// Comma-separated format ids (default: from configuration)
    #[arg(long, value_delimiter = ',')]
    pub formats: Vec<String>,

    /// Output directory
    #[arg(long)]
    pub dir: Option<PathBuf>,

    /// Base filename without extension
    #[arg(long)]
    pub name: Option<String>,

    /// Surface tolerance in millimetres for mesh formats
    #[arg(long)]
    pub tolerance: Option<f64>,

    /// Angular deflection for mesh formats
    #[arg(long)]
    pub deflection: Option<f64>,

    /// Print the preview as JSON
    #[arg(long)]
    pub json: bool,
}

impl PlanArgs {
    /// Execute the plan command
    pub fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(
            document = %self.document,
            objects = self.objects.len(),
            "Planning export"
        );

        let config = match load_or_default(config_path) {
            Ok(c) => c,
            Err(e) => {
                println!("❌ Failed to load configuration file");
                println!("   Error: {e}");
                return Ok(2);
            }
        };

        let coordinator = ExportCoordinator::new(config);
        let request = match coordinator
            .request_from_config()
            .map_err(|e| e.to_string())
            .and_then(|base| self.apply_to(base).map_err(|e| e.to_string()))
        {
            Ok(r) => r,
            Err(e) => {
                println!("❌ Invalid export options");
                println!("   Error: {e}");
                return Ok(2);
            }
        };

        let selection = match self.selection() {
            Ok(s) => s,
            Err(e) => {
                println!("❌ Invalid selection");
                println!("   Error: {e}");
                return Ok(2);
            }
        };

        let plan = match coordinator.prepare(&StaticSelection::new(selection), &request) {
            Ok(p) => p,
            Err(e) => {
                println!("❌ Cannot build export plan");
                println!("   Error: {e}");
                return Ok(2);
            }
        };

        let preview = plan.preview();
        if self.json {
            println!("{}", serde_json::to_string_pretty(&preview)?);
        } else {
            print!("{preview}");
        }

        Ok(0)
    }

    /// Overlays the command-line options on a request built from configuration
    fn apply_to(&self, mut request: ExportRequest) -> Result<ExportRequest, ValidationError> {
        if !self.formats.is_empty() {
            request.formats = self.formats.clone();
        }
        if let Some(dir) = &self.dir {
            request.directory = Some(dir.clone());
        }
        if let Some(name) = &self.name {
            request.base_filename = Some(name.clone());
        }
        if self.tolerance.is_some() || self.deflection.is_some() {
            let current = request.mesh_quality;
            request.mesh_quality = MeshQuality::new(
                self.tolerance.unwrap_or(current.surface_tolerance()),
                self.deflection.unwrap_or(current.angular_deflection()),
            )?;
        }
        Ok(request)
    }

    fn selection(&self) -> Result<Selection, String> {
        let objects = self
            .objects
            .iter()
            .map(|label| ObjectHandle::labelled(label.as_str()))
            .collect::<Result<Vec<_>, _>>()?;

        let mut selection = Selection::new(self.document.clone(), objects);
        if let Some(path) = &self.document_path {
            selection = selection.with_document_path(path.clone());
        }
        Ok(selection)
    }
}
