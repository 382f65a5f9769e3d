//! Plan preview
//!
//! The preview is derived from a built [`ExportPlan`], never computed on its
//! own, so what the user sees is exactly what will run.

use super::model::ExportPlan;
use serde::Serialize;
use std::fmt;
use std::path::PathBuf;

/// One line of the preview listing
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PreviewLine {
    /// 1-based position in the plan
    pub position: usize,
    /// Format id
    pub format_id: String,
    /// Format label
    pub format_label: String,
    /// Output path
    pub target_path: PathBuf,
    /// Combine strategy, human readable
    pub combine: String,
    /// Surface tolerance, for mesh-based formats
    pub surface_tolerance: Option<f64>,
    /// Angular deflection, for mesh-based formats
    pub angular_deflection: Option<f64>,
}

/// Deterministic listing of what an [`ExportPlan`] will write
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlanPreview {
    /// Source document label
    pub document_label: String,
    /// Objects per job
    pub object_count: usize,
    /// Output directory
    pub directory: PathBuf,
    /// Planned files in execution order
    pub lines: Vec<PreviewLine>,
}

impl PlanPreview {
    pub(crate) fn from_plan(plan: &ExportPlan) -> Self {
        let lines = plan
            .jobs()
            .iter()
            .enumerate()
            .map(|(i, job)| {
                let mesh = plan.mesh_quality_for(job);
                PreviewLine {
                    position: i + 1,
                    format_id: job.format.id.to_string(),
                    format_label: job.format.display_label.to_string(),
                    target_path: job.target_path.clone(),
                    combine: job.format.combine_strategy.to_string(),
                    surface_tolerance: mesh.map(|q| q.surface_tolerance()),
                    angular_deflection: mesh.map(|q| q.angular_deflection()),
                }
            })
            .collect();

        Self {
            document_label: plan.document_label().to_string(),
            object_count: plan.object_count(),
            directory: plan.directory().to_path_buf(),
            lines,
        }
    }
}

impl fmt::Display for PlanPreview {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Export {} object(s) from \"{}\" as {} file(s) into {}:",
            self.object_count,
            self.document_label,
            self.lines.len(),
            self.directory.display()
        )?;
        let total = self.lines.len();
        for line in &self.lines {
            write!(
                f,
                "  [{}/{}] {:<4} -> {} ({}",
                line.position,
                total,
                line.format_label,
                line.target_path.display(),
                line.combine
            )?;
            match (line.surface_tolerance, line.angular_deflection) {
                (Some(tolerance), Some(deflection)) => writeln!(
                    f,
                    ", tolerance {tolerance} mm, deflection {deflection})"
                )?,
                _ => writeln!(f, ", exact geometry)")?,
            }
        }
        Ok(())
    }
}
