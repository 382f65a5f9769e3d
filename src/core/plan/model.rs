//! Export plan and jobs
//!
//! A plan is built once per set of dialog inputs and never modified; when
//! any input changes the caller builds a new one.

use super::preview::PlanPreview;
use crate::adapters::CombinedGeometry;
use crate::core::formats::FormatDescriptor;
use crate::domain::{MeshQuality, ObjectHandle};
use serde::Serialize;
use std::path::{Path, PathBuf};

/// One planned write: one format across the whole selection
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExportJob {
    /// Output format
    pub format: FormatDescriptor,

    /// Every exportable selected object, merged at execution time
    pub objects: Vec<ObjectHandle>,

    /// Absolute, sanitized output path
    pub target_path: PathBuf,
}

impl ExportJob {
    /// The job's objects grouped under the format's combine strategy
    pub fn combined(&self) -> CombinedGeometry<'_> {
        CombinedGeometry::new(self.format.combine_strategy, &self.objects)
    }
}

/// Ordered, immutable description of one export run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExportPlan {
    jobs: Vec<ExportJob>,
    directory: PathBuf,
    base_filename: String,
    mesh_quality: MeshQuality,
    document_label: String,
}

impl ExportPlan {
    pub(crate) fn new(
        jobs: Vec<ExportJob>,
        directory: PathBuf,
        base_filename: String,
        mesh_quality: MeshQuality,
        document_label: String,
    ) -> Self {
        Self {
            jobs,
            directory,
            base_filename,
            mesh_quality,
            document_label,
        }
    }

    /// Jobs in registry order
    pub fn jobs(&self) -> &[ExportJob] {
        &self.jobs
    }

    /// Number of jobs
    pub fn len(&self) -> usize {
        self.jobs.len()
    }

    /// Returns true if the plan has no jobs
    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }

    /// Resolved output directory
    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// Sanitized base filename shared by every job
    pub fn base_filename(&self) -> &str {
        &self.base_filename
    }

    /// Mesh quality shared by every mesh-based job
    pub fn mesh_quality(&self) -> &MeshQuality {
        &self.mesh_quality
    }

    /// Label of the document the selection came from
    pub fn document_label(&self) -> &str {
        &self.document_label
    }

    /// Number of objects exported by each job
    pub fn object_count(&self) -> usize {
        self.jobs.first().map_or(0, |job| job.objects.len())
    }

    /// Mesh quality to hand the exporter for `job`, if its format needs one
    pub fn mesh_quality_for(&self, job: &ExportJob) -> Option<&MeshQuality> {
        job.format.is_mesh_based.then_some(&self.mesh_quality)
    }

    /// Renders the plan for display before the user confirms
    pub fn preview(&self) -> PlanPreview {
        PlanPreview::from_plan(self)
    }
}
