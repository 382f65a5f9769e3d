//! Export plan builder
//!
//! Pure data assembly: validates the dialog inputs and produces an
//! [`ExportPlan`]. The only filesystem access is the output directory check,
//! which runs after every cheaper validation has passed.

use super::model::{ExportJob, ExportPlan};
use super::preview::PlanPreview;
use super::request::ExportRequest;
use crate::adapters::SelectionProvider;
use crate::core::formats::{FormatDescriptor, FormatRegistry};
use crate::core::paths::{
    build_path, default_base_name, default_directory, resolve_directory, sanitize_filename,
};
use crate::domain::{ObjectHandle, Selection, ValidationError};

/// Builds export plans against a format registry
#[derive(Debug, Clone, Copy)]
pub struct ExportPlanBuilder<'r> {
    registry: &'r FormatRegistry,
}

impl<'r> ExportPlanBuilder<'r> {
    /// Create a new builder over `registry`
    pub fn new(registry: &'r FormatRegistry) -> Self {
        Self { registry }
    }

    /// Build a plan
    ///
    /// Checks run in this order, each failing fast:
    /// 1. Selection not empty ([`ValidationError::EmptySelection`])
    /// 2. At least one object passes `is_exportable`
    ///    ([`ValidationError::NoExportableObjects`])
    /// 3. At least one format chosen ([`ValidationError::NoFormatsSelected`])
    /// 4. Every format id registered ([`ValidationError::UnknownFormat`])
    /// 5. Output directory exists and is writable
    ///    ([`ValidationError::InvalidDirectory`])
    ///
    /// The result has one job per distinct chosen format, in registry order,
    /// each carrying every exportable object.
    pub fn build<F>(
        &self,
        selection: &Selection,
        is_exportable: F,
        request: &ExportRequest,
    ) -> Result<ExportPlan, ValidationError>
    where
        F: Fn(&ObjectHandle) -> bool,
    {
        if selection.is_empty() {
            return Err(ValidationError::EmptySelection);
        }

        let objects = selection.retain_exportable(is_exportable);
        if objects.is_empty() {
            return Err(ValidationError::NoExportableObjects);
        }
        if objects.len() < selection.len() {
            tracing::debug!(
                selected = selection.len(),
                exportable = objects.len(),
                "Skipping objects without exportable geometry"
            );
        }

        let formats = self.resolve_formats(&request.formats)?;

        let directory = match request.directory.clone().or_else(|| default_directory(selection)) {
            Some(dir) => resolve_directory(&dir)?,
            None => {
                return Err(ValidationError::InvalidDirectory {
                    path: Default::default(),
                    reason: "no output directory specified and the document has not been saved"
                        .to_string(),
                })
            }
        };

        let base_filename = match request.base_filename.as_deref() {
            Some(name) if !name.trim().is_empty() => sanitize_filename(name),
            _ => default_base_name(&objects, &selection.document_label),
        };

        let jobs: Vec<ExportJob> = formats
            .into_iter()
            .map(|format| ExportJob {
                target_path: build_path(&directory, &base_filename, &format),
                format,
                objects: objects.clone(),
            })
            .collect();

        tracing::info!(
            jobs = jobs.len(),
            objects = objects.len(),
            directory = %directory.display(),
            base_filename = %base_filename,
            "Export plan built"
        );

        Ok(ExportPlan::new(
            jobs,
            directory,
            base_filename,
            request.mesh_quality,
            selection.document_label.clone(),
        ))
    }

    /// Build a plan from the host's current selection
    ///
    /// The provider is queried once; nothing is cached.
    pub fn build_from_provider(
        &self,
        provider: &dyn SelectionProvider,
        request: &ExportRequest,
    ) -> Result<ExportPlan, ValidationError> {
        let selection = provider.current_selection();
        self.build(&selection, |object| provider.is_exportable(object), request)
    }

    /// Build a plan and render its preview
    ///
    /// Shares [`build`](Self::build) with the real export, so the preview can
    /// never disagree with what would be written.
    pub fn preview<F>(
        &self,
        selection: &Selection,
        is_exportable: F,
        request: &ExportRequest,
    ) -> Result<PlanPreview, ValidationError>
    where
        F: Fn(&ObjectHandle) -> bool,
    {
        Ok(self.build(selection, is_exportable, request)?.preview())
    }

    /// Look up the chosen ids, drop duplicates and sort into registry order
    fn resolve_formats(&self, ids: &[String]) -> Result<Vec<FormatDescriptor>, ValidationError> {
        if ids.is_empty() {
            return Err(ValidationError::NoFormatsSelected);
        }

        let mut formats: Vec<FormatDescriptor> = Vec::with_capacity(ids.len());
        for id in ids {
            let format = *self.registry.get(id)?;
            if !formats.contains(&format) {
                formats.push(format);
            }
        }
        formats.sort_by_key(|format| self.registry.position(format));
        Ok(formats)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::formats::CombineStrategy;
    use crate::domain::MeshQuality;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn handles(labels: &[&str]) -> Vec<ObjectHandle> {
        labels
            .iter()
            .map(|l| ObjectHandle::labelled(*l).unwrap())
            .collect()
    }

    fn all(_: &ObjectHandle) -> bool {
        true
    }

    #[test]
    fn test_single_object_scenario() {
        let dir = TempDir::new().unwrap();
        let registry = FormatRegistry::standard();
        let selection = Selection::new("Assembly", handles(&["Bracket"]));
        let request = ExportRequest::new(["step", "stl"]).directory(dir.path());

        let plan = ExportPlanBuilder::new(&registry)
            .build(&selection, all, &request)
            .unwrap();

        let names: Vec<_> = plan
            .jobs()
            .iter()
            .map(|j| j.target_path.file_name().unwrap().to_string_lossy().to_string())
            .collect();
        assert_eq!(names, vec!["Bracket.stl", "Bracket.step"]);
        assert_eq!(plan.base_filename(), "Bracket");
    }

    #[test]
    fn test_multi_object_single_job() {
        let dir = TempDir::new().unwrap();
        let registry = FormatRegistry::standard();
        let selection = Selection::new("Assembly", handles(&["A", "B", "C"]));
        let request = ExportRequest::new(["stl"]).directory(dir.path());

        let plan = ExportPlanBuilder::new(&registry)
            .build(&selection, all, &request)
            .unwrap();

        assert_eq!(plan.len(), 1);
        let job = &plan.jobs()[0];
        assert_eq!(job.objects.len(), 3);
        assert_eq!(job.combined().strategy, CombineStrategy::MeshCompound);
        assert!(job.target_path.ends_with("Assembly.stl"));
    }

    #[test]
    fn test_empty_selection_checked_first() {
        let registry = FormatRegistry::standard();
        let selection = Selection::new("Doc", vec![]);
        // Bad formats and directory would also fail; the selection wins
        let request = ExportRequest::new(Vec::<String>::new()).directory("/definitely/missing");

        let err = ExportPlanBuilder::new(&registry)
            .build(&selection, all, &request)
            .unwrap_err();
        assert_eq!(err, ValidationError::EmptySelection);
    }

    #[test]
    fn test_no_exportable_objects() {
        let registry = FormatRegistry::standard();
        let selection = Selection::new("Doc", handles(&["Sketch"]));
        let request = ExportRequest::new(["stl"]).directory("/definitely/missing");

        let err = ExportPlanBuilder::new(&registry)
            .build(&selection, |_| false, &request)
            .unwrap_err();
        assert_eq!(err, ValidationError::NoExportableObjects);
    }

    #[test]
    fn test_no_formats_selected() {
        let registry = FormatRegistry::standard();
        let selection = Selection::new("Doc", handles(&["Body"]));
        let request = ExportRequest::new(Vec::<String>::new());

        let err = ExportPlanBuilder::new(&registry)
            .build(&selection, all, &request)
            .unwrap_err();
        assert_eq!(err, ValidationError::NoFormatsSelected);
    }

    #[test]
    fn test_unknown_format() {
        let registry = FormatRegistry::standard();
        let selection = Selection::new("Doc", handles(&["Body"]));
        let request = ExportRequest::new(["stl", "dwg"]);

        let err = ExportPlanBuilder::new(&registry)
            .build(&selection, all, &request)
            .unwrap_err();
        assert_eq!(err, ValidationError::UnknownFormat("dwg".to_string()));
    }

    #[test]
    fn test_missing_directory_without_document() {
        let registry = FormatRegistry::standard();
        let selection = Selection::new("Doc", handles(&["Body"]));
        let request = ExportRequest::new(["stl"]);

        let err = ExportPlanBuilder::new(&registry)
            .build(&selection, all, &request)
            .unwrap_err();
        assert!(matches!(err, ValidationError::InvalidDirectory { .. }));
    }

    #[test]
    fn test_directory_defaults_to_document_directory() {
        let dir = TempDir::new().unwrap();
        let registry = FormatRegistry::standard();
        let selection = Selection::new("Doc", handles(&["Body"]))
            .with_document_path(dir.path().join("Doc.FCStd"));
        let request = ExportRequest::new(["brep"]);

        let plan = ExportPlanBuilder::new(&registry)
            .build(&selection, all, &request)
            .unwrap();
        assert_eq!(plan.directory(), std::path::absolute(dir.path()).unwrap());
    }

    #[test]
    fn test_duplicate_formats_collapse() {
        let dir = TempDir::new().unwrap();
        let registry = FormatRegistry::standard();
        let selection = Selection::new("Doc", handles(&["Body"]));
        let request = ExportRequest::new(["STL", "stl", "obj"]).directory(dir.path());

        let plan = ExportPlanBuilder::new(&registry)
            .build(&selection, all, &request)
            .unwrap();
        let ids: Vec<_> = plan.jobs().iter().map(|j| j.format.id).collect();
        assert_eq!(ids, vec!["stl", "obj"]);
    }

    #[test]
    fn test_explicit_base_filename_sanitized() {
        let dir = TempDir::new().unwrap();
        let registry = FormatRegistry::standard();
        let selection = Selection::new("Doc", handles(&["Body"]));
        let request = ExportRequest::new(["stl"])
            .directory(dir.path())
            .base_filename("  part<1>.  ");

        let plan = ExportPlanBuilder::new(&registry)
            .build(&selection, all, &request)
            .unwrap();
        assert_eq!(plan.base_filename(), "part_1_");
    }

    #[test]
    fn test_blank_base_filename_uses_default() {
        let dir = TempDir::new().unwrap();
        let registry = FormatRegistry::standard();
        let selection = Selection::new("Doc", handles(&["Body"]));
        let request = ExportRequest::new(["stl"])
            .directory(dir.path())
            .base_filename("   ");

        let plan = ExportPlanBuilder::new(&registry)
            .build(&selection, all, &request)
            .unwrap();
        assert_eq!(plan.base_filename(), "Body");
    }

    #[test]
    fn test_filtered_selection_uses_exportable_objects() {
        let dir = TempDir::new().unwrap();
        let registry = FormatRegistry::standard();
        let selection = Selection::new("Doc", handles(&["Sketch", "Bracket"]));
        let request = ExportRequest::new(["stl"]).directory(dir.path());

        let plan = ExportPlanBuilder::new(&registry)
            .build(&selection, |o| o.label != "Sketch", &request)
            .unwrap();
        assert_eq!(plan.object_count(), 1);
        assert_eq!(plan.base_filename(), "Bracket");
    }

    #[test]
    fn test_mesh_quality_only_for_mesh_formats() {
        let dir = TempDir::new().unwrap();
        let registry = FormatRegistry::standard();
        let selection = Selection::new("Doc", handles(&["Body"]));
        let request = ExportRequest::new(["stl", "step"])
            .directory(dir.path())
            .mesh_quality(MeshQuality::coarse());

        let plan = ExportPlanBuilder::new(&registry)
            .build(&selection, all, &request)
            .unwrap();
        assert_eq!(
            plan.mesh_quality_for(&plan.jobs()[0]),
            Some(&MeshQuality::coarse())
        );
        assert_eq!(plan.mesh_quality_for(&plan.jobs()[1]), None);
    }

    #[test]
    fn test_build_writes_nothing() {
        let dir = TempDir::new().unwrap();
        let registry = FormatRegistry::standard();
        let selection = Selection::new("Doc", handles(&["Body"]));
        let request = ExportRequest::new(["stl", "step", "3mf"]).directory(dir.path());

        ExportPlanBuilder::new(&registry)
            .build(&selection, all, &request)
            .unwrap();
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_preview_is_reproducible() {
        let dir = TempDir::new().unwrap();
        let registry = FormatRegistry::standard();
        let builder = ExportPlanBuilder::new(&registry);
        let selection = Selection::new("Doc", handles(&["Body"]));
        let request = ExportRequest::new(["stl", "iges"]).directory(dir.path());

        let first = builder.preview(&selection, all, &request).unwrap().to_string();
        let second = builder
            .build(&selection, all, &request)
            .unwrap()
            .preview()
            .to_string();
        assert_eq!(first, second);
        assert!(first.contains("[1/2] STL "));
        assert!(first.contains("tolerance 0.1 mm, deflection 0.5"));
        assert!(first.contains("[2/2] IGES"));
        assert!(first.contains("exact geometry"));
    }

    #[test]
    fn test_target_paths_absolute() {
        let dir = TempDir::new().unwrap();
        let registry = FormatRegistry::standard();
        let selection = Selection::new("Doc", handles(&["Body"]));
        let request = ExportRequest::new(["ply"]).directory(dir.path());

        let plan = ExportPlanBuilder::new(&registry)
            .build(&selection, all, &request)
            .unwrap();
        let path: &PathBuf = &plan.jobs()[0].target_path;
        assert!(path.is_absolute());
    }
}
