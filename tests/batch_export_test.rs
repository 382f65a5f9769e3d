//! Integration tests for batch execution
//!
//! A recording exporter stands in for the geometry kernel: it writes a small
//! file per call and remembers what it was asked to do.

use multi_export::adapters::{CombinedGeometry, GeometryExporter};
use multi_export::core::export::{
    BatchExporter, CancelFlag, ExportOutcome, ExportProgress, ExporterState, JobStatus,
};
use multi_export::core::formats::{CombineStrategy, FormatDescriptor, FormatRegistry};
use multi_export::core::plan::{ExportPlan, ExportPlanBuilder, ExportRequest};
use multi_export::domain::{
    ExecutionErrorKind, GeometryError, MeshQuality, ObjectHandle, Selection,
};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

#[derive(Debug, Clone)]
struct Call {
    format_id: &'static str,
    write_path: PathBuf,
    object_count: usize,
    strategy: CombineStrategy,
    compound: bool,
    mesh_quality: Option<MeshQuality>,
}

/// What the recording exporter does for a given format
#[derive(Debug, Clone)]
enum Behavior {
    /// Write a partial file, then report the error
    Fail(GeometryError),
    /// Report success after deleting what it wrote
    Vanish,
    /// Report an explicit byte count
    Report(u64),
}

#[derive(Default)]
struct RecordingExporter {
    calls: Vec<Call>,
    behavior: HashMap<&'static str, Behavior>,
}

impl RecordingExporter {
    fn with(mut self, format_id: &'static str, behavior: Behavior) -> Self {
        self.behavior.insert(format_id, behavior);
        self
    }
}

impl GeometryExporter for RecordingExporter {
    fn export(
        &mut self,
        geometry: &CombinedGeometry<'_>,
        format: &FormatDescriptor,
        target_path: &Path,
        mesh_quality: Option<&MeshQuality>,
    ) -> Result<Option<u64>, GeometryError> {
        self.calls.push(Call {
            format_id: format.id,
            write_path: target_path.to_path_buf(),
            object_count: geometry.len(),
            strategy: geometry.strategy,
            compound: geometry.is_compound(),
            mesh_quality: mesh_quality.copied(),
        });

        let labels: Vec<&str> = geometry.objects.iter().map(|o| o.label.as_str()).collect();
        let content = format!("{}:{}", format.id, labels.join("+"));

        match self.behavior.get(format.id) {
            Some(Behavior::Fail(err)) => {
                fs::write(target_path, &content[..2])?;
                Err(err.clone())
            }
            Some(Behavior::Vanish) => {
                fs::write(target_path, &content)?;
                fs::remove_file(target_path)?;
                Ok(None)
            }
            Some(Behavior::Report(bytes)) => {
                fs::write(target_path, &content)?;
                Ok(Some(*bytes))
            }
            None => {
                fs::write(target_path, &content)?;
                Ok(None)
            }
        }
    }
}

fn handles(labels: &[&str]) -> Vec<ObjectHandle> {
    labels
        .iter()
        .map(|l| ObjectHandle::labelled(*l).unwrap())
        .collect()
}

fn plan_for(dir: &Path, labels: &[&str], formats: &[&str]) -> ExportPlan {
    let registry = FormatRegistry::standard();
    let selection = Selection::new("Assembly", handles(labels));
    let request = ExportRequest::new(formats.iter().copied()).directory(dir);
    ExportPlanBuilder::new(&registry)
        .build(&selection, |_| true, &request)
        .unwrap()
}

fn dir_entries(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

#[test]
fn test_all_jobs_succeed_in_plan_order() {
    let dir = TempDir::new().unwrap();
    let plan = plan_for(dir.path(), &["Bracket"], &["3mf", "stl", "step"]);
    let mut batch = BatchExporter::new(RecordingExporter::default());

    let report = batch.run(&plan, |_| {}, || false);

    assert_eq!(batch.state(), ExporterState::Done);
    let ids: Vec<&str> = batch.exporter().calls.iter().map(|c| c.format_id).collect();
    assert_eq!(ids, vec!["stl", "step", "3mf"]);
    assert_eq!(report.succeeded_count(), 3);
    assert_eq!(report.failed_count(), 0);
    assert_eq!(
        dir_entries(dir.path()),
        vec!["Bracket.3mf", "Bracket.step", "Bracket.stl"]
    );
    assert_eq!(report.summarize().outcome(), ExportOutcome::AllSucceeded);
}

#[test]
fn test_failure_does_not_stop_the_batch() {
    let dir = TempDir::new().unwrap();
    let plan = plan_for(dir.path(), &["Bracket"], &["stl", "step", "3mf"]);
    let exporter = RecordingExporter::default().with(
        "stl",
        Behavior::Fail(GeometryError::InvalidGeometry("open shell".into())),
    );
    let mut batch = BatchExporter::new(exporter);

    let report = batch.run(&plan, |_| {}, || false);

    assert_eq!(batch.exporter().calls.len(), 3);
    assert_eq!(report.results().len(), 3);
    assert_eq!(report.results()[0].status(), JobStatus::Failed);
    assert_eq!(
        report.results()[0].error_kind(),
        Some(ExecutionErrorKind::InvalidGeometry)
    );
    assert_eq!(report.results()[1].status(), JobStatus::Succeeded);
    assert_eq!(report.results()[2].status(), JobStatus::Succeeded);

    let failed_entries = report
        .results()
        .iter()
        .filter(|r| r.status() == JobStatus::Failed)
        .count();
    assert_eq!(report.failed_count(), failed_entries);

    let summary = report.summarize();
    assert_eq!(summary.outcome(), ExportOutcome::PartialSuccess);
    assert_eq!(summary.failures.len(), 1);
    assert_eq!(summary.failures[0].format_id, "stl");
    assert_eq!(summary.failures[0].error_kind, ExecutionErrorKind::InvalidGeometry);
}

#[test]
fn test_every_job_failing() {
    let dir = TempDir::new().unwrap();
    let plan = plan_for(dir.path(), &["Bracket"], &["stl", "amf"]);
    let exporter = RecordingExporter::default()
        .with("stl", Behavior::Fail(GeometryError::IoFailure("disk full".into())))
        .with(
            "amf",
            Behavior::Fail(GeometryError::UnsupportedFeature("colors".into())),
        );
    let mut batch = BatchExporter::new(exporter);

    let report = batch.run(&plan, |_| {}, || false);
    let summary = report.summarize();

    assert_eq!(summary.outcome(), ExportOutcome::AllFailed);
    assert_eq!(
        summary
            .failures
            .iter()
            .map(|f| f.error_kind)
            .collect::<Vec<_>>(),
        vec![
            ExecutionErrorKind::IoFailure,
            ExecutionErrorKind::UnsupportedFeature
        ]
    );
    assert!(dir_entries(dir.path()).is_empty());
}

#[test]
fn test_cancel_after_k_jobs() {
    let dir = TempDir::new().unwrap();
    let plan = plan_for(
        dir.path(),
        &["Bracket"],
        &["stl", "step", "3mf", "obj", "ply"],
    );

    for k in 0..=plan.len() {
        let mut batch = BatchExporter::new(RecordingExporter::default());
        let flag = CancelFlag::new();
        let remote = flag.clone();

        if k == 0 {
            remote.cancel();
        }
        let report = batch.run(
            &plan,
            |p: &ExportProgress| {
                if p.completed == k {
                    remote.cancel();
                }
            },
            flag.as_check(),
        );

        assert_eq!(report.results().len(), k, "cancelled after {k}");
        for (result, job) in report.results().iter().zip(plan.jobs()) {
            assert_eq!(result.format().id, job.format.id);
        }
        let expected = if k == plan.len() {
            ExporterState::Done
        } else {
            ExporterState::Cancelled
        };
        assert_eq!(batch.state(), expected);
        assert_eq!(report.state(), expected);
    }
}

#[test]
fn test_cancelled_summary_mentions_skipped_jobs() {
    let dir = TempDir::new().unwrap();
    let plan = plan_for(dir.path(), &["Bracket"], &["stl", "step", "3mf"]);
    let flag = CancelFlag::new();
    let mut batch = BatchExporter::new(RecordingExporter::default());

    let report = batch.run(&plan, |_| flag.cancel(), || flag.is_cancelled());

    assert!(report.is_cancelled());
    assert_eq!(report.planned_jobs(), 3);
    assert_eq!(report.results().len(), 1);
    let message = report.summarize().render_message(5, 3);
    assert!(message.contains("Successfully exported 1 file(s):"));
    assert!(message.contains("Export cancelled after 1 of 3 job(s)"));
}

#[test]
fn test_progress_is_monotonic() {
    let dir = TempDir::new().unwrap();
    let plan = plan_for(dir.path(), &["Bracket"], &["stl", "step", "3mf", "obj"]);
    let exporter = RecordingExporter::default().with(
        "step",
        Behavior::Fail(GeometryError::InvalidGeometry("bad face".into())),
    );
    let mut batch = BatchExporter::new(exporter);
    let mut seen: Vec<ExportProgress> = Vec::new();

    batch.run(&plan, |p| seen.push(*p), || false);

    let completed: Vec<usize> = seen.iter().map(|p| p.completed).collect();
    assert_eq!(completed, vec![1, 2, 3, 4]);
    assert!(seen.iter().all(|p| p.total == 4));
    let labels: Vec<&str> = seen.iter().map(|p| p.label).collect();
    assert_eq!(labels, vec!["STL", "STEP", "3MF", "OBJ"]);
    assert_eq!(seen[1].status, JobStatus::Failed);
    assert_eq!(seen[3].percent(), 100.0);
}

#[test]
fn test_multi_object_selection_is_one_job_per_format() {
    let dir = TempDir::new().unwrap();
    let plan = plan_for(dir.path(), &["Base", "Arm", "Pin"], &["stl", "step"]);
    let mut batch = BatchExporter::new(RecordingExporter::default());

    batch.run(&plan, |_| {}, || false);
    let calls = &batch.exporter().calls;

    assert_eq!(calls.len(), 2);
    assert!(calls.iter().all(|c| c.object_count == 3 && c.compound));
    assert_eq!(calls[0].strategy, CombineStrategy::MeshCompound);
    assert_eq!(calls[1].strategy, CombineStrategy::ShapeCompound);
    assert_eq!(
        fs::read_to_string(dir.path().join("Assembly.stl")).unwrap(),
        "stl:Base+Arm+Pin"
    );
}

#[test]
fn test_mesh_quality_only_for_mesh_formats() {
    let dir = TempDir::new().unwrap();
    let registry = FormatRegistry::standard();
    let selection = Selection::new("Doc", handles(&["Bracket"]));
    let request = ExportRequest::new(["stl", "step", "brep", "obj"])
        .directory(dir.path())
        .mesh_quality(MeshQuality::fine());
    let plan = ExportPlanBuilder::new(&registry)
        .build(&selection, |_| true, &request)
        .unwrap();
    let mut batch = BatchExporter::new(RecordingExporter::default());

    batch.run(&plan, |_| {}, || false);

    for call in &batch.exporter().calls {
        match call.format_id {
            "stl" | "obj" => assert_eq!(call.mesh_quality, Some(MeshQuality::fine())),
            _ => assert_eq!(call.mesh_quality, None),
        }
    }
}

#[test]
fn test_atomic_writes_stage_next_to_target() {
    let dir = TempDir::new().unwrap();
    let plan = plan_for(dir.path(), &["Bracket"], &["stl", "3mf"]);
    let mut batch = BatchExporter::new(RecordingExporter::default());

    batch.run(&plan, |_| {}, || false);

    for (call, job) in batch.exporter().calls.iter().zip(plan.jobs()) {
        assert_ne!(call.write_path, job.target_path);
        assert_eq!(call.write_path.parent(), job.target_path.parent());
        assert_eq!(call.write_path.extension(), job.target_path.extension());
        assert!(!call.write_path.exists());
    }
    assert_eq!(dir_entries(dir.path()), vec!["Bracket.3mf", "Bracket.stl"]);
}

#[test]
fn test_failed_job_leaves_no_truncated_file() {
    let dir = TempDir::new().unwrap();
    let plan = plan_for(dir.path(), &["Bracket"], &["stl", "step"]);
    let exporter = RecordingExporter::default().with(
        "step",
        Behavior::Fail(GeometryError::IoFailure("disk full".into())),
    );
    let mut batch = BatchExporter::new(exporter);

    batch.run(&plan, |_| {}, || false);

    assert_eq!(dir_entries(dir.path()), vec!["Bracket.stl"]);
}

#[test]
fn test_direct_writes_go_to_target() {
    let dir = TempDir::new().unwrap();
    let plan = plan_for(dir.path(), &["Bracket"], &["stl"]);
    let mut batch = BatchExporter::new(RecordingExporter::default()).with_atomic_writes(false);

    batch.run(&plan, |_| {}, || false);

    assert_eq!(batch.exporter().calls[0].write_path, plan.jobs()[0].target_path);
}

#[test]
fn test_existing_file_is_overwritten() {
    let dir = TempDir::new().unwrap();
    let target = dir.path().join("Bracket.stl");
    fs::write(&target, "previous export").unwrap();
    let plan = plan_for(dir.path(), &["Bracket"], &["stl"]);
    let mut batch = BatchExporter::new(RecordingExporter::default());

    let report = batch.run(&plan, |_| {}, || false);

    assert_eq!(report.succeeded_count(), 1);
    assert_eq!(fs::read_to_string(&target).unwrap(), "stl:Bracket");
}

#[cfg(unix)]
#[test]
fn test_atomic_and_direct_writes_leave_same_modes() {
    use std::os::unix::fs::PermissionsExt;

    let mode = |path: &Path| fs::metadata(path).unwrap().permissions().mode() & 0o777;
    let mut modes = Vec::new();

    for atomic in [false, true] {
        let dir = TempDir::new().unwrap();
        let existing = dir.path().join("Bracket.step");
        fs::write(&existing, "previous export").unwrap();
        fs::set_permissions(&existing, fs::Permissions::from_mode(0o644)).unwrap();

        let plan = plan_for(dir.path(), &["Bracket"], &["stl", "step"]);
        let mut batch =
            BatchExporter::new(RecordingExporter::default()).with_atomic_writes(atomic);
        let report = batch.run(&plan, |_| {}, || false);
        assert_eq!(report.succeeded_count(), 2);

        assert_eq!(mode(&existing), 0o644, "atomic={atomic}");
        modes.push(mode(&dir.path().join("Bracket.stl")));
    }

    assert_eq!(modes[0], modes[1]);
}

#[test]
fn test_missing_staged_output_is_io_failure() {
    let dir = TempDir::new().unwrap();
    let plan = plan_for(dir.path(), &["Bracket"], &["obj", "ply"]);
    let exporter = RecordingExporter::default().with("obj", Behavior::Vanish);
    let mut batch = BatchExporter::new(exporter);

    let report = batch.run(&plan, |_| {}, || false);

    assert_eq!(
        report.results()[0].error_kind(),
        Some(ExecutionErrorKind::IoFailure)
    );
    assert!(report.results()[1].is_success());
}

#[test]
fn test_bytes_written() {
    let dir = TempDir::new().unwrap();
    let plan = plan_for(dir.path(), &["Bracket"], &["stl", "step"]);
    let exporter = RecordingExporter::default().with("stl", Behavior::Report(4096));
    let mut batch = BatchExporter::new(exporter);

    let report = batch.run(&plan, |_| {}, || false);

    assert_eq!(report.results()[0].bytes_written(), Some(4096));
    // "step:Bracket" measured on disk
    assert_eq!(report.results()[1].bytes_written(), Some(12));
}

#[test]
fn test_report_metadata() {
    let dir = TempDir::new().unwrap();
    let plan = plan_for(dir.path(), &["Bracket"], &["stl"]);
    let mut batch = BatchExporter::new(RecordingExporter::default());

    let first = batch.run(&plan, |_| {}, || false);
    let second = batch.run(&plan, |_| {}, || false);

    assert_ne!(first.run_id(), second.run_id());
    let finished = first.finished_at().unwrap();
    assert!(finished >= first.started_at());
    assert_eq!(first.planned_jobs(), 1);

    let json = serde_json::to_value(&first).unwrap();
    assert_eq!(json["state"], "done");
    assert_eq!(json["results"][0]["status"], "SUCCEEDED");
}
