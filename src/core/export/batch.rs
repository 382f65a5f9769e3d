//! Batch execution of an export plan
//!
//! [`BatchExporter`] runs the jobs of an [`ExportPlan`] one after another on
//! the caller's thread. A failing job is recorded and the batch moves on;
//! cancellation is honored between jobs only.

use super::staging::WriteTarget;
use super::summary::{ExportReport, JobResult, JobStatus};
use crate::adapters::GeometryExporter;
use crate::core::plan::{ExportJob, ExportPlan};
use crate::{log_job_complete, log_job_failed, log_job_start, log_progress};
use serde::Serialize;
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;

/// Lifecycle of a [`BatchExporter`] run
///
/// `Idle -> Running -> Done | Cancelled`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ExporterState {
    /// No run started yet
    Idle,
    /// Jobs are executing
    Running,
    /// Every job was attempted
    Done,
    /// The run stopped before attempting every job
    Cancelled,
}

impl fmt::Display for ExporterState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            ExporterState::Idle => "idle",
            ExporterState::Running => "running",
            ExporterState::Done => "done",
            ExporterState::Cancelled => "cancelled",
        };
        f.write_str(text)
    }
}

/// Progress notification sent after each job
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExportProgress {
    /// Jobs finished so far, including the one just reported
    pub completed: usize,
    /// Jobs in the plan
    pub total: usize,
    /// Display label of the format just processed
    pub label: &'static str,
    /// Outcome of that job
    pub status: JobStatus,
}

impl ExportProgress {
    /// Completion as a percentage
    pub fn percent(&self) -> f64 {
        if self.total == 0 {
            return 100.0;
        }
        self.completed as f64 / self.total as f64 * 100.0
    }
}

/// Shared cancellation request
///
/// Clone it into whatever handles the user's "cancel" action; the batch
/// checks it before starting each job.
#[derive(Debug, Clone, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    /// New, not cancelled
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation
    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    /// Returns true once cancellation was requested
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }

    /// Closure form, for [`BatchExporter::run`]
    pub fn as_check(&self) -> impl Fn() -> bool + '_ {
        move || self.is_cancelled()
    }
}

/// Sequential executor for export plans
pub struct BatchExporter<E> {
    exporter: E,
    state: ExporterState,
    atomic_writes: bool,
}

impl<E: GeometryExporter> BatchExporter<E> {
    /// Create an executor around a geometry exporter
    ///
    /// Atomic writes are enabled by default.
    pub fn new(exporter: E) -> Self {
        Self {
            exporter,
            state: ExporterState::Idle,
            atomic_writes: true,
        }
    }

    /// Write through a staging file and move it into place on success
    pub fn with_atomic_writes(mut self, enabled: bool) -> Self {
        self.atomic_writes = enabled;
        self
    }

    /// Current lifecycle state
    pub fn state(&self) -> ExporterState {
        self.state
    }

    /// The wrapped exporter
    pub fn exporter(&self) -> &E {
        &self.exporter
    }

    /// Unwrap the exporter
    pub fn into_inner(self) -> E {
        self.exporter
    }

    /// Run every job of `plan` in order
    ///
    /// `cancel` is polled before each job; once it returns true no further
    /// job starts and the run ends `Cancelled`. `progress` is called after
    /// every attempted job, success or failure.
    ///
    /// Never fails as a whole: per-job errors are recorded in the report.
    pub fn run<P, C>(&mut self, plan: &ExportPlan, mut progress: P, cancel: C) -> ExportReport
    where
        P: FnMut(&ExportProgress),
        C: Fn() -> bool,
    {
        let total = plan.len();
        let mut report = ExportReport::new(total);
        let span = tracing::info_span!("export_run", run_id = %report.run_id());
        let _enter = span.enter();

        tracing::info!(
            jobs = total,
            objects = plan.object_count(),
            directory = %plan.directory().display(),
            atomic_writes = self.atomic_writes,
            "Starting export run"
        );

        self.state = ExporterState::Running;
        let start = Instant::now();

        for (index, job) in plan.jobs().iter().enumerate() {
            if cancel() {
                tracing::info!(
                    attempted = index,
                    remaining = total - index,
                    "Export cancelled, skipping remaining formats"
                );
                self.state = ExporterState::Cancelled;
                break;
            }

            let result = self.execute_job(plan, job);
            let status = result.status();
            report.push(result);

            log_progress!(index + 1, total);
            progress(&ExportProgress {
                completed: index + 1,
                total,
                label: job.format.display_label,
                status,
            });
        }

        if self.state == ExporterState::Running {
            self.state = ExporterState::Done;
        }

        report.finish(self.state, start.elapsed());
        report
    }

    fn execute_job(&mut self, plan: &ExportPlan, job: &ExportJob) -> JobResult {
        let label = job.format.display_label;
        log_job_start!(label, job.target_path.display());

        let write = match WriteTarget::prepare(&job.target_path, self.atomic_writes) {
            Ok(write) => write,
            Err(e) => {
                log_job_failed!(label, &e);
                return JobResult::failed(job, &e);
            }
        };

        let exported = self.exporter.export(
            &job.combined(),
            &job.format,
            write.write_path(),
            plan.mesh_quality_for(job),
        );

        // Dropping an uncommitted staging file removes it.
        let outcome = exported.and_then(|reported| write.commit().map(|path| (reported, path)));

        match outcome {
            Ok((reported, path)) => {
                let bytes = reported.or_else(|| std::fs::metadata(&path).ok().map(|m| m.len()));
                log_job_complete!(label, bytes);
                JobResult::succeeded(job, bytes)
            }
            Err(e) => {
                log_job_failed!(label, &e);
                JobResult::failed(job, &e)
            }
        }
    }
}
