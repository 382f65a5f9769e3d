//! Export results and reporting
//!
//! [`ExportReport`] is the raw, ordered record of one run; [`ReportSummary`]
//! aggregates it for the final status message.

use super::batch::ExporterState;
use crate::core::formats::FormatDescriptor;
use crate::core::plan::ExportJob;
use crate::domain::{ExecutionErrorKind, GeometryError};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;
use uuid::Uuid;

/// Outcome of one job
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum JobStatus {
    /// The file was written
    Succeeded,
    /// The exporter reported an error
    Failed,
}

/// Result of one attempted job
///
/// `error_kind` is present exactly when the job failed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JobResult {
    format: FormatDescriptor,
    target_path: PathBuf,
    status: JobStatus,
    error_kind: Option<ExecutionErrorKind>,
    error_message: Option<String>,
    bytes_written: Option<u64>,
}

impl JobResult {
    /// A successful job
    pub fn succeeded(job: &ExportJob, bytes_written: Option<u64>) -> Self {
        Self {
            format: job.format,
            target_path: job.target_path.clone(),
            status: JobStatus::Succeeded,
            error_kind: None,
            error_message: None,
            bytes_written,
        }
    }

    /// A failed job
    pub fn failed(job: &ExportJob, error: &GeometryError) -> Self {
        Self {
            format: job.format,
            target_path: job.target_path.clone(),
            status: JobStatus::Failed,
            error_kind: Some(error.kind()),
            error_message: Some(error.message().to_string()),
            bytes_written: None,
        }
    }

    /// Format of the job
    pub fn format(&self) -> &FormatDescriptor {
        &self.format
    }

    /// Planned output path
    pub fn target_path(&self) -> &Path {
        &self.target_path
    }

    /// Success or failure
    pub fn status(&self) -> JobStatus {
        self.status
    }

    /// Returns true if the file was written
    pub fn is_success(&self) -> bool {
        self.status == JobStatus::Succeeded
    }

    /// Failure classification, if the job failed
    pub fn error_kind(&self) -> Option<ExecutionErrorKind> {
        self.error_kind
    }

    /// Failure detail, if the job failed
    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    /// Size of the written file, when known
    pub fn bytes_written(&self) -> Option<u64> {
        self.bytes_written
    }
}

/// Ordered record of one export run
#[derive(Debug, Clone, Serialize)]
pub struct ExportReport {
    run_id: Uuid,
    started_at: DateTime<Utc>,
    finished_at: Option<DateTime<Utc>>,
    duration: Duration,
    planned_jobs: usize,
    state: ExporterState,
    results: Vec<JobResult>,
}

impl ExportReport {
    /// Create an empty report for a run of `planned_jobs` jobs
    pub fn new(planned_jobs: usize) -> Self {
        Self {
            run_id: Uuid::new_v4(),
            started_at: Utc::now(),
            finished_at: None,
            duration: Duration::ZERO,
            planned_jobs,
            state: ExporterState::Running,
            results: Vec::with_capacity(planned_jobs),
        }
    }

    pub(crate) fn push(&mut self, result: JobResult) {
        self.results.push(result);
    }

    pub(crate) fn finish(&mut self, state: ExporterState, duration: Duration) {
        self.state = state;
        self.duration = duration;
        self.finished_at = Some(Utc::now());
    }

    /// Unique id of this run, also attached to its log events
    pub fn run_id(&self) -> Uuid {
        self.run_id
    }

    /// When the run started
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    /// When the run ended
    pub fn finished_at(&self) -> Option<DateTime<Utc>> {
        self.finished_at
    }

    /// Wall-clock duration of the run
    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Number of jobs in the plan
    pub fn planned_jobs(&self) -> usize {
        self.planned_jobs
    }

    /// Terminal state: `Done` or `Cancelled`
    pub fn state(&self) -> ExporterState {
        self.state
    }

    /// Returns true if the run stopped before attempting every job
    pub fn is_cancelled(&self) -> bool {
        self.state == ExporterState::Cancelled
    }

    /// Results of attempted jobs, in plan order
    pub fn results(&self) -> &[JobResult] {
        &self.results
    }

    /// Number of written files
    pub fn succeeded_count(&self) -> usize {
        self.results.iter().filter(|r| r.is_success()).count()
    }

    /// Number of failed jobs
    pub fn failed_count(&self) -> usize {
        self.results.len() - self.succeeded_count()
    }

    /// Aggregate for display
    pub fn summarize(&self) -> ReportSummary {
        summarize(self)
    }

    /// Log the report
    pub fn log_summary(&self) {
        let summary = self.summarize();
        tracing::info!(
            run_id = %self.run_id,
            planned = self.planned_jobs,
            succeeded = summary.succeeded_count,
            failed = summary.failed_count,
            cancelled = summary.cancelled,
            duration_ms = self.duration.as_millis() as u64,
            success_rate = format!("{:.2}%", summary.success_rate()),
            "Export run finished"
        );

        for failure in &summary.failures {
            tracing::warn!(
                run_id = %self.run_id,
                format = %failure.format_id,
                error_kind = %failure.error_kind,
                message = %failure.message,
                "Format export failed"
            );
        }
    }
}

/// Overall result class used for the final status message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ExportOutcome {
    /// Every planned file was written
    AllSucceeded,
    /// Some files were written, others failed or were never attempted
    PartialSuccess,
    /// Every attempted job failed
    AllFailed,
    /// Nothing was attempted
    NothingExported,
}

impl fmt::Display for ExportOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            ExportOutcome::AllSucceeded => "all succeeded",
            ExportOutcome::PartialSuccess => "partial success",
            ExportOutcome::AllFailed => "all failed",
            ExportOutcome::NothingExported => "nothing exported",
        };
        f.write_str(text)
    }
}

/// One failed format in a summary
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FailureSummary {
    /// Format id
    pub format_id: String,
    /// Format label
    pub format_label: String,
    /// Failure classification
    pub error_kind: ExecutionErrorKind,
    /// Failure detail
    pub message: String,
}

/// Aggregated view of an [`ExportReport`]
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportSummary {
    /// Files written
    pub succeeded_count: usize,
    /// Jobs that failed
    pub failed_count: usize,
    /// Jobs in the plan
    pub planned_jobs: usize,
    /// Run stopped early
    pub cancelled: bool,
    /// Paths of written files, in plan order
    pub exported_files: Vec<PathBuf>,
    /// Failed formats, in plan order
    pub failures: Vec<FailureSummary>,
}

/// Aggregate a report into counts and failure lines
pub fn summarize(report: &ExportReport) -> ReportSummary {
    let mut summary = ReportSummary {
        succeeded_count: 0,
        failed_count: 0,
        planned_jobs: report.planned_jobs(),
        cancelled: report.is_cancelled(),
        exported_files: Vec::new(),
        failures: Vec::new(),
    };

    for result in report.results() {
        match result.status() {
            JobStatus::Succeeded => {
                summary.succeeded_count += 1;
                summary.exported_files.push(result.target_path().to_path_buf());
            }
            JobStatus::Failed => {
                summary.failed_count += 1;
                summary.failures.push(FailureSummary {
                    format_id: result.format().id.to_string(),
                    format_label: result.format().display_label.to_string(),
                    error_kind: result
                        .error_kind()
                        .unwrap_or(ExecutionErrorKind::InvalidGeometry),
                    message: result.error_message().unwrap_or_default().to_string(),
                });
            }
        }
    }

    summary
}

impl ReportSummary {
    /// Classify the run
    pub fn outcome(&self) -> ExportOutcome {
        match (self.succeeded_count, self.failed_count) {
            (0, 0) => ExportOutcome::NothingExported,
            (0, _) => ExportOutcome::AllFailed,
            (n, 0) if n == self.planned_jobs => ExportOutcome::AllSucceeded,
            _ => ExportOutcome::PartialSuccess,
        }
    }

    /// Returns true if every planned file was written
    pub fn is_successful(&self) -> bool {
        self.outcome() == ExportOutcome::AllSucceeded
    }

    /// Written files as a percentage of planned jobs
    pub fn success_rate(&self) -> f64 {
        if self.planned_jobs == 0 {
            return 100.0;
        }
        (self.succeeded_count as f64 / self.planned_jobs as f64) * 100.0
    }

    /// Render the status message shown after an export
    ///
    /// Lists at most `max_files_shown` file names and `max_errors_shown`
    /// failures, summarizing the rest as "... and N more".
    pub fn render_message(&self, max_files_shown: usize, max_errors_shown: usize) -> String {
        let mut lines: Vec<String> = Vec::new();

        if !self.exported_files.is_empty() {
            lines.push(format!(
                "Successfully exported {} file(s):",
                self.exported_files.len()
            ));
            for path in self.exported_files.iter().take(max_files_shown) {
                let name = path
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_else(|| path.display().to_string());
                lines.push(format!("  • {name}"));
            }
            if self.exported_files.len() > max_files_shown {
                lines.push(format!(
                    "  ... and {} more",
                    self.exported_files.len() - max_files_shown
                ));
            }
        }

        if !self.failures.is_empty() {
            if !lines.is_empty() {
                lines.push(String::new());
            }
            lines.push(format!("Warnings ({}):", self.failures.len()));
            for failure in self.failures.iter().take(max_errors_shown) {
                lines.push(format!(
                    "  • Failed to export {}: {} ({})",
                    failure.format_label, failure.message, failure.error_kind
                ));
            }
            if self.failures.len() > max_errors_shown {
                lines.push(format!(
                    "  ... and {} more",
                    self.failures.len() - max_errors_shown
                ));
            }
        }

        if self.cancelled {
            if !lines.is_empty() {
                lines.push(String::new());
            }
            lines.push(format!(
                "Export cancelled after {} of {} job(s)",
                self.succeeded_count + self.failed_count,
                self.planned_jobs
            ));
        }

        if lines.is_empty() {
            return "No files exported and no errors reported".to_string();
        }

        lines.join("\n")
    }
}
