//! Export execution and reporting
//!
//! This module runs export plans and reports on them:
//! - [`batch`] - sequential execution, progress and cancellation
//! - [`staging`] - atomic placement of written files
//! - [`summary`] - per-job results, run report and status message
//! - [`coordinator`] - glue used by the UI layer

pub mod batch;
pub mod coordinator;
pub mod staging;
pub mod summary;

pub use batch::{BatchExporter, CancelFlag, ExportProgress, ExporterState};
pub use coordinator::ExportCoordinator;
pub use staging::WriteTarget;
pub use summary::{
    summarize, ExportOutcome, ExportReport, FailureSummary, JobResult, JobStatus, ReportSummary,
};
