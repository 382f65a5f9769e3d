//! Export planning
//!
//! This module turns a selection and the dialog choices into an ordered,
//! immutable [`ExportPlan`]:
//! - [`request`] - the dialog choices
//! - [`builder`] - validation and plan assembly
//! - [`model`] - plan and job types
//! - [`preview`] - human-readable listing of a plan

pub mod builder;
pub mod model;
pub mod preview;
pub mod request;

pub use builder::ExportPlanBuilder;
pub use model::{ExportJob, ExportPlan};
pub use preview::{PlanPreview, PreviewLine};
pub use request::ExportRequest;
