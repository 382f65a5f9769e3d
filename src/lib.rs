// Multi Export - export CAD selections to several formats at once
// Copyright (c) 2025 Multi Export Contributors
// Licensed under the MIT License

//! # Multi Export
//!
//! Multi Export turns one selection of CAD objects into a set of files, one
//! per chosen format (STL, STEP, 3MF, OBJ, IGES, BREP, PLY, AMF), with a
//! single naming policy and a single result report.
//!
//! ## Overview
//!
//! This library provides:
//! - **Planning**: validating the user's choices into an immutable
//!   [`ExportPlan`](core::plan::ExportPlan) before anything touches the disk
//! - **Preview**: listing exactly which files a plan will write
//! - **Execution**: running jobs in order with per-job failure isolation,
//!   progress reporting and cooperative cancellation
//! - **Reporting**: aggregating results into a status message
//!
//! Geometry never passes through this crate. The host application supplies
//! the selection through [`SelectionProvider`](adapters::SelectionProvider)
//! and writes files through [`GeometryExporter`](adapters::GeometryExporter).
//!
//! ## Architecture
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`core`] - Format registry, path policy, planning and execution
//! - [`adapters`] - Host integration traits
//! - [`domain`] - Core domain types and errors
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use multi_export::core::formats::FormatRegistry;
//! use multi_export::core::plan::{ExportPlanBuilder, ExportRequest};
//! use multi_export::domain::{ObjectHandle, Selection};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let registry = FormatRegistry::standard();
//! let selection = Selection::new("Bracket", vec![ObjectHandle::labelled("Bracket")?]);
//! let request = ExportRequest::new(["stl", "step"]).directory("/tmp/out");
//!
//! let plan = ExportPlanBuilder::new(&registry).build(&selection, |_| true, &request)?;
//! print!("{}", plan.preview());
//! # Ok(())
//! # }
//! ```
//!
//! ## Error Handling
//!
//! Plan validation fails with [`domain::ValidationError`] before any file is
//! written. Exporter failures are [`domain::GeometryError`]s recorded per job;
//! they never abort the rest of the batch.

pub mod adapters;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod logging;
