//! Core export engine.
//!
//! # Modules
//!
//! - [`formats`] - the catalog of supported formats
//! - [`paths`] - filename sanitizing, directory checks and path building
//! - [`plan`] - validated, immutable export plans and their preview
//! - [`export`] - batch execution, reporting and coordination
//!
//! # Export Workflow
//!
//! 1. **Select**: read the selection once from the host
//! 2. **Plan**: validate choices and build one job per format
//! 3. **Preview**: show the planned files before anything is written
//! 4. **Execute**: run jobs in order, isolating failures
//! 5. **Report**: aggregate results into a status message
//!
//! # Example
//!
//! ```rust,no_run
//! use multi_export::adapters::{CombinedGeometry, GeometryExporter, StaticSelection};
//! use multi_export::config::MultiExportConfig;
//! use multi_export::core::export::ExportCoordinator;
//! use multi_export::core::formats::FormatDescriptor;
//! use multi_export::domain::{GeometryError, MeshQuality, ObjectHandle, Selection};
//! use std::path::Path;
//!
//! struct Kernel;
//!
//! impl GeometryExporter for Kernel {
//!     fn export(
//!         &mut self,
//!         _geometry: &CombinedGeometry<'_>,
//!         _format: &FormatDescriptor,
//!         target_path: &Path,
//!         _mesh_quality: Option<&MeshQuality>,
//!     ) -> Result<Option<u64>, GeometryError> {
//!         std::fs::write(target_path, b"solid")?;
//!         Ok(None)
//!     }
//! }
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let selection = Selection::new("Assembly", vec![ObjectHandle::labelled("Bracket")?])
//!     .with_document_path("/home/me/parts/assembly.FCStd");
//! let provider = StaticSelection::new(selection);
//!
//! let coordinator = ExportCoordinator::new(MultiExportConfig::default());
//! let request = coordinator.request_from_config()?;
//! let plan = coordinator.prepare(&provider, &request)?;
//! println!("{}", plan.preview());
//!
//! let report = coordinator.execute(&plan, Kernel, |_| {}, || false);
//! println!("{}", coordinator.status_message(&report));
//! # Ok(())
//! # }
//! ```

pub mod export;
pub mod formats;
pub mod paths;
pub mod plan;
