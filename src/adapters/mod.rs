//! Host application seams for Multi Export.
//!
//! - [`traits`] - [`SelectionProvider`] and [`GeometryExporter`], implemented
//!   by the host application and its geometry kernel
//! - [`memory`] - [`StaticSelection`], a fixed selection snapshot
//!
//! # Design Pattern
//!
//! Adapters isolate the host so the engine can be tested with mock
//! implementations. A host wires its document model and writers in like this:
//!
//! ```rust
//! use multi_export::adapters::{CombinedGeometry, GeometryExporter};
//! use multi_export::core::formats::FormatDescriptor;
//! use multi_export::domain::{GeometryError, MeshQuality};
//! use std::path::Path;
//!
//! struct KernelWriter;
//!
//! impl GeometryExporter for KernelWriter {
//!     fn export(
//!         &mut self,
//!         geometry: &CombinedGeometry<'_>,
//!         format: &FormatDescriptor,
//!         target_path: &Path,
//!         mesh_quality: Option<&MeshQuality>,
//!     ) -> Result<Option<u64>, GeometryError> {
//!         // Merge, tessellate if mesh_quality is set, then write target_path
//!         # let _ = (geometry, format, mesh_quality);
//!         std::fs::write(target_path, b"solid\n")?;
//!         Ok(Some(6))
//!     }
//! }
//! ```

pub mod memory;
pub mod traits;

pub use memory::StaticSelection;
pub use traits::{CombinedGeometry, GeometryExporter, SelectionProvider};
