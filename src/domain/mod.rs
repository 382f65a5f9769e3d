//! Domain models and types for Multi Export.
//!
//! # Overview
//!
//! The domain layer provides:
//! - **Strongly-typed identifiers** ([`ObjectId`], [`ObjectHandle`])
//! - **Selections** handed over by the host ([`Selection`])
//! - **Mesh quality** settings with range validation ([`MeshQuality`])
//! - **Error types** ([`MultiExportError`], [`ValidationError`], [`GeometryError`])
//! - **Result type alias** ([`Result`])
//!
//! # Error Handling
//!
//! Plan building returns [`ValidationError`]s; everything else in the crate
//! returns [`Result<T, MultiExportError>`]:
//!
//! ```rust
//! use multi_export::domain::{MeshQuality, Result};
//!
//! fn example() -> Result<()> {
//!     let quality = MeshQuality::new(0.05, 0.3)?;
//!     assert_eq!(quality.surface_tolerance(), 0.05);
//!     Ok(())
//! }
//! ```

pub mod errors;
pub mod ids;
pub mod quality;
pub mod result;
pub mod selection;

// Re-export commonly used types for convenience
pub use errors::{ExecutionErrorKind, GeometryError, MultiExportError, ValidationError};
pub use ids::{ObjectHandle, ObjectId};
pub use quality::MeshQuality;
pub use result::Result;
pub use selection::Selection;
