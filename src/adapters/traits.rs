//! Host integration traits
//!
//! The export engine never touches geometry. The host application supplies
//! the current selection through [`SelectionProvider`] and performs the
//! actual writes through [`GeometryExporter`].

use crate::core::formats::{CombineStrategy, FormatDescriptor};
use crate::domain::{GeometryError, MeshQuality, ObjectHandle, Selection};
use std::path::Path;

/// Source of the user's current selection
pub trait SelectionProvider {
    /// Returns the objects selected in the active document
    fn current_selection(&self) -> Selection;

    /// Returns true if the object holds solid, shape or mesh geometry
    ///
    /// Sketches, groups and other non-geometric objects should return false.
    fn is_exportable(&self, object: &ObjectHandle) -> bool;
}

/// The objects of one job together with the rule for merging them
///
/// A single object is passed through as-is; only multi-object selections
/// form a compound.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CombinedGeometry<'a> {
    /// How the objects are merged
    pub strategy: CombineStrategy,

    /// Source objects in selection order
    pub objects: &'a [ObjectHandle],
}

impl<'a> CombinedGeometry<'a> {
    /// Groups `objects` under `strategy`
    pub fn new(strategy: CombineStrategy, objects: &'a [ObjectHandle]) -> Self {
        Self { strategy, objects }
    }

    /// Returns true if more than one object has to be merged
    pub fn is_compound(&self) -> bool {
        self.objects.len() > 1
    }

    /// The only object, when there is exactly one
    pub fn single(&self) -> Option<&'a ObjectHandle> {
        match self.objects {
            [only] => Some(only),
            _ => None,
        }
    }

    /// Number of source objects
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Returns true if there are no source objects
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}

/// Geometry kernel capability that writes one file
///
/// Called once per job, sequentially, on the caller's thread.
/// Implementations must merge `geometry` according to its strategy if it is
/// a compound, and must return an error instead of leaving a partial file.
pub trait GeometryExporter {
    /// Writes `geometry` to `target_path` in `format`
    ///
    /// `mesh_quality` is `Some` exactly when the format is mesh-based.
    ///
    /// # Returns
    ///
    /// The number of bytes written, if the kernel knows it.
    ///
    /// # Errors
    ///
    /// Returns a [`GeometryError`] describing why the file could not be written.
    fn export(
        &mut self,
        geometry: &CombinedGeometry<'_>,
        format: &FormatDescriptor,
        target_path: &Path,
        mesh_quality: Option<&MeshQuality>,
    ) -> Result<Option<u64>, GeometryError>;
}

impl<T: GeometryExporter + ?Sized> GeometryExporter for &mut T {
    fn export(
        &mut self,
        geometry: &CombinedGeometry<'_>,
        format: &FormatDescriptor,
        target_path: &Path,
        mesh_quality: Option<&MeshQuality>,
    ) -> Result<Option<u64>, GeometryError> {
        (**self).export(geometry, format, target_path, mesh_quality)
    }
}

impl<T: GeometryExporter + ?Sized> GeometryExporter for Box<T> {
    fn export(
        &mut self,
        geometry: &CombinedGeometry<'_>,
        format: &FormatDescriptor,
        target_path: &Path,
        mesh_quality: Option<&MeshQuality>,
    ) -> Result<Option<u64>, GeometryError> {
        (**self).export(geometry, format, target_path, mesh_quality)
    }
}
