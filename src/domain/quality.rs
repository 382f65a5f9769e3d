//! Mesh quality parameters and presets

use super::errors::ValidationError;
use serde::Serialize;

/// Smallest accepted tessellation value in mm
pub const MIN_MESH_VALUE: f64 = 0.001;

/// Largest accepted tessellation value in mm
pub const MAX_MESH_VALUE: f64 = 10.0;

/// Tessellation settings shared by every mesh-based job in one run
///
/// Ignored by exact (B-Rep) formats
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MeshQuality {
    /// Maximum distance between the mesh and the true surface, in mm
    surface_tolerance: f64,

    /// Angular deflection limit between adjacent facets
    angular_deflection: f64,
}

impl Default for MeshQuality {
    fn default() -> Self {
        Self {
            surface_tolerance: 0.1,
            angular_deflection: 0.5,
        }
    }
}

impl MeshQuality {
    /// Creates validated mesh quality settings
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidMeshQuality`] if either value is not
    /// finite or lies outside `[0.001, 10]`.
    pub fn new(surface_tolerance: f64, angular_deflection: f64) -> Result<Self, ValidationError> {
        check_range("surface_tolerance", surface_tolerance)?;
        check_range("angular_deflection", angular_deflection)?;
        Ok(Self {
            surface_tolerance,
            angular_deflection,
        })
    }

    /// Settings for small printed parts where facets would be visible
    #[must_use]
    pub fn fine() -> Self {
        Self {
            surface_tolerance: 0.01,
            angular_deflection: 0.1,
        }
    }

    /// Settings for quick previews and large parts
    #[must_use]
    pub fn coarse() -> Self {
        Self {
            surface_tolerance: 0.5,
            angular_deflection: 1.0,
        }
    }

    /// Surface tolerance in mm
    pub fn surface_tolerance(&self) -> f64 {
        self.surface_tolerance
    }

    /// Angular deflection
    pub fn angular_deflection(&self) -> f64 {
        self.angular_deflection
    }
}

fn check_range(parameter: &'static str, value: f64) -> Result<(), ValidationError> {
    if value.is_finite() && (MIN_MESH_VALUE..=MAX_MESH_VALUE).contains(&value) {
        Ok(())
    } else {
        Err(ValidationError::InvalidMeshQuality { parameter, value })
    }
}
