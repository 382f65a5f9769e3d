//! Format registry
//!
//! The registry is a read-only table of the output formats the engine knows
//! about. It is built once with [`FormatRegistry::standard`] and passed by
//! reference to everything that needs it, so the plan builder, the
//! configuration validator and the CLI all share one catalog.

use crate::domain::ValidationError;
use serde::Serialize;
use std::fmt;

/// How multiple source objects are merged into one exportable unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CombineStrategy {
    /// Tessellate each object and merge the triangle meshes
    MeshCompound,
    /// Merge exact shapes into a single B-Rep compound
    ShapeCompound,
}

impl fmt::Display for CombineStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CombineStrategy::MeshCompound => f.write_str("mesh compound"),
            CombineStrategy::ShapeCompound => f.write_str("shape compound"),
        }
    }
}

/// One supported output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct FormatDescriptor {
    /// Unique short code, e.g. `stl`
    pub id: &'static str,

    /// File extension without the dot
    pub extension: &'static str,

    /// Label shown in the dialog, e.g. `STL`
    pub display_label: &'static str,

    /// One-line description of what the format is for
    pub description: &'static str,

    /// Checked by default in the dialog
    pub default_selected: bool,

    /// Requires tessellation (and therefore mesh quality settings)
    pub is_mesh_based: bool,

    /// How multi-object selections are merged
    pub combine_strategy: CombineStrategy,
}

const fn mesh(
    id: &'static str,
    display_label: &'static str,
    description: &'static str,
    default_selected: bool,
) -> FormatDescriptor {
    FormatDescriptor {
        id,
        extension: id,
        display_label,
        description,
        default_selected,
        is_mesh_based: true,
        combine_strategy: CombineStrategy::MeshCompound,
    }
}

const fn exact(
    id: &'static str,
    display_label: &'static str,
    description: &'static str,
    default_selected: bool,
) -> FormatDescriptor {
    FormatDescriptor {
        id,
        extension: id,
        display_label,
        description,
        default_selected,
        is_mesh_based: false,
        combine_strategy: CombineStrategy::ShapeCompound,
    }
}

const STANDARD_FORMATS: [FormatDescriptor; 8] = [
    mesh("stl", "STL", "Stereolithography - common for 3D printing", true),
    exact(
        "step",
        "STEP",
        "Standard for Exchange of Product Data - CAD interchange",
        true,
    ),
    mesh("3mf", "3MF", "3D Manufacturing Format - modern 3D printing format", true),
    mesh("obj", "OBJ", "Wavefront OBJ - 3D graphics and game engines", false),
    exact(
        "iges",
        "IGES",
        "Initial Graphics Exchange Specification - legacy CAD format",
        false,
    ),
    exact(
        "brep",
        "BREP",
        "OpenCASCADE native format - preserves exact geometry",
        false,
    ),
    mesh("ply", "PLY", "Polygon File Format - 3D scanning and printing", false),
    mesh("amf", "AMF", "Additive Manufacturing Format - XML-based 3D printing", false),
];

/// Read-only, ordered catalog of output formats
#[derive(Debug, Clone)]
pub struct FormatRegistry {
    formats: &'static [FormatDescriptor],
}

impl Default for FormatRegistry {
    fn default() -> Self {
        Self::standard()
    }
}

impl FormatRegistry {
    /// The eight built-in formats, in dialog order
    pub fn standard() -> Self {
        Self {
            formats: &STANDARD_FORMATS,
        }
    }

    /// All formats in registry order
    pub fn list_formats(&self) -> &[FormatDescriptor] {
        self.formats
    }

    /// Formats checked by default, in registry order
    pub fn defaults(&self) -> Vec<&FormatDescriptor> {
        self.formats.iter().filter(|f| f.default_selected).collect()
    }

    /// Ids of the default formats
    pub fn default_ids(&self) -> Vec<String> {
        self.defaults().iter().map(|f| f.id.to_string()).collect()
    }

    /// All format ids in registry order
    pub fn ids(&self) -> Vec<&'static str> {
        self.formats.iter().map(|f| f.id).collect()
    }

    /// Looks up a format by id, ignoring case and surrounding whitespace
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::UnknownFormat`] if no format has this id
    pub fn get(&self, id: &str) -> Result<&FormatDescriptor, ValidationError> {
        let wanted = id.trim();
        self.formats
            .iter()
            .find(|f| f.id.eq_ignore_ascii_case(wanted))
            .ok_or_else(|| ValidationError::UnknownFormat(id.to_string()))
    }

    /// Looks up a format by file extension (with or without a leading dot)
    pub fn by_extension(&self, extension: &str) -> Option<&FormatDescriptor> {
        let wanted = extension.trim().trim_start_matches('.');
        self.formats
            .iter()
            .find(|f| f.extension.eq_ignore_ascii_case(wanted))
    }

    /// Returns true if `id` names a registered mesh-based format
    pub fn is_mesh_format(&self, id: &str) -> bool {
        self.get(id).map(|f| f.is_mesh_based).unwrap_or(false)
    }

    /// Returns true if `id` names a registered exact-geometry format
    pub fn is_cad_format(&self, id: &str) -> bool {
        self.get(id).map(|f| !f.is_mesh_based).unwrap_or(false)
    }

    /// Position of a format in registry order
    pub(crate) fn position(&self, format: &FormatDescriptor) -> usize {
        self.formats
            .iter()
            .position(|f| f.id == format.id)
            .unwrap_or(usize::MAX)
    }
}
