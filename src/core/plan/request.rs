//! What the user asked for in the export dialog.

use crate::core::formats::FormatRegistry;
use crate::domain::MeshQuality;
use std::path::PathBuf;

/// Choices collected from the export dialog
///
/// Unset directory and filename fall back to the naming policy: the active
/// document's directory, and the object label (single object) or document
/// label (several objects).
#[derive(Debug, Clone, PartialEq)]
pub struct ExportRequest {
    /// Chosen format ids, in any order
    pub formats: Vec<String>,

    /// Output directory
    pub directory: Option<PathBuf>,

    /// Base filename without extension
    pub base_filename: Option<String>,

    /// Tessellation settings for mesh-based formats
    pub mesh_quality: MeshQuality,
}

impl ExportRequest {
    /// Creates a request for the given format ids with default mesh quality
    pub fn new<I, S>(formats: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            formats: formats.into_iter().map(Into::into).collect(),
            directory: None,
            base_filename: None,
            mesh_quality: MeshQuality::default(),
        }
    }

    /// Creates a request for the registry's default formats
    pub fn with_default_formats(registry: &FormatRegistry) -> Self {
        Self::new(registry.default_ids())
    }

    /// Sets the output directory
    pub fn directory(mut self, directory: impl Into<PathBuf>) -> Self {
        self.directory = Some(directory.into());
        self
    }

    /// Sets the base filename
    pub fn base_filename(mut self, name: impl Into<String>) -> Self {
        self.base_filename = Some(name.into());
        self
    }

    /// Sets the mesh quality
    pub fn mesh_quality(mut self, quality: MeshQuality) -> Self {
        self.mesh_quality = quality;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_builder() {
        let request = ExportRequest::new(["stl", "step"])
            .directory("/out")
            .base_filename("Bracket")
            .mesh_quality(MeshQuality::fine());

        assert_eq!(request.formats, vec!["stl", "step"]);
        assert_eq!(request.directory, Some(PathBuf::from("/out")));
        assert_eq!(request.base_filename.as_deref(), Some("Bracket"));
        assert_eq!(request.mesh_quality, MeshQuality::fine());
    }

    #[test]
    fn test_request_default_formats() {
        let request = ExportRequest::with_default_formats(&FormatRegistry::standard());
        assert_eq!(request.formats, vec!["stl", "step", "3mf"]);
        assert!(request.directory.is_none());
        assert!(request.base_filename.is_none());
    }
}
