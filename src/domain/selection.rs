//! Selection domain model
//!
//! A selection is what the host hands over when the user confirms the export
//! dialog: the chosen objects, in selection order, and the active document.

use super::ids::ObjectHandle;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Ordered set of selected host objects plus the active document context
///
/// # Examples
///
/// ```
/// use multi_export::domain::{ObjectHandle, Selection};
///
/// let selection = Selection::new(
///     "Assembly",
///     vec![ObjectHandle::labelled("Bracket").unwrap()],
/// );
/// assert_eq!(selection.len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Selection {
    /// Label of the active document
    pub document_label: String,

    /// File the active document was loaded from, if it has been saved
    pub document_path: Option<PathBuf>,

    /// Selected objects, in selection order
    pub objects: Vec<ObjectHandle>,
}

impl Selection {
    /// Creates a selection for an unsaved document
    pub fn new(document_label: impl Into<String>, objects: Vec<ObjectHandle>) -> Self {
        Self {
            document_label: document_label.into(),
            document_path: None,
            objects,
        }
    }

    /// Sets the file backing the active document
    pub fn with_document_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.document_path = Some(path.into());
        self
    }

    /// Number of selected objects
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Returns true if nothing is selected
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Directory containing the active document, if it has been saved
    pub fn document_directory(&self) -> Option<&Path> {
        self.document_path
            .as_deref()
            .and_then(Path::parent)
            .filter(|dir| !dir.as_os_str().is_empty())
    }

    /// Keeps only the objects accepted by `is_exportable`, preserving order
    pub fn retain_exportable<F>(&self, is_exportable: F) -> Vec<ObjectHandle>
    where
        F: Fn(&ObjectHandle) -> bool,
    {
        self.objects
            .iter()
            .filter(|object| is_exportable(object))
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn handle(label: &str) -> ObjectHandle {
        ObjectHandle::labelled(label).unwrap()
    }

    #[test]
    fn test_selection_creation() {
        let selection = Selection::new("Doc", vec![handle("A"), handle("B")]);
        assert_eq!(selection.document_label, "Doc");
        assert_eq!(selection.len(), 2);
        assert!(!selection.is_empty());
        assert!(selection.document_path.is_none());
    }

    #[test]
    fn test_document_directory() {
        let selection =
            Selection::new("Doc", vec![handle("A")]).with_document_path("/projects/doc.FCStd");
        assert_eq!(
            selection.document_directory(),
            Some(Path::new("/projects"))
        );
    }

    #[test]
    fn test_document_directory_bare_filename() {
        let selection = Selection::new("Doc", vec![]).with_document_path("doc.FCStd");
        assert!(selection.document_directory().is_none());
    }

    #[test]
    fn test_retain_exportable_preserves_order() {
        let selection = Selection::new("Doc", vec![handle("A"), handle("Sketch"), handle("C")]);
        let kept = selection.retain_exportable(|o| o.label != "Sketch");
        let labels: Vec<_> = kept.iter().map(|o| o.label.as_str()).collect();
        assert_eq!(labels, vec!["A", "C"]);
    }
}
