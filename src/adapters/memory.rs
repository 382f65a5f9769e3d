//! In-memory selection provider
//!
//! Used by the standalone binary, which has no live document, and handy for
//! hosts that snapshot their selection before opening the export dialog.

use super::traits::SelectionProvider;
use crate::domain::{ObjectHandle, ObjectId, Selection};
use std::collections::HashSet;

/// A fixed selection where every object is exportable unless excluded
#[derive(Debug, Clone)]
pub struct StaticSelection {
    selection: Selection,
    excluded: HashSet<ObjectId>,
}

impl StaticSelection {
    /// Wraps a selection snapshot
    pub fn new(selection: Selection) -> Self {
        Self {
            selection,
            excluded: HashSet::new(),
        }
    }

    /// Marks an object as not exportable (e.g. a sketch)
    pub fn exclude(mut self, id: ObjectId) -> Self {
        self.excluded.insert(id);
        self
    }
}

impl SelectionProvider for StaticSelection {
    fn current_selection(&self) -> Selection {
        self.selection.clone()
    }

    fn is_exportable(&self, object: &ObjectHandle) -> bool {
        !self.excluded.contains(&object.id)
    }
}
