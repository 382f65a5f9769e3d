//! Domain identifier types with validation
//!
//! Object identifiers are opaque to the export engine; the host application
//! hands them out and the engine only carries them from selection to export.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Host object identifier newtype wrapper
///
/// Typically the internal name of a document object (e.g. `Body001`), but the
/// engine never interprets it.
///
/// # Examples
///
/// ```
/// use multi_export::domain::ids::ObjectId;
/// use std::str::FromStr;
///
/// let id = ObjectId::from_str("Body001").unwrap();
/// assert_eq!(id.as_str(), "Body001");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ObjectId(String);

impl ObjectId {
    /// Creates a new ObjectId from a string
    ///
    /// # Arguments
    ///
    /// * `id` - The host object identifier
    ///
    /// # Returns
    ///
    /// Returns `Ok(ObjectId)` if the ID is valid, `Err` otherwise
    pub fn new(id: impl Into<String>) -> Result<Self, String> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err("Object ID cannot be empty".to_string());
        }
        Ok(Self(id))
    }

    /// Returns the object ID as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes self and returns the inner String
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ObjectId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl AsRef<str> for ObjectId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Opaque handle to one selected host object
///
/// Carries the identifier plus the user-facing label, which the naming policy
/// uses for single-object exports.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ObjectHandle {
    /// Host identifier
    pub id: ObjectId,

    /// Human-readable label shown in the host's tree view
    pub label: String,
}

impl ObjectHandle {
    /// Creates a new handle
    pub fn new(id: ObjectId, label: impl Into<String>) -> Self {
        Self {
            id,
            label: label.into(),
        }
    }

    /// Creates a handle whose label doubles as its identifier
    ///
    /// # Errors
    ///
    /// Returns an error if the label is blank
    pub fn labelled(label: impl Into<String>) -> Result<Self, String> {
        let label = label.into();
        let id = ObjectId::new(label.clone())?;
        Ok(Self { id, label })
    }
}

impl fmt::Display for ObjectHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.label, self.id)
    }
}
