//! Department model.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An organizational unit. Departments may nest via `parent`; the hierarchy
/// is traversed iteratively (never recursively) so an accidental cycle in
/// the data cannot hang the engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Department {
    /// Unique identifier.
    pub id: Uuid,
    /// Department name.
    pub name: String,
    /// Parent department, if this is a sub-department.
    #[serde(default)]
    pub parent: Option<Uuid>,
}
