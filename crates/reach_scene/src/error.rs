//! Error types for scene edits

use crate::id::ObjectId;
use thiserror::Error;

/// Scene errors
#[derive(Debug, Error, PartialEq)]
pub enum SceneError {
    /// Handle is stale or was never issued
    #[error("Object not found: {0:?}")]
    ObjectNotFound(ObjectId),

    /// Reparenting would make an object its own ancestor
    #[error("Cannot parent {child:?} under {parent:?}: would create a cycle")]
    ParentCycle { child: ObjectId, parent: ObjectId },

    /// No prefab registered under this name
    #[error("Unknown prefab: {0}")]
    UnknownPrefab(String),
}

/// Result type for scene operations
pub type Result<T> = std::result::Result<T, SceneError>;
