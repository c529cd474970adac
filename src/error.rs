//! Crate error type.
//!
//! Engine-internal conditions (refused drops, unrelocatable collisions,
//! rejected swaps) are outcomes, not errors — see the engine modules.
//! `EngineError` covers the collaborator boundaries only: loading
//! configuration and entries, saving, and exporting. A failed save or
//! export leaves local state untouched and retryable.

use thiserror::Error;

use crate::services::ServiceError;

/// Result alias for session operations that cross a collaborator boundary.
pub type Result<T> = std::result::Result<T, EngineError>;

/// Errors surfaced by the scheduling session.
#[derive(Error, Debug)]
pub enum EngineError {
    /// Loading time slots or schedule entries from a collaborator failed.
    #[error("Failed to load schedule data: {0}")]
    Load(#[source] ServiceError),

    /// Persisting the schedule failed; local state is unchanged.
    #[error("Failed to save schedule: {0}")]
    Save(#[source] ServiceError),

    /// Rendering an export document failed.
    #[error("Failed to export schedule: {0}")]
    Export(#[source] ServiceError),

    /// A palette placement named a course the catalog does not know.
    #[error("Unknown course '{0}'")]
    UnknownCourse(String),
}
