//! Cross-cutting error types for change-request traceability.
//!
//! Storage-specific errors (`DatabaseError`) live in `trace-db` and wrap
//! `CoreError` so callers can match on domain failures without caring which
//! layer raised them.

use thiserror::Error;

/// Errors that can be raised by the domain layer.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Entity lookup returned no result.
    #[error("Entity not found: {entity_type} {id}")]
    NotFound { entity_type: String, id: String },

    /// A record was shaped in a way the data model forbids
    /// (e.g. a `create` change carrying an object id).
    #[error("Invariant violation: {0}")]
    InvariantViolation(String),

    /// A state machine transition was attempted that the active policy rejects.
    #[error("Invalid state transition: {entity_type} {id} from {from} to {to}")]
    InvalidTransition {
        entity_type: String,
        id: String,
        from: String,
        to: String,
    },

    /// Input failed validation (format, bounds).
    #[error("Validation error: {0}")]
    Validation(String),

    /// Catch-all for unexpected errors.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl CoreError {
    /// Shorthand for a missing change request.
    #[must_use]
    pub fn change_request_not_found(id: i64) -> Self {
        Self::NotFound {
            entity_type: "change_request".to_string(),
            id: id.to_string(),
        }
    }
}
