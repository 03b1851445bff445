//! Domain error type shared across the workspace.

use crate::types::DbId;

/// Errors produced by domain-level operations.
///
/// The API layer maps each variant onto an HTTP status; see
/// `fabula-api`'s `AppError`.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// An entity lookup by id found nothing.
    #[error("{entity} with id {id} not found")]
    NotFound {
        /// Entity kind, e.g. `"Project"` or `"Scene"`.
        entity: &'static str,
        id: DbId,
    },

    /// Input failed a validation rule. Carries a field-level message.
    #[error("{0}")]
    Validation(String),

    /// The operation conflicts with current state (e.g. a generation
    /// for the same target is already in flight).
    #[error("{0}")]
    Conflict(String),

    /// A generation run failed. Retryable: callers may re-trigger the
    /// same target.
    #[error("Generation failed: {0}")]
    Generation(String),

    /// An unexpected internal failure.
    #[error("{0}")]
    Internal(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_message_names_entity_and_id() {
        let err = CoreError::NotFound {
            entity: "Project",
            id: 42,
        };
        assert_eq!(err.to_string(), "Project with id 42 not found");
    }

    #[test]
    fn validation_message_passes_through() {
        let err = CoreError::Validation("scene count must be >= 3".to_string());
        assert_eq!(err.to_string(), "scene count must be >= 3");
    }
}
