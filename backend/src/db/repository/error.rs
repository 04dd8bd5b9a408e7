//! Failures of the load-plan store.
//!
//! An absent row is not a failure here: lookups return `Ok(None)` and the engine
//! turns that into its own NotFound.

use std::fmt;

use crate::error::EntityKind;
use crate::models::EntityId;

pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// The store call that failed and, for writes, the row it targeted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorContext {
    /// Store method name, e.g. `get_mission`.
    pub operation: String,
    pub entity: Option<EntityKind>,
    pub entity_id: Option<String>,
}

impl ErrorContext {
    pub fn new(operation: impl Into<String>) -> Self {
        Self {
            operation: operation.into(),
            entity: None,
            entity_id: None,
        }
    }

    /// Attach the row a write was aimed at.
    pub fn on<I: EntityId>(mut self, id: I) -> Self {
        self.entity = Some(I::KIND);
        self.entity_id = Some(id.to_string());
        self
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.operation)?;
        match (&self.entity, &self.entity_id) {
            (Some(entity), Some(id)) => write!(f, " on {} {}", entity, id),
            _ => Ok(()),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    /// The store was switched unhealthy; every read fails until it recovers.
    #[error("Load-plan store unavailable during {context}")]
    Unavailable { context: ErrorContext },

    /// An update addressed a row the store does not hold.
    #[error("{context}: no such row")]
    RowMissing { context: ErrorContext },

    /// A write carried data breaking an entity invariant.
    #[error("{context} rejected: {message}")]
    Rejected {
        message: String,
        context: ErrorContext,
    },

    /// A snapshot could not be read, parsed or written.
    #[error("Snapshot error: {0}")]
    Snapshot(String),
}

impl RepositoryError {
    pub fn unavailable(operation: impl Into<String>) -> Self {
        Self::Unavailable {
            context: ErrorContext::new(operation),
        }
    }

    pub fn row_missing(context: ErrorContext) -> Self {
        Self::RowMissing { context }
    }

    pub fn rejected(message: impl Into<String>, context: ErrorContext) -> Self {
        Self::Rejected {
            message: message.into(),
            context,
        }
    }

    pub fn snapshot(message: impl Into<String>) -> Self {
        Self::Snapshot(message.into())
    }
}

impl From<serde_json::Error> for RepositoryError {
    fn from(err: serde_json::Error) -> Self {
        RepositoryError::snapshot(format!("invalid JSON: {}", err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CargoItemId;

    #[test]
    fn test_context_names_targeted_row() {
        let context = ErrorContext::new("update_cargo_item").on(CargoItemId::new(7));
        assert_eq!(context.entity, Some(EntityKind::CargoItem));
        assert_eq!(context.to_string(), "update_cargo_item on Cargo item 7");

        let err = RepositoryError::rejected("overhangs exceed length", context);
        assert_eq!(
            err.to_string(),
            "update_cargo_item on Cargo item 7 rejected: overhangs exceed length"
        );
    }

    #[test]
    fn test_unavailable_names_operation_only() {
        let err = RepositoryError::unavailable("get_mission");
        assert_eq!(err.to_string(), "Load-plan store unavailable during get_mission");
    }
}
