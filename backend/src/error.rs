//! Engine-level error types.
//!
//! Every public calculation returns [`EngineResult`]. Missing entities are reported
//! with the kind and id that was looked up, storage failures are wrapped unchanged.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::db::repository::RepositoryError;
use crate::models::CompartmentId;

/// Result type for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;

/// The kinds of persisted entity the engine reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Aircraft,
    Compartment,
    LoadConstraint,
    Mission,
    FuelState,
    CargoType,
    CargoItem,
    FuelMacQuant,
    AllowedMacConstraint,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EntityKind::Aircraft => "Aircraft",
            EntityKind::Compartment => "Compartment",
            EntityKind::LoadConstraint => "Load constraint",
            EntityKind::Mission => "Mission",
            EntityKind::FuelState => "Fuel state",
            EntityKind::CargoType => "Cargo type",
            EntityKind::CargoItem => "Cargo item",
            EntityKind::FuelMacQuant => "Fuel MAC quant",
            EntityKind::AllowedMacConstraint => "Allowed MAC constraint",
        };
        f.write_str(name)
    }
}

/// Error type for engine operations.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// A required entity is absent from the store.
    #[error("{entity} with ID {id} not found")]
    NotFound { entity: EntityKind, id: String },

    /// The compartment exists but carries no load constraint row.
    #[error("No load constraint found for compartment with ID {compartment_id}")]
    ConstraintMissing { compartment_id: CompartmentId },

    /// Arguments or stored geometry the formulas cannot work with.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Calibration configuration could not be loaded or is inconsistent.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The persistence collaborator failed.
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

impl EngineError {
    /// Build a NotFound error for a typed id.
    pub fn not_found<I: crate::models::EntityId>(id: I) -> Self {
        Self::NotFound {
            entity: I::KIND,
            id: id.to_string(),
        }
    }

    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }

    /// True for a missing entity, including a compartment without a constraint row.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            EngineError::NotFound { .. } | EngineError::ConstraintMissing { .. }
        )
    }

    /// The entity kind a NotFound-like error refers to.
    pub fn missing_entity(&self) -> Option<EntityKind> {
        match self {
            EngineError::NotFound { entity, .. } => Some(*entity),
            EngineError::ConstraintMissing { .. } => Some(EntityKind::LoadConstraint),
            _ => None,
        }
    }
}
