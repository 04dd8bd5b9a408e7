//! Aircraft repository trait.

use async_trait::async_trait;

use super::error::RepositoryResult;
use crate::models::{Aircraft, AircraftId, Compartment, CompartmentId, LoadConstraint};

/// Read access to airframes and their floor structure.
///
/// # Thread Safety
/// Implementations must be `Send + Sync` to work with async Rust.
#[async_trait]
pub trait AircraftRepository: Send + Sync {
    /// Get an aircraft by ID, `None` if absent.
    async fn get_aircraft(&self, aircraft_id: AircraftId) -> RepositoryResult<Option<Aircraft>>;

    /// Get a compartment by ID, `None` if absent.
    ///
    /// The engine walks compartments per aircraft; this resolves the bare
    /// `CompartmentId` carried by load results and `ConstraintMissing` errors.
    async fn get_compartment(
        &self,
        compartment_id: CompartmentId,
    ) -> RepositoryResult<Option<Compartment>>;

    /// All compartments of an aircraft, in no particular order.
    async fn list_compartments_for_aircraft(
        &self,
        aircraft_id: AircraftId,
    ) -> RepositoryResult<Vec<Compartment>>;

    /// The load constraint row attached to a compartment, `None` if the
    /// compartment has none.
    async fn get_load_constraint_for_compartment(
        &self,
        compartment_id: CompartmentId,
    ) -> RepositoryResult<Option<LoadConstraint>>;
}
