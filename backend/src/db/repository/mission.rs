//! Mission repository trait.

use async_trait::async_trait;

use super::error::RepositoryResult;
use crate::models::{FuelState, Mission, MissionId};

/// Read access to missions.
///
/// # Thread Safety
/// Implementations must be `Send + Sync` to work with async Rust.
#[async_trait]
pub trait MissionRepository: Send + Sync {
    /// Check if the store is reachable.
    ///
    /// # Returns
    /// - `Ok(true)` if the store is healthy
    /// - `Ok(false)` if it is unhealthy but no error occurred
    /// - `Err(RepositoryError)` if the check itself failed
    async fn health_check(&self) -> RepositoryResult<bool>;

    /// Get a mission by ID, `None` if absent.
    async fn get_mission(&self, mission_id: MissionId) -> RepositoryResult<Option<Mission>>;

    /// The fuel loaded for a mission, `None` if no fuel state was recorded.
    async fn get_fuel_state_for_mission(
        &self,
        mission_id: MissionId,
    ) -> RepositoryResult<Option<FuelState>>;
}
