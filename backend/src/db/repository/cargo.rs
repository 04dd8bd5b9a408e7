//! Cargo repository trait.

use async_trait::async_trait;

use super::error::RepositoryResult;
use crate::models::{CargoItem, CargoItemId, CargoType, CargoTypeId, MissionId};

/// Read access to cargo items and the types they were created from.
///
/// # Thread Safety
/// Implementations must be `Send + Sync` to work with async Rust.
#[async_trait]
pub trait CargoRepository: Send + Sync {
    /// Get a cargo item by ID, `None` if absent.
    async fn get_cargo_item(&self, cargo_item_id: CargoItemId)
        -> RepositoryResult<Option<CargoItem>>;

    /// Every cargo item of a mission, whatever its status, ordered by ID.
    async fn list_cargo_items_for_mission(
        &self,
        mission_id: MissionId,
    ) -> RepositoryResult<Vec<CargoItem>>;

    /// Get a cargo type by ID, `None` if absent.
    async fn get_cargo_type(&self, cargo_type_id: CargoTypeId)
        -> RepositoryResult<Option<CargoType>>;
}
