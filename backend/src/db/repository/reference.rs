//! Reference table repository trait.

use async_trait::async_trait;

use super::error::RepositoryResult;
use crate::models::{AllowedMacConstraint, FuelMacQuant};

/// Read access to the aircraft-type reference tables used by the balance calculation.
///
/// # Thread Safety
/// Implementations must be `Send + Sync` to work with async Rust.
#[async_trait]
pub trait ReferenceDataRepository: Send + Sync {
    /// The fuel distribution to index contribution table.
    async fn list_fuel_mac_quants(&self) -> RepositoryResult<Vec<FuelMacQuant>>;

    /// The allowed MAC% bands, ordered by ascending gross aircraft weight.
    async fn list_allowed_mac_constraints(&self) -> RepositoryResult<Vec<AllowedMacConstraint>>;
}
