//! Repository trait definitions for the persisted load-planning entities.
//!
//! The read side the engine depends on is split into focused traits:
//!
//! - [`error`]: Error types for repository operations
//! - [`aircraft`]: Airframes, compartments and their load constraints
//! - [`mission`]: Missions and their fuel state
//! - [`cargo`]: Cargo items and cargo types
//! - [`reference`]: Fuel MAC and allowed MAC reference tables
//!
//! Lookups by id return `Ok(None)` when the entity is absent.
//!
//! # Convenience Trait Bound
//!
//! Engine operations take any [`FullRepository`]:
//!
//! ```ignore
//! async fn my_calculation<R: FullRepository + ?Sized>(repo: &R) -> EngineResult<()> {
//!     let mission = repo.get_mission(mission_id).await?;
//!     let items = repo.list_cargo_items_for_mission(mission_id).await?;
//!     Ok(())
//! }
//! ```

pub mod aircraft;
pub mod cargo;
pub mod error;
pub mod mission;
pub mod reference;

// Re-export error types
pub use error::{ErrorContext, RepositoryError, RepositoryResult};

// Re-export all traits
pub use aircraft::AircraftRepository;
pub use cargo::CargoRepository;
pub use mission::MissionRepository;
pub use reference::ReferenceDataRepository;

/// Composite trait bound for a complete repository implementation.
///
/// Automatically implemented for any type that implements all four
/// repository traits.
pub trait FullRepository:
    AircraftRepository + MissionRepository + CargoRepository + ReferenceDataRepository
{
}

// Any type implementing all four traits is a FullRepository.
impl<T> FullRepository for T where
    T: AircraftRepository + MissionRepository + CargoRepository + ReferenceDataRepository + ?Sized
{
}
