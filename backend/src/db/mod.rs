//! Persistence collaborator of the engine.
//!
//! The engine never talks to a concrete store. Every calculation receives a
//! repository implementing [`FullRepository`] as an argument:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │  Caller (UI, tooling, tests)                            │
//! └───────────────────┬─────────────────────────────────────┘
//!                     │
//! ┌───────────────────▼─────────────────────────────────────┐
//! │  Services - geometry, floor load, balance, validation   │
//! └───────────────────┬─────────────────────────────────────┘
//!                     │
//! ┌───────────────────▼─────────────────────────────────────┐
//! │  Repository traits (repository/) - read interface       │
//! └───────────────────┬─────────────────────────────────────┘
//!                     │
//!           ┌─────────▼──────────┐
//!           │  Local Repository  │
//!           │  (in-memory)       │
//!           └────────────────────┘
//! ```
//!
//! - `repository`: Trait definitions and error types
//! - `repositories::local`: In-memory implementation, seeded directly or from a snapshot
//! - `snapshot`: JSON snapshot of a complete load plan
//! - `factory`: Factory for creating repository instances

pub mod factory;
pub mod repositories;
pub mod repository;
pub mod snapshot;

pub use factory::RepositoryFactory;
pub use repositories::LocalRepository;
pub use repository::{
    AircraftRepository, CargoRepository, ErrorContext, FullRepository, MissionRepository,
    ReferenceDataRepository, RepositoryError, RepositoryResult,
};
pub use snapshot::LoadPlanSnapshot;
