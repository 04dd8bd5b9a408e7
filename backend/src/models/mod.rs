//! Domain models for the cargo deck, the mission and its reference tables.
//!
//! All coordinates are inches along the longitudinal (x) and lateral (y) axes,
//! all weights are pounds.

pub mod aircraft;
pub mod cargo;
pub mod fuel;
pub mod macros;
pub mod mission;

pub use aircraft::*;
pub use cargo::*;
pub use fuel::*;
pub use mission::*;

use crate::error::EntityKind;

/// Typed identifier of a persisted entity.
///
/// Implemented by every id generated with [`define_id_type!`](crate::define_id_type).
pub trait EntityId: Copy + std::fmt::Display + Send + Sync {
    const KIND: EntityKind;
}
