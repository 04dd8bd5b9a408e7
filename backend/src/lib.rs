//! # Loadmaster Core
//!
//! Weight-and-balance and floor-load engine for cargo aircraft load planning.
//!
//! Given an aircraft, its compartments with structural limits, a mission with its
//! fuel and fixed loads, and the cargo placed on deck, the engine answers two
//! questions: where the center of gravity sits (as a percentage of the mean
//! aerodynamic chord) and whether any part of the floor is overloaded.
//!
//! ## Architecture
//!
//! - [`models`]: domain entities and strongly typed identifiers
//! - [`db`]: repository traits, the in-memory store and its JSON snapshot format
//! - [`services`]: the calculations, as async functions over a repository
//! - [`config`]: calibration constants loaded from TOML
//! - [`api`]: result records returned by the services
//! - [`error`]: the engine error type
//!
//! ## Example
//!
//! ```no_run
//! use loadmaster_core::{CalibrationConfig, MissionId, RepositoryFactory};
//!
//! # async fn run() -> loadmaster_core::EngineResult<()> {
//! let repo = RepositoryFactory::from_snapshot_file("plan.json")?;
//! let config = CalibrationConfig::from_default_location()?;
//! let mission_id = MissionId::new(1);
//! let summary =
//!     loadmaster_core::services::calculate_balance_summary(repo.as_ref(), &config, mission_id)
//!         .await?;
//! println!("CG at {:.1}% MAC", summary.mac_percent);
//! # Ok(())
//! # }
//! ```

// RepositoryError carries its context inline
#![allow(clippy::result_large_err)]

pub mod api;
pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod services;

pub use config::CalibrationConfig;
pub use db::{FullRepository, LocalRepository, LoadPlanSnapshot, RepositoryError, RepositoryFactory};
pub use error::{EngineError, EngineResult, EntityKind};
pub use models::*;
