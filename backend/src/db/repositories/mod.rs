//! Repository implementations module.
//!
//! - `local`: In-memory implementation for unit testing and local tooling
pub mod local;

pub use local::LocalRepository;
