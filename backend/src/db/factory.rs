//! Repository factory for dependency injection.
//!
//! Engine operations take the repository as a parameter; this factory builds the
//! instances handed to them.

use std::path::Path;
use std::sync::Arc;

use super::repositories::LocalRepository;
use super::repository::{FullRepository, RepositoryResult};
use super::snapshot::LoadPlanSnapshot;

/// Environment variable naming a snapshot file to seed the store from.
pub const SNAPSHOT_ENV_VAR: &str = "LOADMASTER_SNAPSHOT";

/// Repository factory for creating repository instances.
///
/// # Example
/// ```no_run
/// use loadmaster_core::db::RepositoryFactory;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// // Empty in-memory store
/// let empty = RepositoryFactory::create_local();
///
/// // Store seeded from a saved load plan
/// let seeded = RepositoryFactory::from_snapshot_file("plans/sortie.json")?;
/// # Ok(())
/// # }
/// ```
pub struct RepositoryFactory;

impl RepositoryFactory {
    /// Create an empty in-memory local repository.
    pub fn create_local() -> Arc<dyn FullRepository> {
        Arc::new(LocalRepository::new())
    }

    /// Create an in-memory repository holding a snapshot's content.
    pub fn from_snapshot(snapshot: LoadPlanSnapshot) -> RepositoryResult<Arc<dyn FullRepository>> {
        let repo = LocalRepository::from_snapshot(snapshot)?;
        Ok(Arc::new(repo))
    }

    /// Create an in-memory repository from a JSON snapshot file.
    pub fn from_snapshot_file<P: AsRef<Path>>(
        path: P,
    ) -> RepositoryResult<Arc<dyn FullRepository>> {
        log::info!("Loading load plan snapshot from {}", path.as_ref().display());
        let snapshot = LoadPlanSnapshot::from_file(path)?;
        Self::from_snapshot(snapshot)
    }

    /// Create a repository from environment configuration.
    ///
    /// Reads the `LOADMASTER_SNAPSHOT` environment variable; when it is unset the
    /// store starts empty.
    pub fn from_env() -> RepositoryResult<Arc<dyn FullRepository>> {
        match std::env::var(SNAPSHOT_ENV_VAR) {
            Ok(path) if !path.trim().is_empty() => Self::from_snapshot_file(path),
            _ => Ok(Self::create_local()),
        }
    }
}
