//! JSON snapshot of a complete load plan, used to seed the in-memory store.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::repository::{RepositoryError, RepositoryResult};
use crate::models::{
    Aircraft, AllowedMacConstraint, CargoItem, CargoType, Compartment, FuelMacQuant, FuelState,
    LoadConstraint, Mission,
};

/// Every entity table the engine reads, with ids preserved.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LoadPlanSnapshot {
    #[serde(default)]
    pub aircraft: Vec<Aircraft>,
    #[serde(default)]
    pub compartments: Vec<Compartment>,
    #[serde(default)]
    pub load_constraints: Vec<LoadConstraint>,
    #[serde(default)]
    pub missions: Vec<Mission>,
    #[serde(default)]
    pub fuel_states: Vec<FuelState>,
    #[serde(default)]
    pub cargo_types: Vec<CargoType>,
    #[serde(default)]
    pub cargo_items: Vec<CargoItem>,
    #[serde(default)]
    pub fuel_mac_quants: Vec<FuelMacQuant>,
    #[serde(default)]
    pub allowed_mac_constraints: Vec<AllowedMacConstraint>,
}

impl LoadPlanSnapshot {
    /// Parse a snapshot from a JSON string.
    pub fn from_json_str(json: &str) -> RepositoryResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read and parse a snapshot file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> RepositoryResult<Self> {
        let content = fs::read_to_string(path.as_ref()).map_err(|e| {
            RepositoryError::snapshot(format!(
                "Failed to read snapshot {}: {}",
                path.as_ref().display(),
                e
            ))
        })?;
        Self::from_json_str(&content)
    }

    pub fn to_json_string(&self) -> RepositoryResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| RepositoryError::snapshot(format!("failed to serialize: {}", e)))
    }
}
