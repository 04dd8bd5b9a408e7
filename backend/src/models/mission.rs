//! Mission: one planned flight of one aircraft, owning its cargo.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{AircraftId, FuelDistribution};
use crate::error::EntityKind;

crate::define_id_type!(i64, MissionId, EntityKind::Mission);

fn default_loadmasters() -> u32 {
    2
}

fn default_loadmasters_fs() -> f64 {
    500.0
}

fn default_configuration_weights() -> f64 {
    500.0
}

fn default_crew_gear_weight() -> f64 {
    300.0
}

fn default_food_weight() -> f64 {
    200.0
}

fn default_safety_gear_weight() -> f64 {
    150.0
}

fn default_etc_weight() -> f64 {
    100.0
}

/// Mission-level fixed weights and planned fuel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mission {
    pub id: MissionId,
    pub aircraft_id: AircraftId,
    pub name: String,
    pub created_date: DateTime<Utc>,
    pub modified_date: DateTime<Utc>,
    #[serde(default = "default_loadmasters")]
    pub loadmasters: u32,
    /// Fuselage station of the loadmaster seats.
    #[serde(default = "default_loadmasters_fs")]
    pub loadmasters_fs: f64,
    #[serde(default = "default_configuration_weights")]
    pub configuration_weights: f64,
    #[serde(default = "default_crew_gear_weight")]
    pub crew_gear_weight: f64,
    #[serde(default = "default_food_weight")]
    pub food_weight: f64,
    #[serde(default = "default_safety_gear_weight")]
    pub safety_gear_weight: f64,
    #[serde(default = "default_etc_weight")]
    pub etc_weight: f64,
    #[serde(flatten)]
    pub fuel: FuelDistribution,
}

impl Mission {
    /// A new mission with the standard crew and equipment weights.
    pub fn new(aircraft_id: AircraftId, name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: MissionId::new(0),
            aircraft_id,
            name: name.into(),
            created_date: now,
            modified_date: now,
            loadmasters: default_loadmasters(),
            loadmasters_fs: default_loadmasters_fs(),
            configuration_weights: default_configuration_weights(),
            crew_gear_weight: default_crew_gear_weight(),
            food_weight: default_food_weight(),
            safety_gear_weight: default_safety_gear_weight(),
            etc_weight: default_etc_weight(),
            fuel: FuelDistribution::default(),
        }
    }

    /// Crew weight for the given per-loadmaster weight.
    pub fn crew_weight(&self, loadmaster_weight: f64) -> f64 {
        f64::from(self.loadmasters) * loadmaster_weight
    }

    /// Sum of the six fixed weight categories.
    pub fn fixed_weight(&self, loadmaster_weight: f64) -> f64 {
        self.crew_weight(loadmaster_weight)
            + self.configuration_weights
            + self.crew_gear_weight
            + self.food_weight
            + self.safety_gear_weight
            + self.etc_weight
    }
}
