//! Fuel state of a mission and the reference tables consumed by the balance calculation.

use serde::{Deserialize, Serialize};

use super::{Mission, MissionId};
use crate::config::FuelSettings;
use crate::error::EntityKind;

crate::define_id_type!(i64, FuelStateId, EntityKind::FuelState);
crate::define_id_type!(i64, FuelMacQuantId, EntityKind::FuelMacQuant);
crate::define_id_type!(i64, AllowedMacConstraintId, EntityKind::AllowedMacConstraint);

/// Quantity per tank group, in pounds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FuelDistribution {
    pub outboard_fuel: f64,
    pub inboard_fuel: f64,
    pub fuselage_fuel: f64,
    pub auxiliary_fuel: f64,
    pub external_fuel: f64,
}

impl Default for FuelDistribution {
    fn default() -> Self {
        Self {
            outboard_fuel: 1000.0,
            inboard_fuel: 2000.0,
            fuselage_fuel: 1500.0,
            auxiliary_fuel: 500.0,
            external_fuel: 800.0,
        }
    }
}

impl FuelDistribution {
    pub const fn empty() -> Self {
        Self {
            outboard_fuel: 0.0,
            inboard_fuel: 0.0,
            fuselage_fuel: 0.0,
            auxiliary_fuel: 0.0,
            external_fuel: 0.0,
        }
    }

    /// Tank quantities in fixed order: outboard, inboard, fuselage, auxiliary, external.
    pub fn tanks(&self) -> [f64; 5] {
        [
            self.outboard_fuel,
            self.inboard_fuel,
            self.fuselage_fuel,
            self.auxiliary_fuel,
            self.external_fuel,
        ]
    }

    pub fn from_tanks(tanks: [f64; 5]) -> Self {
        Self {
            outboard_fuel: tanks[0],
            inboard_fuel: tanks[1],
            fuselage_fuel: tanks[2],
            auxiliary_fuel: tanks[3],
            external_fuel: tanks[4],
        }
    }

    pub fn total(&self) -> f64 {
        self.tanks().iter().sum()
    }

    /// Sum of absolute per-tank differences.
    pub fn l1_distance(&self, other: &FuelDistribution) -> f64 {
        self.tanks()
            .iter()
            .zip(other.tanks().iter())
            .map(|(a, b)| (a - b).abs())
            .sum()
    }
}

/// Fuel loaded for a mission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FuelState {
    pub id: FuelStateId,
    pub mission_id: MissionId,
    #[serde(flatten)]
    pub tanks: FuelDistribution,
    /// Usable fuel weight counted in the gross weight.
    pub total_fuel: f64,
    /// Explicit index contribution overriding the reference table lookup.
    #[serde(default)]
    pub mac_contribution: Option<f64>,
}

impl FuelState {
    /// Derive a fuel state from tank quantities, deducting the fuel burnt during taxi.
    pub fn from_distribution(
        mission_id: MissionId,
        tanks: FuelDistribution,
        taxi_fuel: f64,
    ) -> Self {
        Self {
            id: FuelStateId::new(0),
            mission_id,
            tanks,
            total_fuel: (tanks.total() - taxi_fuel).max(0.0),
            mac_contribution: None,
        }
    }

    /// The fuel state a mission takes off with: its planned tanks less the
    /// configured taxi fuel.
    pub fn for_mission(mission: &Mission, settings: &FuelSettings) -> Self {
        Self::from_distribution(mission.id, mission.fuel, settings.taxi_fuel)
    }
}

/// Reference row: index contribution of a given tank distribution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FuelMacQuant {
    pub id: FuelMacQuantId,
    #[serde(flatten)]
    pub tanks: FuelDistribution,
    pub mac_contribution: f64,
}

/// Reference row: allowed MAC% band at a gross aircraft weight.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AllowedMacConstraint {
    pub id: AllowedMacConstraintId,
    pub gross_aircraft_weight: f64,
    pub min_mac: f64,
    pub max_mac: f64,
}
