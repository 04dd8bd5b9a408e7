//! Aircraft reference data: airframe, floor compartments and their structural limits.

use serde::{Deserialize, Serialize};

use crate::error::EntityKind;

crate::define_id_type!(i64, AircraftId, EntityKind::Aircraft);
crate::define_id_type!(i64, CompartmentId, EntityKind::Compartment);
crate::define_id_type!(i64, LoadConstraintId, EntityKind::LoadConstraint);

/// Ramp geometry at the aft end of the cargo bay.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RampGeometry {
    pub length: f64,
    pub max_incline: f64,
    pub min_incline: f64,
}

/// A single airframe (tail number).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Aircraft {
    pub id: AircraftId,
    #[serde(rename = "type")]
    pub aircraft_type: String,
    pub name: String,
    pub empty_weight: f64,
    /// Basic index of the empty aircraft.
    pub empty_mac: f64,
    pub cargo_bay_width: f64,
    pub treadways_width: f64,
    /// Distance from the centreline to the centre of each treadway.
    pub treadways_dist_from_center: f64,
    #[serde(default)]
    pub ramp: RampGeometry,
}

/// A contiguous structural floor zone `[x_start, x_end]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Compartment {
    pub id: CompartmentId,
    pub aircraft_id: AircraftId,
    pub name: String,
    pub x_start: f64,
    pub x_end: f64,
    #[serde(default)]
    pub floor_area: f64,
    #[serde(default)]
    pub usable_volume: f64,
}

impl Compartment {
    /// Length of the intersection of `[start, end]` with this compartment, 0 if disjoint.
    pub fn overlap_with(&self, start: f64, end: f64) -> f64 {
        (end.min(self.x_end) - start.max(self.x_start)).max(0.0)
    }

    /// Strict intersection test: a span touching only at a boundary does not count.
    pub fn intersects(&self, start: f64, end: f64) -> bool {
        start < self.x_end && end > self.x_start
    }

    /// Inclusive containment of a longitudinal station.
    pub fn contains_x(&self, x: f64) -> bool {
        x >= self.x_start && x <= self.x_end
    }
}

/// Structural limits of one compartment. An absent maximum is not validated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoadConstraint {
    pub id: LoadConstraintId,
    pub compartment_id: CompartmentId,
    #[serde(default)]
    pub max_cumulative_weight: Option<f64>,
    #[serde(default)]
    pub max_concentrated_load: Option<f64>,
    #[serde(default)]
    pub max_running_load_treadway: Option<f64>,
    #[serde(default)]
    pub max_running_load_between_treadways: Option<f64>,
}
