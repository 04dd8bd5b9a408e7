//! Public result surface.
//!
//! Every record a calculation hands back, gathered in one place. All of them
//! derive Serialize/Deserialize so an outer layer can ship them as JSON unchanged.

pub use crate::services::cargo_chart::CargoChartResult;
pub use crate::services::floor_load::{CompartmentLoad, LoadResult, LoadUnit};
pub use crate::services::floor_validation::{
    ConcentratedLoadValidationResult, CumulativeLoadValidationResult, LoadConstraintType,
    LoadValidationResult, MissionValidationResults, RunningLoadCategory,
    RunningLoadValidationResult, ValidationStatus,
};
pub use crate::services::geometry::{
    FootprintCorners, Point, Touchpoint, TouchpointCompartments, WheelSpan, WheelTouchpoints,
};
pub use crate::services::mac::{BalanceSummary, StationWeight, WeightCategory};
pub use crate::services::mac_validation::MacValidationResult;
