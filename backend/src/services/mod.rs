//! Service layer for load-planning calculations.
//!
//! Services are free async functions generic over [`FullRepository`](crate::db::FullRepository).
//! Each one fetches what it needs, then delegates to a pure function in the same
//! module that does the arithmetic. The pure functions are public so callers that
//! already hold the entities can skip the store.
//!
//! - [`geometry`]: footprints, wheel touchpoints, treadways, compartment mapping
//! - [`floor_load`]: concentrated, running and per-compartment loads
//! - [`floor_validation`]: load checks against compartment limits
//! - [`mac`]: moment indices, center of gravity and MAC%
//! - [`mac_validation`]: MAC% against the allowed band
//! - [`cargo_chart`]: cargo reference chart readings

pub mod cargo_chart;
pub mod floor_load;
pub mod floor_validation;
pub mod geometry;
pub(crate) mod lookup;
pub mod mac;
pub mod mac_validation;

pub use cargo_chart::{
    calculate_cargo_chart_y, cargo_chart_y_in_pounds, is_within_chart_range, CargoChartResult,
};
pub use floor_load::{
    aggregate_cumulative_load_by_compartment, calculate_concentrated_load,
    calculate_load_per_compartment, calculate_running_load, CompartmentLoad, LoadResult, LoadUnit,
};
pub use floor_validation::{
    validate_concentrated_load, validate_cumulative_load, validate_mission_load_constraints,
    validate_running_load, LoadValidationResult, MissionValidationResults, ValidationStatus,
};
pub use geometry::{
    fs_to_x_position, get_footprint_corners, get_touchpoint_compartments, get_wheel_touchpoints,
    is_touchpoint_on_treadway, x_position_to_fs, Point, Touchpoint, TREADWAY_MIN_OVERLAP,
};
pub use mac::{
    calculate_additional_weights_mac_index, calculate_aircraft_cg, calculate_balance_summary,
    calculate_fuel_mac, calculate_mac_index, calculate_mac_percent,
    calculate_total_aircraft_weight, get_empty_aircraft_mac_index, BalanceSummary,
};
pub use mac_validation::{validate_mac, validate_mission_mac, MacValidationResult};
