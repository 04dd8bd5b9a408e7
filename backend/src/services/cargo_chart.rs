//! Cargo reference chart: reading the inclined cargo-weight lines.
//!
//! The chart plots operating weight (x) against cargo weight (y), both in
//! thousands of pounds.

use serde::{Deserialize, Serialize};

use crate::config::ChartSettings;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CargoChartResult {
    pub y_value: f64,
    pub is_within_bounds: bool,
    pub operating_weight_klbs: f64,
    pub cargo_weight_klbs: f64,
}

pub fn calculate_cargo_chart_y(
    operating_weight_lbs: f64,
    cargo_weight_lbs: f64,
    chart: &ChartSettings,
) -> CargoChartResult {
    let operating_weight_klbs = operating_weight_lbs / 1000.0;
    let cargo_weight_klbs = cargo_weight_lbs / 1000.0;

    let deviation = chart.reference_operating_weight - operating_weight_klbs;
    let y_value = cargo_weight_klbs + deviation * chart.line_slope;

    let cargo_range = chart.min_cargo_weight..=chart.max_cargo_weight;
    let is_within_bounds = (chart.min_operating_weight..=chart.max_operating_weight)
        .contains(&operating_weight_klbs)
        && cargo_range.contains(&cargo_weight_klbs)
        && cargo_range.contains(&y_value);

    CargoChartResult {
        y_value,
        is_within_bounds,
        operating_weight_klbs,
        cargo_weight_klbs,
    }
}

/// Chart reading converted back to pounds.
pub fn cargo_chart_y_in_pounds(
    operating_weight_lbs: f64,
    cargo_weight_lbs: f64,
    chart: &ChartSettings,
) -> f64 {
    calculate_cargo_chart_y(operating_weight_lbs, cargo_weight_lbs, chart).y_value * 1000.0
}

pub fn is_within_chart_range(
    operating_weight_lbs: f64,
    cargo_weight_lbs: f64,
    chart: &ChartSettings,
) -> bool {
    calculate_cargo_chart_y(operating_weight_lbs, cargo_weight_lbs, chart).is_within_bounds
}
