//! Judging computed floor loads against each compartment's structural limits.

use serde::{Deserialize, Serialize};

use super::floor_load::{
    aggregate_cumulative_load_by_compartment, concentrated_load, running_load,
};
use super::geometry::{
    map_touchpoint_compartments, span_on_treadway, wheel_contact_span, wheel_touchpoints,
};
use super::lookup::{
    attach_cargo_types, mission_compartments, ordered_compartments, require_aircraft,
    require_load_constraint, require_mission,
};
use crate::config::CalibrationConfig;
use crate::db::repository::FullRepository;
use crate::error::EngineResult;
use crate::models::{
    Aircraft, CargoItem, CargoItemId, CargoType, Compartment, CompartmentId, LoadConstraint,
    MissionId, WheelType,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ValidationStatus {
    Pass,
    Fail,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoadConstraintType {
    Cumulative,
    Concentrated,
    Running,
}

/// Which running-load limit applies to an item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunningLoadCategory {
    Treadway,
    BetweenTreadways,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CumulativeLoadValidationResult {
    pub status: ValidationStatus,
    pub compartment_id: CompartmentId,
    pub compartment_name: String,
    /// Pounds resting in the compartment.
    pub current_load: f64,
    pub max_allowed_load: Option<f64>,
    pub overage_amount: f64,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConcentratedLoadValidationResult {
    pub status: ValidationStatus,
    pub cargo_item_id: CargoItemId,
    pub compartment_id: CompartmentId,
    pub compartment_name: String,
    /// lbs/sq.in under the item.
    pub current_load: f64,
    pub max_allowed_load: Option<f64>,
    pub overage_amount: f64,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunningLoadValidationResult {
    pub status: ValidationStatus,
    pub cargo_item_id: CargoItemId,
    pub compartment_id: CompartmentId,
    pub compartment_name: String,
    pub category: RunningLoadCategory,
    /// lbs/in along the item.
    pub current_load: f64,
    pub max_allowed_load: Option<f64>,
    pub overage_amount: f64,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "constraint_type", rename_all = "snake_case")]
pub enum LoadValidationResult {
    Cumulative(CumulativeLoadValidationResult),
    Concentrated(ConcentratedLoadValidationResult),
    Running(RunningLoadValidationResult),
}

impl LoadValidationResult {
    pub fn status(&self) -> ValidationStatus {
        match self {
            LoadValidationResult::Cumulative(r) => r.status,
            LoadValidationResult::Concentrated(r) => r.status,
            LoadValidationResult::Running(r) => r.status,
        }
    }

    pub fn constraint_type(&self) -> LoadConstraintType {
        match self {
            LoadValidationResult::Cumulative(_) => LoadConstraintType::Cumulative,
            LoadValidationResult::Concentrated(_) => LoadConstraintType::Concentrated,
            LoadValidationResult::Running(_) => LoadConstraintType::Running,
        }
    }

    pub fn compartment_id(&self) -> CompartmentId {
        match self {
            LoadValidationResult::Cumulative(r) => r.compartment_id,
            LoadValidationResult::Concentrated(r) => r.compartment_id,
            LoadValidationResult::Running(r) => r.compartment_id,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            LoadValidationResult::Cumulative(r) => &r.message,
            LoadValidationResult::Concentrated(r) => &r.message,
            LoadValidationResult::Running(r) => &r.message,
        }
    }
}

/// Verdict over every floor-load check of a mission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MissionValidationResults {
    pub mission_id: MissionId,
    pub overall_status: ValidationStatus,
    pub results: Vec<LoadValidationResult>,
}

impl MissionValidationResults {
    pub fn failures(&self) -> impl Iterator<Item = &LoadValidationResult> {
        self.results
            .iter()
            .filter(|r| r.status() == ValidationStatus::Fail)
    }
}

/// Status and overage of a load against an optional limit.
fn judge(current: f64, max_allowed: Option<f64>) -> (ValidationStatus, f64) {
    match max_allowed {
        Some(max) if current > max => (ValidationStatus::Fail, current - max),
        _ => (ValidationStatus::Pass, 0.0),
    }
}

fn describe(
    subject: &str,
    compartment: &Compartment,
    current: f64,
    max_allowed: Option<f64>,
    overage: f64,
    unit: &str,
) -> String {
    match max_allowed {
        None => format!(
            "{} in {}: {:.2} {} (no limit defined)",
            subject, compartment.name, current, unit
        ),
        Some(max) if overage > 0.0 => format!(
            "{} in {} exceeds limit: {:.2} {} > {:.2} {} (over by {:.2} {})",
            subject, compartment.name, current, unit, max, unit, overage, unit
        ),
        Some(max) => format!(
            "{} in {} within limit: {:.2} {} <= {:.2} {}",
            subject, compartment.name, current, unit, max, unit
        ),
    }
}

async fn on_deck_items<R: FullRepository + ?Sized>(
    repo: &R,
    mission_id: MissionId,
) -> EngineResult<Vec<(CargoItem, CargoType)>> {
    let items: Vec<CargoItem> = repo
        .list_cargo_items_for_mission(mission_id)
        .await?
        .into_iter()
        .filter(CargoItem::is_on_deck)
        .collect();
    attach_cargo_types(repo, items).await
}

/// Constraint row of a compartment, or `None` with a warning when it is missing.
async fn lenient_constraint<R: FullRepository + ?Sized>(
    repo: &R,
    compartment: &Compartment,
    cargo_item_id: CargoItemId,
) -> EngineResult<Option<LoadConstraint>> {
    let constraint = repo.get_load_constraint_for_compartment(compartment.id).await?;
    if constraint.is_none() {
        log::warn!(
            "Skipping cargo item {} in compartment {}: no load constraint",
            cargo_item_id,
            compartment.id
        );
    }
    Ok(constraint)
}

/// Cumulative load of every compartment of the mission's aircraft.
///
/// Fails with `ConstraintMissing` if any compartment has no constraint row.
pub async fn validate_cumulative_load<R: FullRepository + ?Sized>(
    repo: &R,
    mission_id: MissionId,
) -> EngineResult<Vec<CumulativeLoadValidationResult>> {
    let compartments = mission_compartments(repo, mission_id).await?;
    let loads = aggregate_cumulative_load_by_compartment(repo, mission_id).await?;
    let constraints = futures::future::try_join_all(
        compartments
            .iter()
            .map(|compartment| require_load_constraint(repo, compartment)),
    )
    .await?;

    Ok(compartments
        .iter()
        .zip(constraints)
        .map(|(compartment, constraint)| {
            let current_load = loads.get(&compartment.id).copied().unwrap_or(0.0);
            let max_allowed_load = constraint.max_cumulative_weight;
            let (status, overage_amount) = judge(current_load, max_allowed_load);
            CumulativeLoadValidationResult {
                status,
                compartment_id: compartment.id,
                compartment_name: compartment.name.clone(),
                current_load,
                max_allowed_load,
                overage_amount,
                message: describe(
                    "Cumulative load",
                    compartment,
                    current_load,
                    max_allowed_load,
                    overage_amount,
                    "lbs",
                ),
            }
        })
        .collect())
}

/// Concentrated load of every on-deck item against each compartment it bears on.
///
/// Pairings whose compartment has no constraint row are skipped.
pub async fn validate_concentrated_load<R: FullRepository + ?Sized>(
    repo: &R,
    config: &CalibrationConfig,
    mission_id: MissionId,
) -> EngineResult<Vec<ConcentratedLoadValidationResult>> {
    let compartments = mission_compartments(repo, mission_id).await?;
    let typed_items = on_deck_items(repo, mission_id).await?;
    if typed_items.is_empty() {
        return Ok(Vec::new());
    }

    let mut results = Vec::new();
    for (item, cargo_type) in &typed_items {
        let wheel_type = cargo_type.wheel_type;
        let current_load = concentrated_load(item, wheel_type, &config.wheels)?.value;
        let mapping = map_touchpoint_compartments(item, wheel_type, &compartments);

        for compartment in mapping.bearing_compartments(wheel_type) {
            let Some(constraint) = lenient_constraint(repo, compartment, item.id).await? else {
                continue;
            };
            let max_allowed_load = constraint.max_concentrated_load;
            let (status, overage_amount) = judge(current_load, max_allowed_load);
            results.push(ConcentratedLoadValidationResult {
                status,
                cargo_item_id: item.id,
                compartment_id: compartment.id,
                compartment_name: compartment.name.clone(),
                current_load,
                max_allowed_load,
                overage_amount,
                message: describe(
                    &format!("Concentrated load of '{}'", item.name),
                    compartment,
                    current_load,
                    max_allowed_load,
                    overage_amount,
                    "lbs/sq.in",
                ),
            });
        }
    }

    Ok(results)
}

/// Treadway category of an item: wheeled cargo qualifies when every wheel rests
/// on a treadway, bulk cargo never does.
pub fn running_load_category(
    item: &CargoItem,
    wheel_type: WheelType,
    aircraft: &Aircraft,
    config: &CalibrationConfig,
) -> EngineResult<RunningLoadCategory> {
    let Some(dims) = config.wheels.dimensions(wheel_type) else {
        return Ok(RunningLoadCategory::BetweenTreadways);
    };
    for point in wheel_touchpoints(item, wheel_type).values() {
        let span = wheel_contact_span(*point, dims.wheel_width)?;
        if !span_on_treadway(&span, aircraft)? {
            return Ok(RunningLoadCategory::BetweenTreadways);
        }
    }
    Ok(RunningLoadCategory::Treadway)
}

/// Running load of every on-deck item against each compartment it bears on,
/// using the treadway or between-treadways limit as the wheel placement dictates.
///
/// Pairings whose compartment has no constraint row are skipped.
pub async fn validate_running_load<R: FullRepository + ?Sized>(
    repo: &R,
    config: &CalibrationConfig,
    mission_id: MissionId,
) -> EngineResult<Vec<RunningLoadValidationResult>> {
    let mission = require_mission(repo, mission_id).await?;
    let typed_items = on_deck_items(repo, mission_id).await?;
    if typed_items.is_empty() {
        return Ok(Vec::new());
    }
    let aircraft = require_aircraft(repo, mission.aircraft_id).await?;
    let compartments = ordered_compartments(repo, mission.aircraft_id).await?;

    let mut results = Vec::new();
    for (item, cargo_type) in &typed_items {
        let wheel_type = cargo_type.wheel_type;
        let current_load = running_load(item, wheel_type)?.value;
        let category = running_load_category(item, wheel_type, &aircraft, config)?;
        let mapping = map_touchpoint_compartments(item, wheel_type, &compartments);

        for compartment in mapping.bearing_compartments(wheel_type) {
            let Some(constraint) = lenient_constraint(repo, compartment, item.id).await? else {
                continue;
            };
            let max_allowed_load = match category {
                RunningLoadCategory::Treadway => constraint.max_running_load_treadway,
                RunningLoadCategory::BetweenTreadways => {
                    constraint.max_running_load_between_treadways
                }
            };
            let (status, overage_amount) = judge(current_load, max_allowed_load);
            results.push(RunningLoadValidationResult {
                status,
                cargo_item_id: item.id,
                compartment_id: compartment.id,
                compartment_name: compartment.name.clone(),
                category,
                current_load,
                max_allowed_load,
                overage_amount,
                message: describe(
                    &format!("Running load of '{}'", item.name),
                    compartment,
                    current_load,
                    max_allowed_load,
                    overage_amount,
                    "lbs/in",
                ),
            });
        }
    }

    Ok(results)
}

/// Cumulative and concentrated checks of a mission combined into one verdict.
pub async fn validate_mission_load_constraints<R: FullRepository + ?Sized>(
    repo: &R,
    config: &CalibrationConfig,
    mission_id: MissionId,
) -> EngineResult<MissionValidationResults> {
    let (cumulative, concentrated) = tokio::try_join!(
        validate_cumulative_load(repo, mission_id),
        validate_concentrated_load(repo, config, mission_id),
    )?;

    let results: Vec<LoadValidationResult> = cumulative
        .into_iter()
        .map(LoadValidationResult::Cumulative)
        .chain(concentrated.into_iter().map(LoadValidationResult::Concentrated))
        .collect();

    let overall_status = if results.iter().any(|r| r.status() == ValidationStatus::Fail) {
        ValidationStatus::Fail
    } else {
        ValidationStatus::Pass
    };

    log::info!(
        "Mission {} floor-load validation: {:?} ({} checks)",
        mission_id,
        overall_status,
        results.len()
    );

    Ok(MissionValidationResults {
        mission_id,
        overall_status,
        results,
    })
}
