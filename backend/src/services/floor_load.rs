//! Floor-load formulas: concentrated, running and per-compartment cumulative load.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::geometry::{map_touchpoint_compartments, TouchpointCompartments};
use super::lookup::{attach_cargo_types, mission_compartments, require_item_with_type};
use crate::config::{CalibrationConfig, WheelSettings};
use crate::db::repository::FullRepository;
use crate::error::{EngineError, EngineResult};
use crate::models::{CargoItem, CargoItemId, CompartmentId, MissionId, WheelType};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LoadUnit {
    #[serde(rename = "lbs/sq.in")]
    PoundsPerSquareInch,
    #[serde(rename = "lbs/in")]
    PoundsPerInch,
    #[serde(rename = "lbs")]
    Pounds,
}

impl fmt::Display for LoadUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            LoadUnit::PoundsPerSquareInch => "lbs/sq.in",
            LoadUnit::PoundsPerInch => "lbs/in",
            LoadUnit::Pounds => "lbs",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LoadResult {
    pub value: f64,
    pub unit: LoadUnit,
}

impl LoadResult {
    pub fn new(value: f64, unit: LoadUnit) -> Self {
        Self { value, unit }
    }
}

/// Share of one item's weight carried by one compartment.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CompartmentLoad {
    pub compartment_id: CompartmentId,
    pub load: LoadResult,
}

fn wheel_count(wheel_type: WheelType) -> EngineResult<f64> {
    wheel_type
        .wheel_count()
        .map(f64::from)
        .ok_or_else(|| EngineError::invalid_input(format!("{} cargo has no wheels", wheel_type)))
}

/// Pressure under an item: over the whole footprint for bulk cargo, over the
/// wheel contact patches otherwise.
pub fn concentrated_load(
    item: &CargoItem,
    wheel_type: WheelType,
    wheels: &WheelSettings,
) -> EngineResult<LoadResult> {
    let contact_area = match wheels.dimensions(wheel_type) {
        None => item.length * item.width,
        Some(dims) => wheel_count(wheel_type)? * dims.wheel_width * dims.contact_length,
    };
    if !(contact_area > 0.0) {
        return Err(EngineError::invalid_input(format!(
            "Cargo item {} has no contact area",
            item.id
        )));
    }
    Ok(LoadResult::new(
        item.weight / contact_area,
        LoadUnit::PoundsPerSquareInch,
    ))
}

/// Load per inch of floor length. Four-wheeled cargo spreads it over two tracks.
pub fn running_load(item: &CargoItem, wheel_type: WheelType) -> EngineResult<LoadResult> {
    let bearing_length = match wheel_type {
        WheelType::Bulk => item.length,
        WheelType::TwoWheeled | WheelType::FourWheeled => item.wheelbase(),
    };
    if !(bearing_length > 0.0) {
        return Err(EngineError::invalid_input(format!(
            "Cargo item {} has no load-bearing length",
            item.id
        )));
    }

    let per_track = item.weight / bearing_length;
    let value = match wheel_type {
        WheelType::FourWheeled => per_track / 2.0,
        WheelType::Bulk | WheelType::TwoWheeled => per_track,
    };
    Ok(LoadResult::new(value, LoadUnit::PoundsPerInch))
}

/// Split an item's weight over the compartments it rests on.
///
/// Bulk weight is shared in proportion to the length inside each compartment,
/// wheeled weight is shared per wheel. Load on a touchpoint outside every
/// compartment is not attributed.
pub fn compartment_loads(
    item: &CargoItem,
    wheel_type: WheelType,
    mapping: &TouchpointCompartments,
) -> EngineResult<Vec<CompartmentLoad>> {
    let mut loads: Vec<CompartmentLoad> = Vec::new();

    match wheel_type {
        WheelType::Bulk => {
            if !(item.length > 0.0) {
                return Err(EngineError::invalid_input(format!(
                    "Cargo item {} has no length",
                    item.id
                )));
            }
            for compartment in &mapping.overlapping_compartments {
                let overlap = compartment.overlap_with(item.x_start_position, item.x_end());
                if overlap > 0.0 {
                    loads.push(CompartmentLoad {
                        compartment_id: compartment.id,
                        load: LoadResult::new(
                            item.weight * overlap / item.length,
                            LoadUnit::Pounds,
                        ),
                    });
                }
            }
        }
        WheelType::TwoWheeled | WheelType::FourWheeled => {
            let per_wheel = item.weight / wheel_count(wheel_type)?;
            for compartment in mapping.touchpoint_to_compartment.values() {
                match loads.iter_mut().find(|l| l.compartment_id == compartment.id) {
                    Some(existing) => existing.load.value += per_wheel,
                    None => loads.push(CompartmentLoad {
                        compartment_id: compartment.id,
                        load: LoadResult::new(per_wheel, LoadUnit::Pounds),
                    }),
                }
            }
        }
    }

    Ok(loads)
}

pub async fn calculate_concentrated_load<R: FullRepository + ?Sized>(
    repo: &R,
    config: &CalibrationConfig,
    cargo_item_id: CargoItemId,
) -> EngineResult<LoadResult> {
    let (item, cargo_type) = require_item_with_type(repo, cargo_item_id).await?;
    concentrated_load(&item, cargo_type.wheel_type, &config.wheels)
}

pub async fn calculate_running_load<R: FullRepository + ?Sized>(
    repo: &R,
    cargo_item_id: CargoItemId,
) -> EngineResult<LoadResult> {
    let (item, cargo_type) = require_item_with_type(repo, cargo_item_id).await?;
    running_load(&item, cargo_type.wheel_type)
}

pub async fn calculate_load_per_compartment<R: FullRepository + ?Sized>(
    repo: &R,
    cargo_item_id: CargoItemId,
) -> EngineResult<Vec<CompartmentLoad>> {
    let (item, cargo_type) = require_item_with_type(repo, cargo_item_id).await?;
    let compartments = mission_compartments(repo, item.mission_id).await?;
    let mapping = map_touchpoint_compartments(&item, cargo_type.wheel_type, &compartments);
    compartment_loads(&item, cargo_type.wheel_type, &mapping)
}

/// Total weight resting in each compartment from all on-deck cargo of a mission.
///
/// Compartments carrying nothing are absent from the map.
pub async fn aggregate_cumulative_load_by_compartment<R: FullRepository + ?Sized>(
    repo: &R,
    mission_id: MissionId,
) -> EngineResult<BTreeMap<CompartmentId, f64>> {
    let compartments = mission_compartments(repo, mission_id).await?;
    let items: Vec<CargoItem> = repo
        .list_cargo_items_for_mission(mission_id)
        .await?
        .into_iter()
        .filter(CargoItem::is_on_deck)
        .collect();
    let typed_items = attach_cargo_types(repo, items).await?;

    let mut totals: BTreeMap<CompartmentId, f64> = BTreeMap::new();
    for (item, cargo_type) in &typed_items {
        let mapping = map_touchpoint_compartments(item, cargo_type.wheel_type, &compartments);
        for share in compartment_loads(item, cargo_type.wheel_type, &mapping)? {
            *totals.entry(share.compartment_id).or_insert(0.0) += share.load.value;
        }
    }

    log::debug!(
        "Mission {}: {} on-deck items load {} compartments",
        mission_id,
        typed_items.len(),
        totals.len()
    );
    Ok(totals)
}
