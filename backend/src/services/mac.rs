//! Weight and balance: moment indices, gross weight, centre of gravity and MAC%.
//!
//! An index is a scaled moment, `(station - reference) * weight / divisor`. The
//! aircraft's total index is the sum of the empty aircraft's basic index, the
//! on-deck cargo, the fixed mission weights and the fuel.

use serde::{Deserialize, Serialize};

use super::lookup::{require_aircraft, require_cargo_item, require_mission};
use crate::config::{BalanceSettings, CalibrationConfig, StationSettings};
use crate::db::repository::FullRepository;
use crate::error::{EngineError, EngineResult};
use crate::models::{
    Aircraft, AircraftId, CargoItem, CargoItemId, FuelDistribution, FuelMacQuant, FuelState,
    Mission, MissionId,
};

/// Fixed mission weight categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeightCategory {
    Crew,
    Configuration,
    CrewGear,
    Food,
    SafetyGear,
    Etc,
}

/// A weight placed at a fuselage station.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StationWeight {
    pub category: WeightCategory,
    pub weight: f64,
    pub station: f64,
}

/// Every component of a mission's weight and balance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BalanceSummary {
    pub mission_id: MissionId,
    pub total_weight: f64,
    pub empty_aircraft_index: f64,
    pub cargo_index: f64,
    pub additional_weights_index: f64,
    pub fuel_index: f64,
    pub total_index: f64,
    /// Centre of gravity as a fuselage station.
    pub cg_station: f64,
    pub mac_percent: f64,
}

pub fn moment_index(station: f64, weight: f64, balance: &BalanceSettings) -> f64 {
    (station - balance.reference_station) * weight / balance.index_divisor
}

/// Index of a cargo item, taken at the longitudinal centre of its footprint.
pub fn cargo_mac_index(item: &CargoItem, balance: &BalanceSettings) -> f64 {
    moment_index(item.center_x(), item.weight, balance)
}

/// The six fixed mission weights at their stations.
pub fn additional_weights(mission: &Mission, stations: &StationSettings) -> [StationWeight; 6] {
    let at = |category, weight, station| StationWeight {
        category,
        weight,
        station,
    };
    [
        at(
            WeightCategory::Crew,
            mission.crew_weight(stations.loadmaster_weight),
            mission.loadmasters_fs,
        ),
        at(
            WeightCategory::Configuration,
            mission.configuration_weights,
            stations.configuration,
        ),
        at(WeightCategory::CrewGear, mission.crew_gear_weight, stations.crew_gear),
        at(WeightCategory::Food, mission.food_weight, stations.food),
        at(
            WeightCategory::SafetyGear,
            mission.safety_gear_weight,
            stations.safety_gear,
        ),
        at(WeightCategory::Etc, mission.etc_weight, stations.etc),
    ]
}

pub fn additional_weights_index(mission: &Mission, config: &CalibrationConfig) -> f64 {
    additional_weights(mission, &config.stations)
        .iter()
        .map(|w| moment_index(w.station, w.weight, &config.balance))
        .sum()
}

/// Reference row matching a tank distribution.
///
/// Each tank quantity is rounded up to the next value present in the table (or
/// down to the largest one when it exceeds them all) and the row holding exactly
/// those values wins. Without such a row the row nearest in summed per-tank
/// difference is used. `None` only for an empty table.
pub fn closest_fuel_mac_quant<'a>(
    quants: &'a [FuelMacQuant],
    tanks: &FuelDistribution,
) -> Option<&'a FuelMacQuant> {
    if quants.is_empty() {
        return None;
    }

    let targets = tanks.tanks();
    let mut snapped = [0.0; 5];
    for (tank, slot) in snapped.iter_mut().enumerate() {
        let mut values: Vec<f64> = quants.iter().map(|q| q.tanks.tanks()[tank]).collect();
        values.sort_by(f64::total_cmp);
        values.dedup();
        *slot = values
            .iter()
            .copied()
            .find(|v| *v >= targets[tank])
            .or_else(|| values.last().copied())
            .unwrap_or(targets[tank]);
    }

    quants
        .iter()
        .find(|q| q.tanks.tanks() == snapped)
        .or_else(|| {
            quants.iter().min_by(|a, b| {
                a.tanks
                    .l1_distance(tanks)
                    .total_cmp(&b.tanks.l1_distance(tanks))
            })
        })
}

/// Index contribution of the fuel on board.
pub fn fuel_index(fuel_state: Option<&FuelState>, quants: &[FuelMacQuant]) -> f64 {
    let Some(state) = fuel_state else {
        return 0.0;
    };
    if let Some(explicit) = state.mac_contribution {
        return explicit;
    }
    match closest_fuel_mac_quant(quants, &state.tanks) {
        Some(quant) => quant.mac_contribution,
        None => {
            log::warn!(
                "No fuel MAC reference data; fuel index of mission {} taken as 0",
                state.mission_id
            );
            0.0
        }
    }
}

/// Gross weight: empty aircraft, fixed mission weights, every cargo item of the
/// mission whatever its status, and usable fuel.
pub fn total_weight(
    aircraft: &Aircraft,
    mission: &Mission,
    cargo: &[CargoItem],
    fuel_state: Option<&FuelState>,
    stations: &StationSettings,
) -> f64 {
    let cargo_weight: f64 = cargo.iter().map(|item| item.weight).sum();
    let fuel_weight = fuel_state.map_or(0.0, |f| f.total_fuel);
    aircraft.empty_weight
        + mission.fixed_weight(stations.loadmaster_weight)
        + cargo_weight
        + fuel_weight
}

/// Centre of gravity station for a total index at a gross weight.
pub fn cg_station(
    total_index: f64,
    total_weight: f64,
    balance: &BalanceSettings,
) -> EngineResult<f64> {
    if !(total_weight > 0.0) {
        return Err(EngineError::invalid_input(format!(
            "Total aircraft weight must be positive, got {}",
            total_weight
        )));
    }
    Ok((total_index - balance.index_offset) * balance.index_divisor / total_weight
        + balance.reference_station)
}

pub fn mac_percent(cg_station: f64, balance: &BalanceSettings) -> f64 {
    (cg_station - balance.mac_datum) * 100.0 / balance.mac_length
}

pub async fn calculate_mac_index<R: FullRepository + ?Sized>(
    repo: &R,
    config: &CalibrationConfig,
    cargo_item_id: CargoItemId,
) -> EngineResult<f64> {
    let item = require_cargo_item(repo, cargo_item_id).await?;
    Ok(cargo_mac_index(&item, &config.balance))
}

pub async fn calculate_additional_weights_mac_index<R: FullRepository + ?Sized>(
    repo: &R,
    config: &CalibrationConfig,
    mission_id: MissionId,
) -> EngineResult<f64> {
    let mission = require_mission(repo, mission_id).await?;
    Ok(additional_weights_index(&mission, config))
}

/// Fuel index of a mission; 0 when no fuel state was recorded.
pub async fn calculate_fuel_mac<R: FullRepository + ?Sized>(
    repo: &R,
    mission_id: MissionId,
) -> EngineResult<f64> {
    require_mission(repo, mission_id).await?;
    let Some(state) = repo.get_fuel_state_for_mission(mission_id).await? else {
        log::debug!("Mission {} has no fuel state", mission_id);
        return Ok(0.0);
    };
    if let Some(explicit) = state.mac_contribution {
        return Ok(explicit);
    }
    let quants = repo.list_fuel_mac_quants().await?;
    Ok(fuel_index(Some(&state), &quants))
}

pub async fn get_empty_aircraft_mac_index<R: FullRepository + ?Sized>(
    repo: &R,
    aircraft_id: AircraftId,
) -> EngineResult<f64> {
    Ok(require_aircraft(repo, aircraft_id).await?.empty_mac)
}

pub async fn calculate_total_aircraft_weight<R: FullRepository + ?Sized>(
    repo: &R,
    config: &CalibrationConfig,
    mission_id: MissionId,
) -> EngineResult<f64> {
    let mission = require_mission(repo, mission_id).await?;
    let (aircraft, cargo, fuel_state) = tokio::try_join!(
        require_aircraft(repo, mission.aircraft_id),
        async { Ok::<_, EngineError>(repo.list_cargo_items_for_mission(mission_id).await?) },
        async { Ok::<_, EngineError>(repo.get_fuel_state_for_mission(mission_id).await?) },
    )?;
    Ok(total_weight(
        &aircraft,
        &mission,
        &cargo,
        fuel_state.as_ref(),
        &config.stations,
    ))
}

/// Centre of gravity station for `total_index` at the mission's gross weight.
pub async fn calculate_aircraft_cg<R: FullRepository + ?Sized>(
    repo: &R,
    config: &CalibrationConfig,
    mission_id: MissionId,
    total_index: f64,
) -> EngineResult<f64> {
    let weight = calculate_total_aircraft_weight(repo, config, mission_id).await?;
    cg_station(total_index, weight, &config.balance)
}

/// Every weight and balance figure of a mission, read fresh from the store.
pub async fn calculate_balance_summary<R: FullRepository + ?Sized>(
    repo: &R,
    config: &CalibrationConfig,
    mission_id: MissionId,
) -> EngineResult<BalanceSummary> {
    let mission = require_mission(repo, mission_id).await?;
    let (aircraft, cargo, fuel_state, quants) = tokio::try_join!(
        require_aircraft(repo, mission.aircraft_id),
        async { Ok::<_, EngineError>(repo.list_cargo_items_for_mission(mission_id).await?) },
        async { Ok::<_, EngineError>(repo.get_fuel_state_for_mission(mission_id).await?) },
        async { Ok::<_, EngineError>(repo.list_fuel_mac_quants().await?) },
    )?;

    let balance = &config.balance;
    let cargo_index: f64 = cargo
        .iter()
        .filter(|item| item.is_on_deck())
        .map(|item| cargo_mac_index(item, balance))
        .sum();
    let additional_weights_index = additional_weights_index(&mission, config);
    let fuel_index = fuel_index(fuel_state.as_ref(), &quants);
    let empty_aircraft_index = aircraft.empty_mac;
    let total_index = empty_aircraft_index + cargo_index + additional_weights_index + fuel_index;

    let total_weight = total_weight(
        &aircraft,
        &mission,
        &cargo,
        fuel_state.as_ref(),
        &config.stations,
    );
    let cg_station = cg_station(total_index, total_weight, balance)?;
    let mac_percent = mac_percent(cg_station, balance);

    log::debug!(
        "Mission {}: weight {:.1} lbs, index {:.4}, CG {:.2}, MAC {:.2}%",
        mission_id,
        total_weight,
        total_index,
        cg_station,
        mac_percent
    );

    Ok(BalanceSummary {
        mission_id,
        total_weight,
        empty_aircraft_index,
        cargo_index,
        additional_weights_index,
        fuel_index,
        total_index,
        cg_station,
        mac_percent,
    })
}

pub async fn calculate_mac_percent<R: FullRepository + ?Sized>(
    repo: &R,
    config: &CalibrationConfig,
    mission_id: MissionId,
) -> EngineResult<f64> {
    Ok(calculate_balance_summary(repo, config, mission_id)
        .await?
        .mac_percent)
}
