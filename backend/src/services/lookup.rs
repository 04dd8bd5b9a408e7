//! Id lookups that turn an absent entity into a typed NotFound.

use crate::db::repository::FullRepository;
use crate::error::{EngineError, EngineResult};
use crate::models::{
    Aircraft, AircraftId, CargoItem, CargoItemId, CargoType, CargoTypeId, Compartment,
    LoadConstraint, Mission, MissionId,
};

pub(crate) async fn require_mission<R: FullRepository + ?Sized>(
    repo: &R,
    mission_id: MissionId,
) -> EngineResult<Mission> {
    repo.get_mission(mission_id)
        .await?
        .ok_or_else(|| EngineError::not_found(mission_id))
}

pub(crate) async fn require_aircraft<R: FullRepository + ?Sized>(
    repo: &R,
    aircraft_id: AircraftId,
) -> EngineResult<Aircraft> {
    repo.get_aircraft(aircraft_id)
        .await?
        .ok_or_else(|| EngineError::not_found(aircraft_id))
}

pub(crate) async fn require_cargo_item<R: FullRepository + ?Sized>(
    repo: &R,
    cargo_item_id: CargoItemId,
) -> EngineResult<CargoItem> {
    repo.get_cargo_item(cargo_item_id)
        .await?
        .ok_or_else(|| EngineError::not_found(cargo_item_id))
}

pub(crate) async fn require_cargo_type<R: FullRepository + ?Sized>(
    repo: &R,
    cargo_type_id: CargoTypeId,
) -> EngineResult<CargoType> {
    repo.get_cargo_type(cargo_type_id)
        .await?
        .ok_or_else(|| EngineError::not_found(cargo_type_id))
}

/// A cargo item together with the type it inherits its wheel configuration from.
pub(crate) async fn require_item_with_type<R: FullRepository + ?Sized>(
    repo: &R,
    cargo_item_id: CargoItemId,
) -> EngineResult<(CargoItem, CargoType)> {
    let item = require_cargo_item(repo, cargo_item_id).await?;
    let cargo_type = require_cargo_type(repo, item.cargo_type_id).await?;
    Ok((item, cargo_type))
}

/// Resolve the type of every item, issuing the reads concurrently.
pub(crate) async fn attach_cargo_types<R: FullRepository + ?Sized>(
    repo: &R,
    items: Vec<CargoItem>,
) -> EngineResult<Vec<(CargoItem, CargoType)>> {
    let types = futures::future::try_join_all(
        items
            .iter()
            .map(|item| require_cargo_type(repo, item.cargo_type_id)),
    )
    .await?;
    Ok(items.into_iter().zip(types).collect())
}

/// The aircraft's compartments ordered forward to aft, ties broken by id.
///
/// A station on a shared boundary therefore resolves to the forward compartment.
pub(crate) async fn ordered_compartments<R: FullRepository + ?Sized>(
    repo: &R,
    aircraft_id: AircraftId,
) -> EngineResult<Vec<Compartment>> {
    let mut compartments = repo.list_compartments_for_aircraft(aircraft_id).await?;
    compartments.sort_by(|a, b| a.x_start.total_cmp(&b.x_start).then(a.id.cmp(&b.id)));
    Ok(compartments)
}

/// Compartments of the aircraft flying a mission.
pub(crate) async fn mission_compartments<R: FullRepository + ?Sized>(
    repo: &R,
    mission_id: MissionId,
) -> EngineResult<Vec<Compartment>> {
    let mission = require_mission(repo, mission_id).await?;
    ordered_compartments(repo, mission.aircraft_id).await
}

/// The constraint row of a compartment, `ConstraintMissing` if it has none.
pub(crate) async fn require_load_constraint<R: FullRepository + ?Sized>(
    repo: &R,
    compartment: &Compartment,
) -> EngineResult<LoadConstraint> {
    repo.get_load_constraint_for_compartment(compartment.id)
        .await?
        .ok_or(EngineError::ConstraintMissing {
            compartment_id: compartment.id,
        })
}
