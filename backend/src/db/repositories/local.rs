//! In-memory local repository implementation.
//!
//! Stores every load-planning table in memory behind a single lock, providing
//! fast, deterministic, and isolated execution for tests and local tooling.

use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use crate::db::repository::*;
use crate::db::snapshot::LoadPlanSnapshot;
use crate::error::EntityKind;
use crate::models::*;

/// In-memory local repository.
///
/// Write-side helpers (`insert_*`, `update_cargo_item`, ...) assign ids and check
/// cargo invariants; the trait implementations provide the read side.
///
/// # Example
/// ```
/// use loadmaster_core::db::repositories::LocalRepository;
///
/// let repo = LocalRepository::new();
/// assert_eq!(repo.cargo_item_count(), 0);
/// ```
#[derive(Clone)]
pub struct LocalRepository {
    data: Arc<RwLock<LocalData>>,
}

struct LocalData {
    aircraft: HashMap<AircraftId, Aircraft>,
    compartments: BTreeMap<CompartmentId, Compartment>,
    load_constraints: BTreeMap<LoadConstraintId, LoadConstraint>,
    missions: HashMap<MissionId, Mission>,
    fuel_states: BTreeMap<FuelStateId, FuelState>,
    cargo_types: HashMap<CargoTypeId, CargoType>,
    cargo_items: BTreeMap<CargoItemId, CargoItem>,
    fuel_mac_quants: Vec<FuelMacQuant>,
    allowed_mac_constraints: Vec<AllowedMacConstraint>,

    // ID counters, last assigned value per table
    last_ids: HashMap<EntityKind, i64>,

    // Connection health
    is_healthy: bool,
}

impl Default for LocalData {
    fn default() -> Self {
        Self {
            aircraft: HashMap::new(),
            compartments: BTreeMap::new(),
            load_constraints: BTreeMap::new(),
            missions: HashMap::new(),
            fuel_states: BTreeMap::new(),
            cargo_types: HashMap::new(),
            cargo_items: BTreeMap::new(),
            fuel_mac_quants: Vec::new(),
            allowed_mac_constraints: Vec::new(),
            last_ids: HashMap::new(),
            is_healthy: true,
        }
    }
}

impl LocalData {
    fn allocate_id(&mut self, kind: EntityKind) -> i64 {
        let last = self.last_ids.entry(kind).or_insert(0);
        *last += 1;
        *last
    }

    /// Keep the counter ahead of an id that was supplied from outside.
    fn observe_id(&mut self, kind: EntityKind, id: i64) {
        let last = self.last_ids.entry(kind).or_insert(0);
        if id > *last {
            *last = id;
        }
    }

    fn put_allowed_mac_constraint(&mut self, constraint: AllowedMacConstraint) {
        self.allowed_mac_constraints.push(constraint);
        self.allowed_mac_constraints.sort_by(|a, b| {
            a.gross_aircraft_weight
                .total_cmp(&b.gross_aircraft_weight)
                .then(a.id.cmp(&b.id))
        });
    }
}

fn check_cargo_item(item: &CargoItem, operation: &str) -> RepositoryResult<()> {
    item.validate().map_err(|message| {
        RepositoryError::rejected(message, ErrorContext::new(operation).on(item.id))
    })
}

impl LocalRepository {
    /// Create a new empty local repository.
    pub fn new() -> Self {
        Self {
            data: Arc::new(RwLock::new(LocalData::default())),
        }
    }

    /// Build a repository holding the content of a snapshot, ids preserved.
    ///
    /// Fails with `RepositoryError::Rejected` if any cargo item breaks its
    /// dimensional invariants.
    pub fn from_snapshot(snapshot: LoadPlanSnapshot) -> RepositoryResult<Self> {
        let mut data = LocalData::default();

        for aircraft in snapshot.aircraft {
            data.observe_id(EntityKind::Aircraft, aircraft.id.value());
            data.aircraft.insert(aircraft.id, aircraft);
        }
        for compartment in snapshot.compartments {
            data.observe_id(EntityKind::Compartment, compartment.id.value());
            data.compartments.insert(compartment.id, compartment);
        }
        for constraint in snapshot.load_constraints {
            data.observe_id(EntityKind::LoadConstraint, constraint.id.value());
            data.load_constraints.insert(constraint.id, constraint);
        }
        for mission in snapshot.missions {
            data.observe_id(EntityKind::Mission, mission.id.value());
            data.missions.insert(mission.id, mission);
        }
        for fuel_state in snapshot.fuel_states {
            data.observe_id(EntityKind::FuelState, fuel_state.id.value());
            data.fuel_states.insert(fuel_state.id, fuel_state);
        }
        for cargo_type in snapshot.cargo_types {
            data.observe_id(EntityKind::CargoType, cargo_type.id.value());
            data.cargo_types.insert(cargo_type.id, cargo_type);
        }
        for item in snapshot.cargo_items {
            check_cargo_item(&item, "from_snapshot")?;
            data.observe_id(EntityKind::CargoItem, item.id.value());
            data.cargo_items.insert(item.id, item);
        }
        for quant in snapshot.fuel_mac_quants {
            data.observe_id(EntityKind::FuelMacQuant, quant.id.value());
            data.fuel_mac_quants.push(quant);
        }
        for constraint in snapshot.allowed_mac_constraints {
            data.observe_id(EntityKind::AllowedMacConstraint, constraint.id.value());
            data.put_allowed_mac_constraint(constraint);
        }

        Ok(Self {
            data: Arc::new(RwLock::new(data)),
        })
    }

    /// Export the current content as a snapshot.
    pub fn snapshot(&self) -> LoadPlanSnapshot {
        let data = self.data.read();
        let mut aircraft: Vec<Aircraft> = data.aircraft.values().cloned().collect();
        aircraft.sort_by_key(|a| a.id);
        let mut missions: Vec<Mission> = data.missions.values().cloned().collect();
        missions.sort_by_key(|m| m.id);
        let mut cargo_types: Vec<CargoType> = data.cargo_types.values().cloned().collect();
        cargo_types.sort_by_key(|t| t.id);

        LoadPlanSnapshot {
            aircraft,
            compartments: data.compartments.values().cloned().collect(),
            load_constraints: data.load_constraints.values().cloned().collect(),
            missions,
            fuel_states: data.fuel_states.values().cloned().collect(),
            cargo_types,
            cargo_items: data.cargo_items.values().cloned().collect(),
            fuel_mac_quants: data.fuel_mac_quants.clone(),
            allowed_mac_constraints: data.allowed_mac_constraints.clone(),
        }
    }

    /// Add an aircraft; its id is overwritten with the assigned one.
    pub fn insert_aircraft(&self, mut aircraft: Aircraft) -> AircraftId {
        let mut data = self.data.write();
        aircraft.id = AircraftId::new(data.allocate_id(EntityKind::Aircraft));
        let id = aircraft.id;
        data.aircraft.insert(id, aircraft);
        id
    }

    /// Add a compartment; its id is overwritten with the assigned one.
    pub fn insert_compartment(&self, mut compartment: Compartment) -> CompartmentId {
        let mut data = self.data.write();
        compartment.id = CompartmentId::new(data.allocate_id(EntityKind::Compartment));
        let id = compartment.id;
        data.compartments.insert(id, compartment);
        id
    }

    /// Add a load constraint; its id is overwritten with the assigned one.
    pub fn insert_load_constraint(&self, mut constraint: LoadConstraint) -> LoadConstraintId {
        let mut data = self.data.write();
        constraint.id = LoadConstraintId::new(data.allocate_id(EntityKind::LoadConstraint));
        let id = constraint.id;
        data.load_constraints.insert(id, constraint);
        id
    }

    /// Add a mission; its id is overwritten with the assigned one.
    pub fn insert_mission(&self, mut mission: Mission) -> MissionId {
        let mut data = self.data.write();
        mission.id = MissionId::new(data.allocate_id(EntityKind::Mission));
        let id = mission.id;
        data.missions.insert(id, mission);
        id
    }

    /// Record the fuel state of a mission, replacing any previous one.
    pub fn insert_fuel_state(&self, mut fuel_state: FuelState) -> FuelStateId {
        let mut data = self.data.write();
        let mission_id = fuel_state.mission_id;
        data.fuel_states.retain(|_, f| f.mission_id != mission_id);
        fuel_state.id = FuelStateId::new(data.allocate_id(EntityKind::FuelState));
        let id = fuel_state.id;
        data.fuel_states.insert(id, fuel_state);
        id
    }

    /// Add a cargo type; its id is overwritten with the assigned one.
    pub fn insert_cargo_type(&self, mut cargo_type: CargoType) -> CargoTypeId {
        let mut data = self.data.write();
        cargo_type.id = CargoTypeId::new(data.allocate_id(EntityKind::CargoType));
        let id = cargo_type.id;
        data.cargo_types.insert(id, cargo_type);
        id
    }

    /// Add a cargo item; its id is overwritten with the assigned one.
    ///
    /// Fails with `RepositoryError::Rejected` if the item breaks its dimensional invariants.
    pub fn insert_cargo_item(&self, mut item: CargoItem) -> RepositoryResult<CargoItemId> {
        check_cargo_item(&item, "insert_cargo_item")?;
        let mut data = self.data.write();
        item.id = CargoItemId::new(data.allocate_id(EntityKind::CargoItem));
        let id = item.id;
        data.cargo_items.insert(id, item);
        Ok(id)
    }

    /// Replace a stored cargo item.
    pub fn update_cargo_item(&self, item: CargoItem) -> RepositoryResult<()> {
        check_cargo_item(&item, "update_cargo_item")?;
        let mut data = self.data.write();
        match data.cargo_items.get_mut(&item.id) {
            Some(slot) => {
                *slot = item;
                Ok(())
            }
            None => Err(RepositoryError::row_missing(
                ErrorContext::new("update_cargo_item").on(item.id),
            )),
        }
    }

    /// Remove a cargo item, returning whether it existed.
    pub fn remove_cargo_item(&self, cargo_item_id: CargoItemId) -> bool {
        self.data.write().cargo_items.remove(&cargo_item_id).is_some()
    }

    /// Add a fuel MAC reference row.
    pub fn insert_fuel_mac_quant(&self, mut quant: FuelMacQuant) -> FuelMacQuantId {
        let mut data = self.data.write();
        quant.id = FuelMacQuantId::new(data.allocate_id(EntityKind::FuelMacQuant));
        let id = quant.id;
        data.fuel_mac_quants.push(quant);
        id
    }

    /// Add an allowed MAC band; the table stays ordered by gross weight.
    pub fn insert_allowed_mac_constraint(
        &self,
        mut constraint: AllowedMacConstraint,
    ) -> AllowedMacConstraintId {
        let mut data = self.data.write();
        constraint.id =
            AllowedMacConstraintId::new(data.allocate_id(EntityKind::AllowedMacConstraint));
        let id = constraint.id;
        data.put_allowed_mac_constraint(constraint);
        id
    }

    /// Set the health status for testing connection failures.
    pub fn set_healthy(&self, healthy: bool) {
        self.data.write().is_healthy = healthy;
    }

    /// Clear all data from the repository.
    pub fn clear(&self) {
        let mut data = self.data.write();
        *data = LocalData {
            is_healthy: data.is_healthy,
            ..Default::default()
        };
    }

    /// Get the number of cargo items stored.
    pub fn cargo_item_count(&self) -> usize {
        self.data.read().cargo_items.len()
    }

    /// Helper to check health and return error if unhealthy.
    fn check_health(&self, operation: &str) -> RepositoryResult<()> {
        if !self.data.read().is_healthy {
            return Err(RepositoryError::unavailable(operation));
        }
        Ok(())
    }
}

impl Default for LocalRepository {
    fn default() -> Self {
        Self::new()
    }
}

// ==================== Aircraft Repository ====================

#[async_trait]
impl AircraftRepository for LocalRepository {
    async fn get_aircraft(&self, aircraft_id: AircraftId) -> RepositoryResult<Option<Aircraft>> {
        self.check_health("get_aircraft")?;
        Ok(self.data.read().aircraft.get(&aircraft_id).cloned())
    }

    async fn get_compartment(
        &self,
        compartment_id: CompartmentId,
    ) -> RepositoryResult<Option<Compartment>> {
        self.check_health("get_compartment")?;
        Ok(self.data.read().compartments.get(&compartment_id).cloned())
    }

    async fn list_compartments_for_aircraft(
        &self,
        aircraft_id: AircraftId,
    ) -> RepositoryResult<Vec<Compartment>> {
        self.check_health("list_compartments_for_aircraft")?;
        let data = self.data.read();
        Ok(data
            .compartments
            .values()
            .filter(|c| c.aircraft_id == aircraft_id)
            .cloned()
            .collect())
    }

    async fn get_load_constraint_for_compartment(
        &self,
        compartment_id: CompartmentId,
    ) -> RepositoryResult<Option<LoadConstraint>> {
        self.check_health("get_load_constraint_for_compartment")?;
        let data = self.data.read();
        Ok(data
            .load_constraints
            .values()
            .find(|c| c.compartment_id == compartment_id)
            .cloned())
    }
}

// ==================== Mission Repository ====================

#[async_trait]
impl MissionRepository for LocalRepository {
    async fn health_check(&self) -> RepositoryResult<bool> {
        Ok(self.data.read().is_healthy)
    }

    async fn get_mission(&self, mission_id: MissionId) -> RepositoryResult<Option<Mission>> {
        self.check_health("get_mission")?;
        Ok(self.data.read().missions.get(&mission_id).cloned())
    }

    async fn get_fuel_state_for_mission(
        &self,
        mission_id: MissionId,
    ) -> RepositoryResult<Option<FuelState>> {
        self.check_health("get_fuel_state_for_mission")?;
        let data = self.data.read();
        Ok(data
            .fuel_states
            .values()
            .find(|f| f.mission_id == mission_id)
            .cloned())
    }
}

// ==================== Cargo Repository ====================

#[async_trait]
impl CargoRepository for LocalRepository {
    async fn get_cargo_item(
        &self,
        cargo_item_id: CargoItemId,
    ) -> RepositoryResult<Option<CargoItem>> {
        self.check_health("get_cargo_item")?;
        Ok(self.data.read().cargo_items.get(&cargo_item_id).cloned())
    }

    async fn list_cargo_items_for_mission(
        &self,
        mission_id: MissionId,
    ) -> RepositoryResult<Vec<CargoItem>> {
        self.check_health("list_cargo_items_for_mission")?;
        let data = self.data.read();
        Ok(data
            .cargo_items
            .values()
            .filter(|item| item.mission_id == mission_id)
            .cloned()
            .collect())
    }

    async fn get_cargo_type(
        &self,
        cargo_type_id: CargoTypeId,
    ) -> RepositoryResult<Option<CargoType>> {
        self.check_health("get_cargo_type")?;
        Ok(self.data.read().cargo_types.get(&cargo_type_id).cloned())
    }
}

// ==================== Reference Data Repository ====================

#[async_trait]
impl ReferenceDataRepository for LocalRepository {
    async fn list_fuel_mac_quants(&self) -> RepositoryResult<Vec<FuelMacQuant>> {
        self.check_health("list_fuel_mac_quants")?;
        Ok(self.data.read().fuel_mac_quants.clone())
    }

    async fn list_allowed_mac_constraints(&self) -> RepositoryResult<Vec<AllowedMacConstraint>> {
        self.check_health("list_allowed_mac_constraints")?;
        Ok(self.data.read().allowed_mac_constraints.clone())
    }
}
