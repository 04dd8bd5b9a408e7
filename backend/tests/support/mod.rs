//! Shared fixtures for integration tests.
#![allow(dead_code)]

use std::collections::HashSet;
use std::sync::Mutex;

use loadmaster_core::config::FuelSettings;
use loadmaster_core::db::LocalRepository;
use loadmaster_core::models::{
    Aircraft, AircraftId, AllowedMacConstraint, AllowedMacConstraintId, CargoItem, CargoItemId,
    CargoType, CargoTypeId, Compartment, CompartmentId, FuelDistribution, FuelMacQuant,
    FuelMacQuantId, FuelState, LoadConstraint, LoadConstraintId, Mission, MissionId, RampGeometry,
    WheelType,
};
use loadmaster_core::CalibrationConfig;

static ENV_LOCK: Mutex<()> = Mutex::new(());

/// Runs `f` with environment variables temporarily modified.
///
/// Restores the previous values on unwind and serializes access to process-global
/// env vars across parallel tests.
///
/// `changes` is a list of `(key, value)` pairs:
/// - `Some(v)` sets the variable to `v`
/// - `None` removes the variable
pub fn with_scoped_env<F, R>(changes: &[(&str, Option<&str>)], f: F) -> R
where
    F: FnOnce() -> R,
{
    let _lock = ENV_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
    let _guard = ScopedEnv::new(changes);
    f()
}

struct ScopedEnv {
    snapshot: Vec<(String, Option<String>)>,
}

impl ScopedEnv {
    fn new(changes: &[(&str, Option<&str>)]) -> Self {
        let keys: HashSet<&str> = changes.iter().map(|(k, _)| *k).collect();
        let snapshot = keys
            .into_iter()
            .map(|k| (k.to_string(), std::env::var(k).ok()))
            .collect::<Vec<_>>();

        for (k, v) in changes {
            match v {
                Some(val) => std::env::set_var(k, val),
                None => std::env::remove_var(k),
            }
        }

        Self { snapshot }
    }
}

impl Drop for ScopedEnv {
    fn drop(&mut self) {
        for (k, v) in self.snapshot.drain(..) {
            match v {
                Some(val) => std::env::set_var(&k, val),
                None => std::env::remove_var(&k),
            }
        }
    }
}

pub fn approx_eq(a: f64, b: f64, tolerance: f64) -> bool {
    (a - b).abs() <= tolerance
}

pub fn aircraft(empty_weight: f64, empty_mac: f64) -> Aircraft {
    Aircraft {
        id: AircraftId::new(0),
        aircraft_type: "C-130H".to_string(),
        name: "Test airframe".to_string(),
        empty_weight,
        empty_mac,
        cargo_bay_width: 123.0,
        treadways_width: 22.0,
        treadways_dist_from_center: 50.0,
        ramp: RampGeometry::default(),
    }
}

pub fn cargo_type(name: &str, wheel_type: WheelType) -> CargoType {
    CargoType {
        id: CargoTypeId::new(0),
        name: name.to_string(),
        default_weight: 1000.0,
        default_length: 40.0,
        default_width: 40.0,
        default_height: 40.0,
        default_forward_overhang: 0.0,
        default_back_overhang: 0.0,
        default_cog: None,
        wheel_type,
    }
}

/// Three 100-inch compartments C1 [0, 100], C2 [100, 200], C3 [200, 300] on an
/// aircraft whose right treadway spans y = [39, 61], with one empty mission.
pub struct ReferenceDeck {
    pub repo: LocalRepository,
    pub aircraft_id: AircraftId,
    pub mission_id: MissionId,
    pub compartments: [CompartmentId; 3],
    pub bulk: CargoType,
    pub two_wheeled: CargoType,
    pub four_wheeled: CargoType,
}

impl ReferenceDeck {
    pub fn new() -> Self {
        let repo = LocalRepository::new();
        let aircraft_id = repo.insert_aircraft(aircraft(83288.0, 86.4));

        let compartments = [("C1", 0.0), ("C2", 100.0), ("C3", 200.0)].map(|(name, x_start)| {
            repo.insert_compartment(Compartment {
                id: CompartmentId::new(0),
                aircraft_id,
                name: name.to_string(),
                x_start,
                x_end: x_start + 100.0,
                floor_area: 12300.0,
                usable_volume: 1200.0,
            })
        });

        let mission_id = repo.insert_mission(Mission::new(aircraft_id, "Reference sortie"));

        let mut bulk = cargo_type("Pallet", WheelType::Bulk);
        bulk.id = repo.insert_cargo_type(bulk.clone());
        let mut two_wheeled = cargo_type("Trailer", WheelType::TwoWheeled);
        two_wheeled.id = repo.insert_cargo_type(two_wheeled.clone());
        let mut four_wheeled = cargo_type("Truck", WheelType::FourWheeled);
        four_wheeled.id = repo.insert_cargo_type(four_wheeled.clone());

        Self {
            repo,
            aircraft_id,
            mission_id,
            compartments,
            bulk,
            two_wheeled,
            four_wheeled,
        }
    }

    /// Limits on every compartment:
    ///
    /// | compartment | cumulative | concentrated | treadway | between |
    /// |-------------|------------|--------------|----------|---------|
    /// | C1          | 3000       | 30           | 40       | 30      |
    /// | C2          | 800        | 25           | 40       | 30      |
    /// | C3          | 5000       | 15           | 40       | none    |
    pub fn with_constraints(self) -> Self {
        let rows = [
            (3000.0, 30.0, Some(30.0)),
            (800.0, 25.0, Some(30.0)),
            (5000.0, 15.0, None),
        ];
        for (compartment_id, (cumulative, concentrated, between)) in
            self.compartments.into_iter().zip(rows)
        {
            self.repo.insert_load_constraint(LoadConstraint {
                id: LoadConstraintId::new(0),
                compartment_id,
                max_cumulative_weight: Some(cumulative),
                max_concentrated_load: Some(concentrated),
                max_running_load_treadway: Some(40.0),
                max_running_load_between_treadways: between,
            });
        }
        self
    }

    pub fn item(
        &self,
        cargo_type: &CargoType,
        name: &str,
        weight: f64,
        length: f64,
        width: f64,
    ) -> CargoItem {
        let mut item = CargoItem::from_type(cargo_type, self.mission_id, name);
        item.weight = weight;
        item.length = length;
        item.width = width;
        item
    }

    pub fn add(&self, item: CargoItem) -> CargoItemId {
        self.repo
            .insert_cargo_item(item)
            .expect("fixture cargo item should be valid")
    }

    /// 1000 lbs, 20 x 100, at x = 50: entirely inside C1.
    pub fn add_standard_bulk(&self) -> CargoItemId {
        self.add(
            self.item(&self.bulk, "Pallet A", 1000.0, 20.0, 100.0)
                .place_on_deck(50.0, 0.0),
        )
    }

    /// 1500 lbs, 80 x 60, overhangs 10/10, at x = 30: axles at x = 40 and x = 100,
    /// centred on the right treadway.
    pub fn add_standard_two_wheeled(&self) -> CargoItemId {
        let mut item = self.item(&self.two_wheeled, "Trailer A", 1500.0, 80.0, 60.0);
        item.forward_overhang = 10.0;
        item.back_overhang = 10.0;
        self.add(item.place_on_deck(30.0, 21.0))
    }

    /// 2000 lbs, 120 x 80, overhangs 15/15, at x = 120: axles at x = 135 (C2) and
    /// x = 225 (C3), left wheels clear of the left treadway.
    pub fn add_standard_four_wheeled(&self) -> CargoItemId {
        let mut item = self.item(&self.four_wheeled, "Truck A", 2000.0, 120.0, 80.0);
        item.forward_overhang = 15.0;
        item.back_overhang = 15.0;
        self.add(item.place_on_deck(120.0, -30.0))
    }

    /// The three standard items, loaded: C1 2500 lbs, C2 1000 lbs, C3 1000 lbs.
    pub fn load_standard_items(&self) -> [CargoItemId; 3] {
        [
            self.add_standard_bulk(),
            self.add_standard_two_wheeled(),
            self.add_standard_four_wheeled(),
        ]
    }
}

impl Default for ReferenceDeck {
    fn default() -> Self {
        Self::new()
    }
}

/// The hand-computed worksheet: 139195 lbs gross at 25.87% MAC.
///
/// One 20000 lbs bulk item centred at x = 530, a mission planned with 35457 lbs
/// of fuel (34457 lbs after the default taxi fuel), and a fuel table whose
/// upward-snapped row contributes 5.3.
pub struct Worksheet {
    pub repo: LocalRepository,
    pub aircraft_id: AircraftId,
    pub mission_id: MissionId,
    pub cargo_item_id: CargoItemId,
}

impl Worksheet {
    pub fn new() -> Self {
        Self::with_fuel_settings(&CalibrationConfig::default().fuel)
    }

    /// The worksheet with its fuel state derived under the given taxi-fuel setting.
    pub fn with_fuel_settings(fuel_settings: &FuelSettings) -> Self {
        let repo = LocalRepository::new();
        let aircraft_id = repo.insert_aircraft(aircraft(83288.0, 86.4));
        let mut mission = Mission::new(aircraft_id, "Worksheet sortie");
        mission.fuel = FuelDistribution::from_tanks([8457.0, 15600.0, 0.0, 6400.0, 5000.0]);
        let mission_id = repo.insert_mission(mission.clone());
        mission.id = mission_id;

        let mut pallet = cargo_type("Pallet", WheelType::Bulk);
        pallet.id = repo.insert_cargo_type(pallet.clone());
        let mut item = CargoItem::from_type(&pallet, mission_id, "Heavy pallet");
        item.weight = 20000.0;
        item.length = 5.0;
        item.width = 100.0;
        let cargo_item_id = repo
            .insert_cargo_item(item.place_on_deck(527.5, 0.0))
            .expect("fixture cargo item should be valid");

        repo.insert_fuel_state(FuelState::for_mission(&mission, fuel_settings));
        for (tanks, mac_contribution) in [
            ([8500.0, 16000.0, 0.0, 6500.0, 5000.0], 5.3),
            ([4000.0, 8000.0, 0.0, 0.0, 0.0], 2.1),
        ] {
            repo.insert_fuel_mac_quant(FuelMacQuant {
                id: FuelMacQuantId::new(0),
                tanks: FuelDistribution::from_tanks(tanks),
                mac_contribution,
            });
        }
        for (gross_aircraft_weight, min_mac, max_mac) in
            [(120000.0, 18.0, 32.0), (140000.0, 20.0, 30.0), (160000.0, 22.0, 28.0)]
        {
            repo.insert_allowed_mac_constraint(AllowedMacConstraint {
                id: AllowedMacConstraintId::new(0),
                gross_aircraft_weight,
                min_mac,
                max_mac,
            });
        }

        Self {
            repo,
            aircraft_id,
            mission_id,
            cargo_item_id,
        }
    }
}

impl Default for Worksheet {
    fn default() -> Self {
        Self::new()
    }
}
