use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use loadmaster_core::db::LocalRepository;
use loadmaster_core::models::{
    Aircraft, AircraftId, CargoItem, CargoType, CargoTypeId, Compartment, CompartmentId,
    LoadConstraint, LoadConstraintId, Mission, MissionId, RampGeometry, WheelType,
};
use loadmaster_core::services::{floor_validation, mac};
use loadmaster_core::CalibrationConfig;

/// An aircraft with twelve 50-inch compartments and `items` cargo items spread along them.
fn seeded_store(items: usize) -> (LocalRepository, MissionId) {
    let repo = LocalRepository::new();
    let aircraft_id = repo.insert_aircraft(Aircraft {
        id: AircraftId::new(0),
        aircraft_type: "C-130H".to_string(),
        name: "Bench airframe".to_string(),
        empty_weight: 83288.0,
        empty_mac: 86.4,
        cargo_bay_width: 123.0,
        treadways_width: 22.0,
        treadways_dist_from_center: 50.0,
        ramp: RampGeometry::default(),
    });
    for i in 0..12 {
        let compartment_id = repo.insert_compartment(Compartment {
            id: CompartmentId::new(0),
            aircraft_id,
            name: format!("C{}", i + 1),
            x_start: 250.0 + f64::from(i) * 50.0,
            x_end: 300.0 + f64::from(i) * 50.0,
            floor_area: 6150.0,
            usable_volume: 600.0,
        });
        repo.insert_load_constraint(LoadConstraint {
            id: LoadConstraintId::new(0),
            compartment_id,
            max_cumulative_weight: Some(12000.0),
            max_concentrated_load: Some(50.0),
            max_running_load_treadway: Some(400.0),
            max_running_load_between_treadways: Some(300.0),
        });
    }
    let mission_id = repo.insert_mission(Mission::new(aircraft_id, "Bench sortie"));

    let types: Vec<CargoType> = [WheelType::Bulk, WheelType::TwoWheeled, WheelType::FourWheeled]
        .into_iter()
        .map(|wheel_type| {
            let mut cargo_type = CargoType {
                id: CargoTypeId::new(0),
                name: wheel_type.to_string(),
                default_weight: 2500.0,
                default_length: 88.0,
                default_width: 60.0,
                default_height: 60.0,
                default_forward_overhang: 8.0,
                default_back_overhang: 8.0,
                default_cog: None,
                wheel_type,
            };
            cargo_type.id = repo.insert_cargo_type(cargo_type.clone());
            cargo_type
        })
        .collect();

    for i in 0..items {
        let cargo_type = &types[i % types.len()];
        let x = 250.0 + (i as f64 * 37.0) % 500.0;
        let item = CargoItem::from_type(cargo_type, mission_id, format!("Item {}", i))
            .place_on_deck(x, 10.0);
        repo.insert_cargo_item(item)
            .expect("benchmark cargo should be valid");
    }

    (repo, mission_id)
}

fn bench_balance_summary(c: &mut Criterion) {
    let runtime = tokio::runtime::Runtime::new().expect("tokio runtime");
    let config = CalibrationConfig::default();
    let mut group = c.benchmark_group("balance_summary");

    for items in [1usize, 10, 50] {
        let (repo, mission_id) = seeded_store(items);
        group.bench_with_input(BenchmarkId::from_parameter(items), &items, |b, _| {
            b.to_async(&runtime).iter(|| async {
                black_box(
                    mac::calculate_balance_summary(&repo, &config, black_box(mission_id))
                        .await
                        .expect("summary"),
                )
            });
        });
    }

    group.finish();
}

fn bench_floor_validation(c: &mut Criterion) {
    let runtime = tokio::runtime::Runtime::new().expect("tokio runtime");
    let config = CalibrationConfig::default();
    let mut group = c.benchmark_group("floor_validation");

    for items in [1usize, 10, 50] {
        let (repo, mission_id) = seeded_store(items);
        group.bench_with_input(BenchmarkId::from_parameter(items), &items, |b, _| {
            b.to_async(&runtime).iter(|| async {
                black_box(
                    floor_validation::validate_mission_load_constraints(
                        &repo,
                        &config,
                        black_box(mission_id),
                    )
                    .await
                    .expect("validation"),
                )
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_balance_summary, bench_floor_validation);
criterion_main!(benches);
