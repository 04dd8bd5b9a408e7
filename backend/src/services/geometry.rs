//! Deck geometry: footprints, wheel touchpoints, treadway contact and the
//! compartments a piece of cargo bears on.
//!
//! Pure functions do the arithmetic on already-loaded entities; the `async`
//! wrappers fetch what they need from the repository first.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::lookup::{mission_compartments, require_aircraft, require_cargo_item};
use crate::db::repository::FullRepository;
use crate::error::{EngineError, EngineResult};
use crate::models::{Aircraft, AircraftId, CargoItem, CargoItemId, Compartment, WheelType};

/// Minimum share of a wheel's width that must rest on a treadway.
pub const TREADWAY_MIN_OVERLAP: f64 = 0.5;

/// A point on the deck plane.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Named contact points. Front is the smaller x, left the smaller y.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Touchpoint {
    FrontLeft,
    FrontRight,
    BackLeft,
    BackRight,
    Front,
    Back,
}

/// The four corners of a cargo item's rectangular footprint.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FootprintCorners {
    pub front_left: Point,
    pub front_right: Point,
    pub back_left: Point,
    pub back_right: Point,
}

impl FootprintCorners {
    pub fn named(&self) -> [(Touchpoint, Point); 4] {
        [
            (Touchpoint::FrontLeft, self.front_left),
            (Touchpoint::FrontRight, self.front_right),
            (Touchpoint::BackLeft, self.back_left),
            (Touchpoint::BackRight, self.back_right),
        ]
    }
}

pub type WheelTouchpoints = BTreeMap<Touchpoint, Point>;

/// Lateral extent `[y_start, y_end]` of a wheel on the floor, or of a treadway.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WheelSpan {
    pub y_start: f64,
    pub y_end: f64,
}

impl WheelSpan {
    pub fn width(&self) -> f64 {
        self.y_end - self.y_start
    }

    pub fn overlap_with(&self, other: &WheelSpan) -> f64 {
        (self.y_end.min(other.y_end) - self.y_start.max(other.y_start)).max(0.0)
    }
}

/// Compartments a cargo item rests on.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TouchpointCompartments {
    /// Compartment under each wheel touchpoint; always empty for bulk cargo.
    pub touchpoint_to_compartment: BTreeMap<Touchpoint, Compartment>,
    /// Every compartment the effective span strictly intersects, forward to aft.
    pub overlapping_compartments: Vec<Compartment>,
}

impl TouchpointCompartments {
    /// Distinct compartments under the touchpoints, in touchpoint order.
    pub fn touched_compartments(&self) -> Vec<&Compartment> {
        let mut touched: Vec<&Compartment> = Vec::new();
        for compartment in self.touchpoint_to_compartment.values() {
            if !touched.iter().any(|c| c.id == compartment.id) {
                touched.push(compartment);
            }
        }
        touched
    }

    /// Compartments a per-compartment check must cover for the given wheel type.
    pub fn bearing_compartments(&self, wheel_type: WheelType) -> Vec<&Compartment> {
        match wheel_type {
            WheelType::Bulk => self.overlapping_compartments.iter().collect(),
            WheelType::TwoWheeled | WheelType::FourWheeled => self.touched_compartments(),
        }
    }
}

/// Convert a fuselage station to the deck x position of an item whose centre of
/// gravity sits `cog` inches behind its front edge.
pub fn fs_to_x_position(fs: f64, cog: f64) -> f64 {
    fs - cog
}

/// Fuselage station of an item's centre of gravity, rounded to the inch.
pub fn x_position_to_fs(x: f64, cog: f64) -> f64 {
    (x + cog).round()
}

pub fn footprint_corners(item: &CargoItem) -> FootprintCorners {
    let front = item.x_start_position;
    let back = item.x_end();
    let left = item.y_start_position;
    let right = item.y_start_position + item.width;
    FootprintCorners {
        front_left: Point::new(front, left),
        front_right: Point::new(front, right),
        back_left: Point::new(back, left),
        back_right: Point::new(back, right),
    }
}

/// Ground contact points of an item for a wheel configuration.
pub fn wheel_touchpoints(item: &CargoItem, wheel_type: WheelType) -> WheelTouchpoints {
    let corners = footprint_corners(item);
    let front_axle = item.x_start_position + item.forward_overhang;
    let back_axle = item.x_end() - item.back_overhang;

    match wheel_type {
        WheelType::Bulk => corners.named().into_iter().collect(),
        WheelType::FourWheeled => BTreeMap::from([
            (Touchpoint::FrontLeft, Point::new(front_axle, corners.front_left.y)),
            (Touchpoint::FrontRight, Point::new(front_axle, corners.front_right.y)),
            (Touchpoint::BackLeft, Point::new(back_axle, corners.back_left.y)),
            (Touchpoint::BackRight, Point::new(back_axle, corners.back_right.y)),
        ]),
        WheelType::TwoWheeled => {
            let center_y = item.y_start_position + item.width / 2.0;
            BTreeMap::from([
                (Touchpoint::Front, Point::new(front_axle, center_y)),
                (Touchpoint::Back, Point::new(back_axle, center_y)),
            ])
        }
    }
}

/// Lateral span covered by a wheel of `wheel_width` centred on a touchpoint.
pub fn wheel_contact_span(touchpoint: Point, wheel_width: f64) -> EngineResult<WheelSpan> {
    if !(wheel_width > 0.0) {
        return Err(EngineError::invalid_input(format!(
            "Wheel width must be positive, got {}",
            wheel_width
        )));
    }
    let half = wheel_width / 2.0;
    Ok(WheelSpan {
        y_start: touchpoint.y - half,
        y_end: touchpoint.y + half,
    })
}

/// Left and right treadway intervals of an aircraft.
pub fn treadway_spans(aircraft: &Aircraft) -> [WheelSpan; 2] {
    let d = aircraft.treadways_dist_from_center;
    let half = aircraft.treadways_width / 2.0;
    [
        WheelSpan {
            y_start: -d - half,
            y_end: -d + half,
        },
        WheelSpan {
            y_start: d - half,
            y_end: d + half,
        },
    ]
}

/// Whether at least half of a wheel span rests on one of the aircraft's treadways.
pub fn span_on_treadway(span: &WheelSpan, aircraft: &Aircraft) -> EngineResult<bool> {
    let width = span.width();
    if !(width > 0.0) {
        return Err(EngineError::invalid_input(format!(
            "Wheel span [{}, {}] has no width",
            span.y_start, span.y_end
        )));
    }
    Ok(treadway_spans(aircraft)
        .iter()
        .any(|treadway| span.overlap_with(treadway) / width >= TREADWAY_MIN_OVERLAP))
}

/// Map an item onto compartments.
///
/// `compartments` must be ordered forward to aft so that a touchpoint on a shared
/// boundary resolves to the forward compartment.
pub fn map_touchpoint_compartments(
    item: &CargoItem,
    wheel_type: WheelType,
    compartments: &[Compartment],
) -> TouchpointCompartments {
    let (span_start, span_end) = item.effective_x_span(wheel_type);
    let overlapping_compartments = compartments
        .iter()
        .filter(|c| c.intersects(span_start, span_end))
        .cloned()
        .collect();

    let mut touchpoint_to_compartment = BTreeMap::new();
    if wheel_type.is_wheeled() {
        for (touchpoint, point) in wheel_touchpoints(item, wheel_type) {
            if let Some(compartment) = compartments.iter().find(|c| c.contains_x(point.x)) {
                touchpoint_to_compartment.insert(touchpoint, compartment.clone());
            }
        }
    }

    TouchpointCompartments {
        touchpoint_to_compartment,
        overlapping_compartments,
    }
}

/// Footprint corners of a stored cargo item.
pub async fn get_footprint_corners<R: FullRepository + ?Sized>(
    repo: &R,
    cargo_item_id: CargoItemId,
) -> EngineResult<FootprintCorners> {
    let item = require_cargo_item(repo, cargo_item_id).await?;
    Ok(footprint_corners(&item))
}

/// Touchpoints of a stored cargo item for the given wheel configuration.
pub async fn get_wheel_touchpoints<R: FullRepository + ?Sized>(
    repo: &R,
    cargo_item_id: CargoItemId,
    wheel_type: WheelType,
) -> EngineResult<WheelTouchpoints> {
    let item = require_cargo_item(repo, cargo_item_id).await?;
    Ok(wheel_touchpoints(&item, wheel_type))
}

/// Whether a wheel span rests on a treadway of the given aircraft.
pub async fn is_touchpoint_on_treadway<R: FullRepository + ?Sized>(
    repo: &R,
    span: &WheelSpan,
    aircraft_id: AircraftId,
) -> EngineResult<bool> {
    let aircraft = require_aircraft(repo, aircraft_id).await?;
    span_on_treadway(span, &aircraft)
}

/// Compartments under a stored cargo item.
pub async fn get_touchpoint_compartments<R: FullRepository + ?Sized>(
    repo: &R,
    cargo_item_id: CargoItemId,
    wheel_type: WheelType,
) -> EngineResult<TouchpointCompartments> {
    let item = require_cargo_item(repo, cargo_item_id).await?;
    let compartments = mission_compartments(repo, item.mission_id).await?;
    Ok(map_touchpoint_compartments(&item, wheel_type, &compartments))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        AircraftId, CargoStatus, CargoTypeId, CompartmentId, MissionId, RampGeometry,
    };

    fn item(x: f64, y: f64, length: f64, width: f64, fo: f64, bo: f64) -> CargoItem {
        CargoItem {
            id: CargoItemId::new(1),
            mission_id: MissionId::new(1),
            cargo_type_id: CargoTypeId::new(1),
            name: "test".to_string(),
            weight: 1000.0,
            length,
            width,
            height: 50.0,
            forward_overhang: fo,
            back_overhang: bo,
            cog: None,
            x_start_position: x,
            y_start_position: y,
            status: CargoStatus::OnDeck,
        }
    }

    fn aircraft() -> Aircraft {
        Aircraft {
            id: AircraftId::new(1),
            aircraft_type: "C-130J".to_string(),
            name: "Tail 1".to_string(),
            empty_weight: 83288.0,
            empty_mac: 86.4,
            cargo_bay_width: 120.0,
            treadways_width: 22.0,
            treadways_dist_from_center: 50.0,
            ramp: RampGeometry::default(),
        }
    }

    fn compartment(id: i64, x_start: f64, x_end: f64) -> Compartment {
        Compartment {
            id: CompartmentId::new(id),
            aircraft_id: AircraftId::new(1),
            name: format!("C{}", id),
            x_start,
            x_end,
            floor_area: 0.0,
            usable_volume: 0.0,
        }
    }

    fn deck() -> Vec<Compartment> {
        vec![
            compartment(1, 0.0, 100.0),
            compartment(2, 100.0, 200.0),
            compartment(3, 200.0, 300.0),
        ]
    }

    #[test]
    fn test_footprint_corners() {
        let corners = footprint_corners(&item(30.0, -40.0, 80.0, 60.0, 10.0, 10.0));
        assert_eq!(corners.front_left, Point::new(30.0, -40.0));
        assert_eq!(corners.front_right, Point::new(30.0, 20.0));
        assert_eq!(corners.back_left, Point::new(110.0, -40.0));
        assert_eq!(corners.back_right, Point::new(110.0, 20.0));
    }

    #[test]
    fn test_four_wheeled_touchpoints_inset_by_overhangs() {
        let vehicle = item(120.0, 0.0, 120.0, 80.0, 15.0, 15.0);
        let points = wheel_touchpoints(&vehicle, WheelType::FourWheeled);
        assert_eq!(points.len(), 4);
        assert_eq!(points[&Touchpoint::FrontLeft], Point::new(135.0, 0.0));
        assert_eq!(points[&Touchpoint::FrontRight], Point::new(135.0, 80.0));
        assert_eq!(points[&Touchpoint::BackLeft], Point::new(225.0, 0.0));
        assert_eq!(points[&Touchpoint::BackRight], Point::new(225.0, 80.0));
    }

    #[test]
    fn test_two_wheeled_touchpoints_on_centreline() {
        let trailer = item(30.0, -30.0, 80.0, 60.0, 10.0, 10.0);
        let points = wheel_touchpoints(&trailer, WheelType::TwoWheeled);
        assert_eq!(points.len(), 2);
        assert_eq!(points[&Touchpoint::Front], Point::new(40.0, 0.0));
        assert_eq!(points[&Touchpoint::Back], Point::new(100.0, 0.0));
    }

    #[test]
    fn test_bulk_touchpoints_are_corners() {
        let cargo = item(50.0, 0.0, 20.0, 100.0, 5.0, 5.0);
        let points = wheel_touchpoints(&cargo, WheelType::Bulk);
        let corners = footprint_corners(&cargo);
        assert_eq!(points[&Touchpoint::FrontLeft], corners.front_left);
        assert_eq!(points[&Touchpoint::BackRight], corners.back_right);
    }

    #[test]
    fn test_wheel_contact_span() {
        let span = wheel_contact_span(Point::new(0.0, 50.0), 10.0).unwrap();
        assert_eq!(span, WheelSpan { y_start: 45.0, y_end: 55.0 });

        assert!(matches!(
            wheel_contact_span(Point::new(0.0, 0.0), 0.0),
            Err(EngineError::InvalidInput(_))
        ));
        assert!(wheel_contact_span(Point::new(0.0, 0.0), -3.0).is_err());
    }

    #[test]
    fn test_treadway_spans() {
        let [left, right] = treadway_spans(&aircraft());
        assert_eq!(left, WheelSpan { y_start: -61.0, y_end: -39.0 });
        assert_eq!(right, WheelSpan { y_start: 39.0, y_end: 61.0 });
    }

    #[test]
    fn test_treadway_threshold_is_inclusive() {
        let aircraft = aircraft();
        let half_on = WheelSpan { y_start: 56.0, y_end: 66.0 };
        assert!(span_on_treadway(&half_on, &aircraft).unwrap());

        let just_under = WheelSpan { y_start: 56.5, y_end: 66.5 };
        assert!(!span_on_treadway(&just_under, &aircraft).unwrap());

        let left_edge = WheelSpan { y_start: -44.0, y_end: -34.0 };
        assert!(span_on_treadway(&left_edge, &aircraft).unwrap());

        let centre = WheelSpan { y_start: -5.0, y_end: 5.0 };
        assert!(!span_on_treadway(&centre, &aircraft).unwrap());
    }

    #[test]
    fn test_degenerate_span_rejected() {
        let flat = WheelSpan { y_start: 50.0, y_end: 50.0 };
        assert!(matches!(
            span_on_treadway(&flat, &aircraft()),
            Err(EngineError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_bulk_mapping_uses_full_span_and_no_touchpoints() {
        let cargo = item(50.0, 0.0, 100.0, 50.0, 0.0, 0.0);
        let mapping = map_touchpoint_compartments(&cargo, WheelType::Bulk, &deck());
        assert!(mapping.touchpoint_to_compartment.is_empty());
        let ids: Vec<i64> = mapping
            .overlapping_compartments
            .iter()
            .map(|c| c.id.value())
            .collect();
        assert_eq!(ids, vec![1, 2]);
    }

    #[test]
    fn test_span_touching_boundary_does_not_overlap() {
        let cargo = item(0.0, 0.0, 100.0, 50.0, 0.0, 0.0);
        let mapping = map_touchpoint_compartments(&cargo, WheelType::Bulk, &deck());
        let ids: Vec<i64> = mapping
            .overlapping_compartments
            .iter()
            .map(|c| c.id.value())
            .collect();
        assert_eq!(ids, vec![1]);
    }

    #[test]
    fn test_wheeled_overlap_excludes_overhangs() {
        // Footprint 90..210 reaches C1 and C3, the wheelbase 105..195 stays in C2.
        let trailer = item(90.0, 0.0, 120.0, 60.0, 15.0, 15.0);
        let mapping = map_touchpoint_compartments(&trailer, WheelType::TwoWheeled, &deck());
        let ids: Vec<i64> = mapping
            .overlapping_compartments
            .iter()
            .map(|c| c.id.value())
            .collect();
        assert_eq!(ids, vec![2]);
    }

    #[test]
    fn test_boundary_touchpoint_goes_to_forward_compartment() {
        let trailer = item(30.0, 0.0, 80.0, 60.0, 10.0, 10.0);
        let mapping = map_touchpoint_compartments(&trailer, WheelType::TwoWheeled, &deck());
        assert_eq!(mapping.touchpoint_to_compartment[&Touchpoint::Front].id.value(), 1);
        assert_eq!(mapping.touchpoint_to_compartment[&Touchpoint::Back].id.value(), 1);
        assert_eq!(mapping.touched_compartments().len(), 1);
    }

    #[test]
    fn test_touchpoint_off_deck_is_unmapped() {
        let vehicle = item(250.0, 0.0, 100.0, 60.0, 10.0, 10.0);
        let mapping = map_touchpoint_compartments(&vehicle, WheelType::FourWheeled, &deck());
        assert_eq!(mapping.touchpoint_to_compartment.len(), 2);
        assert!(mapping.touchpoint_to_compartment.values().all(|c| c.id.value() == 3));
    }

    #[test]
    fn test_fs_conversion() {
        assert_eq!(fs_to_x_position(600.0, 40.0), 560.0);
        assert_eq!(x_position_to_fs(560.2, 40.0), 600.0);
        assert_eq!(x_position_to_fs(fs_to_x_position(612.5, 20.25), 20.25), 613.0);
    }
}
