//! Cargo types and the cargo items planned on a mission.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::MissionId;
use crate::error::{EngineError, EntityKind};

crate::define_id_type!(i64, CargoTypeId, EntityKind::CargoType);
crate::define_id_type!(i64, CargoItemId, EntityKind::CargoItem);

/// How a piece of cargo rests on the floor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WheelType {
    #[serde(rename = "bulk")]
    Bulk,
    #[serde(rename = "2_wheeled")]
    TwoWheeled,
    #[serde(rename = "4_wheeled")]
    FourWheeled,
}

impl WheelType {
    pub fn as_str(&self) -> &'static str {
        match self {
            WheelType::Bulk => "bulk",
            WheelType::TwoWheeled => "2_wheeled",
            WheelType::FourWheeled => "4_wheeled",
        }
    }

    /// Number of wheels carrying the item, `None` for bulk cargo.
    pub fn wheel_count(&self) -> Option<u32> {
        match self {
            WheelType::Bulk => None,
            WheelType::TwoWheeled => Some(2),
            WheelType::FourWheeled => Some(4),
        }
    }

    pub fn is_wheeled(&self) -> bool {
        self.wheel_count().is_some()
    }
}

impl fmt::Display for WheelType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WheelType {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "bulk" => Ok(WheelType::Bulk),
            "2_wheeled" => Ok(WheelType::TwoWheeled),
            "4_wheeled" => Ok(WheelType::FourWheeled),
            other => Err(EngineError::invalid_input(format!(
                "Invalid wheel type: {}",
                other
            ))),
        }
    }
}

/// Lifecycle position of a cargo item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CargoStatus {
    Inventory,
    OnStage,
    OnDeck,
}

/// Template a cargo item is created from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CargoType {
    pub id: CargoTypeId,
    pub name: String,
    pub default_weight: f64,
    pub default_length: f64,
    pub default_width: f64,
    pub default_height: f64,
    #[serde(default)]
    pub default_forward_overhang: f64,
    #[serde(default)]
    pub default_back_overhang: f64,
    #[serde(default)]
    pub default_cog: Option<f64>,
    #[serde(rename = "type")]
    pub wheel_type: WheelType,
}

/// Position used for items that are not on the deck.
pub const OFF_DECK_POSITION: f64 = -1.0;

/// A concrete piece of cargo belonging to one mission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CargoItem {
    pub id: CargoItemId,
    pub mission_id: MissionId,
    pub cargo_type_id: CargoTypeId,
    pub name: String,
    pub weight: f64,
    pub length: f64,
    pub width: f64,
    pub height: f64,
    #[serde(default)]
    pub forward_overhang: f64,
    #[serde(default)]
    pub back_overhang: f64,
    #[serde(default)]
    pub cog: Option<f64>,
    pub x_start_position: f64,
    pub y_start_position: f64,
    pub status: CargoStatus,
}

impl CargoItem {
    /// A new inventory item carrying the type's default dimensions.
    pub fn from_type(
        cargo_type: &CargoType,
        mission_id: MissionId,
        name: impl Into<String>,
    ) -> Self {
        Self {
            id: CargoItemId::new(0),
            mission_id,
            cargo_type_id: cargo_type.id,
            name: name.into(),
            weight: cargo_type.default_weight,
            length: cargo_type.default_length,
            width: cargo_type.default_width,
            height: cargo_type.default_height,
            forward_overhang: cargo_type.default_forward_overhang,
            back_overhang: cargo_type.default_back_overhang,
            cog: cargo_type.default_cog,
            x_start_position: OFF_DECK_POSITION,
            y_start_position: OFF_DECK_POSITION,
            status: CargoStatus::Inventory,
        }
    }

    /// Move the item onto the deck with its forward-left corner at `(x, y)`.
    pub fn place_on_deck(mut self, x: f64, y: f64) -> Self {
        self.x_start_position = x;
        self.y_start_position = y;
        self.status = CargoStatus::OnDeck;
        self
    }

    pub fn is_on_deck(&self) -> bool {
        self.status == CargoStatus::OnDeck
    }

    pub fn x_end(&self) -> f64 {
        self.x_start_position + self.length
    }

    pub fn center_x(&self) -> f64 {
        self.x_start_position + self.length / 2.0
    }

    /// Longitudinal span bearing on the floor: the wheelbase for wheeled cargo,
    /// the whole footprint for bulk cargo.
    pub fn effective_x_span(&self, wheel_type: WheelType) -> (f64, f64) {
        match wheel_type {
            WheelType::Bulk => (self.x_start_position, self.x_end()),
            WheelType::TwoWheeled | WheelType::FourWheeled => (
                self.x_start_position + self.forward_overhang,
                self.x_end() - self.back_overhang,
            ),
        }
    }

    pub fn wheelbase(&self) -> f64 {
        self.length - self.forward_overhang - self.back_overhang
    }

    /// Check the dimensional invariants of a stored item.
    pub fn validate(&self) -> Result<(), String> {
        if !(self.length > 0.0) {
            return Err(format!("Cargo item '{}' must have a positive length", self.name));
        }
        if !(self.width > 0.0) {
            return Err(format!("Cargo item '{}' must have a positive width", self.name));
        }
        if self.weight < 0.0 {
            return Err(format!("Cargo item '{}' has a negative weight", self.name));
        }
        if self.forward_overhang < 0.0 || self.back_overhang < 0.0 {
            return Err(format!("Cargo item '{}' has a negative overhang", self.name));
        }
        if self.forward_overhang + self.back_overhang > self.length {
            return Err(format!(
                "Cargo item '{}' overhangs ({} + {}) exceed its length {}",
                self.name, self.forward_overhang, self.back_overhang, self.length
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn humvee_type() -> CargoType {
        CargoType {
            id: CargoTypeId::new(3),
            name: "Utility vehicle".to_string(),
            default_weight: 5200.0,
            default_length: 180.0,
            default_width: 86.0,
            default_height: 72.0,
            default_forward_overhang: 30.0,
            default_back_overhang: 20.0,
            default_cog: Some(95.0),
            wheel_type: WheelType::FourWheeled,
        }
    }

    #[test]
    fn test_wheel_type_parse() {
        assert_eq!("bulk".parse::<WheelType>().unwrap(), WheelType::Bulk);
        assert_eq!("2_wheeled".parse::<WheelType>().unwrap(), WheelType::TwoWheeled);
        assert_eq!("4_wheeled".parse::<WheelType>().unwrap(), WheelType::FourWheeled);

        let err = "tracked".parse::<WheelType>().unwrap_err();
        assert!(matches!(err, EngineError::InvalidInput(_)));
        assert!(err.to_string().contains("tracked"));
    }

    #[test]
    fn test_wheel_type_serde_names() {
        assert_eq!(serde_json::to_string(&WheelType::TwoWheeled).unwrap(), "\"2_wheeled\"");
        let parsed: WheelType = serde_json::from_str("\"4_wheeled\"").unwrap();
        assert_eq!(parsed, WheelType::FourWheeled);
        assert!(serde_json::from_str::<WheelType>("\"3_wheeled\"").is_err());
    }

    #[test]
    fn test_status_serde_names() {
        assert_eq!(serde_json::to_string(&CargoStatus::OnDeck).unwrap(), "\"onDeck\"");
        assert_eq!(serde_json::to_string(&CargoStatus::OnStage).unwrap(), "\"onStage\"");
        assert_eq!(serde_json::to_string(&CargoStatus::Inventory).unwrap(), "\"inventory\"");
    }

    #[test]
    fn test_from_type_inherits_defaults() {
        let item = CargoItem::from_type(&humvee_type(), MissionId::new(9), "HMMWV #1");
        assert_eq!(item.weight, 5200.0);
        assert_eq!(item.forward_overhang, 30.0);
        assert_eq!(item.cog, Some(95.0));
        assert_eq!(item.status, CargoStatus::Inventory);
        assert_eq!(item.x_start_position, OFF_DECK_POSITION);
        assert!(!item.is_on_deck());

        let placed = item.place_on_deck(300.0, 10.0);
        assert!(placed.is_on_deck());
        assert_eq!(placed.effective_x_span(WheelType::FourWheeled), (330.0, 460.0));
        assert_eq!(placed.effective_x_span(WheelType::Bulk), (300.0, 480.0));
        assert_eq!(placed.wheelbase(), 130.0);
    }

    #[test]
    fn test_validate_overhang_invariant() {
        let mut item = CargoItem::from_type(&humvee_type(), MissionId::new(1), "x");
        assert!(item.validate().is_ok());

        item.forward_overhang = 100.0;
        item.back_overhang = 80.1;
        assert!(item.validate().unwrap_err().contains("exceed"));

        item.back_overhang = 80.0;
        assert!(item.validate().is_ok());

        item.length = 0.0;
        assert!(item.validate().is_err());
    }
}
