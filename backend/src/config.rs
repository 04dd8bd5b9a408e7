//! Calibration configuration file support.
//!
//! Every constant the balance and floor-load formulas depend on lives here so it
//! can be recalibrated per aircraft type. Defaults reproduce the reference
//! aircraft's weight-and-balance worksheet.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{EngineError, EngineResult};
use crate::models::WheelType;

/// Environment variable naming the calibration file.
pub const CONFIG_ENV_VAR: &str = "LOADMASTER_CONFIG";

/// Calibration configuration from file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CalibrationConfig {
    #[serde(default)]
    pub balance: BalanceSettings,
    #[serde(default)]
    pub stations: StationSettings,
    #[serde(default)]
    pub wheels: WheelSettings,
    #[serde(default)]
    pub fuel: FuelSettings,
    #[serde(default)]
    pub chart: ChartSettings,
}

/// MAC geometry and index scaling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BalanceSettings {
    #[serde(default = "default_mac_datum")]
    pub mac_datum: f64,
    #[serde(default = "default_mac_length")]
    pub mac_length: f64,
    /// Moment-arm reference station.
    #[serde(default = "default_reference_station")]
    pub reference_station: f64,
    #[serde(default = "default_index_divisor")]
    pub index_divisor: f64,
    #[serde(default = "default_index_offset")]
    pub index_offset: f64,
}

/// Stations of the fixed mission weights. The crew sits at the mission's own
/// loadmaster station.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StationSettings {
    #[serde(default = "default_loadmaster_weight")]
    pub loadmaster_weight: f64,
    #[serde(default = "default_configuration_station")]
    pub configuration: f64,
    #[serde(default = "default_crew_gear_station")]
    pub crew_gear: f64,
    #[serde(default = "default_food_station")]
    pub food: f64,
    #[serde(default = "default_safety_gear_station")]
    pub safety_gear: f64,
    #[serde(default = "default_etc_station")]
    pub etc: f64,
}

/// Wheel contact dimensions of one wheeled configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WheelDimensions {
    #[serde(default = "default_wheel_width")]
    pub wheel_width: f64,
    pub contact_length: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WheelSettings {
    #[serde(default = "default_two_wheeled")]
    pub two_wheeled: WheelDimensions,
    #[serde(default = "default_four_wheeled")]
    pub four_wheeled: WheelDimensions,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FuelSettings {
    /// Fuel burnt before take-off, deducted from the tank total.
    #[serde(default = "default_taxi_fuel")]
    pub taxi_fuel: f64,
}

/// Cargo reference chart, all values in thousands of pounds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSettings {
    #[serde(default = "default_reference_operating_weight")]
    pub reference_operating_weight: f64,
    #[serde(default = "default_min_operating_weight")]
    pub min_operating_weight: f64,
    #[serde(default = "default_max_operating_weight")]
    pub max_operating_weight: f64,
    #[serde(default = "default_min_cargo_weight")]
    pub min_cargo_weight: f64,
    #[serde(default = "default_max_cargo_weight")]
    pub max_cargo_weight: f64,
    #[serde(default = "default_line_slope")]
    pub line_slope: f64,
}

fn default_mac_datum() -> f64 {
    487.4
}

fn default_mac_length() -> f64 {
    164.5
}

fn default_reference_station() -> f64 {
    533.46
}

fn default_index_divisor() -> f64 {
    50000.0
}

fn default_index_offset() -> f64 {
    100.0
}

fn default_loadmaster_weight() -> f64 {
    100.0
}

fn default_configuration_station() -> f64 {
    500.0
}

fn default_crew_gear_station() -> f64 {
    520.0
}

fn default_food_station() -> f64 {
    480.0
}

fn default_safety_gear_station() -> f64 {
    733.46
}

fn default_etc_station() -> f64 {
    580.54
}

fn default_wheel_width() -> f64 {
    10.0
}

fn default_two_wheeled() -> WheelDimensions {
    WheelDimensions {
        wheel_width: default_wheel_width(),
        contact_length: 3.0,
    }
}

fn default_four_wheeled() -> WheelDimensions {
    WheelDimensions {
        wheel_width: default_wheel_width(),
        contact_length: 2.5,
    }
}

fn default_taxi_fuel() -> f64 {
    1000.0
}

fn default_reference_operating_weight() -> f64 {
    90.0
}

fn default_min_operating_weight() -> f64 {
    68.0
}

fn default_max_operating_weight() -> f64 {
    90.0
}

fn default_min_cargo_weight() -> f64 {
    0.0
}

fn default_max_cargo_weight() -> f64 {
    65.0
}

fn default_line_slope() -> f64 {
    1.0
}

impl Default for BalanceSettings {
    fn default() -> Self {
        Self {
            mac_datum: default_mac_datum(),
            mac_length: default_mac_length(),
            reference_station: default_reference_station(),
            index_divisor: default_index_divisor(),
            index_offset: default_index_offset(),
        }
    }
}

impl Default for StationSettings {
    fn default() -> Self {
        Self {
            loadmaster_weight: default_loadmaster_weight(),
            configuration: default_configuration_station(),
            crew_gear: default_crew_gear_station(),
            food: default_food_station(),
            safety_gear: default_safety_gear_station(),
            etc: default_etc_station(),
        }
    }
}

impl Default for WheelSettings {
    fn default() -> Self {
        Self {
            two_wheeled: default_two_wheeled(),
            four_wheeled: default_four_wheeled(),
        }
    }
}

impl Default for FuelSettings {
    fn default() -> Self {
        Self {
            taxi_fuel: default_taxi_fuel(),
        }
    }
}

impl Default for ChartSettings {
    fn default() -> Self {
        Self {
            reference_operating_weight: default_reference_operating_weight(),
            min_operating_weight: default_min_operating_weight(),
            max_operating_weight: default_max_operating_weight(),
            min_cargo_weight: default_min_cargo_weight(),
            max_cargo_weight: default_max_cargo_weight(),
            line_slope: default_line_slope(),
        }
    }
}

impl WheelSettings {
    /// Contact dimensions of a wheeled configuration, `None` for bulk cargo.
    pub fn dimensions(&self, wheel_type: WheelType) -> Option<WheelDimensions> {
        match wheel_type {
            WheelType::Bulk => None,
            WheelType::TwoWheeled => Some(self.two_wheeled),
            WheelType::FourWheeled => Some(self.four_wheeled),
        }
    }
}

impl CalibrationConfig {
    /// Parse a calibration from TOML text and validate it.
    pub fn from_toml_str(content: &str) -> EngineResult<Self> {
        let config: CalibrationConfig = toml::from_str(content).map_err(|e| {
            EngineError::configuration(format!("Failed to parse config file: {}", e))
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Load calibration from a TOML file.
    ///
    /// # Arguments
    /// * `path` - Path to the configuration file
    ///
    /// # Returns
    /// * `Ok(CalibrationConfig)` if successful
    /// * `Err(EngineError::Configuration)` if the file cannot be read, parsed or validated
    pub fn from_file<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let content = fs::read_to_string(path.as_ref()).map_err(|e| {
            EngineError::configuration(format!("Failed to read config file: {}", e))
        })?;
        Self::from_toml_str(&content)
    }

    /// Load calibration from the default location.
    ///
    /// Searches for `loadmaster.toml` in:
    /// 1. Current directory
    /// 2. `backend/` directory
    /// 3. Parent directory
    pub fn from_default_location() -> EngineResult<Self> {
        let search_paths = [
            PathBuf::from("loadmaster.toml"),
            PathBuf::from("backend/loadmaster.toml"),
            PathBuf::from("../loadmaster.toml"),
        ];

        for path in search_paths {
            if path.exists() {
                log::debug!("Using calibration file {}", path.display());
                return Self::from_file(&path);
            }
        }

        Err(EngineError::configuration(
            "No loadmaster.toml found in standard locations",
        ))
    }

    /// Load calibration from the file named by `LOADMASTER_CONFIG`, or the
    /// defaults when the variable is unset.
    pub fn from_env() -> EngineResult<Self> {
        match std::env::var(CONFIG_ENV_VAR) {
            Ok(path) if !path.trim().is_empty() => Self::from_file(path),
            _ => Ok(Self::default()),
        }
    }

    /// Reject calibrations the formulas cannot divide by.
    pub fn validate(&self) -> EngineResult<()> {
        if self.balance.mac_length <= 0.0 {
            return Err(EngineError::configuration(
                "balance.mac_length must be positive",
            ));
        }
        if self.balance.index_divisor == 0.0 {
            return Err(EngineError::configuration(
                "balance.index_divisor must not be zero",
            ));
        }
        for (name, dims) in [
            ("two_wheeled", self.wheels.two_wheeled),
            ("four_wheeled", self.wheels.four_wheeled),
        ] {
            if dims.wheel_width <= 0.0 || dims.contact_length <= 0.0 {
                return Err(EngineError::configuration(format!(
                    "wheels.{} dimensions must be positive",
                    name
                )));
            }
        }
        Ok(())
    }
}
