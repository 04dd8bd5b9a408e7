//! Checking a MAC% against the weight-indexed allowed band.

use serde::{Deserialize, Serialize};

use super::mac::calculate_balance_summary;
use crate::config::CalibrationConfig;
use crate::db::repository::FullRepository;
use crate::error::EngineResult;
use crate::models::{AllowedMacConstraint, MissionId};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MacValidationResult {
    pub is_valid: bool,
    pub current_mac: f64,
    pub min_allowed_mac: f64,
    pub max_allowed_mac: f64,
    /// Gross weight of the table row the band was taken from, 0 if none.
    pub weight_used_for_constraint: f64,
    pub actual_weight: f64,
    pub message: String,
}

/// The band applying at `gross_weight`: the lightest row at or above it, else the
/// heaviest row below it.
pub fn select_mac_constraint(
    constraints: &[AllowedMacConstraint],
    gross_weight: f64,
) -> Option<&AllowedMacConstraint> {
    let at_or_above = constraints
        .iter()
        .filter(|c| c.gross_aircraft_weight >= gross_weight)
        .min_by(|a, b| a.gross_aircraft_weight.total_cmp(&b.gross_aircraft_weight));
    at_or_above.or_else(|| {
        constraints
            .iter()
            .filter(|c| c.gross_aircraft_weight < gross_weight)
            .max_by(|a, b| a.gross_aircraft_weight.total_cmp(&b.gross_aircraft_weight))
    })
}

/// Judge a MAC% against a constraint table already in memory.
pub fn check_mac(
    constraints: &[AllowedMacConstraint],
    gross_weight: f64,
    mac_percent: f64,
) -> MacValidationResult {
    let Some(constraint) = select_mac_constraint(constraints, gross_weight) else {
        return MacValidationResult {
            is_valid: false,
            current_mac: mac_percent,
            min_allowed_mac: 0.0,
            max_allowed_mac: 0.0,
            weight_used_for_constraint: 0.0,
            actual_weight: gross_weight,
            message: "No MAC constraints found for the specified weight".to_string(),
        };
    };

    let is_valid = mac_percent >= constraint.min_mac && mac_percent <= constraint.max_mac;
    let message = if is_valid {
        "MAC is within allowed limits".to_string()
    } else {
        format!(
            "MAC is outside allowed limits ({}% - {}%)",
            constraint.min_mac, constraint.max_mac
        )
    };

    MacValidationResult {
        is_valid,
        current_mac: mac_percent,
        min_allowed_mac: constraint.min_mac,
        max_allowed_mac: constraint.max_mac,
        weight_used_for_constraint: constraint.gross_aircraft_weight,
        actual_weight: gross_weight,
        message,
    }
}

pub async fn validate_mac<R: FullRepository + ?Sized>(
    repo: &R,
    gross_weight: f64,
    mac_percent: f64,
) -> EngineResult<MacValidationResult> {
    let constraints = repo.list_allowed_mac_constraints().await?;
    Ok(check_mac(&constraints, gross_weight, mac_percent))
}

/// Validate a mission's own MAC% at its own gross weight.
pub async fn validate_mission_mac<R: FullRepository + ?Sized>(
    repo: &R,
    config: &CalibrationConfig,
    mission_id: MissionId,
) -> EngineResult<MacValidationResult> {
    let summary = calculate_balance_summary(repo, config, mission_id).await?;
    let result = validate_mac(repo, summary.total_weight, summary.mac_percent).await?;
    if !result.is_valid {
        log::warn!("Mission {}: {}", mission_id, result.message);
    }
    Ok(result)
}
