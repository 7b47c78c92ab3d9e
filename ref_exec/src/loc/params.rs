//! Localisation parameters

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use serde::Deserialize;

use super::LocSource;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
pub struct LocMgrParams {
    pub source: LocSource,

    /// Parameters for the simulated vehicle, only used if `source` is `Sim`.
    pub sim: SimParams,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SimParams {
    /// Maximum translational speed of the simulated vehicle
    pub max_speed_ms: f64,

    /// Maximum yaw rate of the simulated vehicle
    pub max_yaw_rate_rads: f64,

    /// Starting position of the vehicle in the local frame
    pub init_position_m: [f64; 3],

    /// Starting yaw of the vehicle
    pub init_yaw_rad: f64,
}
