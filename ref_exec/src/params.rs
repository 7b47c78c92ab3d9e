//! # Reference Executable Parameters
//!
//! This module provide parameters for the reference tracking executable.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use nalgebra::Vector3;
use serde::Deserialize;

use crate::loc::{LocMgrParams, Pose};

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
pub struct RefExecParams {
    /// Localisation source parameters
    pub loc_mgr: LocMgrParams,

    /// If present the reference manager is seeded with this pose at startup, so the vehicle
    /// holds it until the first reference arrives.
    #[serde(default)]
    pub init_pose: Option<InitPose>,
}

#[derive(Debug, Copy, Clone, Deserialize)]
pub struct InitPose {
    pub position_m: [f64; 3],
    pub yaw_rad: f64,
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl From<InitPose> for Pose {
    fn from(p: InitPose) -> Self {
        Pose::from_yaw(Vector3::from(p.position_m), p.yaw_rad)
    }
}

// ------------------------------------------------------------------------------------------------
// TESTS
// ------------------------------------------------------------------------------------------------
