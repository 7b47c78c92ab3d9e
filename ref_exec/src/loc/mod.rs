//! # Localisation module
//!
//! This module provides the pose of the vehicle to the control loop. The pose is either set
//! directly by an external source or produced by a simple simulated vehicle which chases the
//! setpoint it's given.

// ---------------------------------------------------------------------------
// MODULES
// ---------------------------------------------------------------------------

mod params;
mod sim;

pub use params::{LocMgrParams, SimParams};
pub use sim::SimVehicle;

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use comms_if::msg::PositionTarget;
use nalgebra::{UnitQuaternion, Vector3};
use serde::{Deserialize, Serialize};

use crate::ref_mgr::geom;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// The current pose (position and attitude in the local frame) of the vehicle.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pose {
    /// The position in the local frame
    pub position_m: Vector3<f64>,

    /// The attitude of the vehicle in the local frame.
    pub attitude_q: UnitQuaternion<f64>,
}

/// Provides an interface for the localisation source of the vehicle.
pub struct LocMgr {
    source: LocSource,

    pose: Option<Pose>,

    sim: Option<SimVehicle>,
}

// ------------------------------------------------------------------------------------------------
// ENUMS
// ------------------------------------------------------------------------------------------------

#[derive(Debug, Copy, Clone, Deserialize, PartialEq, Eq)]
pub enum LocSource {
    /// The pose is whatever was last given to [`LocMgr::set_pose`].
    OnSet,

    /// The pose comes from a [`SimVehicle`] stepped each cycle.
    Sim,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Pose {
    pub fn new(position_m: Vector3<f64>, attitude_q: UnitQuaternion<f64>) -> Self {
        Self {
            position_m,
            attitude_q,
        }
    }

    /// Create a level pose (no roll or pitch) with the given yaw.
    pub fn from_yaw(position_m: Vector3<f64>, yaw_rad: f64) -> Self {
        Self {
            position_m,
            attitude_q: UnitQuaternion::from_euler_angles(0.0, 0.0, yaw_rad),
        }
    }

    /// Return the heading (yaw, angle to the positive X axis) of the vehicle in radians.
    ///
    /// Heading is given in the range [-pi, pi], roll and pitch are ignored.
    pub fn get_heading(&self) -> f64 {
        geom::yaw_from_quaternion(&self.attitude_q)
    }
}

impl Default for Pose {
    fn default() -> Self {
        Self {
            position_m: Vector3::zeros(),
            attitude_q: UnitQuaternion::identity(),
        }
    }
}

impl LocMgr {
    pub fn new(source: LocSource) -> Self {
        Self {
            source,
            pose: None,
            sim: None,
        }
    }

    /// Create a new manager from its parameters, starting the simulated vehicle if required.
    pub fn from_params(params: &LocMgrParams) -> Self {
        let sim = match params.source {
            LocSource::Sim => Some(SimVehicle::new(&params.sim)),
            LocSource::OnSet => None,
        };

        Self {
            source: params.source,
            pose: None,
            sim,
        }
    }

    pub fn set_pose(&mut self, pose: Pose) {
        self.pose = Some(pose);
    }

    pub fn get_pose(&self) -> Option<Pose> {
        match self.source {
            LocSource::OnSet => self.pose,
            LocSource::Sim => self.sim.as_ref().map(|s| s.pose()),
        }
    }

    /// Advance the localisation source by one cycle of `dt_s` seconds.
    ///
    /// Only the simulated source moves, chasing the given setpoint. With no setpoint the
    /// simulated vehicle holds its pose.
    pub fn step(&mut self, setpoint: Option<&PositionTarget>, dt_s: f64) {
        if let (Some(sim), Some(target)) = (self.sim.as_mut(), setpoint) {
            sim.step(target, dt_s);
        }
    }
}

// ---------------------------------------------------------------------------
// TESTS
// ---------------------------------------------------------------------------
