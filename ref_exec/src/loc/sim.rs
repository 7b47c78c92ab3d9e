//! # Simulated vehicle
//!
//! A kinematic stand-in for a real vehicle and its controller. Each step the vehicle moves
//! straight towards the setpoint position and turns towards the setpoint yaw, limited by its
//! maximum speed and yaw rate.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use comms_if::msg::PositionTarget;
use nalgebra::Vector3;
use util::maths::{clamp, get_ang_dist_2pi};

use super::{Pose, SimParams};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct SimVehicle {
    position_m: Vector3<f64>,
    yaw_rad: f64,

    max_speed_ms: f64,
    max_yaw_rate_rads: f64,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl SimVehicle {
    pub fn new(params: &SimParams) -> Self {
        Self {
            position_m: Vector3::from(params.init_position_m),
            yaw_rad: params.init_yaw_rad,
            max_speed_ms: params.max_speed_ms.abs(),
            max_yaw_rate_rads: params.max_yaw_rate_rads.abs(),
        }
    }

    /// Current pose of the vehicle. The simulated vehicle never rolls or pitches.
    pub fn pose(&self) -> Pose {
        Pose::from_yaw(self.position_m, self.yaw_rad)
    }

    /// Move the vehicle towards the target for `dt_s` seconds.
    pub fn step(&mut self, target: &PositionTarget, dt_s: f64) {
        let target_m = Vector3::new(target.position.x, target.position.y, target.position.z);

        // Translate, stopping on the target rather than overshooting it
        let error_m = target_m - self.position_m;
        let max_step_m = self.max_speed_ms * dt_s;
        if error_m.norm() <= max_step_m {
            self.position_m = target_m;
        } else {
            self.position_m += error_m.normalize() * max_step_m;
        }

        // Rotate the shortest way round
        let max_turn_rad = self.max_yaw_rate_rads * dt_s;
        let yaw_error_rad = get_ang_dist_2pi(self.yaw_rad, target.yaw_rad);
        self.yaw_rad += clamp(yaw_error_rad, -max_turn_rad, max_turn_rad);
    }
}

// ---------------------------------------------------------------------------
// TESTS
// ---------------------------------------------------------------------------
