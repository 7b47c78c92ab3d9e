//! # Waypoint completion
//!
//! A waypoint is reached while the vehicle is within both the radius and the yaw accuracy of it,
//! and complete once it has been reached continuously for longer than the hold duration.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use super::geom::{radial_dist, rotation_dist, ReducedPose};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Tracks when the current waypoint was first reached.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct WaypointTimer {
    reached_at_s: Option<f64>,
}

// ---------------------------------------------------------------------------
// PUBLIC FUNCTIONS
// ---------------------------------------------------------------------------

/// Determine if the vehicle is currently within tolerance of the target.
pub fn check_waypoint_reached(
    target: &ReducedPose,
    current: &ReducedPose,
    radius_m: f64,
    yaw_accuracy_rad: f64,
) -> bool {
    radial_dist(&target.position_m, &current.position_m) < radius_m
        && rotation_dist(target.yaw_rad, current.yaw_rad) < yaw_accuracy_rad
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl WaypointTimer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset(&mut self) {
        self.reached_at_s = None;
    }

    pub fn is_set(&self) -> bool {
        self.reached_at_s.is_some()
    }

    /// Time at which the current waypoint was first reached.
    pub fn reached_at_s(&self) -> Option<f64> {
        self.reached_at_s
    }

    /// Check whether the waypoint is complete, to be called only on cycles where it is reached.
    ///
    /// The first call starts the hold and is never complete.
    pub fn check_complete(&mut self, t_s: f64, hold_duration_s: f64) -> bool {
        match self.reached_at_s {
            None => {
                self.reached_at_s = Some(t_s);
                false
            }
            Some(start_s) => t_s - start_s > hold_duration_s,
        }
    }

    /// Update the timer with this cycle's tolerance check, returning whether the waypoint is
    /// complete. Being out of tolerance restarts the hold.
    pub fn update(&mut self, in_tolerance: bool, t_s: f64, hold_duration_s: f64) -> bool {
        if in_tolerance {
            self.check_complete(t_s, hold_duration_s)
        } else {
            self.reset();
            false
        }
    }
}

// ---------------------------------------------------------------------------
// TESTS
// ---------------------------------------------------------------------------
