//! Reference manager parameters

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use comms_if::tc::ParamsUpdate;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Params {
    /// Distance from a waypoint inside which it is reached
    pub waypoint_radius_m: f64,

    /// Yaw error inside which a waypoint is reached
    pub waypoint_yaw_accuracy_rad: f64,

    /// Time a waypoint must be continuously reached for before it is complete
    pub waypoint_hold_duration_s: f64,

    /// If true the last waypoint of a path, or a pose once reached, is held indefinitely instead
    /// of tracking stopping.
    pub fallback_to_pose: bool,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Params {
    /// Apply a partial update, leaving any field not present in the update untouched.
    pub fn apply(&mut self, update: &ParamsUpdate) {
        if let Some(r) = update.waypoint_radius_m {
            self.waypoint_radius_m = r;
        }
        if let Some(y) = update.waypoint_yaw_accuracy_rad {
            self.waypoint_yaw_accuracy_rad = y;
        }
        if let Some(h) = update.waypoint_hold_duration_s {
            self.waypoint_hold_duration_s = h;
        }
        if let Some(f) = update.fallback_to_pose {
            self.fallback_to_pose = f;
        }
    }
}

impl Default for Params {
    fn default() -> Self {
        Self {
            waypoint_radius_m: 0.5,
            waypoint_yaw_accuracy_rad: 0.1,
            waypoint_hold_duration_s: 2.0,
            fallback_to_pose: false,
        }
    }
}

// ---------------------------------------------------------------------------
// TESTS
// ---------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_params_from_toml() {
        let params: Params = toml::from_str(
            r#"
            waypoint_radius_m = 0.25
            waypoint_yaw_accuracy_rad = 0.05
            waypoint_hold_duration_s = 1.5
            fallback_to_pose = true
            "#,
        )
        .unwrap();

        assert_eq!(params.waypoint_radius_m, 0.25);
        assert_eq!(params.waypoint_hold_duration_s, 1.5);
        assert!(params.fallback_to_pose);
    }

    #[test]
    fn test_partial_update() {
        let mut params = Params::default();

        params.apply(&ParamsUpdate {
            waypoint_hold_duration_s: Some(4.0),
            fallback_to_pose: Some(true),
            ..Default::default()
        });

        assert_eq!(params.waypoint_radius_m, 0.5);
        assert_eq!(params.waypoint_yaw_accuracy_rad, 0.1);
        assert_eq!(params.waypoint_hold_duration_s, 4.0);
        assert!(params.fallback_to_pose);
    }
}
