//! # Setpoint and feedback messages

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use serde::{Deserialize, Serialize};

use super::{Header, Point};

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// A position and yaw target for the vehicle controller.
///
/// The `type_mask` marks which fields the controller must ignore, see the `IGNORE_*` constants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PositionTarget {
    pub header: Header,

    pub coordinate_frame: CoordFrame,

    pub type_mask: u16,

    pub position: Point,

    /// Velocity in meters/second
    pub velocity: Point,

    pub acceleration_or_force: Point,

    pub yaw_rad: f64,

    pub yaw_rate_rads: f64,
}

/// Progress through a discrete reference (a path or a single pose).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WaypointProgress {
    pub header: Header,

    /// Number of waypoints completed so far
    pub current: u32,

    /// Total number of waypoints in the reference
    pub total: u32,

    /// Ratio of `current` to `total`, 1.0 once the reference is complete.
    pub progress: f64,
}

// ------------------------------------------------------------------------------------------------
// ENUMS
// ------------------------------------------------------------------------------------------------

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CoordFrame {
    LocalNed,
    LocalOffsetNed,
    BodyNed,
    BodyOffsetNed,
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl PositionTarget {
    pub const IGNORE_PX: u16 = 1;
    pub const IGNORE_PY: u16 = 2;
    pub const IGNORE_PZ: u16 = 4;
    pub const IGNORE_VX: u16 = 8;
    pub const IGNORE_VY: u16 = 16;
    pub const IGNORE_VZ: u16 = 32;
    pub const IGNORE_AFX: u16 = 64;
    pub const IGNORE_AFY: u16 = 128;
    pub const IGNORE_AFZ: u16 = 256;
    pub const FORCE: u16 = 512;
    pub const IGNORE_YAW: u16 = 1024;
    pub const IGNORE_YAW_RATE: u16 = 2048;

    /// Mask under which only the position and yaw fields are meaningful.
    pub const POSITION_YAW_ONLY: u16 = Self::IGNORE_VX
        | Self::IGNORE_VY
        | Self::IGNORE_VZ
        | Self::IGNORE_AFX
        | Self::IGNORE_AFY
        | Self::IGNORE_AFZ
        | Self::FORCE
        | Self::IGNORE_YAW_RATE;

    /// Build a position and yaw only target.
    ///
    /// Velocity, acceleration and yaw rate are all zeroed.
    pub fn position_yaw(header: Header, position: Point, yaw_rad: f64) -> Self {
        Self {
            header,
            coordinate_frame: CoordFrame::LocalNed,
            type_mask: Self::POSITION_YAW_ONLY,
            position,
            velocity: Point::default(),
            acceleration_or_force: Point::default(),
            yaw_rad,
            yaw_rate_rads: 0.0,
        }
    }

    /// Returns true if the controller should only act on position and yaw.
    pub fn is_position_yaw_only(&self) -> bool {
        self.type_mask == Self::POSITION_YAW_ONLY
    }
}

impl WaypointProgress {
    pub fn new(frame_id: &str, stamp_s: f64, current: u32, total: u32) -> Self {
        let progress = match total {
            0 => 0.0,
            n => current as f64 / n as f64,
        };

        Self {
            header: Header::new(frame_id, stamp_s),
            current,
            total,
            progress,
        }
    }
}

// ------------------------------------------------------------------------------------------------
// TESTS
// ------------------------------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_position_yaw_target() {
        let target = PositionTarget::position_yaw(
            Header::new("map", 3.0),
            Point::new(1.0, 2.0, 3.0),
            0.5,
        );

        assert!(target.is_position_yaw_only());
        assert_eq!(target.velocity, Point::default());
        assert_eq!(target.acceleration_or_force, Point::default());
        assert_eq!(target.yaw_rate_rads, 0.0);
        assert_eq!(target.type_mask & PositionTarget::IGNORE_PX, 0);
        assert_eq!(target.type_mask & PositionTarget::IGNORE_YAW, 0);
    }

    #[test]
    fn test_progress_ratio() {
        assert_eq!(WaypointProgress::new("map", 1.0, 1, 4).progress, 0.25);
        assert_eq!(WaypointProgress::new("map", 1.0, 2, 2).progress, 1.0);
        assert_eq!(WaypointProgress::new("map", 1.0, 0, 0).progress, 0.0);
    }
}
