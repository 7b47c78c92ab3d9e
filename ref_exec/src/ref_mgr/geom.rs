//! # Reference geometry
//!
//! Conversions between full poses and the reduced (position, yaw) poses which references are
//! tracked in, and the distance measures used for waypoint completion.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use comms_if::msg::{self, Header, Point, PositionTarget};
use nalgebra::{Quaternion, UnitQuaternion, Vector3};

use crate::loc::Pose;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// A pose reduced to position and yaw, roll and pitch are discarded.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ReducedPose {
    pub position_m: Vector3<f64>,
    pub yaw_rad: f64,
}

// ---------------------------------------------------------------------------
// PUBLIC FUNCTIONS
// ---------------------------------------------------------------------------

/// Extract the yaw of an orientation in radians, in the range [-pi, pi].
pub fn yaw_from_quaternion(q: &UnitQuaternion<f64>) -> f64 {
    // Storage order is [x, y, z, w]
    let c = &q.quaternion().coords;
    let (x, y, z, w) = (c[0], c[1], c[2], c[3]);

    let siny = 2.0 * (w * z + x * y);
    let cosy = 1.0 - 2.0 * (y * y + z * z);

    siny.atan2(cosy)
}

/// Euclidian distance between two positions.
pub fn radial_dist(a: &Vector3<f64>, b: &Vector3<f64>) -> f64 {
    (a - b).norm()
}

/// Angular distance between two yaws.
///
/// Differences greater than pi are folded by subtracting pi. Note that this is not the shortest
/// arc between the yaws (that would be `2pi - diff`), for a difference just under 2pi the result
/// is just under pi.
pub fn rotation_dist(a: f64, b: f64) -> f64 {
    let rad = (a - b).abs();

    if rad > std::f64::consts::PI {
        rad - std::f64::consts::PI
    } else {
        rad
    }
}

/// Build a position and yaw only setpoint from a reduced pose.
pub fn target_from_pose(frame_id: &str, stamp_s: f64, pose: &ReducedPose) -> PositionTarget {
    PositionTarget::position_yaw(
        Header::new(frame_id, stamp_s),
        Point::new(pose.position_m.x, pose.position_m.y, pose.position_m.z),
        pose.yaw_rad,
    )
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl ReducedPose {
    pub fn new(position_m: Vector3<f64>, yaw_rad: f64) -> Self {
        Self {
            position_m,
            yaw_rad,
        }
    }
}

impl From<&Pose> for ReducedPose {
    fn from(pose: &Pose) -> Self {
        Self {
            position_m: pose.position_m,
            yaw_rad: yaw_from_quaternion(&pose.attitude_q),
        }
    }
}

impl From<&msg::Pose> for Pose {
    /// The orientation is normalised on the way in.
    fn from(p: &msg::Pose) -> Self {
        let q = &p.orientation;

        Pose {
            position_m: Vector3::new(p.position.x, p.position.y, p.position.z),
            attitude_q: UnitQuaternion::new_normalize(Quaternion::new(q.w, q.x, q.y, q.z)),
        }
    }
}

// ---------------------------------------------------------------------------
// TESTS
// ---------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;
    use std::f64::consts::PI;

    #[test]
    fn test_yaw_ignores_roll_and_pitch() {
        let level = UnitQuaternion::from_euler_angles(0.0, 0.0, 1.0);
        let tilted = UnitQuaternion::from_euler_angles(0.3, -0.2, 1.0);

        assert!((yaw_from_quaternion(&level) - 1.0).abs() < 1e-9);
        assert!((yaw_from_quaternion(&tilted) - 1.0).abs() < 1e-9);
        assert!((yaw_from_quaternion(&UnitQuaternion::from_euler_angles(0.0, 0.0, -2.5)) + 2.5)
            .abs()
            < 1e-9);
    }

    #[test]
    fn test_msg_pose_is_normalised() {
        // A 90 degree yaw, scaled by 4
        let half = (PI / 4.0).sin() * 4.0;
        let p = msg::Pose {
            position: Point::new(1.0, 2.0, 3.0),
            orientation: msg::Quaternion {
                x: 0.0,
                y: 0.0,
                z: half,
                w: half,
            },
        };

        let pose = Pose::from(&p);
        assert!((pose.attitude_q.quaternion().norm() - 1.0).abs() < 1e-12);

        let reduced = ReducedPose::from(&pose);
        assert_eq!(reduced.position_m, Vector3::new(1.0, 2.0, 3.0));
        assert!((reduced.yaw_rad - PI / 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_radial_dist() {
        let a = Vector3::new(1.0, 2.0, 2.0);
        let b = Vector3::zeros();

        assert_eq!(radial_dist(&a, &b), 3.0);
        assert_eq!(radial_dist(&b, &a), 3.0);
        assert_eq!(radial_dist(&a, &a), 0.0);
    }

    #[test]
    fn test_rotation_dist_folds_by_pi() {
        assert!((rotation_dist(0.5, 0.2) - 0.3).abs() < 1e-12);
        assert!((rotation_dist(0.2, 0.5) - 0.3).abs() < 1e-12);

        // 3.0 and -3.0 are only 2pi - 6 apart on the circle, but the fold by pi reports 6 - pi.
        let folded = rotation_dist(3.0, -3.0);
        assert!((folded - (6.0 - PI)).abs() < 1e-12);
        assert!(folded > 2.0 * PI - 6.0);
    }

    #[test]
    fn test_target_from_pose() {
        let target = target_from_pose(
            "map",
            12.5,
            &ReducedPose::new(Vector3::new(1.0, -1.0, 2.0), 0.75),
        );

        assert_eq!(target.header, Header::new("map", 12.5));
        assert_eq!(target.position, Point::new(1.0, -1.0, 2.0));
        assert_eq!(target.yaw_rad, 0.75);
        assert!(target.is_position_yaw_only());
        assert_eq!(target.velocity, Point::default());
    }
}
