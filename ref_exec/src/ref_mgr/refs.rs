//! # Reference payloads
//!
//! The three kinds of reference which can be tracked, and the rules deciding whether each is
//! valid.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use comms_if::msg::{self, Header};

use super::TrackingRef;
use crate::loc::Pose;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// A curve reference given as samples against time.
#[derive(Debug, Clone, PartialEq)]
pub struct CurveRef {
    pub header: Header,
    pub t_s: Vec<f64>,
    pub x_m: Vec<f64>,
    pub y_m: Vec<f64>,
    pub z_m: Vec<f64>,
    pub yaw_rad: Vec<f64>,
}

/// A discrete path reference.
#[derive(Debug, Clone, PartialEq)]
pub struct PathRef {
    pub header: Header,
    pub poses: Vec<Pose>,
}

/// A single discrete pose reference.
#[derive(Debug, Clone, PartialEq)]
pub struct PoseRef {
    pub header: Header,
    pub pose: Pose,
}

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// Any one of the reference payloads.
#[derive(Debug, Clone, PartialEq)]
pub enum Reference {
    Curve(CurveRef),
    Path(PathRef),
    Pose(PoseRef),
}

/// Reasons a reference payload can be invalid.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PayloadError {
    #[error("The reference has no timestamp")]
    NoTimestamp,

    #[error("The path contains no poses")]
    EmptyPath,

    #[error("The curve contains no samples")]
    EmptyCurve,

    #[error("The curve has {found} {axis} samples but {expected} time samples")]
    CurveLengthMismatch {
        axis: &'static str,
        expected: usize,
        found: usize,
    },
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl CurveRef {
    /// A curve is valid if it is stamped and every axis has as many samples as there are times.
    pub fn validate(&self) -> Result<(), PayloadError> {
        if !self.header.is_stamped() {
            return Err(PayloadError::NoTimestamp);
        }

        let expected = self.t_s.len();
        if expected == 0 {
            return Err(PayloadError::EmptyCurve);
        }

        let axes = [
            ("x", self.x_m.len()),
            ("y", self.y_m.len()),
            ("z", self.z_m.len()),
            ("yaw", self.yaw_rad.len()),
        ];

        for &(axis, found) in axes.iter() {
            if found != expected {
                return Err(PayloadError::CurveLengthMismatch {
                    axis,
                    expected,
                    found,
                });
            }
        }

        Ok(())
    }
}

impl PathRef {
    /// A path is valid if it is stamped and contains at least one pose.
    pub fn validate(&self) -> Result<(), PayloadError> {
        if !self.header.is_stamped() {
            return Err(PayloadError::NoTimestamp);
        }

        if self.poses.is_empty() {
            return Err(PayloadError::EmptyPath);
        }

        Ok(())
    }
}

impl PoseRef {
    /// A pose is valid if it is stamped.
    pub fn validate(&self) -> Result<(), PayloadError> {
        if !self.header.is_stamped() {
            return Err(PayloadError::NoTimestamp);
        }

        Ok(())
    }
}

impl Reference {
    /// The tracking type which follows this reference.
    pub fn tracking_ref(&self) -> TrackingRef {
        match self {
            Reference::Curve(_) => TrackingRef::Curve,
            Reference::Path(_) => TrackingRef::Path,
            Reference::Pose(_) => TrackingRef::Pose,
        }
    }
}

impl From<msg::Curve> for CurveRef {
    fn from(c: msg::Curve) -> Self {
        Self {
            header: c.header,
            t_s: c.t_s,
            x_m: c.x_m,
            y_m: c.y_m,
            z_m: c.z_m,
            yaw_rad: c.yaw_rad,
        }
    }
}

impl From<msg::Path> for PathRef {
    fn from(p: msg::Path) -> Self {
        Self {
            header: p.header,
            poses: p.poses.iter().map(|ps| Pose::from(&ps.pose)).collect(),
        }
    }
}

impl From<msg::PoseStamped> for PoseRef {
    fn from(p: msg::PoseStamped) -> Self {
        Self {
            pose: Pose::from(&p.pose),
            header: p.header,
        }
    }
}

// ---------------------------------------------------------------------------
// TESTS
// ---------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;

    fn curve(stamp_s: f64, n: usize) -> CurveRef {
        CurveRef {
            header: Header::new("map", stamp_s),
            t_s: vec![0.0; n],
            x_m: vec![0.0; n],
            y_m: vec![0.0; n],
            z_m: vec![0.0; n],
            yaw_rad: vec![0.0; n],
        }
    }

    #[test]
    fn test_curve_validity() {
        assert_eq!(curve(1.0, 3).validate(), Ok(()));
        assert_eq!(curve(0.0, 3).validate(), Err(PayloadError::NoTimestamp));
        assert_eq!(curve(1.0, 0).validate(), Err(PayloadError::EmptyCurve));

        let mut c = curve(1.0, 3);
        c.yaw_rad.pop();
        assert_eq!(
            c.validate(),
            Err(PayloadError::CurveLengthMismatch {
                axis: "yaw",
                expected: 3,
                found: 2
            })
        );
    }

    #[test]
    fn test_path_and_pose_validity() {
        let path = PathRef {
            header: Header::new("map", 2.0),
            poses: vec![Pose::default()],
        };
        assert_eq!(path.validate(), Ok(()));

        let empty = PathRef {
            poses: vec![],
            ..path.clone()
        };
        assert_eq!(empty.validate(), Err(PayloadError::EmptyPath));

        let unstamped = PathRef {
            header: Header::new("map", 0.0),
            ..path
        };
        assert_eq!(unstamped.validate(), Err(PayloadError::NoTimestamp));

        let pose = PoseRef {
            header: Header::new("map", 0.0),
            pose: Pose::default(),
        };
        assert_eq!(pose.validate(), Err(PayloadError::NoTimestamp));
    }

    #[test]
    fn test_from_path_msg() {
        let path = PathRef::from(msg::Path {
            header: Header::new("map", 3.0),
            poses: vec![msg::PoseStamped::default(); 4],
        });

        assert_eq!(path.poses.len(), 4);
        assert_eq!(path.header.frame_id, "map");
        assert_eq!(path.poses[0], Pose::default());
    }
}
