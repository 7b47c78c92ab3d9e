//! # Trajectory reference messages
//!
//! The inbound reference sources: a sampled curve, a discrete path of poses, and a single pose
//! (see [`super::PoseStamped`]).

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use serde::{Deserialize, Serialize};

use super::{Header, PoseStamped};

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// A parametric curve given as per-axis samples against time.
///
/// All sample vectors should be the same length as `t_s`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Curve {
    #[serde(default)]
    pub header: Header,

    /// Sample times in seconds
    pub t_s: Vec<f64>,

    pub x_m: Vec<f64>,
    pub y_m: Vec<f64>,
    pub z_m: Vec<f64>,
    pub yaw_rad: Vec<f64>,
}

/// An ordered sequence of poses to be visited in turn.
///
/// The header of each individual pose is ignored, the path header applies to them all.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Path {
    #[serde(default)]
    pub header: Header,

    pub poses: Vec<PoseStamped>,
}
