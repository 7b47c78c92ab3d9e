//! # Reference manager module
//!
//! The reference manager decides which setpoint the vehicle should be commanded with on each
//! control cycle. Three sources of reference compete for that job:
//!
//! - A curve, given as samples of position and yaw against time.
//! - A discrete path, a sequence of poses which are visited in turn.
//! - A single discrete pose.
//!
//! Exactly one of these (or none at all) is tracked at any time. Installing a new reference
//! switches tracking to it, and tracking can also be switched directly as long as the requested
//! reference is valid.
//!
//! Discrete references (paths and poses) are progressed using waypoint completion. A waypoint is
//! reached when the vehicle is inside both the waypoint radius and the yaw accuracy, and it is
//! complete once the vehicle has stayed reached for the whole hold duration. Leaving the
//! tolerance at any point restarts the hold. When the last waypoint of a path is complete the
//! manager either stops tracking or, if `fallback_to_pose` is set, holds the last waypoint as a
//! pose reference.
//!
//! Progress through a discrete reference is reported as a [`WaypointProgress`] in the
//! [`StatusReport`] of the operation which caused it.

// ---------------------------------------------------------------------------
// MODULES
// ---------------------------------------------------------------------------

pub mod curve;
pub mod geom;
mod params;
mod path_adv;
mod pose_track;
pub mod refs;
pub mod shared;
mod state;
pub mod store;
pub mod waypoint;

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use comms_if::{msg::WaypointProgress, tc::TrackingType};

pub use curve::{CurveEvaluator, NullCurveEvaluator};
pub use geom::ReducedPose;
pub use params::Params;
pub use refs::{CurveRef, PathRef, PayloadError, PoseRef, Reference};
pub use shared::{InputData, SharedRefMgr};
pub use state::RefMgr;

// ---------------------------------------------------------------------------
// CONSTANTS
// ---------------------------------------------------------------------------

/// Stamp given to the initial pose reference so that it is valid as soon as it's installed.
pub const INIT_POSE_STAMP_S: f64 = 1.0;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Report on a reference manager operation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StatusReport {
    /// The reference being tracked once the operation is complete
    pub tracked_ref: TrackingRef,

    /// Discrete progress notification raised by the operation, if any.
    pub progress: Option<WaypointProgress>,
}

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// The type of reference currently being tracked.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum TrackingRef {
    None,
    Curve,
    Path,
    Pose,
}

/// Potential errors that can occur during reference manager operations.
///
/// None of these are fatal, they describe references which can't be used right now.
#[derive(Debug, thiserror::Error)]
pub enum RefMgrError {
    #[error("The {0:?} reference is invalid: {1}")]
    InvalidPayload(TrackingRef, PayloadError),

    #[error("Cannot track the {0:?} reference as it is not currently valid")]
    UnavailableReference(TrackingRef),

    #[error("No reference is available to track")]
    NoReference,

    #[error("The reference manager lock has been poisoned")]
    LockPoisoned,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Default for TrackingRef {
    fn default() -> Self {
        TrackingRef::None
    }
}

impl From<TrackingType> for TrackingRef {
    fn from(t: TrackingType) -> Self {
        match t {
            TrackingType::None => TrackingRef::None,
            TrackingType::Curve => TrackingRef::Curve,
            TrackingType::Path => TrackingRef::Path,
            TrackingType::Pose => TrackingRef::Pose,
        }
    }
}
