//! # Message definitions
//!
//! Messages exchanged between the reference sources, the reference manager and the controller
//! which consumes the setpoints. All times are given in seconds of the session clock.

// ------------------------------------------------------------------------------------------------
// MODULES
// ------------------------------------------------------------------------------------------------

pub mod geom;
pub mod setpoint;
pub mod traj;

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use serde::{Deserialize, Serialize};

pub use geom::*;
pub use setpoint::*;
pub use traj::*;

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// Header common to all stamped messages.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Header {
    /// Time the message was produced, in seconds.
    ///
    /// A stamp of zero (or less) means the message was never stamped.
    #[serde(default)]
    pub stamp_s: f64,

    /// Name of the coordinate frame the message is expressed in.
    #[serde(default)]
    pub frame_id: String,
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl Header {
    pub fn new(frame_id: &str, stamp_s: f64) -> Self {
        Self {
            stamp_s,
            frame_id: String::from(frame_id),
        }
    }

    /// Returns true if the header carries a (non-zero) timestamp.
    pub fn is_stamped(&self) -> bool {
        self.stamp_s > 0.0
    }
}
