//! # Pose tracker

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use comms_if::msg::{PositionTarget, WaypointProgress};
use log::{error, info};

use super::{
    geom::{self, ReducedPose},
    waypoint, RefMgr, RefMgrError, StatusReport, TrackingRef,
};
use crate::loc::Pose;

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl RefMgr {
    /// Get the setpoint from the pose reference.
    ///
    /// Once the pose has been reached it is held without any further checks.
    pub(crate) fn get_pose_reference(
        &mut self,
        t_s: f64,
        current: &Pose,
    ) -> Result<(PositionTarget, StatusReport), RefMgrError> {
        let (frame_id, target, reached) = match self.store.pose() {
            Some(track) if track.pose.validate().is_ok() => (
                track.pose.header.frame_id.clone(),
                ReducedPose::from(&track.pose.pose),
                track.reached,
            ),
            _ => return Err(RefMgrError::NoReference),
        };

        let mut progress = None;

        if !reached {
            let in_tolerance = waypoint::check_waypoint_reached(
                &target,
                &ReducedPose::from(current),
                self.params.waypoint_radius_m,
                self.params.waypoint_yaw_accuracy_rad,
            );

            if self
                .timer
                .update(in_tolerance, t_s, self.params.waypoint_hold_duration_s)
            {
                progress = Some(WaypointProgress::new(&frame_id, t_s, 1, 1));

                if !self.params.fallback_to_pose {
                    if let Err(e) = self.set_reference_used(TrackingRef::None, t_s, false) {
                        error!("Could not stop tracking the reached pose: {}", e);
                    }
                }

                info!("Reached pose reference");

                self.store.set_pose_reached(true);
                self.timer.reset();
            }
        }

        Ok((
            geom::target_from_pose(&frame_id, t_s, &target),
            StatusReport {
                tracked_ref: self.tracked_ref,
                progress,
            },
        ))
    }
}
