//! # Path advancer
//!
//! Steps through the waypoints of a path reference as each one is completed.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use comms_if::msg::{Header, PositionTarget, WaypointProgress};
use log::{debug, error, info};

use super::{
    geom::{self, ReducedPose},
    refs::PoseRef,
    waypoint, RefMgr, RefMgrError, StatusReport, TrackingRef,
};
use crate::loc::Pose;

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl RefMgr {
    /// Get the setpoint from the path reference, advancing along the path if the current
    /// waypoint has been completed.
    ///
    /// The setpoint returned is always the waypoint targeted at the start of the call.
    pub(crate) fn get_path_reference(
        &mut self,
        t_s: f64,
        current: &Pose,
    ) -> Result<(PositionTarget, StatusReport), RefMgrError> {
        if !self.store.is_valid(TrackingRef::Path, t_s) {
            return Err(RefMgrError::NoReference);
        }

        let (header, num_poses, index, target) = match self.store.path() {
            Some(track) if track.index < track.num_waypoints() => (
                track.path.header.clone(),
                track.num_waypoints(),
                track.index,
                ReducedPose::from(&track.path.poses[track.index]),
            ),
            _ => return Err(RefMgrError::NoReference),
        };

        let setpoint = geom::target_from_pose(&header.frame_id, t_s, &target);

        let in_tolerance = waypoint::check_waypoint_reached(
            &target,
            &ReducedPose::from(current),
            self.params.waypoint_radius_m,
            self.params.waypoint_yaw_accuracy_rad,
        );

        let mut progress = None;

        if self
            .timer
            .update(in_tolerance, t_s, self.params.waypoint_hold_duration_s)
        {
            let next = index + 1;
            if let Some(track) = self.store.path_mut() {
                track.index = next;
            }
            self.timer.reset();

            progress = Some(WaypointProgress::new(
                &header.frame_id,
                t_s,
                next as u32,
                num_poses as u32,
            ));

            if next >= num_poses {
                self.finish_path(header, num_poses, t_s);
            } else {
                debug!("Path waypoint {} of {} complete", next, num_poses);
            }
        }

        Ok((
            setpoint,
            StatusReport {
                tracked_ref: self.tracked_ref,
                progress,
            },
        ))
    }

    /// Stop tracking a completed path, either holding its final waypoint or tracking nothing.
    fn finish_path(&mut self, header: Header, num_poses: usize, t_s: f64) {
        let last = self
            .store
            .path()
            .and_then(|track| track.path.poses.last().copied());

        let result = match (self.params.fallback_to_pose, last) {
            (true, Some(pose)) => self.install_fallback_pose(PoseRef { header, pose }, t_s),
            _ => self.set_reference_used(TrackingRef::None, t_s, false),
        };

        if let Err(e) = result {
            error!("Could not change tracking at the end of the path: {}", e);
        }

        info!("Finished path reference of {} waypoints", num_poses);

        self.store.reset_path_index();
        self.timer.reset();
    }
}

// ---------------------------------------------------------------------------
// TESTS
// ---------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use crate::loc::Pose;
    use crate::ref_mgr::{PathRef, Reference, RefMgr, RefMgrError, TrackingRef};
    use comms_if::msg::Header;
    use nalgebra::Vector3;

    fn line(n: usize) -> PathRef {
        PathRef {
            header: Header::new("map", 1.0),
            poses: (0..n)
                .map(|i| Pose::from_yaw(Vector3::new(i as f64, 0.0, 0.0), 0.0))
                .collect(),
        }
    }

    #[test]
    fn test_setpoint_is_pre_advance_target() {
        let mut mgr = RefMgr::default();
        mgr.install(Reference::Path(line(3)), 1.0).unwrap();

        let at = Pose::default();
        mgr.get_reference(10.0, &at).unwrap();
        let (target, report) = mgr.get_reference(12.5, &at).unwrap();

        // The completing call still returns the first waypoint
        assert_eq!(target.unwrap().position.x, 0.0);
        assert_eq!(report.progress.unwrap().current, 1);

        let (target, report) = mgr.get_reference(12.6, &at).unwrap();
        assert_eq!(target.unwrap().position.x, 1.0);
        assert!(report.progress.is_none());
    }

    #[test]
    fn test_excursion_resets_dwell() {
        let mut mgr = RefMgr::default();
        mgr.install(Reference::Path(line(2)), 1.0).unwrap();

        let on = Pose::default();
        let off = Pose::from_yaw(Vector3::new(0.0, 3.0, 0.0), 0.0);

        for (t, at) in [(10.0, on), (11.0, off), (11.5, on), (13.4, on)].iter() {
            let (_, report) = mgr.get_reference(*t, at).unwrap();
            assert!(report.progress.is_none());
        }

        let (_, report) = mgr.get_reference(13.6, &on).unwrap();
        assert_eq!(report.progress.unwrap().current, 1);
    }

    #[test]
    fn test_advance_restarts_dwell() {
        let mut mgr = RefMgr::default();
        let close = PathRef {
            header: Header::new("map", 1.0),
            poses: vec![
                Pose::from_yaw(Vector3::new(0.0, 0.0, 0.0), 0.0),
                Pose::from_yaw(Vector3::new(0.2, 0.0, 0.0), 0.0),
            ],
        };
        mgr.install(Reference::Path(close), 1.0).unwrap();

        // Within tolerance of both waypoints throughout
        let at = Pose::from_yaw(Vector3::new(0.1, 0.0, 0.0), 0.0);

        mgr.get_reference(10.0, &at).unwrap();
        let (_, report) = mgr.get_reference(12.1, &at).unwrap();
        assert_eq!(report.progress.unwrap().current, 1);
        assert!(!mgr.timer.is_set());

        // The second waypoint needs its own full hold
        for t in [12.2, 13.0, 14.1].iter() {
            let (target, report) = mgr.get_reference(*t, &at).unwrap();
            assert_eq!(target.unwrap().position.x, 0.2);
            assert!(report.progress.is_none());
        }

        let (_, report) = mgr.get_reference(14.3, &at).unwrap();
        assert_eq!(report.progress.unwrap().current, 2);
        assert_eq!(mgr.get_reference_used(), TrackingRef::None);
    }

    #[test]
    fn test_index_past_end_gives_no_reference() {
        let mut mgr = RefMgr::default();
        mgr.install(Reference::Path(line(2)), 1.0).unwrap();
        mgr.store.path_mut().unwrap().index = 2;

        assert!(matches!(
            mgr.get_reference(10.0, &Pose::default()),
            Err(RefMgrError::NoReference)
        ));
        assert_eq!(mgr.get_reference_used(), TrackingRef::Path);
    }
}
