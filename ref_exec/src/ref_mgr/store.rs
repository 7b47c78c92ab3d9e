//! # Reference store
//!
//! Holds the latest payload of each reference type. Payloads are only ever replaced whole, and
//! the path index and pose reached flag are stored beside the payload they belong to.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use super::{
    refs::{CurveRef, PathRef, PayloadError, PoseRef},
    TrackingRef,
};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default)]
pub struct RefStore {
    curve: Option<CurveRef>,
    path: Option<PathTrack>,
    pose: Option<PoseTrack>,
}

/// A path along with the index of the waypoint currently being targeted.
#[derive(Debug, Clone)]
pub struct PathTrack {
    pub path: PathRef,
    pub index: usize,
}

/// A pose along with whether or not it has been reached.
#[derive(Debug, Clone)]
pub struct PoseTrack {
    pub pose: PoseRef,
    pub reached: bool,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl RefStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the curve. An invalid curve leaves the previous one in place.
    pub fn install_curve(&mut self, curve: CurveRef) -> Result<(), PayloadError> {
        curve.validate()?;
        self.curve = Some(curve);
        Ok(())
    }

    /// Replace the path, targeting its first waypoint. An invalid path leaves the previous one in
    /// place.
    pub fn install_path(&mut self, path: PathRef) -> Result<(), PayloadError> {
        path.validate()?;
        self.path = Some(PathTrack { path, index: 0 });
        Ok(())
    }

    /// Replace the pose. An invalid pose leaves the previous one in place.
    pub fn install_pose(&mut self, pose: PoseRef, mark_reached: bool) -> Result<(), PayloadError> {
        pose.validate()?;
        self.pose = Some(PoseTrack {
            pose,
            reached: mark_reached,
        });
        Ok(())
    }

    /// Whether the reference of the given type can currently be tracked.
    ///
    /// There is nothing to track for `TrackingRef::None` so it is never valid.
    pub fn is_valid(&self, tracking: TrackingRef, _t_s: f64) -> bool {
        match tracking {
            // TODO: reject curves whose final sample time has passed once curves are evaluated.
            TrackingRef::Curve => self.curve.as_ref().map_or(false, |c| c.validate().is_ok()),
            TrackingRef::Path => self.path.as_ref().map_or(false, |p| p.path.validate().is_ok()),
            TrackingRef::Pose => self.pose.as_ref().map_or(false, |p| p.pose.validate().is_ok()),
            TrackingRef::None => false,
        }
    }

    pub fn curve(&self) -> Option<&CurveRef> {
        self.curve.as_ref()
    }

    pub fn path(&self) -> Option<&PathTrack> {
        self.path.as_ref()
    }

    pub fn path_mut(&mut self) -> Option<&mut PathTrack> {
        self.path.as_mut()
    }

    pub fn pose(&self) -> Option<&PoseTrack> {
        self.pose.as_ref()
    }

    /// Whether the stored pose has been reached, false if there is no pose.
    pub fn pose_reached(&self) -> bool {
        self.pose.as_ref().map_or(false, |p| p.reached)
    }

    pub fn set_pose_reached(&mut self, reached: bool) {
        if let Some(p) = self.pose.as_mut() {
            p.reached = reached;
        }
    }

    /// Return to the start of the stored path.
    pub fn reset_path_index(&mut self) {
        if let Some(p) = self.path.as_mut() {
            p.index = 0;
        }
    }
}

impl PathTrack {
    pub fn num_waypoints(&self) -> usize {
        self.path.poses.len()
    }
}

// ---------------------------------------------------------------------------
// TESTS
// ---------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;
    use crate::loc::Pose;
    use comms_if::msg::Header;

    fn path(stamp_s: f64, n: usize) -> PathRef {
        PathRef {
            header: Header::new("map", stamp_s),
            poses: vec![Pose::default(); n],
        }
    }

    fn pose(stamp_s: f64) -> PoseRef {
        PoseRef {
            header: Header::new("map", stamp_s),
            pose: Pose::default(),
        }
    }

    #[test]
    fn test_empty_store_is_invalid() {
        let store = RefStore::new();

        for t in [
            TrackingRef::None,
            TrackingRef::Curve,
            TrackingRef::Path,
            TrackingRef::Pose,
        ]
        .iter()
        {
            assert!(!store.is_valid(*t, 10.0));
        }
        assert!(!store.pose_reached());
    }

    #[test]
    fn test_invalid_install_keeps_previous() {
        let mut store = RefStore::new();

        store.install_path(path(1.0, 3)).unwrap();
        store.path_mut().unwrap().index = 2;

        assert_eq!(store.install_path(path(2.0, 0)), Err(PayloadError::EmptyPath));
        assert_eq!(store.install_path(path(0.0, 5)), Err(PayloadError::NoTimestamp));

        let track = store.path().unwrap();
        assert_eq!(track.num_waypoints(), 3);
        assert_eq!(track.index, 2);
        assert_eq!(track.path.header.stamp_s, 1.0);
        assert!(store.is_valid(TrackingRef::Path, 10.0));
    }

    #[test]
    fn test_install_resets_index_and_reached() {
        let mut store = RefStore::new();

        store.install_path(path(1.0, 3)).unwrap();
        store.path_mut().unwrap().index = 1;
        store.install_path(path(2.0, 2)).unwrap();
        assert_eq!(store.path().unwrap().index, 0);

        store.install_pose(pose(1.0), false).unwrap();
        store.set_pose_reached(true);
        assert!(store.pose_reached());

        store.install_pose(pose(2.0), false).unwrap();
        assert!(!store.pose_reached());

        store.install_pose(pose(3.0), true).unwrap();
        assert!(store.pose_reached());
    }
}
