//! # Telecommand processor module
//!
//! The telecommand processor hands references, tracking requests and parameter updates coming
//! from any source to the reference manager.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use log::{debug, info, warn};

// Internal
use crate::ref_mgr::{Reference, RefMgrError, SharedRefMgr, StatusReport, TrackingRef};
use comms_if::tc::Tc;

// ---------------------------------------------------------------------------
// PUBLIC FUNCTIONS
// ---------------------------------------------------------------------------

/// Execute a telecommand at session time `t_s`.
///
/// Rejected TCs are logged and otherwise ignored, the previous reference stays in use.
pub fn exec(ref_mgr: &SharedRefMgr, tc: Tc, t_s: f64) -> Result<StatusReport, RefMgrError> {
    let result = match tc {
        Tc::Curve(c) => ref_mgr.install(Reference::Curve(c.into()), t_s),
        Tc::Path(p) => ref_mgr.install(Reference::Path(p.into()), t_s),
        Tc::Pose(p) => ref_mgr.install(Reference::Pose(p.into()), t_s),
        Tc::SetTracking(t) => {
            debug!("Recieved SetTracking({:?}) command", t);
            ref_mgr.set_reference_used(TrackingRef::from(t), t_s, false)
        }
        Tc::Params(u) => ref_mgr.update_params(&u).and_then(|params| {
            info!("RefMgr parameters updated: {:?}", params);
            ref_mgr
                .get_reference_used()
                .map(|tracked_ref| StatusReport {
                    tracked_ref,
                    progress: None,
                })
        }),
    };

    match &result {
        Ok(report) => {
            if let Some(p) = &report.progress {
                info!(
                    "Waypoint progress: {}/{} ({:.0}%)",
                    p.current,
                    p.total,
                    p.progress * 100.0
                );
            }
        }
        Err(RefMgrError::InvalidPayload(t, e)) => {
            warn!("{:?} reference invalid, ignoring: {}", t, e)
        }
        Err(e) => warn!("Could not execute TC: {}", e),
    }

    result
}

// ---------------------------------------------------------------------------
// TESTS
// ---------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_exec_script_tcs() {
        let ref_mgr = SharedRefMgr::default();

        let pose = Tc::from_json(
            r#"{"type": "POSE", "payload": {
                "header": {"stamp_s": 2.0, "frame_id": "map"},
                "pose": {"position": {"x": 1.0, "y": 1.0, "z": 1.0}}
            }}"#,
        )
        .unwrap();
        let report = exec(&ref_mgr, pose, 2.0).unwrap();
        assert_eq!(report.tracked_ref, TrackingRef::Pose);
        assert_eq!(report.progress.unwrap().current, 0);

        // No path has been given, so tracking stays on the pose
        let set_path = Tc::from_json(r#"{"type": "SET_TRACKING", "payload": "PATH"}"#).unwrap();
        assert!(matches!(
            exec(&ref_mgr, set_path, 3.0),
            Err(RefMgrError::UnavailableReference(TrackingRef::Path))
        ));
        assert_eq!(ref_mgr.get_reference_used().unwrap(), TrackingRef::Pose);

        let empty_path = Tc::from_json(
            r#"{"type": "PATH", "payload": {"header": {"stamp_s": 4.0}, "poses": []}}"#,
        )
        .unwrap();
        assert!(matches!(
            exec(&ref_mgr, empty_path, 4.0),
            Err(RefMgrError::InvalidPayload(TrackingRef::Path, _))
        ));

        let params =
            Tc::from_json(r#"{"type": "PARAMS", "payload": {"waypoint_hold_duration_s": 0.5}}"#)
                .unwrap();
        let report = exec(&ref_mgr, params, 5.0).unwrap();
        assert_eq!(report.tracked_ref, TrackingRef::Pose);
        assert_eq!(ref_mgr.params().unwrap().waypoint_hold_duration_s, 0.5);

        let stop = Tc::from_json(r#"{"type": "SET_TRACKING", "payload": "NONE"}"#).unwrap();
        assert_eq!(exec(&ref_mgr, stop, 6.0).unwrap().tracked_ref, TrackingRef::None);
    }

    #[test]
    fn test_params_tc_on_poisoned_manager() {
        let ref_mgr = SharedRefMgr::default();

        let poisoner = ref_mgr.clone();
        let _ = std::thread::spawn(move || poisoner.poison()).join();

        let params =
            Tc::from_json(r#"{"type": "PARAMS", "payload": {"fallback_to_pose": true}}"#)
                .unwrap();
        assert!(matches!(
            exec(&ref_mgr, params, 1.0),
            Err(RefMgrError::LockPoisoned)
        ));
    }
}
