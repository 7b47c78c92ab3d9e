//! # Shared reference manager
//!
//! References arrive asynchronously from the control loop which queries them, so the manager is
//! shared behind a single lock. Every operation holds the lock for its whole duration, so a
//! query can never see a reference which is only partly replaced.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use std::sync::{Arc, Mutex, MutexGuard};

use comms_if::{msg::PositionTarget, tc::ParamsUpdate};
use log::info;
use util::{
    module::State,
    params::{self, LoadError},
    session::Session,
};

use super::{
    curve::CurveEvaluator, Params, RefMgr, RefMgrError, Reference, StatusReport, TrackingRef,
};
use crate::loc::Pose;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Cloneable handle to a single reference manager.
#[derive(Clone, Default)]
pub struct SharedRefMgr {
    inner: Arc<Mutex<RefMgr>>,
}

/// Input to a cyclic query of the reference manager.
#[derive(Debug, Clone, Copy)]
pub struct InputData {
    /// Current session time
    pub t_s: f64,

    /// Current pose of the vehicle
    pub pose: Pose,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl SharedRefMgr {
    pub fn new(ref_mgr: RefMgr) -> Self {
        Self {
            inner: Arc::new(Mutex::new(ref_mgr)),
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, RefMgr>, RefMgrError> {
        self.inner.lock().map_err(|_| RefMgrError::LockPoisoned)
    }

    /// Panic while holding the lock.
    #[cfg(test)]
    pub(crate) fn poison(&self) {
        let _guard = self.inner.lock();
        panic!("RefMgr lock poisoned on purpose");
    }

    pub fn set_curve_evaluator(
        &self,
        curve_eval: Box<dyn CurveEvaluator + Send>,
    ) -> Result<(), RefMgrError> {
        self.lock()?.curve_eval = curve_eval;
        Ok(())
    }

    pub fn get_reference_used(&self) -> Result<TrackingRef, RefMgrError> {
        Ok(self.lock()?.get_reference_used())
    }

    pub fn has_reference(&self, t_s: f64) -> Result<bool, RefMgrError> {
        Ok(self.lock()?.has_reference(t_s))
    }

    pub fn set_reference_used(
        &self,
        target: TrackingRef,
        t_s: f64,
        force_progress: bool,
    ) -> Result<StatusReport, RefMgrError> {
        self.lock()?.set_reference_used(target, t_s, force_progress)
    }

    pub fn install(&self, reference: Reference, t_s: f64) -> Result<StatusReport, RefMgrError> {
        self.lock()?.install(reference, t_s)
    }

    pub fn install_init_pose(&self, pose: Pose) -> Result<StatusReport, RefMgrError> {
        self.lock()?.install_init_pose(pose)
    }

    pub fn params(&self) -> Result<Params, RefMgrError> {
        Ok(self.lock()?.params().clone())
    }

    pub fn set_params(&self, params: Params) -> Result<(), RefMgrError> {
        self.lock()?.set_params(params);
        Ok(())
    }

    pub fn update_params(&self, update: &ParamsUpdate) -> Result<Params, RefMgrError> {
        let mut ref_mgr = self.lock()?;
        ref_mgr.update_params(update);
        Ok(ref_mgr.params().clone())
    }

    pub fn get_reference(
        &self,
        t_s: f64,
        current: &Pose,
    ) -> Result<(Option<PositionTarget>, StatusReport), RefMgrError> {
        self.lock()?.get_reference(t_s, current)
    }
}

impl State for SharedRefMgr {
    type InitData = &'static str;
    type InitError = LoadError;

    type InputData = InputData;
    type OutputData = Option<PositionTarget>;
    type StatusReport = StatusReport;
    type ProcError = RefMgrError;

    /// Load the parameters from the given file, relative to the params directory.
    fn init(&mut self, init_data: Self::InitData, _session: &Session) -> Result<(), LoadError> {
        let params: Params = params::load(init_data)?;

        info!(
            "RefMgr parameters: radius {} m, yaw accuracy {} rad, hold {} s, fallback {}",
            params.waypoint_radius_m,
            params.waypoint_yaw_accuracy_rad,
            params.waypoint_hold_duration_s,
            params.fallback_to_pose
        );

        let poisoned = match self.inner.lock() {
            Ok(mut ref_mgr) => {
                ref_mgr.set_params(params.clone());
                false
            }
            Err(_) => true,
        };

        // A poisoned manager can't be recovered, start again from the loaded parameters
        if poisoned {
            self.inner = Arc::new(Mutex::new(RefMgr::new(params)));
        }

        Ok(())
    }

    fn proc(
        &mut self,
        input_data: &Self::InputData,
    ) -> Result<(Self::OutputData, Self::StatusReport), Self::ProcError> {
        self.get_reference(input_data.t_s, &input_data.pose)
    }
}

// ---------------------------------------------------------------------------
// TESTS
// ---------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;
    use crate::ref_mgr::{CurveRef, PathRef, ReducedPose};
    use comms_if::msg::Header;
    use nalgebra::Vector3;
    use std::thread;

    #[test]
    fn test_install_from_another_thread() {
        let ref_mgr = SharedRefMgr::default();
        let installer = ref_mgr.clone();

        let handle = thread::spawn(move || {
            let path = PathRef {
                header: Header::new("map", 1.0),
                poses: vec![Pose::from_yaw(Vector3::new(3.0, 0.0, 0.0), 0.0); 4],
            };
            installer.install(Reference::Path(path), 1.0)
        });

        let report = handle.join().unwrap().unwrap();
        assert_eq!(report.tracked_ref, TrackingRef::Path);

        assert_eq!(ref_mgr.get_reference_used().unwrap(), TrackingRef::Path);
        let (target, _) = ref_mgr.get_reference(2.0, &Pose::default()).unwrap();
        assert_eq!(target.unwrap().position.x, 3.0);
    }

    #[test]
    fn test_proc_and_params() {
        let mut ref_mgr = SharedRefMgr::default();

        assert!(matches!(
            ref_mgr.proc(&InputData {
                t_s: 1.0,
                pose: Pose::default()
            }),
            Err(RefMgrError::NoReference)
        ));

        let params = ref_mgr
            .update_params(&ParamsUpdate {
                fallback_to_pose: Some(true),
                ..Default::default()
            })
            .unwrap();
        assert!(params.fallback_to_pose);
        assert!(ref_mgr.params().unwrap().fallback_to_pose);

        ref_mgr.set_params(Params::default()).unwrap();
        assert!(!ref_mgr.params().unwrap().fallback_to_pose);
    }

    #[test]
    fn test_set_curve_evaluator() {
        struct Origin;

        impl CurveEvaluator for Origin {
            fn evaluate(&self, _curve: &CurveRef, _t_s: f64) -> Option<ReducedPose> {
                Some(ReducedPose::new(Vector3::zeros(), 0.0))
            }
        }

        let ref_mgr = SharedRefMgr::default();
        ref_mgr.set_curve_evaluator(Box::new(Origin)).unwrap();

        let curve = CurveRef {
            header: Header::new("map", 1.0),
            t_s: vec![0.0],
            x_m: vec![1.0],
            y_m: vec![1.0],
            z_m: vec![1.0],
            yaw_rad: vec![0.0],
        };
        ref_mgr.install(Reference::Curve(curve), 1.0).unwrap();
        assert!(ref_mgr.has_reference(1.0).unwrap());

        let (target, report) = ref_mgr.get_reference(1.5, &Pose::default()).unwrap();
        assert_eq!(target.unwrap().position.x, 0.0);
        assert_eq!(report.tracked_ref, TrackingRef::Curve);
    }
}
