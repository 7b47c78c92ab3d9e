//! # Curve tracking
//!
//! Curves are evaluated by a pluggable [`CurveEvaluator`]. Until a real evaluator is provided the
//! [`NullCurveEvaluator`] is used, which accepts curves but never produces a setpoint from them.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use comms_if::msg::PositionTarget;

use super::{
    geom::{self, ReducedPose},
    refs::CurveRef,
    RefMgr, RefMgrError, StatusReport, TrackingRef,
};

// ---------------------------------------------------------------------------
// TRAITS
// ---------------------------------------------------------------------------

/// Something able to sample a curve reference at a given time.
pub trait CurveEvaluator {
    /// Evaluate the curve at `t_s`, or `None` if the curve can't be evaluated there.
    fn evaluate(&self, curve: &CurveRef, t_s: f64) -> Option<ReducedPose>;
}

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Evaluator which never produces a pose.
#[derive(Debug, Default, Copy, Clone)]
pub struct NullCurveEvaluator;

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl CurveEvaluator for NullCurveEvaluator {
    fn evaluate(&self, _curve: &CurveRef, _t_s: f64) -> Option<ReducedPose> {
        None
    }
}

impl RefMgr {
    /// Get the setpoint from the curve reference.
    ///
    /// A valid curve which the evaluator can't sample gives no setpoint but is not an error.
    pub(crate) fn get_curve_reference(
        &mut self,
        t_s: f64,
    ) -> Result<(Option<PositionTarget>, StatusReport), RefMgrError> {
        let curve = match self.store.curve() {
            Some(c) if c.validate().is_ok() => c,
            _ => return Err(RefMgrError::NoReference),
        };

        let target = self
            .curve_eval
            .evaluate(curve, t_s)
            .map(|p| geom::target_from_pose(&curve.header.frame_id, t_s, &p));

        Ok((
            target,
            StatusReport {
                tracked_ref: TrackingRef::Curve,
                progress: None,
            },
        ))
    }
}

// ---------------------------------------------------------------------------
// TESTS
// ---------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;
    use crate::{loc::Pose, ref_mgr::Reference};
    use comms_if::msg::Header;
    use nalgebra::Vector3;

    /// Evaluator holding the first sample of the curve.
    struct FirstSample;

    impl CurveEvaluator for FirstSample {
        fn evaluate(&self, curve: &CurveRef, _t_s: f64) -> Option<ReducedPose> {
            Some(ReducedPose::new(
                Vector3::new(curve.x_m[0], curve.y_m[0], curve.z_m[0]),
                curve.yaw_rad[0],
            ))
        }
    }

    fn curve() -> CurveRef {
        CurveRef {
            header: Header::new("map", 1.0),
            t_s: vec![0.0, 1.0],
            x_m: vec![1.0, 2.0],
            y_m: vec![3.0, 4.0],
            z_m: vec![5.0, 6.0],
            yaw_rad: vec![0.5, 0.6],
        }
    }

    #[test]
    fn test_null_evaluator_gives_no_setpoint() {
        let mut mgr = RefMgr::default();
        mgr.install(Reference::Curve(curve()), 2.0).unwrap();

        let (target, report) = mgr.get_reference(2.5, &Pose::default()).unwrap();
        assert!(target.is_none());
        assert_eq!(report.tracked_ref, TrackingRef::Curve);
        assert!(report.progress.is_none());
    }

    #[test]
    fn test_plugged_evaluator() {
        let mut mgr = RefMgr::default().with_curve_evaluator(Box::new(FirstSample));
        mgr.install(Reference::Curve(curve()), 2.0).unwrap();

        let (target, _) = mgr.get_reference(2.5, &Pose::default()).unwrap();
        let target = target.unwrap();
        assert_eq!(target.header.frame_id, "map");
        assert_eq!(target.position.x, 1.0);
        assert_eq!(target.yaw_rad, 0.5);
    }
}
