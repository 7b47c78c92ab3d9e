//! # Reference manager state
//!
//! [`RefMgr`] owns the stored references, the type of reference being tracked and the waypoint
//! timer, and handles the transitions between tracked reference types.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use comms_if::{
    msg::{Header, PositionTarget, WaypointProgress},
    tc::ParamsUpdate,
};
use log::{error, info};

use super::{
    curve::{CurveEvaluator, NullCurveEvaluator},
    params::Params,
    refs::{PoseRef, Reference},
    store::RefStore,
    waypoint::WaypointTimer,
    RefMgrError, StatusReport, TrackingRef, INIT_POSE_STAMP_S,
};
use crate::loc::Pose;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// The reference manager.
///
/// All operations complete immediately. `RefMgr` is not itself thread safe, use
/// [`super::SharedRefMgr`] when references and queries arrive from different threads.
pub struct RefMgr {
    pub(crate) params: Params,

    pub(crate) tracked_ref: TrackingRef,

    pub(crate) store: RefStore,

    /// Shared between path and pose tracking, only one can be active at a time.
    pub(crate) timer: WaypointTimer,

    pub(crate) curve_eval: Box<dyn CurveEvaluator + Send>,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl RefMgr {
    /// Create a new manager tracking nothing, using the null curve evaluator.
    pub fn new(params: Params) -> Self {
        Self {
            params,
            tracked_ref: TrackingRef::None,
            store: RefStore::new(),
            timer: WaypointTimer::new(),
            curve_eval: Box::new(NullCurveEvaluator),
        }
    }

    /// Replace the evaluator used to produce setpoints from curves.
    pub fn with_curve_evaluator(mut self, curve_eval: Box<dyn CurveEvaluator + Send>) -> Self {
        self.curve_eval = curve_eval;
        self
    }

    pub fn params(&self) -> &Params {
        &self.params
    }

    pub fn set_params(&mut self, params: Params) {
        self.params = params;
    }

    /// Apply a partial parameter update, effective from the next query.
    pub fn update_params(&mut self, update: &ParamsUpdate) {
        self.params.apply(update);
    }

    pub fn get_reference_used(&self) -> TrackingRef {
        self.tracked_ref
    }

    /// Whether any reference could be tracked at `t_s`.
    pub fn has_reference(&self, t_s: f64) -> bool {
        self.has_curve_reference(t_s) || self.has_path_reference() || self.has_pose_reference()
    }

    pub fn has_curve_reference(&self, t_s: f64) -> bool {
        self.store.is_valid(TrackingRef::Curve, t_s)
    }

    pub fn has_path_reference(&self) -> bool {
        self.store.is_valid(TrackingRef::Path, 0.0)
    }

    pub fn has_pose_reference(&self) -> bool {
        self.store.is_valid(TrackingRef::Pose, 0.0)
    }

    /// Request that the given reference type be tracked.
    ///
    /// Requesting the type already being tracked, or `None`, always succeeds. Any other type is
    /// only accepted if a valid reference of that type is stored. Switching into a path, or into
    /// a pose which hasn't been reached, raises a progress notification. `force_progress` raises
    /// one even if the type doesn't change.
    pub fn set_reference_used(
        &mut self,
        target: TrackingRef,
        t_s: f64,
        force_progress: bool,
    ) -> Result<StatusReport, RefMgrError> {
        let mut notify = force_progress;

        if target != self.tracked_ref {
            match target {
                TrackingRef::None => (),
                TrackingRef::Path => {
                    if !self.store.is_valid(target, t_s) {
                        return Err(RefMgrError::UnavailableReference(target));
                    }
                    notify = true;
                }
                TrackingRef::Pose => {
                    if !self.store.is_valid(target, t_s) {
                        return Err(RefMgrError::UnavailableReference(target));
                    }
                    if !self.store.pose_reached() {
                        notify = true;
                    }
                }
                TrackingRef::Curve => {
                    if !self.store.is_valid(target, t_s) {
                        return Err(RefMgrError::UnavailableReference(target));
                    }
                }
            }

            info!("Tracking changed from {:?} to {:?}", self.tracked_ref, target);

            self.tracked_ref = target;
            self.timer.reset();

            if target != TrackingRef::Pose {
                self.store.set_pose_reached(false);
            }
        }

        let progress = if notify {
            self.current_progress(t_s)
        } else {
            None
        };

        Ok(StatusReport {
            tracked_ref: self.tracked_ref,
            progress,
        })
    }

    /// Install a new reference and begin tracking it.
    ///
    /// An invalid reference is rejected and nothing changes.
    pub fn install(&mut self, reference: Reference, t_s: f64) -> Result<StatusReport, RefMgrError> {
        let tracking = reference.tracking_ref();

        let force_progress = match reference {
            Reference::Curve(c) => {
                self.store
                    .install_curve(c)
                    .map_err(|e| RefMgrError::InvalidPayload(tracking, e))?;
                false
            }
            Reference::Path(p) => {
                self.store
                    .install_path(p)
                    .map_err(|e| RefMgrError::InvalidPayload(tracking, e))?;
                self.timer.reset();
                true
            }
            Reference::Pose(p) => {
                self.store
                    .install_pose(p, false)
                    .map_err(|e| RefMgrError::InvalidPayload(tracking, e))?;
                self.timer.reset();
                true
            }
        };

        self.switch_after_install(tracking, t_s, force_progress)
    }

    /// Seed the manager with an initial pose to hold.
    ///
    /// The pose is given a placeholder stamp so that it is valid straight away.
    pub fn install_init_pose(&mut self, pose: Pose) -> Result<StatusReport, RefMgrError> {
        let pose_ref = PoseRef {
            header: Header::new("", INIT_POSE_STAMP_S),
            pose,
        };

        self.install(Reference::Pose(pose_ref), INIT_POSE_STAMP_S)
    }

    /// Hold the given pose once a path has been completed.
    ///
    /// The pose is installed already reached so it is held without any further checks, and no
    /// progress notification is raised for it.
    pub(crate) fn install_fallback_pose(
        &mut self,
        pose_ref: PoseRef,
        t_s: f64,
    ) -> Result<StatusReport, RefMgrError> {
        self.store
            .install_pose(pose_ref, true)
            .map_err(|e| RefMgrError::InvalidPayload(TrackingRef::Pose, e))?;
        self.timer.reset();

        self.switch_after_install(TrackingRef::Pose, t_s, false)
    }

    /// Get the setpoint for this cycle from the tracked reference.
    ///
    /// A successful query can still give no setpoint, if a curve is being tracked but can't be
    /// evaluated. Querying while nothing is tracked is an error and changes nothing.
    pub fn get_reference(
        &mut self,
        t_s: f64,
        current: &Pose,
    ) -> Result<(Option<PositionTarget>, StatusReport), RefMgrError> {
        match self.tracked_ref {
            TrackingRef::None => Err(RefMgrError::NoReference),
            TrackingRef::Curve => self.get_curve_reference(t_s),
            TrackingRef::Path => self
                .get_path_reference(t_s, current)
                .map(|(target, report)| (Some(target), report)),
            TrackingRef::Pose => self
                .get_pose_reference(t_s, current)
                .map(|(target, report)| (Some(target), report)),
        }
    }

    /// Switch to a reference that has just been installed.
    ///
    /// The reference was validated on install so this should never fail.
    fn switch_after_install(
        &mut self,
        tracking: TrackingRef,
        t_s: f64,
        force_progress: bool,
    ) -> Result<StatusReport, RefMgrError> {
        self.set_reference_used(tracking, t_s, force_progress)
            .map_err(|e| {
                error!("Could not switch tracking to the new {:?} reference: {}", tracking, e);
                e
            })
    }

    /// Progress through the tracked discrete reference, if there is one.
    pub(crate) fn current_progress(&self, t_s: f64) -> Option<WaypointProgress> {
        match self.tracked_ref {
            TrackingRef::Path => self.store.path().map(|p| {
                WaypointProgress::new(
                    &p.path.header.frame_id,
                    t_s,
                    p.index as u32,
                    p.num_waypoints() as u32,
                )
            }),
            TrackingRef::Pose => self
                .store
                .pose()
                .map(|p| WaypointProgress::new(&p.pose.header.frame_id, t_s, 0, 1)),
            _ => None,
        }
    }
}

impl Default for RefMgr {
    fn default() -> Self {
        Self::new(Params::default())
    }
}

// ---------------------------------------------------------------------------
// TESTS
// ---------------------------------------------------------------------------
