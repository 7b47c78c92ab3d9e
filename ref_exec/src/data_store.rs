//! # Data Store

use comms_if::msg::PositionTarget;

use crate::{loc::Pose, ref_mgr};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Global data store for the executable.
#[derive(Default)]
pub struct DataStore {
    // Cycle management
    /// Number of cycles already executed
    pub num_cycles: u128,

    /// True if this cycle falls on a 1Hz boundary
    pub is_1_hz_cycle: bool,

    /// Session elapsed time at the start of the cycle
    pub sim_time_s: f64,

    // Localisation
    pub pose: Option<Pose>,

    // RefMgr
    pub ref_mgr_output: Option<PositionTarget>,
    pub ref_mgr_status_rpt: ref_mgr::StatusReport,

    /// The last setpoint produced, held while the reference manager gives none.
    pub setpoint: Option<PositionTarget>,

    // Monitoring Counters
    /// Number of consecutive cycle overruns
    pub num_consec_cycle_overruns: u64,
}

// ---------------------------------------------------------------------------
// IMPLS
// ---------------------------------------------------------------------------

impl DataStore {
    /// Perform actions required at the start of a cycle.
    ///
    /// Clears the reference manager's outputs from the last cycle, sets the 1Hz cycle flag and
    /// records the cycle time.
    pub fn cycle_start(&mut self, cycle_frequency_hz: f64, sim_time_s: f64) {
        self.is_1_hz_cycle = self.num_cycles % (cycle_frequency_hz as u128) == 0;

        self.ref_mgr_output = None;
        self.ref_mgr_status_rpt = ref_mgr::StatusReport::default();

        self.sim_time_s = sim_time_s;
    }

    /// Perform actions required at the end of a cycle.
    pub fn cycle_end(&mut self) {
        if self.ref_mgr_output.is_some() {
            self.setpoint = self.ref_mgr_output.clone();
        }

        self.num_cycles += 1;
    }
}

// ---------------------------------------------------------------------------
// TESTS
// ---------------------------------------------------------------------------
