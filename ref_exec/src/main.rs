//! Reference tracking executable entry point.
//!
//! # Architecture
//!
//! The general execution methodology consists of:
//!
//!     - Initialise all modules
//!     - Start the script thread, which delivers telecommands to the reference manager as they
//!       fall due
//!     - Main loop:
//!         - Pose acquisition from the localisation source
//!         - Reference manager processing, producing the setpoint
//!         - Setpoint handover to the (simulated) vehicle
//!
//! References and tracking requests arrive on the script thread while the main loop is querying
//! the reference manager, the two share it through a `SharedRefMgr`.
//!
//! # Modules
//!
//! All modules (e.g. `ref_mgr`) shall meet the following requirements:
//!     1. Provide a public struct implementing the `util::module::State` trait.

// ---------------------------------------------------------------------------
// USE MODULES FROM LIBRARY
// ---------------------------------------------------------------------------

use ref_lib::{
    data_store::DataStore,
    loc::{LocMgr, LocSource, Pose},
    params::RefExecParams,
    ref_mgr::{self, RefMgrError, SharedRefMgr, TrackingRef},
    tc_processor,
};

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use color_eyre::{eyre::WrapErr, Report};
use log::{debug, info, warn};
use std::path::PathBuf;
use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};
use std::thread;
use std::time::{Duration, Instant};
use structopt::StructOpt;

// Internal
use util::{
    logger::{logger_init, LevelFilter},
    module::State,
    script_interpreter::{PendingTcs, ScriptInterpreter},
    session::{self, Session},
};

// ---------------------------------------------------------------------------
// CONSTANTS
// ---------------------------------------------------------------------------

/// Target period of one cycle.
const CYCLE_PERIOD_S: f64 = 0.10;

/// Number of cycles per second
const CYCLE_FREQUENCY_HZ: f64 = 1.0 / CYCLE_PERIOD_S;

/// Period at which the script thread checks for pending TCs.
const SCRIPT_PERIOD_S: f64 = 0.01;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Runs a reference script against the reference manager.
#[derive(Debug, StructOpt)]
#[structopt(name = "ref_exec")]
struct Opts {
    /// Path to the reference script to execute
    #[structopt(parse(from_os_str))]
    script: PathBuf,

    /// Stop after this many seconds even if the script hasn't finished
    #[structopt(long, default_value = "120")]
    max_duration_s: f64,

    /// Include debug messages in the log
    #[structopt(short, long)]
    verbose: bool,
}

// ---------------------------------------------------------------------------
// FUNCTIONS
// ---------------------------------------------------------------------------

/// Executable main function, entry point.
fn main() -> Result<(), Report> {
    color_eyre::install()?;

    let opts = Opts::from_args();

    // ---- EARLY INITIALISATION ----

    // Initialise session
    let session = Session::new("ref_exec", "sessions").wrap_err("Failed to create the session")?;

    // Initialise logger
    let log_level = match opts.verbose {
        true => LevelFilter::Debug,
        false => LevelFilter::Info,
    };
    logger_init(log_level, &session).wrap_err("Failed to initialise logging")?;

    // Log information on this execution.
    info!("Reference Tracking Executable\n");
    info!("Session directory: {:?}\n", session.session_root);

    // ---- LOAD PARAMETERS ----

    let exec_params: RefExecParams =
        util::params::load("ref_exec.toml").wrap_err("Could not load exec params")?;

    info!("Exec parameters loaded");

    // ---- LOAD SCRIPT ----

    let si = ScriptInterpreter::new(&opts.script).wrap_err("Failed to load script")?;

    info!(
        "Loaded script {:?}, lasts {:.02} s and contains {} TCs\n",
        si.get_script_path(),
        si.get_duration(),
        si.get_num_tcs()
    );

    // ---- INITIALISE MODULES ----

    info!("Initialising modules...");

    let mut ds = DataStore::default();

    let mut ref_mgr = SharedRefMgr::default();
    ref_mgr
        .init("ref_mgr.toml", &session)
        .wrap_err("Failed to initialise RefMgr")?;
    info!("RefMgr init complete");

    let mut loc_mgr = LocMgr::from_params(&exec_params.loc_mgr);

    if let Some(init_pose) = exec_params.init_pose {
        let pose = Pose::from(init_pose);

        ref_mgr
            .install_init_pose(pose)
            .wrap_err("Failed to install the initial pose reference")?;
        info!("Initial pose reference installed: {:?}", init_pose);

        // Nothing else provides the pose when it's set externally
        if exec_params.loc_mgr.source == LocSource::OnSet {
            loc_mgr.set_pose(pose);
        }
    }
    info!("LocMgr init complete ({:?})", exec_params.loc_mgr.source);

    info!("Module initialisation complete\n");

    // ---- START SCRIPT THREAD ----

    let script_done = Arc::new(AtomicBool::new(false));
    let script_handle = {
        let ref_mgr = ref_mgr.clone();
        let script_done = script_done.clone();
        thread::spawn(move || run_script(si, ref_mgr, script_done))
    };

    // ---- MAIN LOOP ----

    info!("Begining main loop\n");

    loop {
        // Get cycle start time
        let cycle_start_instant = Instant::now();

        // Clear items that need wiping at the start of the cycle
        ds.cycle_start(CYCLE_FREQUENCY_HZ, session::get_elapsed_seconds());

        // ---- DATA INPUT ----

        ds.pose = loc_mgr.get_pose();

        // ---- REFERENCE PROCESSING ----

        match ds.pose {
            Some(pose) => match ref_mgr.proc(&ref_mgr::InputData {
                t_s: ds.sim_time_s,
                pose,
            }) {
                Ok((o, r)) => {
                    if let Some(p) = &r.progress {
                        info!(
                            "Waypoint progress: {}/{} ({:.0}%)",
                            p.current,
                            p.total,
                            p.progress * 100.0
                        );
                    }
                    ds.ref_mgr_output = o;
                    ds.ref_mgr_status_rpt = r;
                }
                // Nothing to track, the vehicle holds its last setpoint
                Err(RefMgrError::NoReference) => (),
                Err(e) => warn!("Error during RefMgr processing: {}", e),
            },
            None => {
                if ds.is_1_hz_cycle {
                    warn!("No pose available from LocMgr");
                }
            }
        }

        // ---- VEHICLE ----

        let setpoint = ds.ref_mgr_output.as_ref().or_else(|| ds.setpoint.as_ref());
        loc_mgr.step(setpoint, CYCLE_PERIOD_S);

        if ds.is_1_hz_cycle {
            if let Some(pose) = ds.pose {
                debug!(
                    "Tracking {:?}, pose: {:?} heading {:.3} rad",
                    ds.ref_mgr_status_rpt.tracked_ref,
                    pose.position_m.as_slice(),
                    pose.get_heading()
                );
            }
        }

        // ---- EXIT CONDITIONS ----

        let tracked_ref = match ref_mgr.get_reference_used() {
            Ok(t) => t,
            Err(e) => return Err(e).wrap_err("RefMgr is no longer usable"),
        };

        if script_done.load(Ordering::Acquire) && tracked_ref == TrackingRef::None {
            info!("Script complete and no reference being tracked, stopping");
            break;
        }

        if ds.sim_time_s > opts.max_duration_s {
            warn!(
                "Maximum duration of {:.02} s reached while tracking {:?}, stopping",
                opts.max_duration_s, tracked_ref
            );
            break;
        }

        // ---- CYCLE MANAGEMENT ----

        let cycle_dur = Instant::now() - cycle_start_instant;

        // Get sleep duration
        match Duration::from_secs_f64(CYCLE_PERIOD_S).checked_sub(cycle_dur) {
            Some(d) => {
                ds.num_consec_cycle_overruns = 0;
                thread::sleep(d);
            }
            None => {
                warn!(
                    "Cycle overran by {:.06} s",
                    cycle_dur.as_secs_f64() - CYCLE_PERIOD_S
                );
                ds.num_consec_cycle_overruns += 1;
            }
        }

        ds.cycle_end();
    }

    // ---- SHUTDOWN ----

    if script_done.load(Ordering::Acquire) {
        if script_handle.join().is_err() {
            warn!("Script thread panicked");
        }
    } else {
        warn!("Script did not finish, remaining TCs are discarded");
    }

    info!("End of execution after {} cycles", ds.num_cycles);

    Ok(())
}

/// Deliver the script's TCs to the reference manager as they fall due, until the script ends.
fn run_script(mut si: ScriptInterpreter, ref_mgr: SharedRefMgr, done: Arc<AtomicBool>) {
    loop {
        match si.get_pending_tcs() {
            PendingTcs::None => (),
            PendingTcs::Some(tc_vec) => {
                for tc in tc_vec {
                    debug!("Executing {:?} TC", tc.tc_type());

                    // Failures have already been logged by the processor
                    tc_processor::exec(&ref_mgr, tc, session::get_elapsed_seconds()).ok();
                }
            }
            PendingTcs::EndOfScript => {
                info!("End of TC script reached");
                break;
            }
        }

        thread::sleep(Duration::from_secs_f64(SCRIPT_PERIOD_S));
    }

    done.store(true, Ordering::Release);
}
