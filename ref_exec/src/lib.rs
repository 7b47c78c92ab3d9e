//! # Reference tracking library.
//!
//! This library allows other crates in the workspace (and the exec's benchmarks) to access items
//! defined inside the reference tracking crate.

// ------------------------------------------------------------------------------------------------
// MODULES
// ------------------------------------------------------------------------------------------------

/// Data store - per-cycle data of the exec
pub mod data_store;

/// Localisation module - provides the vehicle's current pose
pub mod loc;

/// Executable parameters
pub mod params;

/// Reference manager - selects the active reference and produces the setpoint for each cycle
pub mod ref_mgr;

/// Telecommand processor - hands incoming telecommands to the reference manager
pub mod tc_processor;
