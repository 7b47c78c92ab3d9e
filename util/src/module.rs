//! Cyclic module interface
//!
//! Modules run by the exec's control loop are initialised once, usually from a parameter file,
//! and are then processed once per cycle with that cycle's inputs.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use crate::session::Session;

// ---------------------------------------------------------------------------
// MODULE STATE
// ---------------------------------------------------------------------------

/// The module's internal state.
pub trait State {
    type InitData;
    type InitError;

    type InputData;
    type OutputData;
    type StatusReport;
    type ProcError;

    /// Initialise the module before the first cycle.
    fn init(&mut self, init_data: Self::InitData, session: &Session)
        -> Result<(), Self::InitError>;

    /// Process a single cycle, returning the cycle's output and a report on what happened during
    /// it. Errors are not fatal, the exec may keep cycling after one is returned.
    fn proc(&mut self, input_data: &Self::InputData)
        -> Result<(Self::OutputData, Self::StatusReport), Self::ProcError>;
}
