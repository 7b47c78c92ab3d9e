//! # Communications interface crate.
//!
//! Provides all common communications interfaces for the reference tracking software.

// ------------------------------------------------------------------------------------------------
// MODULES
// ------------------------------------------------------------------------------------------------

/// Message definitions for references, setpoints, and progress feedback
pub mod msg;

/// Telecommands which deliver references and configuration to the exec
pub mod tc;
