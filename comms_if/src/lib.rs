//! # Communications Interface
//!
//! Definitions shared between the arm executable and its collaborators: the
//! telecommands that drive the arm and the demands sent to the mechanisms.

// ---------------------------------------------------------------------------
// MODULES
// ---------------------------------------------------------------------------

pub mod eqpt;
pub mod tc;
