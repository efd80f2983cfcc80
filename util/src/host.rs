//! Host platform utility functions

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use std::path::PathBuf;
use thiserror::Error;

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// Errors associated with the host environment.
#[derive(Debug, Error)]
pub enum HostError {
    #[error("The software root environment variable (ARM_SW_ROOT) is not set")]
    RootNotSet,
}

// ---------------------------------------------------------------------------
// PUBLIC FUNCTIONS
// ---------------------------------------------------------------------------

/// Get the root directory of the arm software installation.
///
/// The root is read from the `ARM_SW_ROOT` environment variable, which must
/// be set before any executable is run. Parameter files and session
/// directories are resolved relative to this root.
pub fn get_arm_sw_root() -> Result<PathBuf, HostError> {
    match std::env::var("ARM_SW_ROOT") {
        Ok(p) => Ok(PathBuf::from(p)),
        Err(_) => Err(HostError::RootNotSet),
    }
}
