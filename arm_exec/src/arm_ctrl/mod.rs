//! Arm control module
//!
//! ArmCtrl converts arm telecommands into joint-angle demands for the
//! actuation controller. The kinematics engine is split over three files:
//! [`chain`] holds the arm geometry and forward kinematics, [`jacobian`]
//! builds the end-effector Jacobian from the current geometry, and [`ik`]
//! runs the iterative pseudo-inverse solve.

// ---------------------------------------------------------------------------
// MODULES
// ---------------------------------------------------------------------------

mod chain;
mod ik;
mod jacobian;
mod params;
mod state;

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// Internal
pub use chain::*;
pub use ik::*;
pub use params::*;
pub use state::*;

pub(crate) use jacobian::build_jacobian;

// ---------------------------------------------------------------------------
// CONSTANTS
// ---------------------------------------------------------------------------

/// The number of rotational joints on the arm (shoulder and elbow).
pub const NUM_ARM_JOINTS: usize = 2;

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// Possible errors that can occur during ArmCtrl operation.
#[derive(Debug, thiserror::Error)]
pub enum ArmCtrlError {
    #[error("Could not load the arm control parameters: {0}")]
    ParamLoadError(#[from] util::params::LoadError),

    #[error("Invalid arm geometry: segment {index} has an invalid length ({length_cm} cm)")]
    InvalidGeometry { index: usize, length_cm: f64 },

    #[error(
        "Target is {distance_cm:.2} cm from the base but the arm can only reach \
         {max_reach_cm:.2} cm"
    )]
    UnreachableTarget {
        distance_cm: f64,
        max_reach_cm: f64,
    },

    #[error(
        "IK did not converge within {iterations} iterations, end effector still \
         {residual_cm:.3} cm from the target"
    )]
    ConvergenceFailure { iterations: u32, residual_cm: f64 },

    #[error("Could not compute the Jacobian pseudo-inverse: {0}")]
    PseudoInverseFailure(&'static str),

    #[error("Expected there to be an arm command but couldn't find one")]
    NoArmCmd,

    #[error("Received an invalid arm command")]
    InvalidArmCmd,

    #[error("ArmCtrl has not been initialised")]
    NotInitialised,
}
