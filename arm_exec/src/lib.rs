//! # Arm Executable Library
//!
//! Library backing the arm-side executable. The kinematics engine lives in
//! [`arm_ctrl`], the output boundary to the actuation controller in
//! [`mech_client`].

// ---------------------------------------------------------------------------
// MODULES
// ---------------------------------------------------------------------------

pub mod arm_ctrl;
pub mod mech_client;
