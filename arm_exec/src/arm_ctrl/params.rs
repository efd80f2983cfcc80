//! Parameters structure for ArmCtrl

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use super::NUM_ARM_JOINTS;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Parameters for Arm control.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct Params {
    // ---- GEOMETRY ----
    /// Position of the shoulder joint (x, y) in the arm frame.
    ///
    /// Units: centimetres.
    pub base_pos_cm: [f64; 2],

    /// The lengths of the bicep and forearm segments, in chain order.
    ///
    /// Units: centimetres.
    pub segment_lengths_cm: [f64; NUM_ARM_JOINTS],

    /// Joint angles the arm boots with, shoulder then elbow.
    ///
    /// Units: degrees.
    pub initial_angles_deg: [f64; NUM_ARM_JOINTS],

    // ---- SOLVER ----
    /// Distance between the end effector and the target below which a solve
    /// is considered converged.
    ///
    /// Units: centimetres.
    pub convergence_tolerance_cm: f64,

    /// Maximum number of IK iterations before a solve is abandoned.
    pub max_iterations: u32,
}
