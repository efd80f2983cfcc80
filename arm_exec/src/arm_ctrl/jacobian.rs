//! Jacobian construction for the arm chain
//!
//! Builds the instantaneous linear-velocity Jacobian of the end effector
//! with respect to the joint angles. Both arm joints are revolute and rotate
//! about the out-of-plane axis, so each column follows the geometric
//! formula `axis x (ee - joint)`.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use nalgebra::{Matrix3x2, Vector3};

// Internal
use super::{JointChain, NUM_ARM_JOINTS};

// ---------------------------------------------------------------------------
// PUBLIC FUNCTIONS
// ---------------------------------------------------------------------------

/// Build the 3x2 end-effector Jacobian from the chain's current geometry.
///
/// The matrix depends on the current joint positions so it must be rebuilt
/// after every forward-kinematics pass, it is never cached.
///
/// If the end effector coincides with a joint the corresponding column is
/// exactly zero. That is a valid (rank-deficient) Jacobian, the solver's
/// pseudo-inverse handles it without special casing here.
pub(crate) fn build_jacobian(chain: &JointChain) -> Matrix3x2<f64> {
    let axis = Vector3::z();
    let ee = chain.end_effector().xyz();

    let mut jacobian = Matrix3x2::zeros();

    for i in 0..NUM_ARM_JOINTS {
        let joint = chain.joint_positions()[i].xyz();
        let column = axis.cross(&(ee - joint));
        jacobian.set_column(i, &column);
    }

    jacobian
}

// ---------------------------------------------------------------------------
// TESTS
// ---------------------------------------------------------------------------
