//! Arm inverse kinematics calculations
//!
//! Iterative Jacobian pseudo-inverse scheme: each step linearises the
//! forward kinematics at the current angles and solves for the angle
//! correction that best reduces the remaining end-effector error, in the
//! least-squares sense. The loop is bounded by `Params::max_iterations` and
//! targets outside the reach envelope are rejected before any iteration, so
//! a solve always terminates.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use log::debug;
use nalgebra::{Vector2, Vector3, Vector4};

use comms_if::eqpt::mech::ArmDems;

// Internal imports
use super::{build_jacobian, ArmCtrl, ArmCtrlError, JointChain};

// ---------------------------------------------------------------------------
// CONSTANTS
// ---------------------------------------------------------------------------

/// Singular values below this threshold are dropped when inverting the
/// Jacobian, which keeps the step finite at rank-deficient configurations.
const PSEUDO_INVERSE_EPSILON: f64 = 1e-10;

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// Outcome of a single IK iteration.
#[derive(Debug, Clone, Copy)]
pub enum IkStep {
    /// The end effector is within tolerance of the target. No angle
    /// correction was applied, repeated calls will keep returning this.
    Converged { residual_cm: f64 },

    /// An angle correction was applied and the forward kinematics
    /// recomputed. `residual_cm` is the error before the correction.
    Stepped { residual_cm: f64 },
}

// ---------------------------------------------------------------------------
// PUBLIC FUNCTIONS
// ---------------------------------------------------------------------------

/// Perform one iteration of the pseudo-inverse IK scheme.
///
/// Computes the direction vector from the end effector to the target and
/// its magnitude. If the magnitude is within tolerance the chain is left
/// untouched, otherwise the angle correction `J⁺ · direction` is applied
/// and the forward kinematics recomputed.
pub fn ik_step(
    chain: &mut JointChain,
    target: &Vector4<f64>,
    tolerance_cm: f64,
) -> Result<IkStep, ArmCtrlError> {
    // Drop the homogeneous w component, only the spatial error matters
    let direction: Vector3<f64> = (target - chain.end_effector()).xyz();
    let residual_cm = direction.norm();

    if residual_cm <= tolerance_cm {
        return Ok(IkStep::Converged { residual_cm });
    }

    let jacobian = build_jacobian(chain);
    let jacobian_inverse = jacobian
        .pseudo_inverse(PSEUDO_INVERSE_EPSILON)
        .map_err(ArmCtrlError::PseudoInverseFailure)?;

    let angle_delta_rad: Vector2<f64> = jacobian_inverse * direction;

    chain.apply_angle_delta(angle_delta_rad);
    chain.update_forward_kinematics();

    Ok(IkStep::Stepped { residual_cm })
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl ArmCtrl {
    /// Solve for the joint angles that place the end effector at the given
    /// target, and store them as the target arm demands.
    ///
    /// The target must be finite and within the arm's reach envelope, solves
    /// for unreachable targets are rejected up front rather than left to
    /// iterate forever. A solve that exhausts the iteration cap fails with
    /// [`ArmCtrlError::ConvergenceFailure`] and leaves the target demands
    /// untouched, so a stale posture is never transmitted as if it were a
    /// solution.
    pub(crate) fn calc_move_to_target(
        &mut self,
        x_cm: f64,
        y_cm: f64,
    ) -> Result<(), ArmCtrlError> {
        if !(x_cm.is_finite() && y_cm.is_finite()) {
            return Err(ArmCtrlError::InvalidArmCmd);
        }

        let tolerance_cm = self.params.convergence_tolerance_cm;
        let max_iterations = self.params.max_iterations;

        let chain = match self.chain.as_mut() {
            Some(c) => c,
            None => return Err(ArmCtrlError::NotInitialised),
        };

        // Reachability pre-check: reject targets beyond the arm's envelope
        let distance_cm = (Vector2::new(x_cm, y_cm) - chain.base_pos_cm()).norm();
        let max_reach_cm = chain.max_reach_cm();

        if distance_cm > max_reach_cm {
            return Err(ArmCtrlError::UnreachableTarget {
                distance_cm,
                max_reach_cm,
            });
        }

        let target = Vector4::new(x_cm, y_cm, 0.0, 1.0);

        for iteration in 0..max_iterations {
            match ik_step(chain, &target, tolerance_cm)? {
                IkStep::Converged { residual_cm } => {
                    debug!(
                        "IK converged after {} iterations, {:.3} cm from the target",
                        iteration, residual_cm
                    );

                    self.report.converged = true;
                    self.report.iterations = iteration;
                    self.report.residual_cm = residual_cm;
                    self.target_arm_dems = Some(ArmDems::from_angles_rad(chain.angles_rad()));

                    return Ok(());
                }
                IkStep::Stepped { .. } => (),
            }
        }

        // The loop applies at most `max_iterations` corrections; the final
        // one may itself have reached the target.
        let residual_cm = (target - chain.end_effector()).xyz().norm();

        if residual_cm <= tolerance_cm {
            self.report.converged = true;
            self.report.iterations = max_iterations;
            self.report.residual_cm = residual_cm;
            self.target_arm_dems = Some(ArmDems::from_angles_rad(chain.angles_rad()));

            return Ok(());
        }

        self.report.iterations = max_iterations;
        self.report.residual_cm = residual_cm;

        Err(ArmCtrlError::ConvergenceFailure {
            iterations: max_iterations,
            residual_cm,
        })
    }
}

// ---------------------------------------------------------------------------
// TESTS
// ---------------------------------------------------------------------------
