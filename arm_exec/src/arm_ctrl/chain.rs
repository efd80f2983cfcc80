//! Kinematic chain model and forward kinematics
//!
//! A [`JointChain`] holds the fixed geometry of the arm (base position and
//! segment lengths) together with the current joint angles, and derives the
//! joint positions from them by composing one homogeneous transform per
//! joint. The modelled arm is planar, so every derived point keeps z = 0.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use nalgebra::{Matrix4, Vector2, Vector4};

// Internal
use super::{ArmCtrlError, NUM_ARM_JOINTS};

// ---------------------------------------------------------------------------
// CONSTANTS
// ---------------------------------------------------------------------------

/// Number of points tracked along the chain: shoulder, elbow, end effector.
pub const NUM_CHAIN_POINTS: usize = NUM_ARM_JOINTS + 1;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// The arm's kinematic chain.
#[derive(Debug, Clone)]
pub struct JointChain {
    /// Position of the shoulder joint in the arm frame.
    base_pos_cm: Vector2<f64>,

    /// Bicep and forearm lengths, fixed after construction.
    segment_lengths_cm: [f64; NUM_ARM_JOINTS],

    /// Current joint angles, shoulder then elbow. The elbow angle is
    /// relative to the upper segment's frame, not to the base frame.
    joint_angles_rad: [f64; NUM_ARM_JOINTS],

    /// Homogeneous positions of the shoulder, elbow and end effector in the
    /// base frame. Derived state, only written by
    /// [`JointChain::update_forward_kinematics`].
    joint_positions: [Vector4<f64>; NUM_CHAIN_POINTS],
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl JointChain {
    /// Build a new chain and run the initial forward-kinematics pass.
    ///
    /// Initial angles are given in degrees and converted to radians here,
    /// all internal computation is in radians.
    ///
    /// # Errors
    ///
    /// Returns [`ArmCtrlError::InvalidGeometry`] if any segment length is
    /// non-positive or non-finite.
    pub fn new(
        base_x_cm: f64,
        base_y_cm: f64,
        segment_lengths_cm: [f64; NUM_ARM_JOINTS],
        initial_angles_deg: [f64; NUM_ARM_JOINTS],
    ) -> Result<Self, ArmCtrlError> {
        for (index, &length_cm) in segment_lengths_cm.iter().enumerate() {
            if !(length_cm.is_finite() && length_cm > 0.0) {
                return Err(ArmCtrlError::InvalidGeometry { index, length_cm });
            }
        }

        let mut joint_angles_rad = [0.0; NUM_ARM_JOINTS];
        for (angle_rad, angle_deg) in joint_angles_rad.iter_mut().zip(initial_angles_deg.iter()) {
            *angle_rad = angle_deg.to_radians();
        }

        let mut chain = Self {
            base_pos_cm: Vector2::new(base_x_cm, base_y_cm),
            segment_lengths_cm,
            joint_angles_rad,
            joint_positions: [Vector4::new(base_x_cm, base_y_cm, 0.0, 1.0); NUM_CHAIN_POINTS],
        };

        chain.update_forward_kinematics();

        Ok(chain)
    }

    /// Recompute all joint positions from the current joint angles.
    ///
    /// Each joint contributes a homogeneous transform built from its angle
    /// and the previous segment's length; the shoulder's transform also
    /// carries the base offset. Transforms are composed in chain order so
    /// the elbow rotation acts in the already-rotated shoulder frame, which
    /// reproduces the closed form:
    ///
    /// ```text
    /// elbow = base + L1 * (cos(t1), sin(t1))
    /// ee    = elbow + L2 * (cos(t1 + t2), sin(t1 + t2))
    /// ```
    pub fn update_forward_kinematics(&mut self) {
        self.joint_positions[0] =
            Vector4::new(self.base_pos_cm.x, self.base_pos_cm.y, 0.0, 1.0);

        // Shoulder: rotation by t1 plus the base offset
        let mut cumulative = Self::transformation_matrix(
            self.joint_angles_rad[0],
            self.base_pos_cm.x,
            self.base_pos_cm.y,
        );

        // Elbow: rotation by t2, translated along the bicep
        cumulative *= Self::transformation_matrix(
            self.joint_angles_rad[1],
            self.segment_lengths_cm[0],
            0.0,
        );
        self.joint_positions[1] = cumulative.column(3).into_owned();

        // End effector: pure translation along the forearm
        cumulative *= Self::transformation_matrix(0.0, self.segment_lengths_cm[1], 0.0);
        self.joint_positions[2] = cumulative.column(3).into_owned();
    }

    /// Add a correction to the joint angles.
    ///
    /// Angles are unbounded, no wrapping or clamping is applied. The caller
    /// must call [`JointChain::update_forward_kinematics`] afterwards to
    /// bring the joint positions back in sync.
    pub fn apply_angle_delta(&mut self, delta_rad: Vector2<f64>) {
        for (angle_rad, delta) in self.joint_angles_rad.iter_mut().zip(delta_rad.iter()) {
            *angle_rad += delta;
        }
    }

    /// Current end-effector position as a homogeneous point.
    pub fn end_effector(&self) -> Vector4<f64> {
        self.joint_positions[NUM_CHAIN_POINTS - 1]
    }

    /// All chain point positions, shoulder first.
    pub fn joint_positions(&self) -> &[Vector4<f64>; NUM_CHAIN_POINTS] {
        &self.joint_positions
    }

    /// Current joint angles in radians. Conversion to degrees happens only
    /// at the system boundary.
    pub fn angles_rad(&self) -> [f64; NUM_ARM_JOINTS] {
        self.joint_angles_rad
    }

    /// Position of the shoulder joint in the arm frame.
    pub fn base_pos_cm(&self) -> Vector2<f64> {
        self.base_pos_cm
    }

    /// Furthest distance from the base the end effector can reach.
    pub fn max_reach_cm(&self) -> f64 {
        self.segment_lengths_cm.iter().sum()
    }

    /// Build the homogeneous transform for a single joint: a rotation by
    /// `angle_rad` about the out-of-plane axis composed with a translation
    /// of (x, y) in the parent frame.
    fn transformation_matrix(angle_rad: f64, x_cm: f64, y_cm: f64) -> Matrix4<f64> {
        let (sin, cos) = angle_rad.sin_cos();

        #[rustfmt::skip]
        let matrix = Matrix4::new(
            cos, -sin, 0.0, x_cm,
            sin,  cos, 0.0, y_cm,
            0.0,  0.0, 1.0, 0.0,
            0.0,  0.0, 0.0, 1.0,
        );

        matrix
    }
}

// ---------------------------------------------------------------------------
// TESTS
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    /// Closed-form planar forward kinematics used as the test oracle.
    fn closed_form_ee(base: [f64; 2], lengths: [f64; 2], angles_rad: [f64; 2]) -> [f64; 2] {
        let (t1, t2) = (angles_rad[0], angles_rad[1]);
        [
            base[0] + lengths[0] * t1.cos() + lengths[1] * (t1 + t2).cos(),
            base[1] + lengths[0] * t1.sin() + lengths[1] * (t1 + t2).sin(),
        ]
    }

    #[test]
    fn fk_matches_closed_form() {
        let cases: [[f64; 2]; 5] = [
            [10.0, 20.0],
            [0.0, 0.0],
            [90.0, 0.0],
            [-30.0, 120.0],
            [200.0, -340.0],
        ];

        for angles_deg in cases.iter() {
            let chain = JointChain::new(0.0, 0.0, [23.0, 36.0], *angles_deg).unwrap();
            let expected = closed_form_ee(
                [0.0, 0.0],
                [23.0, 36.0],
                [angles_deg[0].to_radians(), angles_deg[1].to_radians()],
            );

            let ee = chain.end_effector();
            assert_relative_eq!(ee.x, expected[0], epsilon = 1e-9);
            assert_relative_eq!(ee.y, expected[1], epsilon = 1e-9);
        }
    }

    #[test]
    fn fk_elbow_matches_closed_form() {
        let chain = JointChain::new(0.0, 0.0, [23.0, 36.0], [40.0, 65.0]).unwrap();

        let t1 = 40f64.to_radians();
        let elbow = chain.joint_positions()[1];
        assert_relative_eq!(elbow.x, 23.0 * t1.cos(), epsilon = 1e-9);
        assert_relative_eq!(elbow.y, 23.0 * t1.sin(), epsilon = 1e-9);
    }

    #[test]
    fn fk_carries_base_offset() {
        let chain = JointChain::new(5.0, -3.0, [23.0, 36.0], [10.0, 20.0]).unwrap();
        let expected = closed_form_ee(
            [5.0, -3.0],
            [23.0, 36.0],
            [10f64.to_radians(), 20f64.to_radians()],
        );

        let ee = chain.end_effector();
        assert_relative_eq!(ee.x, expected[0], epsilon = 1e-9);
        assert_relative_eq!(ee.y, expected[1], epsilon = 1e-9);

        let shoulder = chain.joint_positions()[0];
        assert_eq!(shoulder.x, 5.0);
        assert_eq!(shoulder.y, -3.0);
    }

    #[test]
    fn joint_positions_stay_planar_homogeneous() {
        let chain = JointChain::new(1.0, 2.0, [23.0, 36.0], [33.0, -71.0]).unwrap();

        for point in chain.joint_positions().iter() {
            assert_eq!(point.z, 0.0);
            assert_eq!(point.w, 1.0);
        }
    }

    #[test]
    fn initial_angles_are_converted_to_radians() {
        let chain = JointChain::new(0.0, 0.0, [23.0, 36.0], [10.0, 20.0]).unwrap();
        let angles = chain.angles_rad();

        assert_relative_eq!(angles[0], 10f64.to_radians(), epsilon = 1e-12);
        assert_relative_eq!(angles[1], 20f64.to_radians(), epsilon = 1e-12);
    }

    #[test]
    fn angle_delta_then_fk_matches_closed_form() {
        let mut chain = JointChain::new(0.0, 0.0, [23.0, 36.0], [0.0, 0.0]).unwrap();

        chain.apply_angle_delta(Vector2::new(std::f64::consts::FRAC_PI_2, 0.0));
        chain.update_forward_kinematics();

        let ee = chain.end_effector();
        assert_relative_eq!(ee.x, 0.0, epsilon = 1e-9);
        assert_relative_eq!(ee.y, 59.0, epsilon = 1e-9);
    }

    #[test]
    fn zero_length_segment_is_rejected() {
        let result = JointChain::new(0.0, 0.0, [0.0, 36.0], [0.0, 0.0]);
        assert!(matches!(
            result,
            Err(ArmCtrlError::InvalidGeometry { index: 0, .. })
        ));
    }

    #[test]
    fn negative_length_segment_is_rejected() {
        let result = JointChain::new(0.0, 0.0, [23.0, -1.0], [0.0, 0.0]);
        assert!(matches!(
            result,
            Err(ArmCtrlError::InvalidGeometry { index: 1, .. })
        ));
    }

    #[test]
    fn max_reach_is_sum_of_segments() {
        let chain = JointChain::new(0.0, 0.0, [23.0, 36.0], [0.0, 0.0]).unwrap();
        assert_eq!(chain.max_reach_cm(), 59.0);
    }
}
