//! Implementations for the ArmCtrl state structure

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use log::debug;
use serde::{Deserialize, Serialize};

// Internal
use super::{ArmCtrlError, JointChain, Params};
use comms_if::{eqpt::mech::ArmDems, tc::arm_ctrl::ArmCmd};
use util::{module::State, session::Session};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Arm control module state
#[derive(Default)]
pub struct ArmCtrl {
    pub(crate) params: Params,

    pub(crate) report: StatusReport,

    pub(crate) current_cmd: Option<ArmCmd>,

    /// The kinematic chain, built during init from the parameters.
    pub(crate) chain: Option<JointChain>,

    pub(crate) target_arm_dems: Option<ArmDems>,

    pub(crate) output: Option<ArmDems>,
}

/// Input data to Arm Control.
#[derive(Default)]
pub struct InputData {
    /// The command to be executed, or `None` if there is no new command on
    /// this cycle.
    pub cmd: Option<ArmCmd>,
}

/// Status report for ArmCtrl processing.
#[derive(Clone, Copy, Default, Serialize, Deserialize, Debug)]
pub struct StatusReport {
    /// Whether the last solve converged. False for commands which don't
    /// solve (`Stop`), and after a failed solve.
    pub converged: bool,

    /// Number of IK iterations the last solve used.
    pub iterations: u32,

    /// Distance between the end effector and the target after the last
    /// solve.
    ///
    /// Units: centimetres
    pub residual_cm: f64,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl State for ArmCtrl {
    type InitData = &'static str;
    type InitError = ArmCtrlError;

    type InputData = InputData;
    type OutputData = ArmDems;
    type StatusReport = StatusReport;
    type ProcError = ArmCtrlError;

    /// Initialise the ArmCtrl module.
    ///
    /// Expected init data is the path to the parameter file. Fails if the
    /// parameters cannot be loaded or describe an invalid geometry.
    fn init(
        &mut self,
        init_data: Self::InitData,
        _session: &Session,
    ) -> Result<(), Self::InitError> {
        // Load the parameters
        self.params = util::params::load(init_data)?;

        // Build the chain, which also runs the first forward-kinematics pass
        let chain = JointChain::new(
            self.params.base_pos_cm[0],
            self.params.base_pos_cm[1],
            self.params.segment_lengths_cm,
            self.params.initial_angles_deg,
        )?;

        // Until a command arrives the target is the boot posture
        self.target_arm_dems = Some(ArmDems::from_angles_rad(chain.angles_rad()));
        self.chain = Some(chain);

        Ok(())
    }

    /// Perform processing of Arm Control.
    fn proc(
        &mut self,
        input_data: &Self::InputData,
    ) -> Result<(Self::OutputData, Self::StatusReport), Self::ProcError> {
        // Clear the status report
        self.report = StatusReport::default();

        // Check to see if there's a new command
        if let Some(cmd) = &input_data.cmd {
            // Update the internal copy of the command
            self.current_cmd = Some(cmd.clone());

            // Output the command in debug mode
            debug!("New ArmCtrl ArmCmd::{:#?}", cmd);

            // Calculate the target demands based on this new command.
            self.calc_target_dems()?;
        }

        // Calculate the output
        self.set_output();

        Ok((
            match self.output {
                Some(ref o) => o.clone(),
                None => ArmDems::default(),
            },
            self.report,
        ))
    }
}

impl ArmCtrl {
    /// Based on the current command calculate the target demands for the
    /// arm to achieve.
    ///
    /// A valid command should be set in `self.current_cmd` before calling
    /// this function.
    fn calc_target_dems(&mut self) -> Result<(), ArmCtrlError> {
        // Perform calculations for each command type. These calculation
        // functions shall update `self.target_arm_dems`.
        match self.current_cmd.clone() {
            Some(ArmCmd::Stop) => self.calc_stop(),
            Some(ArmCmd::MoveTo { x_cm, y_cm }) => self.calc_move_to_target(x_cm, y_cm)?,
            Some(ArmCmd::Range {
                distance_cm,
                bearing_rad,
            }) => {
                // Resolve the perception collaborator's range/bearing into a
                // Cartesian target in the arm frame.
                let x_cm = bearing_rad.cos() * distance_cm;
                let y_cm = bearing_rad.sin() * distance_cm;

                self.calc_move_to_target(x_cm, y_cm)?
            }
            None => return Err(ArmCtrlError::NoArmCmd),
        }

        Ok(())
    }

    /// Perform the stop command calculations.
    ///
    /// Stop holds the current axis angles. It shall never error and must
    /// always leave the arm with a valid posture to transmit.
    pub(crate) fn calc_stop(&mut self) {
        if let Some(chain) = &self.chain {
            self.target_arm_dems = Some(ArmDems::from_angles_rad(chain.angles_rad()));
        }
    }

    /// Set the output based on the target arm demands.
    fn set_output(&mut self) {
        if let Some(target) = &self.target_arm_dems {
            self.output = Some(target.clone());
        }
    }
}

// ---------------------------------------------------------------------------
// TESTS
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn make_arm_ctrl() -> ArmCtrl {
        let params = Params {
            base_pos_cm: [0.0, 0.0],
            segment_lengths_cm: [23.0, 36.0],
            initial_angles_deg: [10.0, 20.0],
            convergence_tolerance_cm: 1.0,
            max_iterations: 500,
        };

        let chain = JointChain::new(
            params.base_pos_cm[0],
            params.base_pos_cm[1],
            params.segment_lengths_cm,
            params.initial_angles_deg,
        )
        .unwrap();

        let target_arm_dems = Some(ArmDems::from_angles_rad(chain.angles_rad()));

        ArmCtrl {
            params,
            chain: Some(chain),
            target_arm_dems,
            ..ArmCtrl::default()
        }
    }

    #[test]
    fn stop_holds_boot_posture() {
        let mut arm_ctrl = make_arm_ctrl();

        let (dems, report) = arm_ctrl
            .proc(&InputData {
                cmd: Some(ArmCmd::Stop),
            })
            .unwrap();

        assert!(!report.converged);
        assert_relative_eq!(dems.shoulder_pos_rad, 10f64.to_radians(), epsilon = 1e-12);
        assert_relative_eq!(dems.elbow_pos_rad, 20f64.to_radians(), epsilon = 1e-12);
        assert_eq!(dems.to_wire(), "10 20");
    }

    #[test]
    fn no_command_re_emits_current_posture() {
        let mut arm_ctrl = make_arm_ctrl();

        let (dems, _) = arm_ctrl.proc(&InputData { cmd: None }).unwrap();

        assert_eq!(dems.to_wire(), "10 20");
    }

    #[test]
    fn move_to_produces_converged_demands() {
        let mut arm_ctrl = make_arm_ctrl();

        let (dems, report) = arm_ctrl
            .proc(&InputData {
                cmd: Some(ArmCmd::MoveTo {
                    x_cm: 40.0,
                    y_cm: 30.0,
                }),
            })
            .unwrap();

        assert!(report.converged);
        assert!(report.residual_cm <= 1.0);

        // Demands match the solved chain angles
        let angles = arm_ctrl.chain.as_ref().unwrap().angles_rad();
        assert_eq!(dems.shoulder_pos_rad, angles[0]);
        assert_eq!(dems.elbow_pos_rad, angles[1]);
    }

    #[test]
    fn range_command_resolves_to_cartesian_target() {
        let mut arm_ctrl = make_arm_ctrl();

        let (_, report) = arm_ctrl
            .proc(&InputData {
                cmd: Some(ArmCmd::Range {
                    distance_cm: 50.0,
                    bearing_rad: std::f64::consts::FRAC_PI_4,
                }),
            })
            .unwrap();

        assert!(report.converged);

        // End effector within tolerance of (50 cos 45, 50 sin 45)
        let expected = 50.0 * std::f64::consts::FRAC_PI_4.cos();
        let ee = arm_ctrl.chain.as_ref().unwrap().end_effector();
        let error = ((ee.x - expected).powi(2) + (ee.y - expected).powi(2)).sqrt();
        assert!(error <= 1.0);
    }

    #[test]
    fn unreachable_move_to_errors_and_keeps_posture() {
        let mut arm_ctrl = make_arm_ctrl();

        let result = arm_ctrl.proc(&InputData {
            cmd: Some(ArmCmd::MoveTo {
                x_cm: 80.0,
                y_cm: 0.0,
            }),
        });

        assert!(matches!(
            result,
            Err(ArmCtrlError::UnreachableTarget { .. })
        ));

        // The boot posture is untouched
        let angles = arm_ctrl.chain.as_ref().unwrap().angles_rad();
        assert_relative_eq!(angles[0], 10f64.to_radians(), epsilon = 1e-12);
        assert_relative_eq!(angles[1], 20f64.to_radians(), epsilon = 1e-12);
    }
}
