//! Main arm-side executable entry point.
//!
//! # Architecture
//!
//! The executable is a single-shot command processor:
//!
//!     - Initialise the session, logger and the ArmCtrl module
//!     - Parse the arm telecommand from the command line
//!     - Run ArmCtrl processing, which solves the inverse kinematics
//!     - Send the resulting joint demands to the actuation controller
//!     - Save the status report and exit
//!
//! # Modules
//!
//! All modules (e.g. `arm_ctrl`) shall meet the following requirements:
//!     1. Provide a public struct implementing the `util::module::State` trait.
//!

// ---------------------------------------------------------------------------
// USE MODULES FROM LIBRARY
// ---------------------------------------------------------------------------

use arm_lib::{
    arm_ctrl::{ArmCtrl, InputData},
    mech_client::MechClient,
};
use comms_if::tc::arm_ctrl::ArmCmd;

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use color_eyre::{eyre::WrapErr, Report};
use log::info;
use structopt::StructOpt;

// Internal
use util::{
    logger::{logger_init, LevelFilter},
    module::State,
    session::Session,
};

// ---------------------------------------------------------------------------
// FUNCTIONS
// ---------------------------------------------------------------------------

/// Executable main function, entry point.
fn main() -> Result<(), Report> {
    // ---- EARLY INITIALISATION ----

    // Error reporting
    color_eyre::install()?;

    // Parse the telecommand before touching the filesystem so that bad
    // invocations fail fast with usage information.
    let cmd = ArmCmd::from_args();

    // Initialise session
    let session = Session::new("arm_exec", "sessions").wrap_err("Failed to create the session")?;

    // Initialise logger
    logger_init(LevelFilter::Trace, &session).wrap_err("Failed to initialise logging")?;

    // Log information on this execution.
    info!("Arm Control Executable\n");
    info!("Session directory: {:?}\n", session.session_root);

    // ---- MODULE INITIALISATION ----

    let mut arm_ctrl = ArmCtrl::default();

    arm_ctrl
        .init("arm_ctrl.toml", &session)
        .wrap_err("Failed to initialise ArmCtrl")?;

    info!("ArmCtrl initialisation complete");

    // ---- PROCESSING ----

    info!("Executing ArmCmd::{:?}", cmd);

    let (arm_dems, report) = arm_ctrl
        .proc(&InputData { cmd: Some(cmd) })
        .wrap_err("ArmCtrl processing failed")?;

    info!(
        "Solve complete: converged = {}, iterations = {}, residual = {:.3} cm",
        report.converged, report.iterations, report.residual_cm
    );
    info!(
        "Joint demands: shoulder = {:.4} rad, elbow = {:.4} rad",
        arm_dems.shoulder_pos_rad, arm_dems.elbow_pos_rad
    );

    // ---- OUTPUT ----

    let mut mech_client = MechClient::new(std::io::stdout());

    mech_client
        .send_demands(&arm_dems)
        .wrap_err("Failed to send the demands to the actuation controller")?;

    // Save the status report as a data product
    session.save("arm_ctrl_report.json", report);

    session.exit();

    Ok(())
}
