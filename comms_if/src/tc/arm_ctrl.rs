//! # Arm control telecommands

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use serde::{Deserialize, Serialize};
use structopt::StructOpt;

// ------------------------------------------------------------------------------------------------
// ENUMS
// ------------------------------------------------------------------------------------------------

/// A command that can be completed by arm control.
#[derive(Debug, Clone, Serialize, Deserialize, StructOpt)]
pub enum ArmCmd {
    /// Drive the end effector to a Cartesian target position.
    ///
    /// The target is expressed in the arm's base frame, in the same unit as
    /// the segment lengths.
    #[structopt(name = "move-to")]
    MoveTo {
        /// Target x position in the arm frame.
        ///
        /// Units: centimetres
        x_cm: f64,

        /// Target y position in the arm frame.
        ///
        /// Units: centimetres
        y_cm: f64,
    },

    /// Drive the end effector towards an object reported by the perception
    /// collaborator as a range and bearing from the arm's base.
    #[structopt(name = "range")]
    Range {
        /// Distance to the object from the base of the arm.
        ///
        /// Units: centimetres
        distance_cm: f64,

        /// Bearing of the object in the plane of motion.
        ///
        /// Follows the right hand rule about the out-of-plane axis.
        ///
        /// Units: radians
        bearing_rad: f64,
    },

    /// Stop the arm, holding the current axis angles.
    #[structopt(name = "stop")]
    Stop,
}

// ------------------------------------------------------------------------------------------------
// TESTS
// ------------------------------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cmd_serialisation_round_trip() {
        let cmd = ArmCmd::MoveTo {
            x_cm: 40.0,
            y_cm: 30.0,
        };

        let json = serde_json::to_string(&cmd).unwrap();
        let parsed: ArmCmd = serde_json::from_str(&json).unwrap();

        match parsed {
            ArmCmd::MoveTo { x_cm, y_cm } => {
                assert_eq!(x_cm, 40.0);
                assert_eq!(y_cm, 30.0);
            }
            _ => panic!("Expected an ArmCmd::MoveTo"),
        }
    }
}
