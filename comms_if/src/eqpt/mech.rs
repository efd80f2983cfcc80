//! # Mechanisms Equipment Commands

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use serde::{Deserialize, Serialize};

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// Demands sent to the arm actuation controller.
///
/// Angles are held in radians internally, the unit every kinematics
/// calculation works in. Conversion to the integer degrees expected by the
/// actuation controller happens only in [`ArmDems::to_wire`].
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct ArmDems {
    /// The demanded position of the shoulder joint.
    ///
    /// Units: radians
    pub shoulder_pos_rad: f64,

    /// The demanded position of the elbow joint, relative to the upper
    /// segment's frame.
    ///
    /// Units: radians
    pub elbow_pos_rad: f64,
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl ArmDems {
    /// Build demands from the `[shoulder, elbow]` angle pair used by the
    /// kinematics chain.
    pub fn from_angles_rad(angles_rad: [f64; 2]) -> Self {
        Self {
            shoulder_pos_rad: angles_rad[0],
            elbow_pos_rad: angles_rad[1],
        }
    }

    /// Encode the demands for the serial channel to the actuation controller.
    ///
    /// Each angle is independently converted to degrees and rounded to the
    /// nearest integer, then the two are joined with a single space
    /// (shoulder first). No framing or checksum is added at this layer, that
    /// is the transport's job.
    pub fn to_wire(&self) -> String {
        format!(
            "{} {}",
            self.shoulder_pos_rad.to_degrees().round() as i64,
            self.elbow_pos_rad.to_degrees().round() as i64
        )
    }
}

// ------------------------------------------------------------------------------------------------
// TESTS
// ------------------------------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_format_is_two_integer_degrees() {
        let dems = ArmDems::from_angles_rad([10f64.to_radians(), 20f64.to_radians()]);
        assert_eq!(dems.to_wire(), "10 20");
    }

    #[test]
    fn wire_format_rounds_to_nearest_degree() {
        let dems = ArmDems::from_angles_rad([10.4f64.to_radians(), 20.5f64.to_radians()]);
        assert_eq!(dems.to_wire(), "10 21");
    }

    #[test]
    fn wire_format_handles_negative_angles() {
        let dems = ArmDems::from_angles_rad([(-45.6f64).to_radians(), (-0.2f64).to_radians()]);
        assert_eq!(dems.to_wire(), "-46 0");
    }

    #[test]
    fn dems_serialisation_round_trip() {
        let dems = ArmDems {
            shoulder_pos_rad: 0.25,
            elbow_pos_rad: -1.5,
        };

        let json = serde_json::to_string(&dems).unwrap();
        let parsed: ArmDems = serde_json::from_str(&json).unwrap();

        assert_eq!(dems, parsed);
    }
}
