//! # Mechanisms Client
//!
//! Output boundary between arm control and the actuation controller. Demands
//! are sent as a single line of text over whatever byte sink the client was
//! built with, in operation the serial link to the controller.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use log::info;
use std::io::Write;

// Internal
use comms_if::eqpt::mech::ArmDems;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Client which sends demands to the mechanisms actuation controller.
pub struct MechClient<W: Write> {
    sink: W,
}

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// Errors which can occur in the MechClient
#[derive(Debug, thiserror::Error)]
pub enum MechClientError {
    #[error("Could not write the demands to the actuation controller: {0}")]
    WriteError(#[from] std::io::Error),
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl<W: Write> MechClient<W> {
    /// Create a new client over the given byte sink.
    pub fn new(sink: W) -> Self {
        Self { sink }
    }

    /// Send a set of arm demands to the actuation controller.
    ///
    /// The demands are flushed immediately so the controller sees them in
    /// the same cycle they were produced.
    pub fn send_demands(&mut self, dems: &ArmDems) -> Result<(), MechClientError> {
        let wire = dems.to_wire();

        self.sink.write_all(wire.as_bytes())?;
        self.sink.flush()?;

        info!("Sent arm demands: \"{}\"", wire);

        Ok(())
    }
}

// ---------------------------------------------------------------------------
// TESTS
// ---------------------------------------------------------------------------
