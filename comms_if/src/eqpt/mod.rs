//! # Equipment interfaces

// ---------------------------------------------------------------------------
// MODULES
// ---------------------------------------------------------------------------

pub mod mech;
