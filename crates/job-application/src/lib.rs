//! Job application form: draft state, position-conditional validation, and the
//! editing/submitted view state machine with its HTML rendering.

pub mod config;
pub mod error;
pub mod form;
pub mod telemetry;
