//! Exposure sequencing
//!
//! Converts the operator's setpoints into the pre-charge and timed
//! emission phases and manages their execution tick by tick.

pub mod executor;

pub use executor::{EmitterCommand, ExposurePhase, ExposureSequencer};
