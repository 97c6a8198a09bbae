//! Closed-loop vacuum regulation

pub mod fixed;
pub mod pid;

pub use fixed::Fixed32;
pub use pid::{RegulatorConfig, RegulatorGains, VacuumRegulator};
