//! Safety observation

pub mod monitor;

pub use monitor::{FaultKind, SafetyMonitor, SafetyStatus, PRECHARGE_STALL_TICKS};
