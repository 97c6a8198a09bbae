//! Safety monitor implementation
//!
//! Observes stalled pre-charge and probe faults. Observation only: the
//! baseline behavior of the machine is to keep pumping at an
//! unreachable vacuum target, and the monitor does not change that - it
//! gives the display something to say about it.

use crate::sequence::ExposurePhase;
use crate::traits::SensorError;

/// Pre-charge ticks before the stall observation trips (60 s at the
/// 100 ms control cadence)
pub const PRECHARGE_STALL_TICKS: u32 = 600;

/// Kinds of observable faults
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FaultKind {
    /// Pressure probe read failed on the latest regulation attempt
    SensorFault,
    /// Pre-charge has run far past the expected pump-down time
    VacuumStall,
}

/// Safety condition status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SafetyStatus {
    /// All conditions normal
    Ok,
    /// Observable condition present
    Fault(FaultKind),
}

/// Safety monitor for fault observation
#[derive(Debug, Clone)]
pub struct SafetyMonitor {
    precharge_ticks: u32,
    sensor_fault: Option<SensorError>,
}

impl Default for SafetyMonitor {
    fn default() -> Self {
        Self::new()
    }
}

impl SafetyMonitor {
    /// Create a new safety monitor
    pub fn new() -> Self {
        Self {
            precharge_ticks: 0,
            sensor_fault: None,
        }
    }

    /// Update with the sequencer's current phase and pre-charge age
    pub fn update_sequence(&mut self, phase: ExposurePhase, precharge_ticks: u32) {
        self.precharge_ticks = match phase {
            ExposurePhase::PreCharge => precharge_ticks,
            _ => 0,
        };
    }

    /// Record a probe read failure
    pub fn record_sensor_fault(&mut self, error: SensorError) {
        self.sensor_fault = Some(error);
    }

    /// Record a successful probe read
    pub fn record_sensor_ok(&mut self) {
        self.sensor_fault = None;
    }

    /// Check all observed conditions
    ///
    /// Returns the first condition present, or Ok.
    pub fn check(&self) -> SafetyStatus {
        if self.sensor_fault.is_some() {
            return SafetyStatus::Fault(FaultKind::SensorFault);
        }

        if self.precharge_ticks >= PRECHARGE_STALL_TICKS {
            return SafetyStatus::Fault(FaultKind::VacuumStall);
        }

        SafetyStatus::Ok
    }

    /// The most recent probe error, if any
    pub fn sensor_fault(&self) -> Option<SensorError> {
        self.sensor_fault
    }
}
