//! PID vacuum regulator
//!
//! Converts the pressure error into a pump drive demand once per
//! control tick. Uses fixed-point math for Cortex-M0 compatibility.
//!
//! The integral and derivative terms are per-tick quantities; the
//! firmware's tick task enforces a fixed 100 ms cadence, which is what
//! makes them well-defined. Demand is clamped to the actuator ceiling
//! only - negative demand is passed through unchanged and the pump
//! driver floors it to zero.

use super::fixed::Fixed32;
use aktina_core::traits::{PressureSensor, PumpDrive, SensorError, VacuumControl};

/// PID gains
///
/// Stored as Fixed32 for precision in calculations.
#[derive(Debug, Clone, Copy, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RegulatorGains {
    /// Proportional gain (Kp)
    pub kp: Fixed32,
    /// Integral gain (Ki)
    pub ki: Fixed32,
    /// Derivative gain (Kd)
    pub kd: Fixed32,
}

impl RegulatorGains {
    /// Create gains from scaled integers (value × 1000)
    ///
    /// # Example
    /// ```
    /// use aktina_drivers::regulator::pid::RegulatorGains;
    /// // Kp=0.52, Ki=0.10, Kd=0.00
    /// let gains = RegulatorGains::from_scaled_1000(520, 100, 0);
    /// ```
    pub const fn from_scaled_1000(kp_x1000: i32, ki_x1000: i32, kd_x1000: i32) -> Self {
        Self {
            kp: Fixed32::from_scaled_1000(kp_x1000),
            ki: Fixed32::from_scaled_1000(ki_x1000),
            kd: Fixed32::from_scaled_1000(kd_x1000),
        }
    }

    /// Check if any gain is non-zero
    pub fn is_configured(&self) -> bool {
        !self.kp.is_zero() || !self.ki.is_zero() || !self.kd.is_zero()
    }
}

/// Regulator configuration
#[derive(Debug, Clone)]
pub struct RegulatorConfig {
    /// PID gains
    pub gains: RegulatorGains,
    /// Constant offset centering actuation around a working point
    pub bias: i16,
    /// Actuator ceiling; demand above this is clamped
    pub output_max: i16,
}

impl Default for RegulatorConfig {
    fn default() -> Self {
        Self {
            // Qualification-test values; to be retuned per pump build
            gains: RegulatorGains::from_scaled_1000(520, 100, 0),
            bias: 50,
            output_max: 255,
        }
    }
}

/// Regulator internal state
#[derive(Debug, Clone, Copy, Default)]
struct PidState {
    /// Accumulated raw error (saturating, never clamped otherwise)
    cumulative: i32,
    /// Previous error for the derivative term
    prev_error: i32,
}

/// PID vacuum regulator over a pressure probe and a pump output
pub struct VacuumRegulator<S, P> {
    sensor: S,
    pump: P,
    config: RegulatorConfig,
    state: PidState,
    last_demand: i16,
}

impl<S: PressureSensor, P: PumpDrive> VacuumRegulator<S, P> {
    /// Create a new regulator
    pub fn new(sensor: S, pump: P, config: RegulatorConfig) -> Self {
        Self {
            sensor,
            pump,
            config,
            state: PidState::default(),
            last_demand: 0,
        }
    }

    /// Update the gains
    ///
    /// Clears the integrator so stale accumulation cannot leak through
    /// the new Ki.
    pub fn set_gains(&mut self, gains: RegulatorGains) {
        self.config.gains = gains;
        self.state = PidState::default();
    }

    /// Get the current gains
    pub fn gains(&self) -> &RegulatorGains {
        &self.config.gains
    }

    /// Get access to the underlying sensor
    pub fn sensor(&mut self) -> &mut S {
        &mut self.sensor
    }

    /// Get access to the underlying pump
    pub fn pump(&self) -> &P {
        &self.pump
    }

    /// Compute the drive demand for the given error
    fn compute_demand(&mut self, error: i32) -> i16 {
        self.state.cumulative = self.state.cumulative.saturating_add(error);
        let derivative = error - self.state.prev_error;
        self.state.prev_error = error;

        let gains = &self.config.gains;
        let sum = Fixed32::from_int(self.config.bias)
            .saturating_add(gains.kp.mul_int(error))
            .saturating_add(gains.ki.mul_int(self.state.cumulative))
            .saturating_add(gains.kd.mul_int(derivative));

        // Ceiling only: negative demand passes through for the pump
        // driver to floor
        sum.to_int().min(self.config.output_max)
    }
}

impl<S: PressureSensor, P: PumpDrive> VacuumControl for VacuumRegulator<S, P> {
    fn regulate(&mut self, setpoint_hpa: i16) -> Result<i16, SensorError> {
        let pressure = self.sensor.read_hpa()?;

        let error = setpoint_hpa as i32 - pressure as i32;
        let demand = self.compute_demand(error);

        self.pump.set_drive(demand);
        self.last_demand = demand;

        Ok(pressure)
    }

    fn stop(&mut self) {
        self.pump.set_drive(0);
        self.last_demand = 0;
    }

    fn reset(&mut self) {
        self.state = PidState::default();
    }

    fn last_demand(&self) -> i16 {
        self.last_demand
    }
}
