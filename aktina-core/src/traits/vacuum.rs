//! Closed-loop vacuum regulation trait

use super::pressure::SensorError;

/// Combined vacuum controller with pressure feedback
///
/// Implemented by regulators that manage both the pressure reading and
/// the pump output for closed-loop control. The exposure sequencer
/// calls `regulate` once per control tick.
pub trait VacuumControl {
    /// Run one regulation step toward `setpoint_hpa`
    ///
    /// Reads the probe, updates the control terms, applies the new pump
    /// demand, and returns the measured pressure for display and for
    /// the pre-charge exit decision.
    fn regulate(&mut self, setpoint_hpa: i16) -> Result<i16, SensorError>;

    /// Command the pump fully off
    fn stop(&mut self);

    /// Clear the integrator state
    ///
    /// Called at the start of each pre-charge phase so accumulated
    /// error from a prior cycle does not carry into the next one.
    fn reset(&mut self);

    /// The demand applied on the most recent `regulate` call
    ///
    /// Negative values mean the regulator asked for less than nothing;
    /// the pump driver floors those to zero.
    fn last_demand(&self) -> i16;
}
