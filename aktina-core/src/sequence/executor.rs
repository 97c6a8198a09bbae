//! Exposure execution sequencer
//!
//! Runs the two phases of an exposure as explicit sub-states re-entered
//! every control tick rather than as blocking loops, so a watchdog or
//! timeout hook can be added later without restructuring control flow.
//!
//! Pre-charge has no iteration limit and no cancellation path: if the
//! vacuum target is unreachable the sequencer stays in that phase
//! indefinitely while the pump keeps running. The safety monitor
//! surfaces this as a stalled condition but does not intervene.

use crate::params::ProcessParameters;
use crate::state::Event;
use crate::traits::{SensorError, VacuumControl};

/// Sequencer execution phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ExposurePhase {
    /// Not running
    Idle,
    /// Pumping down until the measured pressure reaches the setpoint
    PreCharge,
    /// Emitters on, timer running, vacuum maintained
    Expose,
    /// Finished or aborted; emitters off, pump off
    Complete,
}

/// Current emitter command from the sequencer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct EmitterCommand {
    /// Lower bank of UV emitters
    pub low: bool,
    /// Upper bank (dual-sided exposures only)
    pub high: bool,
}

impl EmitterCommand {
    /// Both banks off
    pub const fn off() -> Self {
        Self {
            low: false,
            high: false,
        }
    }

    /// Lower bank only (single-sided exposure)
    pub const fn single() -> Self {
        Self {
            low: true,
            high: false,
        }
    }

    /// Both banks (dual-sided exposure)
    pub const fn dual() -> Self {
        Self {
            low: true,
            high: true,
        }
    }
}

/// Exposure sequencer
///
/// Captures the setpoints once at start - a parameter edit landing
/// mid-exposure (which the controller does not allow, but a stray
/// write could) has no effect on the running sequence.
#[derive(Debug)]
pub struct ExposureSequencer {
    phase: ExposurePhase,
    /// Vacuum target captured at start (hPa)
    vacuum_setpoint: i16,
    /// Duration captured at start (seconds)
    time_setpoint: i16,
    /// Dual-sided flag captured at start
    dual_sided: bool,
    /// Integrator reset pending for the first pre-charge tick
    fresh: bool,
    /// Timestamp of the Expose phase entry (ms)
    start_ms: u32,
    /// Elapsed whole seconds in the Expose phase
    elapsed_s: i16,
    /// Ticks spent in pre-charge (stall observation)
    precharge_ticks: u32,
    /// Most recent measured pressure (hPa)
    pressure: i16,
    /// Abort requested by the operator
    abort_requested: bool,
    /// Current emitter command
    emitters: EmitterCommand,
}

impl Default for ExposureSequencer {
    fn default() -> Self {
        Self::new()
    }
}

impl ExposureSequencer {
    /// Create an idle sequencer
    pub fn new() -> Self {
        Self {
            phase: ExposurePhase::Idle,
            vacuum_setpoint: 0,
            time_setpoint: 0,
            dual_sided: false,
            fresh: false,
            start_ms: 0,
            elapsed_s: 0,
            precharge_ticks: 0,
            pressure: 0,
            abort_requested: false,
            emitters: EmitterCommand::off(),
        }
    }

    /// Begin an exposure with the given parameters
    ///
    /// Both setpoints and the dual-sided flag are captured here and not
    /// re-read for the rest of the sequence.
    pub fn start(&mut self, params: &ProcessParameters) {
        self.phase = ExposurePhase::PreCharge;
        self.vacuum_setpoint = params.vacuum_setpoint;
        self.time_setpoint = params.time_setpoint;
        self.dual_sided = params.dual_sided;
        self.fresh = true;
        self.start_ms = 0;
        self.elapsed_s = 0;
        self.precharge_ticks = 0;
        self.abort_requested = false;
        self.emitters = EmitterCommand::off();
    }

    /// Request an abort
    ///
    /// Honored only during the Expose phase; pre-charge has no
    /// cancellation path.
    pub fn request_abort(&mut self) {
        self.abort_requested = true;
    }

    /// Get the current phase
    pub fn phase(&self) -> ExposurePhase {
        self.phase
    }

    /// Get the current emitter command
    pub fn emitter_command(&self) -> EmitterCommand {
        self.emitters
    }

    /// Most recent measured pressure (hPa)
    pub fn pressure(&self) -> i16 {
        self.pressure
    }

    /// Remaining exposure time in seconds (0 outside the Expose phase)
    pub fn remaining_s(&self) -> i16 {
        if self.phase == ExposurePhase::Expose {
            self.time_setpoint.saturating_sub(self.elapsed_s)
        } else {
            0
        }
    }

    /// Ticks spent in pre-charge so far
    pub fn precharge_ticks(&self) -> u32 {
        self.precharge_ticks
    }

    /// Run one control tick
    ///
    /// Calls the vacuum regulator in both active phases. Returns the
    /// event to feed the state machine when the sequence ends. Sensor
    /// errors propagate out; the sequencer stays in its current phase
    /// and the controller records the fault as an observation.
    pub fn tick<V: VacuumControl>(
        &mut self,
        vacuum: &mut V,
        now_ms: u32,
    ) -> Result<Option<Event>, SensorError> {
        match self.phase {
            ExposurePhase::Idle | ExposurePhase::Complete => Ok(None),
            ExposurePhase::PreCharge => self.tick_precharge(vacuum, now_ms),
            ExposurePhase::Expose => self.tick_expose(vacuum, now_ms),
        }
    }

    /// Tick while pumping down to the vacuum target
    fn tick_precharge<V: VacuumControl>(
        &mut self,
        vacuum: &mut V,
        now_ms: u32,
    ) -> Result<Option<Event>, SensorError> {
        if self.fresh {
            // Accumulated error from a prior cycle must not shape this one
            vacuum.reset();
            self.fresh = false;
        }

        self.pressure = vacuum.regulate(self.vacuum_setpoint)?;
        self.precharge_ticks = self.precharge_ticks.saturating_add(1);

        if self.pressure >= self.vacuum_setpoint {
            // Target reached: the pump keeps whatever demand the
            // regulator just computed - it is not forced to zero here.
            self.phase = ExposurePhase::Expose;
            self.start_ms = now_ms;
            self.elapsed_s = 0;
            self.emitters = if self.dual_sided {
                EmitterCommand::dual()
            } else {
                EmitterCommand::single()
            };
        }

        Ok(None)
    }

    /// Tick while the emitters are running
    fn tick_expose<V: VacuumControl>(
        &mut self,
        vacuum: &mut V,
        now_ms: u32,
    ) -> Result<Option<Event>, SensorError> {
        self.elapsed_s = (now_ms.wrapping_sub(self.start_ms) / 1000) as i16;

        self.pressure = vacuum.regulate(self.vacuum_setpoint)?;

        if self.abort_requested {
            self.finish(vacuum);
            return Ok(Some(Event::ExposureAborted));
        }

        if self.elapsed_s >= self.time_setpoint {
            self.finish(vacuum);
            return Ok(Some(Event::ExposureFinished));
        }

        Ok(None)
    }

    /// Shut everything down on exit by either path
    fn finish<V: VacuumControl>(&mut self, vacuum: &mut V) {
        self.emitters = EmitterCommand::off();
        vacuum.stop();
        self.phase = ExposurePhase::Complete;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Scripted vacuum regulator for testing
    ///
    /// Returns pressures from a fixed sequence and records every demand
    /// it would have sent to the pump.
    struct MockVacuum {
        pressures: &'static [i16],
        index: usize,
        demand: i16,
        stopped: bool,
        resets: u32,
    }

    impl MockVacuum {
        fn new(pressures: &'static [i16]) -> Self {
            Self {
                pressures,
                index: 0,
                demand: 0,
                stopped: false,
                resets: 0,
            }
        }
    }

    impl VacuumControl for MockVacuum {
        fn regulate(&mut self, setpoint_hpa: i16) -> Result<i16, SensorError> {
            let pressure = *self
                .pressures
                .get(self.index)
                .or(self.pressures.last())
                .unwrap_or(&setpoint_hpa);
            self.index += 1;
            // Crude stand-in for the PID: proportional demand only
            self.demand = setpoint_hpa - pressure + 50;
            self.stopped = false;
            Ok(pressure)
        }

        fn stop(&mut self) {
            self.demand = 0;
            self.stopped = true;
        }

        fn reset(&mut self) {
            self.resets += 1;
        }

        fn last_demand(&self) -> i16 {
            self.demand
        }
    }

    fn params(vacuum: i16, time: i16, dual: bool) -> ProcessParameters {
        ProcessParameters {
            vacuum_setpoint: vacuum,
            time_setpoint: time,
            dual_sided: dual,
        }
    }

    #[test]
    fn test_precharge_exits_exactly_at_target_tick() {
        // Monotone ramp reaching 500 on the 7th regulation call
        static RAMP: [i16; 8] = [120, 190, 260, 330, 400, 460, 500, 505];
        let mut vacuum = MockVacuum::new(&RAMP);
        let mut seq = ExposureSequencer::new();
        seq.start(&params(500, 60, false));

        for tick in 1..=6 {
            let ev = seq.tick(&mut vacuum, tick * 100).unwrap();
            assert_eq!(ev, None);
            assert_eq!(seq.phase(), ExposurePhase::PreCharge, "tick {}", tick);
        }

        // Tick 7 reaches the setpoint
        let ev = seq.tick(&mut vacuum, 700).unwrap();
        assert_eq!(ev, None);
        assert_eq!(seq.phase(), ExposurePhase::Expose);
        // The actuator keeps the demand the regulator computed at the
        // crossing tick - it is not forced to zero.
        assert!(!vacuum.stopped);
        assert_eq!(vacuum.demand, 500 - 500 + 50);
    }

    #[test]
    fn test_integrator_reset_once_per_start() {
        static RAMP: [i16; 1] = [500];
        let mut vacuum = MockVacuum::new(&RAMP);
        let mut seq = ExposureSequencer::new();

        seq.start(&params(400, 10, false));
        seq.tick(&mut vacuum, 100).unwrap();
        seq.tick(&mut vacuum, 200).unwrap();
        assert_eq!(vacuum.resets, 1);

        seq.start(&params(400, 10, false));
        seq.tick(&mut vacuum, 300).unwrap();
        assert_eq!(vacuum.resets, 2);
    }

    #[test]
    fn test_single_sided_run_to_completion() {
        static HELD: [i16; 1] = [500];
        let mut vacuum = MockVacuum::new(&HELD);
        let mut seq = ExposureSequencer::new();
        seq.start(&params(500, 60, false));

        // Pre-charge satisfied on the first tick
        seq.tick(&mut vacuum, 0).unwrap();
        assert_eq!(seq.phase(), ExposurePhase::Expose);
        assert_eq!(seq.emitter_command(), EmitterCommand::single());

        // Drive simulated time forward; the high bank must never light
        let mut finished = None;
        for s in 1..=60 {
            assert!(!seq.emitter_command().high);
            if let Some(ev) = seq.tick(&mut vacuum, s * 1000).unwrap() {
                finished = Some((s, ev));
                break;
            }
        }

        let (at_s, ev) = finished.expect("exposure should finish");
        assert_eq!(at_s, 60);
        assert_eq!(ev, Event::ExposureFinished);
        assert_eq!(seq.emitter_command(), EmitterCommand::off());
        assert!(vacuum.stopped);
        assert_eq!(vacuum.last_demand(), 0);
    }

    #[test]
    fn test_abort_mid_exposure() {
        static HELD: [i16; 1] = [500];
        let mut vacuum = MockVacuum::new(&HELD);
        let mut seq = ExposureSequencer::new();
        seq.start(&params(500, 60, true));

        seq.tick(&mut vacuum, 0).unwrap();
        assert_eq!(seq.emitter_command(), EmitterCommand::dual());

        for s in 1..10 {
            assert_eq!(seq.tick(&mut vacuum, s * 1000).unwrap(), None);
        }

        seq.request_abort();
        let ev = seq.tick(&mut vacuum, 10_000).unwrap();
        assert_eq!(ev, Some(Event::ExposureAborted));
        assert_eq!(seq.emitter_command(), EmitterCommand::off());
        assert!(vacuum.stopped);
        assert_eq!(seq.phase(), ExposurePhase::Complete);
    }

    #[test]
    fn test_abort_ignored_during_precharge() {
        // Pressure never reaches the target
        static STUCK: [i16; 1] = [100];
        let mut vacuum = MockVacuum::new(&STUCK);
        let mut seq = ExposureSequencer::new();
        seq.start(&params(500, 60, false));

        seq.request_abort();
        for tick in 1..=50 {
            let ev = seq.tick(&mut vacuum, tick * 100).unwrap();
            assert_eq!(ev, None);
            assert_eq!(seq.phase(), ExposurePhase::PreCharge);
        }
        assert_eq!(seq.precharge_ticks(), 50);
        assert!(!vacuum.stopped);
    }

    #[test]
    fn test_dual_sided_captured_at_start() {
        static HELD: [i16; 1] = [500];
        let mut vacuum = MockVacuum::new(&HELD);
        let mut seq = ExposureSequencer::new();

        let mut p = params(500, 60, true);
        seq.start(&p);
        seq.tick(&mut vacuum, 0).unwrap();
        assert_eq!(seq.emitter_command(), EmitterCommand::dual());

        // A stray in-memory toggle after start must not change the
        // already-activated banks.
        p.dual_sided = false;
        seq.tick(&mut vacuum, 1000).unwrap();
        assert_eq!(seq.emitter_command(), EmitterCommand::dual());
    }

    #[test]
    fn test_zero_duration_exposure() {
        static HELD: [i16; 1] = [500];
        let mut vacuum = MockVacuum::new(&HELD);
        let mut seq = ExposureSequencer::new();
        seq.start(&params(500, 0, false));

        seq.tick(&mut vacuum, 0).unwrap();
        assert_eq!(seq.phase(), ExposurePhase::Expose);

        // First expose tick already satisfies elapsed >= 0
        let ev = seq.tick(&mut vacuum, 100).unwrap();
        assert_eq!(ev, Some(Event::ExposureFinished));
    }

    #[test]
    fn test_remaining_time_counts_down() {
        static HELD: [i16; 1] = [500];
        let mut vacuum = MockVacuum::new(&HELD);
        let mut seq = ExposureSequencer::new();
        seq.start(&params(500, 30, false));

        seq.tick(&mut vacuum, 0).unwrap();
        seq.tick(&mut vacuum, 12_000).unwrap();
        assert_eq!(seq.remaining_s(), 18);
    }
}
