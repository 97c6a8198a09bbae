//! Top-level controller coordinating state machine, sequencer, and safety
//!
//! The controller is the central brain that:
//! - Routes input events to configuration edits or the sequencer
//! - Updates the state machine
//! - Drives the exposure sequencer every tick
//! - Tracks safety observations
//!
//! Ownership is explicit: the controller owns the process parameters
//! and the sequencer; the vacuum regulator owns its own integrator and
//! is passed in by reference on every tick.

use crate::input::InputEvent;
use crate::params::ProcessParameters;
use crate::safety::{SafetyMonitor, SafetyStatus};
use crate::sequence::{EmitterCommand, ExposurePhase, ExposureSequencer};
use crate::state::{Event, State};
use crate::traits::VacuumControl;

/// Side effects the caller must perform on behalf of the controller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Action {
    /// Persist the setpoints (ConfigureSide -> Idle commit)
    CommitParams(ProcessParameters),
}

/// Controller state for coordinating subsystems
pub struct Controller {
    /// Current machine state
    state: State,
    /// Operator-configured parameters
    params: ProcessParameters,
    /// Exposure sequencer
    sequencer: ExposureSequencer,
    /// Safety observation
    safety: SafetyMonitor,
}

impl Controller {
    /// Create a controller with the parameters loaded from storage
    pub fn new(params: ProcessParameters) -> Self {
        Self {
            state: State::Idle,
            params,
            sequencer: ExposureSequencer::new(),
            safety: SafetyMonitor::new(),
        }
    }

    /// Get current state
    pub fn state(&self) -> State {
        self.state
    }

    /// Get the in-memory parameters
    ///
    /// These reflect either the last-loaded persisted values or an
    /// uncommitted edit.
    pub fn params(&self) -> &ProcessParameters {
        &self.params
    }

    /// Get the current emitter command
    pub fn emitter_command(&self) -> EmitterCommand {
        self.sequencer.emitter_command()
    }

    /// Get the current exposure phase
    pub fn exposure_phase(&self) -> ExposurePhase {
        self.sequencer.phase()
    }

    /// Remaining exposure time in seconds
    pub fn remaining_s(&self) -> i16 {
        self.sequencer.remaining_s()
    }

    /// Most recent measured pressure (hPa)
    pub fn pressure(&self) -> i16 {
        self.sequencer.pressure()
    }

    /// Current safety observation
    pub fn safety_status(&self) -> SafetyStatus {
        self.safety.check()
    }

    /// Process a decoded input event
    ///
    /// Returns an action for the caller to perform (currently only the
    /// setpoint commit).
    pub fn on_input(&mut self, input: InputEvent) -> Option<Action> {
        match input {
            InputEvent::EncoderCw | InputEvent::EncoderCcw => {
                self.apply_step(input.rotation_delta() as i16);
                None
            }
            InputEvent::ConfirmPressed => {
                // The ConfigureSide -> Idle edge is the only place the
                // setpoints are written back to storage
                let committing = self.state == State::ConfigureSide;
                self.state = self.state.transition(Event::Confirm);
                if committing {
                    Some(Action::CommitParams(self.params))
                } else {
                    None
                }
            }
            InputEvent::StartPressed => {
                match self.state {
                    State::Idle => {
                        self.state = self.state.transition(Event::Start);
                        self.sequencer.start(&self.params);
                    }
                    State::Exposing => {
                        // Same physical button doubles as abort; only
                        // the Expose phase honors it
                        self.sequencer.request_abort();
                    }
                    _ => {}
                }
                None
            }
        }
    }

    /// Apply an encoder step to whichever parameter the state selects
    ///
    /// Wrapping arithmetic and no range checks: any value the operator
    /// dials in is accepted.
    fn apply_step(&mut self, step: i16) {
        match self.state {
            State::ConfigureTime => {
                self.params.time_setpoint = self.params.time_setpoint.wrapping_add(step);
            }
            State::ConfigureVacuum => {
                self.params.vacuum_setpoint = self.params.vacuum_setpoint.wrapping_add(step);
            }
            State::ConfigureSide => {
                self.params.dual_sided = step > 0;
            }
            _ => {}
        }
    }

    /// Run one control tick
    ///
    /// Only the Exposing state does per-tick work; in every other state
    /// the buttons and encoder are serviced through `on_input`.
    pub fn tick<V: VacuumControl>(&mut self, vacuum: &mut V, now_ms: u32) -> Option<Event> {
        if self.state != State::Exposing {
            return None;
        }

        let event = match self.sequencer.tick(vacuum, now_ms) {
            Ok(event) => {
                self.safety.record_sensor_ok();
                event
            }
            Err(e) => {
                // Observation only: stay in phase, keep trying
                self.safety.record_sensor_fault(e);
                None
            }
        };

        self.safety
            .update_sequence(self.sequencer.phase(), self.sequencer.precharge_ticks());

        if let Some(ev) = event {
            self.state = self.state.transition(ev);
        }
        event
    }
}
