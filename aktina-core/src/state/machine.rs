//! State machine definition
//!
//! All pump, emitter, and display behavior is a function of the current
//! state and an event. The machine cycles indefinitely; there is no
//! terminal state.

use super::events::Event;

/// Machine states
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum State {
    /// Stand-by, setpoints visible, waiting for start or configuration
    Idle,
    /// Encoder edits the exposure duration (seconds)
    ConfigureTime,
    /// Encoder edits the vacuum target (hPa)
    ConfigureVacuum,
    /// Encoder toggles single/dual sided exposure
    ConfigureSide,
    /// Exposure sequencer active (pre-charge then timed emission)
    Exposing,
}

impl State {
    /// Check if this state allows emitter operation
    pub fn emitters_allowed(&self) -> bool {
        matches!(self, State::Exposing)
    }

    /// Check if the encoder currently edits a parameter
    pub fn is_configuring(&self) -> bool {
        matches!(
            self,
            State::ConfigureTime | State::ConfigureVacuum | State::ConfigureSide
        )
    }

    /// Process an event and return the next state
    ///
    /// This is the core state transition logic. Committing the edited
    /// setpoints on the ConfigureSide -> Idle transition is the caller's
    /// responsibility; the machine only sequences the states.
    pub fn transition(self, event: Event) -> Self {
        use Event::*;
        use State::*;

        match (self, event) {
            // Idle transitions
            (Idle, Start) => Exposing,
            (Idle, Confirm) => ConfigureTime,

            // Configuration round: confirm advances, encoder edits in place
            (ConfigureTime, Confirm) => ConfigureVacuum,
            (ConfigureVacuum, Confirm) => ConfigureSide,
            (ConfigureSide, Confirm) => Idle,

            // Exposure ends by running out the timer or by abort
            (Exposing, ExposureFinished) => Idle,
            (Exposing, ExposureAborted) => Idle,

            // Default: stay in current state
            _ => self,
        }
    }
}
