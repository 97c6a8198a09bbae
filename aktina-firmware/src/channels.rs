//! Inter-task communication channels
//!
//! Defines the static channels used for communication between Embassy
//! tasks. Uses embassy-sync primitives for safe async communication.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use embassy_sync::signal::Signal;

use aktina_core::input::InputEvent;
use aktina_core::params::ProcessParameters;

/// Channel capacity for decoded input events
const INPUT_CHANNEL_SIZE: usize = 8;

/// Input events from the front panel (encoder rotation, button presses)
pub static INPUT_CHANNEL: Channel<CriticalSectionRawMutex, InputEvent, INPUT_CHANNEL_SIZE> =
    Channel::new();

/// Setpoint commit requests (controller -> store task)
pub static PARAM_SAVE: Signal<CriticalSectionRawMutex, ProcessParameters> = Signal::new();
