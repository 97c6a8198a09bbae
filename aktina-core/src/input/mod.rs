//! Operator input events
//!
//! Debouncing and quadrature decoding happen at the driver layer; the
//! controller only sees the decoded events defined here.

/// Input events from the front panel (encoder + two buttons)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum InputEvent {
    /// Encoder rotated clockwise (1 detent)
    EncoderCw,
    /// Encoder rotated counter-clockwise (1 detent)
    EncoderCcw,
    /// Encoder push button pressed (confirm)
    ConfirmPressed,
    /// Start/abort button pressed
    StartPressed,
}

impl InputEvent {
    /// Returns true if this is a rotation event
    pub fn is_rotation(&self) -> bool {
        matches!(self, InputEvent::EncoderCw | InputEvent::EncoderCcw)
    }

    /// Returns true if this is a button event
    pub fn is_button(&self) -> bool {
        matches!(self, InputEvent::ConfirmPressed | InputEvent::StartPressed)
    }

    /// Returns the rotation direction as a signed step (-1, 0, or +1)
    pub fn rotation_delta(&self) -> i8 {
        match self {
            InputEvent::EncoderCw => 1,
            InputEvent::EncoderCcw => -1,
            _ => 0,
        }
    }
}
