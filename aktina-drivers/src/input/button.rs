//! Debounced push button
//!
//! Reports one logical edge per physical press. Each physical button
//! owns its own instance - two buttons must never share debounce state,
//! or a press on one can mask a press on the other.

use embedded_hal::digital::InputPin;

/// Debounce window in milliseconds, measured from the last accepted
/// transition of this same button
pub const DEBOUNCE_MS: u32 = 20;

/// Debounced button on an input pin
///
/// Buttons idle high through a pull-up; a press pulls the line low, so
/// the reported edge is the falling transition.
pub struct DebouncedButton<P> {
    pin: P,
    /// Timestamp of the last accepted transition (ms)
    last_edge_ms: u32,
    /// Level at the last accepted transition
    prev_level: bool,
}

impl<P: InputPin> DebouncedButton<P> {
    /// Create a button, sampling the current level as the baseline
    pub fn new(mut pin: P) -> Self {
        let prev_level = pin.is_high().unwrap_or(true);
        Self {
            pin,
            last_edge_ms: 0,
            prev_level,
        }
    }

    /// Sample the pin; true exactly once per debounced press
    ///
    /// Should be called every few milliseconds with a monotonic
    /// timestamp.
    pub fn poll(&mut self, now_ms: u32) -> bool {
        let Ok(level) = self.pin.is_high() else {
            return false;
        };

        if level == self.prev_level {
            return false;
        }

        // Transitions inside the window are bounce: ignored outright
        if now_ms.wrapping_sub(self.last_edge_ms) < DEBOUNCE_MS {
            return false;
        }

        self.last_edge_ms = now_ms;
        let pressed = self.prev_level && !level;
        self.prev_level = level;
        pressed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::convert::Infallible;

    /// Pin returning levels from a script, one per poll, repeating the
    /// last level. The construction read consumes the first entry.
    struct ScriptPin {
        levels: &'static [bool],
        index: usize,
    }

    impl ScriptPin {
        fn new(levels: &'static [bool]) -> Self {
            Self { levels, index: 0 }
        }
    }

    impl embedded_hal::digital::ErrorType for ScriptPin {
        type Error = Infallible;
    }

    impl InputPin for ScriptPin {
        fn is_high(&mut self) -> Result<bool, Infallible> {
            let level = *self
                .levels
                .get(self.index)
                .or(self.levels.last())
                .unwrap_or(&true);
            self.index += 1;
            Ok(level)
        }

        fn is_low(&mut self) -> Result<bool, Infallible> {
            self.is_high().map(|h| !h)
        }
    }

    #[test]
    fn test_single_press_single_edge() {
        // Idle high, press, hold
        static LEVELS: [bool; 4] = [true, false, false, false];
        let mut button = DebouncedButton::new(ScriptPin::new(&LEVELS));

        assert!(button.poll(100));
        assert!(!button.poll(105));
        assert!(!button.poll(110));
    }

    #[test]
    fn test_release_is_not_an_edge() {
        static LEVELS: [bool; 3] = [true, false, true];
        let mut button = DebouncedButton::new(ScriptPin::new(&LEVELS));

        assert!(button.poll(100));
        // Rising transition is accepted for state tracking but never
        // reported as a press
        assert!(!button.poll(150));
    }

    #[test]
    fn test_bounce_within_window_ignored() {
        // Press, bounce up, bounce down - all within 20 ms
        static LEVELS: [bool; 5] = [true, false, true, false, false];
        let mut button = DebouncedButton::new(ScriptPin::new(&LEVELS));

        let mut edges = 0;
        for (i, t) in [100u32, 105, 110, 115].iter().enumerate() {
            if button.poll(*t) {
                edges += 1;
                assert_eq!(i, 0, "only the first transition may count");
            }
        }
        assert_eq!(edges, 1);
    }

    #[test]
    fn test_second_press_after_window() {
        // Press, release, press again with room between transitions
        static LEVELS: [bool; 4] = [true, false, true, false];
        let mut button = DebouncedButton::new(ScriptPin::new(&LEVELS));

        assert!(button.poll(100));
        assert!(!button.poll(200)); // release
        assert!(button.poll(300)); // second press
    }

    #[test]
    fn test_independent_state_per_button() {
        static PRESSED: [bool; 2] = [true, false];
        static HELD_HIGH: [bool; 2] = [true, true];

        let mut a = DebouncedButton::new(ScriptPin::new(&PRESSED));
        let mut b = DebouncedButton::new(ScriptPin::new(&HELD_HIGH));

        // A press on one button must not consume the other's window
        assert!(a.poll(100));
        assert!(!b.poll(101));
        assert!(!b.poll(102));
    }
}
