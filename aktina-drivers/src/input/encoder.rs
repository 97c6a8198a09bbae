//! Rotary encoder decoding
//!
//! Decodes quadrature signals into signed unit steps. Uses a state
//! machine for reliable decoding with noise rejection; a bounced
//! half-step falls back to idle instead of registering a phantom
//! detent.

use embedded_hal::digital::InputPin;

/// One decoded encoder detent
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Step {
    /// Clockwise rotation
    Cw,
    /// Counter-clockwise rotation
    Ccw,
}

impl Step {
    /// The step as a signed delta (+1 clockwise, -1 counter-clockwise)
    pub fn delta(self) -> i8 {
        match self {
            Step::Cw => 1,
            Step::Ccw => -1,
        }
    }
}

/// Decoder state machine states
#[derive(Clone, Copy, PartialEq)]
enum DecodeState {
    Idle,
    CwStep1,
    CwStep2,
    CcwStep1,
    CcwStep2,
}

/// Quadrature encoder decoder
///
/// CW: A leads B (A changes first when rotating clockwise)
/// CCW: B leads A (B changes first when rotating counter-clockwise)
///
/// State transitions for CW rotation:
/// Idle (1,1) -> CwStep1 (0,1) -> CwStep2 (0,0) -> emit Cw on release
///
/// State transitions for CCW rotation:
/// Idle (1,1) -> CcwStep1 (1,0) -> CcwStep2 (0,0) -> emit Ccw on release
pub struct QuadEncoder<A, B> {
    a: A,
    b: B,
    state: DecodeState,
    last_a: bool,
    last_b: bool,
}

impl<A: InputPin, B: InputPin> QuadEncoder<A, B> {
    /// Create a decoder, sampling the current channel levels
    pub fn new(mut a: A, mut b: B) -> Self {
        let last_a = a.is_high().unwrap_or(true);
        let last_b = b.is_high().unwrap_or(true);

        Self {
            a,
            b,
            state: DecodeState::Idle,
            last_a,
            last_b,
        }
    }

    /// Poll the channels; returns a step when a detent completes
    ///
    /// Should be called frequently (every 1-5 ms).
    pub fn poll(&mut self) -> Option<Step> {
        let Ok(a) = self.a.is_high() else {
            return None;
        };
        let Ok(b) = self.b.is_high() else {
            return None;
        };

        // No change
        if a == self.last_a && b == self.last_b {
            return None;
        }

        let step = self.decode(a, b);

        self.last_a = a;
        self.last_b = b;

        step
    }

    fn decode(&mut self, a: bool, b: bool) -> Option<Step> {
        match self.state {
            DecodeState::Idle => {
                if !a && b {
                    // A fell first -> CW direction
                    self.state = DecodeState::CwStep1;
                } else if a && !b {
                    // B fell first -> CCW direction
                    self.state = DecodeState::CcwStep1;
                }
                None
            }
            DecodeState::CwStep1 => {
                if !a && !b {
                    self.state = DecodeState::CwStep2;
                } else if a && b {
                    // Back to idle (noise/bounce)
                    self.state = DecodeState::Idle;
                }
                None
            }
            DecodeState::CwStep2 => {
                if a || b {
                    // Either went high -> complete CW step
                    self.state = DecodeState::Idle;
                    return Some(Step::Cw);
                }
                None
            }
            DecodeState::CcwStep1 => {
                if !a && !b {
                    self.state = DecodeState::CcwStep2;
                } else if a && b {
                    self.state = DecodeState::Idle;
                }
                None
            }
            DecodeState::CcwStep2 => {
                if a || b {
                    // Either went high -> complete CCW step
                    self.state = DecodeState::Idle;
                    return Some(Step::Ccw);
                }
                None
            }
        }
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

    fn encoder(
        a: &'static [bool],
        b: &'static [bool],
    ) -> QuadEncoder<ScriptPin, ScriptPin> {
        QuadEncoder::new(ScriptPin::new(a), ScriptPin::new(b))
    }

    #[test]
    fn test_clockwise_detent() {
        // (1,1) -> (0,1) -> (0,0) -> (1,0)
        static A: [bool; 4] = [true, false, false, true];
        static B: [bool; 4] = [true, true, false, false];
        let mut enc = encoder(&A, &B);

        assert_eq!(enc.poll(), None);
        assert_eq!(enc.poll(), None);
        assert_eq!(enc.poll(), Some(Step::Cw));
    }

    #[test]
    fn test_counter_clockwise_detent() {
        // (1,1) -> (1,0) -> (0,0) -> (0,1)
        static A: [bool; 4] = [true, true, false, false];
        static B: [bool; 4] = [true, false, false, true];
        let mut enc = encoder(&A, &B);

        assert_eq!(enc.poll(), None);
        assert_eq!(enc.poll(), None);
        assert_eq!(enc.poll(), Some(Step::Ccw));
    }

    #[test]
    fn test_bounce_back_to_idle_no_step() {
        // Half-step then bounce back: (1,1) -> (0,1) -> (1,1)
        static A: [bool; 3] = [true, false, true];
        static B: [bool; 3] = [true, true, true];
        let mut enc = encoder(&A, &B);

        assert_eq!(enc.poll(), None);
        assert_eq!(enc.poll(), None);
        // Settled back at idle; further polls see no change
        assert_eq!(enc.poll(), None);
    }

    #[test]
    fn test_no_change_no_step() {
        static A: [bool; 1] = [true];
        static B: [bool; 1] = [true];
        let mut enc = encoder(&A, &B);

        for _ in 0..10 {
            assert_eq!(enc.poll(), None);
        }
    }

    #[test]
    fn test_step_delta() {
        assert_eq!(Step::Cw.delta(), 1);
        assert_eq!(Step::Ccw.delta(), -1);
    }

    #[test]
    fn test_consecutive_detents() {
        // Two full CW detents back to back
        static A: [bool; 7] = [true, false, false, true, false, false, true];
        static B: [bool; 7] = [true, true, false, false, true, false, false];
        let mut enc = encoder(&A, &B);

        let steps: i32 = (0..6)
            .filter_map(|_| enc.poll())
            .map(|s| s.delta() as i32)
            .sum();
        assert_eq!(steps, 2);
    }
}
