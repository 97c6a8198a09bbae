//! GPIO emitter bank output
//!
//! One bank of UV emitters switched by a GPIO pin, directly or through
//! a MOSFET stage.

use aktina_core::traits::EmitterOutput;
use embedded_hal::digital::OutputPin;

/// GPIO emitter bank
///
/// The pin can be configured as active-high (default) or active-low.
pub struct GpioEmitter<P> {
    pin: P,
    /// If true, bank ON = pin LOW
    inverted: bool,
    /// Current logical state (true = bank on)
    on: bool,
}

impl<P: OutputPin> GpioEmitter<P> {
    /// Create a new emitter bank output
    ///
    /// # Arguments
    /// - `pin`: The GPIO pin to control
    /// - `inverted`: If true, bank is ON when the pin is LOW
    pub fn new(pin: P, inverted: bool) -> Self {
        let mut emitter = Self {
            pin,
            inverted,
            on: false,
        };
        // UV stays dark until the sequencer says otherwise
        emitter.set_on(false);
        emitter
    }

    /// Create an emitter bank with active-high output
    pub fn new_active_high(pin: P) -> Self {
        Self::new(pin, false)
    }

    /// Create an emitter bank with active-low output
    pub fn new_active_low(pin: P) -> Self {
        Self::new(pin, true)
    }
}

impl<P: OutputPin> EmitterOutput for GpioEmitter<P> {
    fn set_on(&mut self, on: bool) {
        self.on = on;

        if on != self.inverted {
            let _ = self.pin.set_high();
        } else {
            let _ = self.pin.set_low();
        }
    }

    fn is_on(&self) -> bool {
        self.on
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::convert::Infallible;

    /// Mock GPIO pin for testing
    struct MockPin {
        high: bool,
    }

    impl MockPin {
        fn new() -> Self {
            Self { high: false }
        }
    }

    impl embedded_hal::digital::ErrorType for MockPin {
        type Error = Infallible;
    }

    impl OutputPin for MockPin {
        fn set_high(&mut self) -> Result<(), Infallible> {
            self.high = true;
            Ok(())
        }

        fn set_low(&mut self) -> Result<(), Infallible> {
            self.high = false;
            Ok(())
        }
    }

    #[test]
    fn test_active_high_bank() {
        let mut bank = GpioEmitter::new_active_high(MockPin::new());

        assert!(!bank.is_on());
        assert!(!bank.pin.high);

        bank.set_on(true);
        assert!(bank.is_on());
        assert!(bank.pin.high);

        bank.set_on(false);
        assert!(!bank.is_on());
        assert!(!bank.pin.high);
    }

    #[test]
    fn test_active_low_bank() {
        let mut bank = GpioEmitter::new_active_low(MockPin::new());

        // Off means the pin rests high for active-low drivers
        assert!(!bank.is_on());
        assert!(bank.pin.high);

        bank.set_on(true);
        assert!(bank.is_on());
        assert!(!bank.pin.high);
    }

    #[test]
    fn test_through_trait() {
        fn light<E: EmitterOutput>(bank: &mut E) {
            assert!(!bank.is_on());
            bank.set_on(true);
            assert!(bank.is_on());
        }

        let mut bank = GpioEmitter::new_active_high(MockPin::new());
        light(&mut bank);
    }
}
