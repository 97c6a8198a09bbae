//! Pump PWM channel adapter
//!
//! Wraps the RP2040 PWM slice behind the `embedded-hal` duty-cycle
//! trait so the generic pump driver can run it. The slice is set up
//! with top=255 so duty maps 1:1 onto the pump's 8-bit drive range.

use core::convert::Infallible;

use embassy_rp::pwm::{Config, Pwm};
use embedded_hal::pwm::SetDutyCycle;

/// Full-scale compare value (top of the PWM counter)
pub const PWM_TOP: u16 = 255;

/// One PWM output channel driving the pump MOSFET
pub struct PumpPwm<'d> {
    pwm: Pwm<'d>,
    config: Config,
}

impl<'d> PumpPwm<'d> {
    /// Wrap a configured slice; `config` must match the one the slice
    /// was created with (top = [`PWM_TOP`])
    pub fn new(pwm: Pwm<'d>, config: Config) -> Self {
        Self { pwm, config }
    }
}

impl embedded_hal::pwm::ErrorType for PumpPwm<'_> {
    type Error = Infallible;
}

impl SetDutyCycle for PumpPwm<'_> {
    fn max_duty_cycle(&self) -> u16 {
        PWM_TOP
    }

    fn set_duty_cycle(&mut self, duty: u16) -> Result<(), Infallible> {
        self.config.compare_b = duty.min(PWM_TOP);
        self.pwm.set_config(&self.config);
        Ok(())
    }
}
