//! PWM pump output
//!
//! Drives the DC air pump through any `embedded-hal` PWM channel. The
//! regulator's demand is signed and only ceiling-clamped; the floor to
//! zero happens here, at the actuator boundary.

use aktina_core::traits::PumpDrive;
use embedded_hal::pwm::SetDutyCycle;

/// Full-scale drive value of the pump interface
pub const DRIVE_MAX: u8 = 255;

/// Pump output over a PWM channel
pub struct PwmPump<P> {
    pwm: P,
    duty: u8,
}

impl<P: SetDutyCycle> PwmPump<P> {
    /// Create a pump output, starting fully off
    pub fn new(mut pwm: P) -> Self {
        let _ = pwm.set_duty_cycle_fully_off();
        Self { pwm, duty: 0 }
    }
}

impl<P: SetDutyCycle> PumpDrive for PwmPump<P> {
    fn set_drive(&mut self, demand: i16) {
        // Negative demand means "less than off" - floor it here
        let duty = demand.clamp(0, DRIVE_MAX as i16) as u8;

        if duty != self.duty {
            let _ = self.pwm.set_duty_cycle_fraction(duty as u16, DRIVE_MAX as u16);
            self.duty = duty;
        }
    }

    fn current_duty(&self) -> u8 {
        self.duty
    }
}
