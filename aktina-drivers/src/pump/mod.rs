//! Pump actuator outputs

pub mod pwm;

pub use pwm::PwmPump;
