//! Hardware driver implementations
//!
//! This crate provides concrete implementations of the traits defined
//! in aktina-core for the exposure unit's hardware:
//!
//! - Vacuum regulator (fixed-point PID over sensor + pump)
//! - Resistance-bridge pressure sensor frontend
//! - PWM pump output
//! - GPIO emitter banks
//! - Debounced buttons and quadrature encoder
//!
//! Pin and PWM seams use `embedded-hal` 1.0 traits so both the RP2040
//! HAL types and host-side test mocks plug in.

#![no_std]
#![deny(unsafe_code)]

pub mod emitter;
pub mod input;
pub mod pump;
pub mod regulator;
pub mod sensor;
