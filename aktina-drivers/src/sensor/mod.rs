//! Pressure sensor frontends

pub mod bridge;

pub use bridge::{BridgeAdc, BridgeSensor, COUNTS_PER_HPA, REGULATE_SAMPLES, TARE_SAMPLES};
