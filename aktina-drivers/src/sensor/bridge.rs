//! Resistance-bridge pressure sensor frontend
//!
//! The vacuum probe is read through a 24-bit resistance-bridge ADC
//! originally designed for scales. Readings are averaged over a few
//! conversions, referenced against a zero offset captured once at
//! startup, and scaled to hPa with a fixed linear factor.

use aktina_core::traits::{PressureSensor, SensorError};

/// Raw bridge counts per hPa of vacuum
pub const COUNTS_PER_HPA: i32 = 20_290;

/// Conversions averaged per regulation read
pub const REGULATE_SAMPLES: u8 = 4;

/// Conversions averaged for the startup tare
pub const TARE_SAMPLES: u8 = 8;

/// One raw conversion from the bridge ADC
pub trait BridgeAdc {
    /// Read a single signed conversion
    fn read(&mut self) -> Result<i32, SensorError>;
}

/// Averaging, taring, scaling frontend over a bridge ADC
pub struct BridgeSensor<A> {
    adc: A,
    /// Baseline raw reading captured at startup
    zero_offset: i32,
    /// Conversions averaged per `read_hpa`
    samples: u8,
}

impl<A: BridgeAdc> BridgeSensor<A> {
    /// Create a frontend with the default per-read averaging
    ///
    /// The zero offset starts at 0; call [`tare`](Self::tare) once at
    /// startup with the chamber vented.
    pub fn new(adc: A) -> Self {
        Self {
            adc,
            zero_offset: 0,
            samples: REGULATE_SAMPLES,
        }
    }

    /// Average `samples` raw conversions
    pub fn read_average(&mut self, samples: u8) -> Result<i32, SensorError> {
        let n = samples.max(1) as i64;
        let mut sum: i64 = 0;
        for _ in 0..n {
            sum += self.adc.read()? as i64;
        }
        Ok((sum / n) as i32)
    }

    /// Capture the zero offset from the vented chamber
    pub fn tare(&mut self) -> Result<(), SensorError> {
        self.zero_offset = self.read_average(TARE_SAMPLES)?;
        Ok(())
    }

    /// The baseline captured by the last tare
    pub fn zero_offset(&self) -> i32 {
        self.zero_offset
    }
}

impl<A: BridgeAdc> PressureSensor for BridgeSensor<A> {
    fn read_hpa(&mut self) -> Result<i16, SensorError> {
        let raw = self.read_average(self.samples)?;
        // Truncating integer conversion, same as the panel displays
        Ok(((raw - self.zero_offset) / COUNTS_PER_HPA) as i16)
    }
}
