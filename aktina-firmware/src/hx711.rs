//! HX711 bridge ADC frontend
//!
//! The vacuum probe hangs off an HX711 resistance-bridge converter
//! originally designed for scales. Bit-banged serial interface: 24
//! data bits clocked out MSB-first, plus gain-select pulses.

use embassy_rp::gpio::{Input, Output};
use embassy_time::{block_for, Duration};

use aktina_core::traits::SensorError;
use aktina_drivers::sensor::BridgeAdc;

/// Extra clock pulses after the data bits select the next conversion's
/// input and gain; one pulse = channel A, gain 128
const GAIN_PULSES: u8 = 1;

/// 100 us polls while waiting for data-ready
const READY_POLLS: u32 = 5_000;

/// HX711 over two GPIO lines
pub struct Hx711<'d> {
    dout: Input<'d>,
    sck: Output<'d>,
}

impl<'d> Hx711<'d> {
    /// Create a frontend; SCK must idle low or the chip powers down
    pub fn new(dout: Input<'d>, sck: Output<'d>) -> Self {
        let mut adc = Self { dout, sck };
        adc.sck.set_low();
        adc
    }

    /// Block until DOUT falls (conversion ready)
    fn wait_ready(&mut self) -> Result<(), SensorError> {
        for _ in 0..READY_POLLS {
            if self.dout.is_low() {
                return Ok(());
            }
            block_for(Duration::from_micros(100));
        }
        Err(SensorError::NotReady)
    }

    fn clock_bit(&mut self) -> u32 {
        self.sck.set_high();
        block_for(Duration::from_micros(1));
        let bit = self.dout.is_high() as u32;
        self.sck.set_low();
        block_for(Duration::from_micros(1));
        bit
    }
}

impl BridgeAdc for Hx711<'_> {
    fn read(&mut self) -> Result<i32, SensorError> {
        self.wait_ready()?;

        let mut raw: u32 = 0;
        for _ in 0..24 {
            raw = (raw << 1) | self.clock_bit();
        }

        for _ in 0..GAIN_PULSES {
            self.sck.set_high();
            block_for(Duration::from_micros(1));
            self.sck.set_low();
            block_for(Duration::from_micros(1));
        }

        // Sign-extend the 24-bit two's complement value
        let value = ((raw << 8) as i32) >> 8;

        // A railed conversion means the bridge is open or shorted
        if value == 0x7F_FFFF || value == -0x80_0000 {
            return Err(SensorError::Saturated);
        }

        Ok(value)
    }
}
