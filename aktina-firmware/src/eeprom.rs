//! I2C EEPROM parameter storage
//!
//! A 24C32-class EEPROM on the I2C bus backs the parameter store.
//! Byte-addressable with a 16-bit address word; each written byte
//! needs a ~5 ms internal write cycle before the device acks again.

use embassy_rp::i2c::{Blocking, I2c};
use embassy_time::{block_for, Duration};

use aktina_core::params::{NvStorage, StoreError};

/// Seven-bit device address (A0-A2 strapped low)
const DEVICE_ADDR: u8 = 0x50;

/// Internal write-cycle time
const WRITE_CYCLE_MS: u64 = 5;

/// 24C32 EEPROM over blocking I2C
pub struct At24Eeprom<'d> {
    i2c: I2c<'d, Blocking>,
}

impl<'d> At24Eeprom<'d> {
    /// Create a storage backend over the given bus
    pub fn new(i2c: I2c<'d, Blocking>) -> Self {
        Self { i2c }
    }
}

impl NvStorage for At24Eeprom<'_> {
    fn read(&mut self, offset: u16, buf: &mut [u8]) -> Result<(), StoreError> {
        let addr = offset.to_be_bytes();
        self.i2c
            .blocking_write_read(DEVICE_ADDR, &addr, buf)
            .map_err(|_| StoreError::Bus)
    }

    fn write(&mut self, offset: u16, data: &[u8]) -> Result<(), StoreError> {
        // Byte writes: the setpoint records are two bytes each, so
        // page-write logic would buy nothing here
        for (i, byte) in data.iter().enumerate() {
            let addr = (offset + i as u16).to_be_bytes();
            let frame = [addr[0], addr[1], *byte];
            self.i2c
                .blocking_write(DEVICE_ADDR, &frame)
                .map_err(|_| StoreError::Bus)?;
            block_for(Duration::from_millis(WRITE_CYCLE_MS));
        }
        Ok(())
    }
}
