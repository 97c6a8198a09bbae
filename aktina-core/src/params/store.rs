//! Persistent parameter store
//!
//! The setpoints live at fixed byte offsets in a small byte-addressable
//! non-volatile memory, little-endian, with no version tag and no
//! checksum. An uninitialized or corrupted store therefore loads as
//! whatever bytes are present - the setpoints that come back are
//! accepted without any validation.

use super::ProcessParameters;

/// Byte offset of `vacuum_setpoint` (LSB at 11, MSB at 12)
pub const VACUUM_SETPOINT_OFFSET: u16 = 11;

/// Byte offset of `time_setpoint` (LSB at 13, MSB at 14)
pub const TIME_SETPOINT_OFFSET: u16 = 13;

/// Errors from non-volatile storage operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StoreError {
    /// Bus transaction failed
    Bus,
    /// Offset outside the device
    OutOfRange,
}

/// Byte-addressable non-volatile storage
///
/// EEPROM-shaped: reads and writes at arbitrary byte offsets, no erase
/// cycle visible to the caller.
pub trait NvStorage {
    /// Read `buf.len()` bytes starting at `offset`
    fn read(&mut self, offset: u16, buf: &mut [u8]) -> Result<(), StoreError>;

    /// Write `data` starting at `offset`
    fn write(&mut self, offset: u16, data: &[u8]) -> Result<(), StoreError>;
}

/// Persistent store for the two process setpoints
///
/// `dual_sided` is never read or written here; it always loads as
/// `false`.
pub struct ParamStore<M> {
    memory: M,
}

impl<M: NvStorage> ParamStore<M> {
    /// Create a store over the given memory
    pub fn new(memory: M) -> Self {
        Self { memory }
    }

    /// Load the persisted setpoints
    pub fn load(&mut self) -> Result<ProcessParameters, StoreError> {
        let mut word = [0u8; 2];

        self.memory.read(VACUUM_SETPOINT_OFFSET, &mut word)?;
        let vacuum_setpoint = i16::from_le_bytes(word);

        self.memory.read(TIME_SETPOINT_OFFSET, &mut word)?;
        let time_setpoint = i16::from_le_bytes(word);

        Ok(ProcessParameters {
            vacuum_setpoint,
            time_setpoint,
            dual_sided: false,
        })
    }

    /// Write the setpoints back in the same layout
    pub fn commit(&mut self, params: &ProcessParameters) -> Result<(), StoreError> {
        self.memory
            .write(VACUUM_SETPOINT_OFFSET, &params.vacuum_setpoint.to_le_bytes())?;
        self.memory
            .write(TIME_SETPOINT_OFFSET, &params.time_setpoint.to_le_bytes())
    }

    /// Access the underlying memory
    pub fn memory(&mut self) -> &mut M {
        &mut self.memory
    }
}
