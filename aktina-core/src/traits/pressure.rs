//! Pressure sensing traits

/// Errors that can occur while sampling the pressure transducer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SensorError {
    /// Frontend did not become ready within its poll budget
    NotReady,
    /// Raw conversion pegged at a rail (broken bridge or wiring)
    Saturated,
}

/// Trait for the calibrated vacuum probe
///
/// Implementations own the averaging frontend and the zero offset
/// captured at startup; the value returned here is already converted
/// to physical pressure units.
pub trait PressureSensor {
    /// Read the current pressure in hPa relative to the startup zero
    ///
    /// Takes `&mut self` because frontend reads require mutable access.
    fn read_hpa(&mut self) -> Result<i16, SensorError>;

    /// Check if the probe currently yields a valid reading
    fn is_valid(&mut self) -> bool {
        self.read_hpa().is_ok()
    }
}
