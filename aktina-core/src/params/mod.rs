//! Process parameters
//!
//! The two setpoints are the unit persisted to storage. `dual_sided`
//! is session-only: it is deliberately never written to or read from
//! the store, so it always starts a power cycle as single-sided.

pub mod store;

pub use store::{NvStorage, ParamStore, StoreError};

/// Operator-configured process parameters
///
/// Owned by the controller and mutated only during configuration
/// states. No range validation is performed anywhere: whatever the
/// operator dials in is accepted and persisted as-is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ProcessParameters {
    /// Vacuum target in hPa, displayed as positive
    pub vacuum_setpoint: i16,
    /// Exposure duration in seconds
    pub time_setpoint: i16,
    /// Drive both emitter banks during exposure
    pub dual_sided: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_single_sided() {
        let params = ProcessParameters::default();
        assert_eq!(params.vacuum_setpoint, 0);
        assert_eq!(params.time_setpoint, 0);
        assert!(!params.dual_sided);
    }
}
