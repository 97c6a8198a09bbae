//! Parameter store task
//!
//! Owns the EEPROM and services commit requests from the controller.
//! Committing from a dedicated task keeps the multi-millisecond write
//! cycles off the control loop.

use defmt::*;

use aktina_core::params::ParamStore;

use crate::channels::PARAM_SAVE;
use crate::eeprom::At24Eeprom;

/// Store task - persists setpoints on request
#[embassy_executor::task]
pub async fn store_task(mut store: ParamStore<At24Eeprom<'static>>) {
    info!("Store task started");

    loop {
        let params = PARAM_SAVE.wait().await;

        match store.commit(&params) {
            Ok(()) => info!(
                "setpoints committed: vacuum={} hPa, time={} s",
                params.vacuum_setpoint, params.time_setpoint
            ),
            Err(e) => warn!("setpoint commit failed: {:?}", e),
        }
    }
}
