//! Aktina - Dual-Sided UV Exposure Unit Firmware
//!
//! Main firmware binary for the RP2040 control board. Sequences
//! photoresist exposures: a vacuum pump squeezes the board against the
//! UV-transparent windows while one or two banks of UV emitters run
//! for an operator-set duration. Setpoints persist in EEPROM.
//!
//! Named after the Greek "aktina" meaning "ray".

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::gpio::{Input, Level, Output, Pull};
use embassy_rp::i2c::{self, I2c};
use embassy_rp::pwm::{self, Pwm};
use embassy_time::Timer;
use {defmt_rtt as _, panic_probe as _};

use aktina_core::controller::Controller;
use aktina_core::display::renderer::BANNER_STEPS;
use aktina_core::display::Renderer;
use aktina_core::params::{ParamStore, ProcessParameters};
use aktina_core::traits::DisplayExt;
use aktina_drivers::emitter::GpioEmitter;
use aktina_drivers::input::{DebouncedButton, QuadEncoder};
use aktina_drivers::pump::PwmPump;
use aktina_drivers::regulator::{RegulatorConfig, VacuumRegulator};
use aktina_drivers::sensor::BridgeSensor;

mod channels;
mod eeprom;
mod hd44780;
mod hx711;
mod pump;
mod tasks;

use crate::eeprom::At24Eeprom;
use crate::hd44780::Hd44780;
use crate::hx711::Hx711;
use crate::pump::{PumpPwm, PWM_TOP};

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Aktina firmware starting...");

    let p = embassy_rp::init(Default::default());

    // Character panel (write-only 4-bit bus)
    let mut panel = Hd44780::new(
        Output::new(p.PIN_10, Level::Low), // RS
        Output::new(p.PIN_11, Level::Low), // EN
        Output::new(p.PIN_3, Level::Low),  // D4
        Output::new(p.PIN_4, Level::Low),  // D5
        Output::new(p.PIN_5, Level::Low),  // D6
        Output::new(p.PIN_6, Level::Low),  // D7
    );

    // Converging startup banner
    let mut renderer = Renderer::new();
    for frame in 1..=BANNER_STEPS {
        renderer.render_banner_frame(frame);
        let _ = panel.draw_row(0, renderer.screen().get_line(0));
        Timer::after_millis(180).await;
    }

    // EEPROM-backed parameter store; whatever bytes are present become
    // the setpoints - there is no validation to fail
    let i2c = I2c::new_blocking(p.I2C0, p.PIN_21, p.PIN_20, i2c::Config::default());
    let mut store = ParamStore::new(At24Eeprom::new(i2c));
    let params = match store.load() {
        Ok(params) => {
            info!(
                "setpoints loaded: vacuum={} hPa, time={} s",
                params.vacuum_setpoint, params.time_setpoint
            );
            params
        }
        Err(e) => {
            warn!("setpoint load failed: {:?}", e);
            ProcessParameters::default()
        }
    };

    // Pressure frontend: capture the zero offset against the vented
    // chamber before anything can pump it down
    let hx711 = Hx711::new(
        Input::new(p.PIN_16, Pull::None),
        Output::new(p.PIN_17, Level::Low),
    );
    let mut sensor = BridgeSensor::new(hx711);
    match sensor.tare() {
        Ok(()) => info!("probe tared, zero offset {}", sensor.zero_offset()),
        Err(e) => warn!("probe tare failed: {:?}", e),
    }

    // Pump PWM: top=255 for the 8-bit drive range, divider for a
    // ~5.5 kHz carrier the pump motor is happy with
    let mut pwm_config = pwm::Config::default();
    pwm_config.top = PWM_TOP;
    pwm_config.divider = 88u8.into();
    let pump_slice = Pwm::new_output_b(p.PWM_SLICE4, p.PIN_9, pwm_config.clone());
    let pump = PwmPump::new(PumpPwm::new(pump_slice, pwm_config));

    let regulator = VacuumRegulator::new(sensor, pump, RegulatorConfig::default());

    // Emitter banks through their MOSFET stages
    let low_bank = GpioEmitter::new_active_high(Output::new(p.PIN_12, Level::Low));
    let high_bank = GpioEmitter::new_active_high(Output::new(p.PIN_13, Level::Low));

    // Front panel: encoder with integrated confirm button, separate
    // start/abort button; each button gets its own debounce state
    let encoder = QuadEncoder::new(
        Input::new(p.PIN_0, Pull::Up),
        Input::new(p.PIN_1, Pull::Up),
    );
    let confirm = DebouncedButton::new(Input::new(p.PIN_2, Pull::Up));
    let start = DebouncedButton::new(Input::new(p.PIN_7, Pull::Up));

    let controller = Controller::new(params);

    unwrap!(spawner.spawn(tasks::tick::tick_task()));
    unwrap!(spawner.spawn(tasks::input::input_task(encoder, confirm, start)));
    unwrap!(spawner.spawn(tasks::store::store_task(store)));
    unwrap!(spawner.spawn(tasks::controller::controller_task(
        controller, regulator, low_bank, high_bank, panel,
    )));

    info!("entering stand-by");
}
