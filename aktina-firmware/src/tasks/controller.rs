//! Main controller task
//!
//! Coordinates the state machine, the exposure sequencer, and the
//! vacuum regulator. Receives input events and tick signals, applies
//! emitter commands, and redraws the panel.
//!
//! Everything with shared mutable control state lives in this one
//! task, so ordering between input handling and regulation is explicit
//! and no locking is needed.

use defmt::*;
use embassy_futures::select::{select, Either};
use embassy_rp::gpio::Output;

use aktina_core::controller::{Action, Controller};
use aktina_core::display::Renderer;
use aktina_core::state::State;
use aktina_core::traits::{DisplayExt, EmitterOutput};
use aktina_drivers::emitter::GpioEmitter;
use aktina_drivers::pump::PwmPump;
use aktina_drivers::regulator::VacuumRegulator;
use aktina_drivers::sensor::BridgeSensor;

use crate::channels::{INPUT_CHANNEL, PARAM_SAVE};
use crate::hd44780::Hd44780;
use crate::hx711::Hx711;
use crate::pump::PumpPwm;
use crate::tasks::tick::TICK_SIGNAL;

/// The concrete regulator this board wires together
pub type BoardRegulator =
    VacuumRegulator<BridgeSensor<Hx711<'static>>, PwmPump<PumpPwm<'static>>>;

/// Controller task - main coordination loop
#[embassy_executor::task]
pub async fn controller_task(
    mut controller: Controller,
    mut regulator: BoardRegulator,
    mut low_bank: GpioEmitter<Output<'static>>,
    mut high_bank: GpioEmitter<Output<'static>>,
    mut panel: Hd44780<'static>,
) {
    info!("Controller task started");

    let mut renderer = Renderer::new();
    redraw(&controller, &mut renderer, &mut panel);

    loop {
        match select(INPUT_CHANNEL.receive(), TICK_SIGNAL.wait()).await {
            Either::First(input) => {
                debug!("Input: {:?}", input);

                if let Some(action) = controller.on_input(input) {
                    match action {
                        Action::CommitParams(params) => {
                            // The store task owns the EEPROM; hand the
                            // write over and keep servicing input
                            PARAM_SAVE.signal(params);
                        }
                    }
                }

                apply_emitters(&controller, &mut low_bank, &mut high_bank);
                redraw(&controller, &mut renderer, &mut panel);
            }

            Either::Second(now_ms) => {
                if let Some(event) = controller.tick(&mut regulator, now_ms) {
                    debug!("Sequence event: {:?}", event);
                }

                apply_emitters(&controller, &mut low_bank, &mut high_bank);

                // Countdown and pressure readout move once per tick;
                // the other states only change on input
                if controller.state() == State::Exposing {
                    redraw(&controller, &mut renderer, &mut panel);
                }
            }
        }
    }
}

/// Apply the sequencer's emitter command to the two banks
fn apply_emitters(
    controller: &Controller,
    low_bank: &mut GpioEmitter<Output<'static>>,
    high_bank: &mut GpioEmitter<Output<'static>>,
) {
    let cmd = controller.emitter_command();
    if cmd.low != low_bank.is_on() {
        info!("low bank {}", if cmd.low { "ON" } else { "OFF" });
        low_bank.set_on(cmd.low);
    }
    if cmd.high != high_bank.is_on() {
        info!("high bank {}", if cmd.high { "ON" } else { "OFF" });
        high_bank.set_on(cmd.high);
    }
}

/// Render the current state and push it to the panel
fn redraw(controller: &Controller, renderer: &mut Renderer, panel: &mut Hd44780<'static>) {
    match controller.state() {
        State::Exposing => renderer.render_exposing(
            controller.exposure_phase(),
            controller.remaining_s(),
            controller.pressure(),
            controller.safety_status(),
        ),
        state => renderer.render_standby(state, controller.params()),
    }

    for (row, line) in renderer.screen().lines().enumerate() {
        if panel.draw_row(row as u8, line).is_err() {
            warn!("panel write failed on row {}", row);
        }
    }
    renderer.screen_mut().mark_clean();
}
