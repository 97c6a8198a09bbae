//! Input polling task
//!
//! Polls the quadrature encoder and both push buttons and feeds the
//! decoded events into the input channel. Fast cadence (2 ms) so no
//! encoder transition is missed at normal knob speeds.

use defmt::*;
use embassy_rp::gpio::Input;
use embassy_time::{Duration, Instant, Ticker};

use aktina_core::input::InputEvent;
use aktina_drivers::input::{DebouncedButton, QuadEncoder, Step};

use crate::channels::INPUT_CHANNEL;

/// Poll interval for the encoder and buttons
const POLL_INTERVAL_MS: u64 = 2;

/// Input task - decodes the front panel into input events
#[embassy_executor::task]
pub async fn input_task(
    mut encoder: QuadEncoder<Input<'static>, Input<'static>>,
    mut confirm: DebouncedButton<Input<'static>>,
    mut start: DebouncedButton<Input<'static>>,
) {
    info!("Input task started");

    let mut ticker = Ticker::every(Duration::from_millis(POLL_INTERVAL_MS));
    let boot = Instant::now();

    loop {
        ticker.next().await;
        let now_ms = boot.elapsed().as_millis() as u32;

        if let Some(step) = encoder.poll() {
            let event = match step {
                Step::Cw => InputEvent::EncoderCw,
                Step::Ccw => InputEvent::EncoderCcw,
            };
            // Dropping an event on a full channel beats stalling the
            // poll cadence
            let _ = INPUT_CHANNEL.try_send(event);
        }

        if confirm.poll(now_ms) {
            let _ = INPUT_CHANNEL.try_send(InputEvent::ConfirmPressed);
        }

        if start.poll(now_ms) {
            let _ = INPUT_CHANNEL.try_send(InputEvent::StartPressed);
        }
    }
}
