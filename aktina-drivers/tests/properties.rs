//! Property tests for the input and regulator drivers.
//!
//! Host-only: mocks stand in for the pins and the pressure frontend.

use core::convert::Infallible;
use std::cell::Cell;
use std::rc::Rc;

use aktina_core::traits::{PressureSensor, PumpDrive, SensorError, VacuumControl};
use aktina_drivers::input::{DebouncedButton, DEBOUNCE_MS};
use aktina_drivers::regulator::{RegulatorConfig, VacuumRegulator};
use embedded_hal::digital::InputPin;
use proptest::prelude::*;

/// Pin whose level is shared with the test body
#[derive(Clone)]
struct SharedPin(Rc<Cell<bool>>);

impl SharedPin {
    fn new(level: bool) -> Self {
        Self(Rc::new(Cell::new(level)))
    }

    fn set(&self, level: bool) {
        self.0.set(level);
    }
}

impl embedded_hal::digital::ErrorType for SharedPin {
    type Error = Infallible;
}

impl InputPin for SharedPin {
    fn is_high(&mut self) -> Result<bool, Infallible> {
        Ok(self.0.get())
    }

    fn is_low(&mut self) -> Result<bool, Infallible> {
        Ok(!self.0.get())
    }
}

struct SequenceSensor {
    pressures: Vec<i16>,
    index: usize,
}

impl PressureSensor for SequenceSensor {
    fn read_hpa(&mut self) -> Result<i16, SensorError> {
        let p = self
            .pressures
            .get(self.index)
            .or(self.pressures.last())
            .copied()
            .unwrap_or(0);
        self.index += 1;
        Ok(p)
    }
}

struct RecordingPump {
    duty: u8,
}

impl PumpDrive for RecordingPump {
    fn set_drive(&mut self, demand: i16) {
        self.duty = demand.clamp(0, 255) as u8;
    }

    fn current_duty(&self) -> u8 {
        self.duty
    }
}

proptest! {
    /// Two raw level transitions of the same button less than the
    /// debounce interval apart produce at most one detected edge.
    #[test]
    fn debounce_rejects_close_transitions(
        gap1 in 1u32..DEBOUNCE_MS,
        gap2 in 1u32..DEBOUNCE_MS,
    ) {
        prop_assume!(gap1 + gap2 < DEBOUNCE_MS);

        let pin = SharedPin::new(true);
        let mut button = DebouncedButton::new(pin.clone());

        // Long-settled idle, then press with two bounce transitions
        // packed inside one debounce window
        prop_assert!(!button.poll(1000));

        pin.set(false);
        let mut edges = 0;
        if button.poll(2000) {
            edges += 1;
        }
        pin.set(true); // bounce up
        if button.poll(2000 + gap1) {
            edges += 1;
        }
        pin.set(false); // bounce down
        if button.poll(2000 + gap1 + gap2) {
            edges += 1;
        }

        prop_assert!(edges <= 1, "bounce produced {} edges", edges);
        prop_assert_eq!(edges, 1);
    }

    /// The regulator's demand never exceeds the actuator ceiling, for
    /// any pressure trajectory and setpoint.
    #[test]
    fn regulator_demand_never_exceeds_ceiling(
        setpoint in any::<i16>(),
        pressures in proptest::collection::vec(any::<i16>(), 1..100),
    ) {
        let sensor = SequenceSensor {
            pressures,
            index: 0,
        };
        let pump = RecordingPump { duty: 0 };
        let mut reg = VacuumRegulator::new(sensor, pump, RegulatorConfig::default());

        for _ in 0..100 {
            reg.regulate(setpoint).unwrap();
            prop_assert!(reg.last_demand() <= 255);
            prop_assert!(reg.pump().current_duty() <= 255);
        }
    }
}
