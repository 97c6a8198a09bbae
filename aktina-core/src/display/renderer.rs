//! Screen rendering
//!
//! Builds screens for the different machine states. The panel is a
//! 20x4 character display; layout mirrors the front-panel silkscreen:
//! time on row 1, vacuum on row 2, side selection on row 3.

use heapless::String;

use crate::params::ProcessParameters;
use crate::safety::{FaultKind, SafetyStatus};
use crate::sequence::ExposurePhase;
use crate::state::State;

use super::screen::{Screen, LINE_LEN};

/// Width of the converging startup banner
pub const BANNER_STEPS: u8 = 10;

const BANNER_LEFT: &str = "*** UV EXP";
const BANNER_RIGHT: &str = "OSURE  ***";

/// Screen renderer for the machine states
pub struct Renderer {
    screen: Screen,
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

impl Renderer {
    /// Create a new renderer
    pub fn new() -> Self {
        Self {
            screen: Screen::new(),
        }
    }

    /// Get the current screen buffer
    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    /// Mutable access for dirty tracking
    pub fn screen_mut(&mut self) -> &mut Screen {
        &mut self.screen
    }

    /// Render one frame of the startup banner
    ///
    /// The two halves converge from the edges over `BANNER_STEPS`
    /// frames until they meet as "*** UV EXPOSURE  ***".
    pub fn render_banner_frame(&mut self, frame: u8) {
        let step = frame.clamp(1, BANNER_STEPS) as usize;

        let mut line: String<LINE_LEN> = String::new();
        let _ = line.push_str(&BANNER_LEFT[BANNER_LEFT.len() - step..]);
        for _ in 0..(BANNER_STEPS as usize - step) {
            let _ = line.push_str("  ");
        }
        let _ = line.push_str(&BANNER_RIGHT[..step]);

        self.screen.set_line(0, &line);
    }

    /// Render the standby / configuration screen
    ///
    /// The same layout serves Idle and all three configuration states;
    /// a `>` cursor marks the row the encoder currently edits.
    pub fn render_standby(&mut self, state: State, params: &ProcessParameters) {
        self.render_banner_frame(BANNER_STEPS);

        let time_cursor = cursor_for(state == State::ConfigureTime);
        let vacuum_cursor = cursor_for(state == State::ConfigureVacuum);
        let side_cursor = cursor_for(state == State::ConfigureSide);

        let mut line: String<LINE_LEN> = String::new();
        let _ = write_to_string(
            &mut line,
            format_args!("{} Time {:<5}sec", time_cursor, params.time_setpoint),
        );
        self.screen.set_line(1, &line);

        let mut line: String<LINE_LEN> = String::new();
        let _ = write_to_string(
            &mut line,
            format_args!("{}Vacuum {:<4}hPa", vacuum_cursor, params.vacuum_setpoint),
        );
        self.screen.set_line(2, &line);

        let sides = if params.dual_sided { 2 } else { 1 };
        let mut line: String<LINE_LEN> = String::new();
        let _ = write_to_string(
            &mut line,
            format_args!("{} Sides {}", side_cursor, sides),
        );
        self.screen.set_line(3, &line);
    }

    /// Render the exposure screen
    ///
    /// Shows remaining time, live pressure, and a phase/fault hint.
    pub fn render_exposing(
        &mut self,
        phase: ExposurePhase,
        remaining_s: i16,
        pressure_hpa: i16,
        safety: SafetyStatus,
    ) {
        self.screen.set_line(0, "==== EXPOSURE ====");

        let mut line: String<LINE_LEN> = String::new();
        let _ = write_to_string(&mut line, format_args!("  Left {:<5}sec", remaining_s));
        self.screen.set_line(1, &line);

        let mut line: String<LINE_LEN> = String::new();
        let _ = write_to_string(&mut line, format_args!("Vacuum {:<4}hPa", pressure_hpa));
        self.screen.set_line(2, &line);

        let hint = match safety {
            SafetyStatus::Fault(FaultKind::VacuumStall) => "VACUUM STALL?",
            SafetyStatus::Fault(FaultKind::SensorFault) => "PROBE FAULT",
            SafetyStatus::Ok => match phase {
                ExposurePhase::PreCharge => "Pumping down...",
                ExposurePhase::Expose => "UV on - keep clear",
                _ => "",
            },
        };
        self.screen.set_line(3, hint);
    }
}

fn cursor_for(active: bool) -> char {
    if active {
        '>'
    } else {
        ' '
    }
}

/// Helper to write formatted output to a heapless String
fn write_to_string(
    s: &mut String<LINE_LEN>,
    args: core::fmt::Arguments<'_>,
) -> core::fmt::Result {
    use core::fmt::Write;
    s.write_fmt(args)
}
