//! Display driver trait for the 20x4 character panel

/// Errors that can occur with display communication
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayError {
    /// Write did not complete in time
    Timeout,
    /// Row or column outside the panel
    OutOfBounds,
}

/// Trait for addressable-line text output
///
/// The panel is a dumb character device - all layout logic lives in
/// the renderer; implementations only place text.
pub trait TextDisplay {
    /// Clear the entire panel
    fn clear(&mut self) -> Result<(), DisplayError>;

    /// Draw text at a position
    ///
    /// - `row`: Row number (0-3)
    /// - `col`: Column number (0-19)
    /// - `text`: ASCII text to display
    fn text(&mut self, row: u8, col: u8, text: &str) -> Result<(), DisplayError>;
}

/// Helper trait for drawing common UI elements
pub trait DisplayExt: TextDisplay {
    /// Draw a full row, replacing whatever was there
    fn draw_row(&mut self, row: u8, text: &str) -> Result<(), DisplayError> {
        // Pad with spaces so stale characters never survive a redraw
        let mut buf = [b' '; 20];
        let bytes = text.as_bytes();
        let len = bytes.len().min(20);
        buf[..len].copy_from_slice(&bytes[..len]);

        let padded = core::str::from_utf8(&buf).unwrap_or(text);
        self.text(row, 0, padded)
    }
}

// Blanket implementation for all TextDisplay types
impl<T: TextDisplay> DisplayExt for T {}
