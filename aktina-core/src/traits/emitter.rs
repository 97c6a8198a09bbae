//! UV emitter bank output trait

/// Trait for one bank of UV emitters
///
/// Implementations control the bank via GPIO, directly or through a
/// MOSFET/SSR stage. The unit has two independent banks (low and high).
pub trait EmitterOutput {
    /// Turn the bank on or off
    fn set_on(&mut self, on: bool);

    /// Check if the bank is currently on
    fn is_on(&self) -> bool;
}
