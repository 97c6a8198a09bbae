//! Operator input decoding

pub mod button;
pub mod encoder;

pub use button::{DebouncedButton, DEBOUNCE_MS};
pub use encoder::{QuadEncoder, Step};
