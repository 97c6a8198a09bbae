//! Screen buffer and renderer for the 20x4 character panel

pub mod renderer;
pub mod screen;

pub use renderer::Renderer;
pub use screen::{Screen, LINE_LEN, SCREEN_COLS, SCREEN_ROWS};
