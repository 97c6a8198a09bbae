//! Embassy tasks

pub mod controller;
pub mod input;
pub mod store;
pub mod tick;
