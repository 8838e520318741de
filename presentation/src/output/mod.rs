//! Console output for dialogue turns

pub mod console;
pub mod markdown;
