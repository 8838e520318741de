//! Live rendering of a running dialogue

pub mod reporter;
