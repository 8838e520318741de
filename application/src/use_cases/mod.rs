//! Use cases
//!
//! Application-level operations that orchestrate domain logic.

pub mod completion_client;
pub mod dialogue_session;
pub mod serial_queue;
