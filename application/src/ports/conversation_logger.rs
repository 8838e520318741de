//! Port for structured transcript logging.
//!
//! Defines the [`ConversationLogger`] trait for recording dialogue events
//! (appended turns, completion requests and failures, act transitions) to a
//! structured log.
//!
//! This is separate from `tracing`-based operation logs: tracing handles
//! human-readable diagnostic messages, while this port captures the full
//! dialogue in a machine-readable format (JSONL).

use serde_json::Value;

/// A structured dialogue event for logging.
///
/// Each event has a type string and a JSON payload containing
/// event-specific fields. Adapters add the timestamp.
#[derive(Debug, Clone)]
pub struct ConversationEvent {
    /// Event type identifier (e.g., "turn_appended", "act_transition").
    pub event_type: &'static str,
    /// JSON payload with event-specific data.
    pub payload: Value,
}

impl ConversationEvent {
    pub fn new(event_type: &'static str, payload: Value) -> Self {
        Self {
            event_type,
            payload,
        }
    }
}

/// Port for logging dialogue events to a structured log.
///
/// The `log` method is synchronous and infallible so it never disrupts the
/// dialogue; adapters swallow write failures.
pub trait ConversationLogger: Send + Sync {
    /// Record a dialogue event.
    fn log(&self, event: ConversationEvent);
}

/// No-op implementation for tests and when logging is disabled.
pub struct NoConversationLogger;

impl ConversationLogger for NoConversationLogger {
    fn log(&self, _event: ConversationEvent) {}
}
