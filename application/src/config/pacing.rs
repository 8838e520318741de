//! Pacing between turns.
//!
//! Delays only space out turns for the reader. Ordering never depends on
//! them; the task queue alone guarantees it.

use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pacing {
    /// Before each "joined the chat" announcement
    pub announce: Duration,
    /// Before each discussant turn
    pub turn: Duration,
    /// Between discussion rounds and before the final synthesis
    pub round: Duration,
}

impl Default for Pacing {
    fn default() -> Self {
        Self {
            announce: Duration::from_millis(1000),
            turn: Duration::from_millis(3500),
            round: Duration::from_millis(2000),
        }
    }
}

impl Pacing {
    /// No delays at all
    pub fn none() -> Self {
        Self {
            announce: Duration::ZERO,
            turn: Duration::ZERO,
            round: Duration::ZERO,
        }
    }

    pub fn from_millis(announce: u64, turn: u64, round: u64) -> Self {
        Self {
            announce: Duration::from_millis(announce),
            turn: Duration::from_millis(turn),
            round: Duration::from_millis(round),
        }
    }

    pub fn is_none(&self) -> bool {
        self.announce.is_zero() && self.turn.is_zero() && self.round.is_zero()
    }
}

/// Sleep for `delay`, skipping the timer entirely for zero
pub(crate) async fn pause(delay: Duration) {
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_pacing() {
        let pacing = Pacing::default();
        assert_eq!(pacing.announce, Duration::from_millis(1000));
        assert_eq!(pacing.turn, Duration::from_millis(3500));
        assert_eq!(pacing.round, Duration::from_millis(2000));
        assert!(!pacing.is_none());
    }

    #[test]
    fn test_none_and_from_millis() {
        assert!(Pacing::none().is_none());
        assert_eq!(Pacing::from_millis(0, 0, 0), Pacing::none());
        assert_eq!(Pacing::from_millis(1, 2, 3).round, Duration::from_millis(3));
    }
}
