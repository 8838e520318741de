//! Pacing configuration from TOML (`[pacing]` section)

use agora_application::Pacing;
use agora_domain::ConfigIssue;
use serde::{Deserialize, Serialize};

/// Delays in milliseconds between rendered turns
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilePacingConfig {
    pub announce_ms: u64,
    pub turn_ms: u64,
    pub round_ms: u64,
}

impl Default for FilePacingConfig {
    fn default() -> Self {
        Self {
            announce_ms: 1000,
            turn_ms: 3500,
            round_ms: 2000,
        }
    }
}

const SLOW_MS: u64 = 60_000;

impl FilePacingConfig {
    pub fn to_pacing(&self) -> Pacing {
        Pacing::from_millis(self.announce_ms, self.turn_ms, self.round_ms)
    }

    pub(super) fn validate(&self) -> Vec<ConfigIssue> {
        [
            ("pacing.announce_ms", self.announce_ms),
            ("pacing.turn_ms", self.turn_ms),
            ("pacing.round_ms", self.round_ms),
        ]
        .into_iter()
        .filter(|(_, ms)| *ms > SLOW_MS)
        .map(|(field, _)| ConfigIssue::suspicious(field, "delays over a minute per turn"))
        .collect()
    }
}
