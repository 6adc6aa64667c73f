use serde::{Deserialize, Serialize};

/// Per-peer session settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Check every opponent move against our own move generator before
    /// replaying it. When off, relayed moves are applied as announced.
    pub verify_remote_moves: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            verify_remote_moves: true,
        }
    }
}

impl SessionConfig {
    /// Replay relayed moves without checking them.
    pub fn trusting() -> Self {
        Self {
            verify_remote_moves: false,
        }
    }
}
