//! Per-machine settings.

use serde::{Deserialize, Serialize};

/// Default number of dispatch records a machine keeps.
pub const DEFAULT_HISTORY_LIMIT: usize = 1024;

/// Settings for a single machine instance.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MachineConfig {
    /// Record each transition taken
    pub record_history: bool,

    /// Maximum records kept; `None` keeps everything
    pub history_limit: Option<usize>,
}

impl Default for MachineConfig {
    fn default() -> Self {
        Self {
            record_history: true,
            history_limit: Some(DEFAULT_HISTORY_LIMIT),
        }
    }
}

impl MachineConfig {
    pub fn record_history(mut self, record: bool) -> Self {
        self.record_history = record;
        self
    }

    pub fn history_limit(mut self, limit: Option<usize>) -> Self {
        self.history_limit = limit;
        self
    }
}
