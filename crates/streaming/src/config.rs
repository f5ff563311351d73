use serde::{Deserialize, Serialize};

use crate::*;

/// Areas further apart than this on either axis are treated as a jump rather than a pan.
pub const DEFAULT_JUMP_TOLERANCE: i32 = 3;

/// Minimum time between two fetches of the same area.
pub const DEFAULT_QUERY_INTERVAL_MS: u64 = 10_000;

/// Tunables for the streaming cache.  Missing fields take their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StreamingConfig {
    /// In area units.
    pub jump_tolerance: i32,
    pub query_interval_ms: u64,
}

impl Default for StreamingConfig {
    fn default() -> Self {
        StreamingConfig {
            jump_tolerance: DEFAULT_JUMP_TOLERANCE,
            query_interval_ms: DEFAULT_QUERY_INTERVAL_MS,
        }
    }
}

impl StreamingConfig {
    pub fn validate(&self) -> Result<()> {
        if self.jump_tolerance < 0 {
            return Err(StreamingError::InvalidTolerance(self.jump_tolerance));
        }
        Ok(())
    }

    pub fn from_json_str(input: &str) -> Result<StreamingConfig> {
        let config: StreamingConfig = serde_json::from_str(input)?;
        config.validate()?;
        Ok(config)
    }
}
