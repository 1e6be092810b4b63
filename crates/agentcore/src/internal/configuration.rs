use crate::internal::common::error::AgentError;
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const DEFAULT_RESOURCE_VIEW_REFRESH_INTERVAL: Duration = Duration::from_secs(3);
pub const DEFAULT_OBJECT_CHUNK_SIZE: u64 = 8 * 1024 * 1024;
pub const DEFAULT_MAX_BYTES_IN_FLIGHT: u64 = 256 * 1024 * 1024;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct AgentConfiguration {
    /// How long a local resource view may stay untouched before the last received
    /// snapshot of the node is replayed over it.
    pub resource_view_refresh_interval: Duration,
    /// Size of one pushed chunk in bytes.
    pub object_chunk_size: u64,
    /// Upper bound of bytes being pushed to other nodes at the same time.
    pub max_bytes_in_flight: u64,
}

impl Default for AgentConfiguration {
    fn default() -> Self {
        AgentConfiguration {
            resource_view_refresh_interval: DEFAULT_RESOURCE_VIEW_REFRESH_INTERVAL,
            object_chunk_size: DEFAULT_OBJECT_CHUNK_SIZE,
            max_bytes_in_flight: DEFAULT_MAX_BYTES_IN_FLIGHT,
        }
    }
}

impl AgentConfiguration {
    pub fn from_json(data: &str) -> crate::Result<Self> {
        let configuration: AgentConfiguration = serde_json::from_str(data)?;
        configuration.validate()?;
        Ok(configuration)
    }

    pub fn validate(&self) -> crate::Result<()> {
        if self.resource_view_refresh_interval.is_zero() {
            return Err(AgentError::ConfigurationError(
                "resource view refresh interval has to be positive".to_string(),
            ));
        }
        if self.object_chunk_size == 0 {
            return Err(AgentError::ConfigurationError(
                "object chunk size has to be positive".to_string(),
            ));
        }
        if self.max_bytes_in_flight < self.object_chunk_size {
            return Err(AgentError::ConfigurationError(format!(
                "max bytes in flight ({}) is smaller than one chunk ({})",
                self.max_bytes_in_flight, self.object_chunk_size
            )));
        }
        Ok(())
    }

    /// Global budget of pushed chunks that may be in flight at once.
    pub fn max_chunks_in_flight(&self) -> u64 {
        (self.max_bytes_in_flight / self.object_chunk_size.max(1)).max(1)
    }
}
