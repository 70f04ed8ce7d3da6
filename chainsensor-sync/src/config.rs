//! Synchronization layer configuration.

use std::time::Duration;

/// Tunables for the data-synchronization layer.
#[derive(Clone, Debug)]
pub struct SyncConfig {
    /// Base URL sensor endpoints are derived from
    /// (slug of the sensor name is appended).
    pub endpoint_base_url: String,

    /// Simulated delay before an uploaded dataset flips to "processed".
    pub processing_delay: Duration,

    /// Simulated delay before a deployment flips to "deployed".
    pub deployment_delay: Duration,

    /// Maximum number of activity entries kept in the local cache.
    /// The remote store retains full history.
    pub activity_cap: usize,

    /// Account storage quota in gigabytes.
    pub storage_limit_gb: f64,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            endpoint_base_url: "https://api.chainsensor.com/v1".to_string(),
            processing_delay: Duration::from_secs(2),
            deployment_delay: Duration::from_secs(3),
            activity_cap: 10,
            storage_limit_gb: 10.0,
        }
    }
}

impl SyncConfig {
    /// Shrinks the simulated delays so tests don't wait on wall time.
    #[must_use]
    pub fn with_fast_transitions(mut self) -> Self {
        self.processing_delay = Duration::from_millis(10);
        self.deployment_delay = Duration::from_millis(10);
        self
    }
}
