//! Remote store configuration.

use serde::{Deserialize, Serialize};

/// Configuration for the hosted row store.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Base URL for the hosted store (e.g., "https://db.chainsensor.com").
    pub api_base_url: String,

    /// Project API key sent as the `apikey` header on every request.
    pub api_key: String,

    /// Request timeout in seconds.
    pub request_timeout_secs: u64,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            api_base_url: "https://db.chainsensor.com".to_string(),
            api_key: String::new(),
            request_timeout_secs: 30,
        }
    }
}
