//! Derived storage metrics.

use super::DataStore;
use chainsensor_types::size::parse_size_gb;

impl DataStore {
    /// Aggregate storage used, in gigabytes: the sum of each cached
    /// dataset's declared size. Always recomputed from the collection,
    /// never stored, so it cannot drift. Sizes that fail to parse
    /// contribute nothing.
    pub async fn storage_used_gb(&self) -> f64 {
        self.datasets
            .read()
            .await
            .iter()
            .filter_map(|d| parse_size_gb(&d.size))
            .sum()
    }

    /// The account storage quota, in gigabytes.
    pub fn storage_limit_gb(&self) -> f64 {
        self.config.storage_limit_gb
    }
}
