//! Synchronization layer error types.

use chainsensor_store::StoreError;
use thiserror::Error;

/// Result type for synchronization operations.
pub type SyncResult<T> = Result<T, SyncError>;

/// Errors surfaced by the synchronization layer.
///
/// Remote-store failures pass through unwrapped in message terms — the
/// caller decides whether to display, log, or ignore them. Local
/// lookups that find nothing return `Option::None`, never an error.
#[derive(Debug, Error)]
pub enum SyncError {
    /// An authenticated-only operation was called with no active
    /// identity. Raised before any network interaction.
    #[error("authentication required")]
    AuthRequired,

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("malformed row from store: {0}")]
    MalformedRow(#[from] serde_json::Error),
}
