//! The row-level store contract the synchronization layer builds on.
//!
//! Four collections, each row scoped by an owner identity column.
//! Reads support equality filtering on the owner, descending-time
//! ordering, and an optional row limit — the only query shapes the
//! client ever issues. Writes are single-row insert/update/delete
//! scoped the same way.

use crate::error::StoreResult;
use async_trait::async_trait;
use chainsensor_types::UserId;
use serde_json::Value;
use std::fmt;

/// The row collections owned by the data layer.
///
/// Account and marketplace tables exist remotely but are never touched
/// through this adapter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Table {
    Datasets,
    Sensors,
    Activities,
    Deployments,
}

impl Table {
    /// The collection's name on the wire.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Table::Datasets => "datasets",
            Table::Sensors => "sensors",
            Table::Activities => "activities",
            Table::Deployments => "deployments",
        }
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Query shape for `select`: ordering and row limit. The owner equality
/// filter is a separate, mandatory argument — no read is ever unscoped.
#[derive(Debug, Clone, Copy, Default)]
pub struct SelectQuery {
    /// Column to order by, descending (the client always orders by
    /// creation time).
    pub order_desc_by: Option<&'static str>,
    /// Maximum number of rows to return.
    pub limit: Option<usize>,
}

impl SelectQuery {
    /// Rows ordered most-recent-first.
    #[must_use]
    pub fn newest_first() -> Self {
        Self {
            order_desc_by: Some("created_at"),
            limit: None,
        }
    }

    /// Caps the number of returned rows.
    #[must_use]
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }
}

/// Row-level CRUD against the hosted store.
///
/// Every operation is scoped by the owning user: `select`, `update` and
/// `delete` take the owner explicitly, and inserted rows must carry a
/// `user_id` column. Implementations must never return or mutate a row
/// belonging to another identity.
#[async_trait]
pub trait RemoteStore: Send + Sync {
    /// Returns the owner's rows from `table`, honoring ordering and limit.
    async fn select(&self, table: Table, owner: &UserId, query: SelectQuery)
        -> StoreResult<Vec<Value>>;

    /// Persists one row and returns the stored representation, including
    /// the store-assigned id and timestamps.
    async fn insert(&self, table: Table, row: Value) -> StoreResult<Value>;

    /// Applies a partial-field update to the owner's row with the given id.
    /// Succeeds without effect when no such row exists.
    async fn update(&self, table: Table, owner: &UserId, id: &str, patch: Value)
        -> StoreResult<()>;

    /// Deletes the owner's row with the given id. Succeeds without effect
    /// when no such row exists.
    async fn delete(&self, table: Table, owner: &UserId, id: &str) -> StoreResult<()>;
}
