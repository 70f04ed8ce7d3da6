//! In-memory `RemoteStore` implementation.
//!
//! Backs tests and local development: assigns ids and timestamps on
//! insert the way the hosted store does, honors owner scoping, ordering
//! and limits, counts calls, and supports single-shot fault injection.

use crate::error::{StoreError, StoreResult};
use crate::store::{RemoteStore, SelectQuery, Table};
use async_trait::async_trait;
use chainsensor_types::UserId;
use chrono::Utc;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use tokio::sync::RwLock;
use uuid::Uuid;

/// One stored row plus its insertion sequence number. The sequence
/// disambiguates "most recent first" between rows created within the
/// same timestamp tick.
#[derive(Clone)]
struct Row {
    seq: u64,
    value: Value,
}

/// In-memory row store with hosted-store insert semantics.
#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<HashMap<Table, Vec<Row>>>,
    seq: AtomicU64,
    calls: AtomicUsize,
    fail_next: Mutex<Option<String>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of store calls made so far (across all operations).
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Makes the next operation fail with an API error carrying `msg`.
    pub fn fail_next(&self, msg: &str) {
        *self.lock_fault() = Some(msg.to_string());
    }

    /// Total rows in a table, across all owners.
    pub async fn row_count(&self, table: Table) -> usize {
        self.tables
            .read()
            .await
            .get(&table)
            .map_or(0, |rows| rows.len())
    }

    /// Rows in a table belonging to one owner.
    pub async fn rows_for(&self, table: Table, owner: &UserId) -> Vec<Value> {
        self.tables
            .read()
            .await
            .get(&table)
            .map(|rows| {
                rows.iter()
                    .filter(|r| owned_by(&r.value, owner))
                    .map(|r| r.value.clone())
                    .collect()
            })
            .unwrap_or_default()
    }

    fn lock_fault(&self) -> std::sync::MutexGuard<'_, Option<String>> {
        self.fail_next
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    fn begin_call(&self) -> StoreResult<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(msg) = self.lock_fault().take() {
            return Err(StoreError::Api(msg));
        }
        Ok(())
    }
}

fn owned_by(row: &Value, owner: &UserId) -> bool {
    row.get("user_id").and_then(Value::as_str) == Some(owner.as_str())
}

fn has_id(row: &Value, id: &str) -> bool {
    row.get("id").and_then(Value::as_str) == Some(id)
}

#[async_trait]
impl RemoteStore for MemoryStore {
    async fn select(
        &self,
        table: Table,
        owner: &UserId,
        query: SelectQuery,
    ) -> StoreResult<Vec<Value>> {
        self.begin_call()?;
        let tables = self.tables.read().await;
        let mut rows: Vec<&Row> = tables
            .get(&table)
            .map(|rows| rows.iter().filter(|r| owned_by(&r.value, owner)).collect())
            .unwrap_or_default();

        if query.order_desc_by.is_some() {
            rows.sort_by(|a, b| b.seq.cmp(&a.seq));
        }

        let limit = query.limit.unwrap_or(rows.len());
        Ok(rows.into_iter().take(limit).map(|r| r.value.clone()).collect())
    }

    async fn insert(&self, table: Table, mut row: Value) -> StoreResult<Value> {
        self.begin_call()?;
        let obj = row
            .as_object_mut()
            .ok_or_else(|| StoreError::Api("insert payload must be a JSON object".to_string()))?;
        if !obj.contains_key("user_id") {
            return Err(StoreError::Api(format!(
                "insert into {table} missing owner column"
            )));
        }

        let now = Utc::now();
        obj.insert("id".to_string(), Value::String(Uuid::new_v4().to_string()));
        obj.entry("created_at")
            .or_insert_with(|| Value::String(now.to_rfc3339()));
        obj.insert("updated_at".to_string(), Value::String(now.to_rfc3339()));

        let seq = self.seq.fetch_add(1, Ordering::SeqCst);
        let mut tables = self.tables.write().await;
        tables.entry(table).or_default().push(Row {
            seq,
            value: row.clone(),
        });
        Ok(row)
    }

    async fn update(
        &self,
        table: Table,
        owner: &UserId,
        id: &str,
        patch: Value,
    ) -> StoreResult<()> {
        self.begin_call()?;
        let fields = patch
            .as_object()
            .ok_or_else(|| StoreError::Api("update patch must be a JSON object".to_string()))?
            .clone();

        let mut tables = self.tables.write().await;
        if let Some(rows) = tables.get_mut(&table) {
            for row in rows
                .iter_mut()
                .filter(|r| owned_by(&r.value, owner) && has_id(&r.value, id))
            {
                if let Some(obj) = row.value.as_object_mut() {
                    for (k, v) in &fields {
                        obj.insert(k.clone(), v.clone());
                    }
                    obj.insert(
                        "updated_at".to_string(),
                        Value::String(Utc::now().to_rfc3339()),
                    );
                }
            }
        }
        // Zero matched rows is not an error, matching hosted semantics.
        Ok(())
    }

    async fn delete(&self, table: Table, owner: &UserId, id: &str) -> StoreResult<()> {
        self.begin_call()?;
        let mut tables = self.tables.write().await;
        if let Some(rows) = tables.get_mut(&table) {
            rows.retain(|r| !(owned_by(&r.value, owner) && has_id(&r.value, id)));
        }
        Ok(())
    }
}
