//! Append-only activity log with a bounded local view.

use super::DataStore;
use crate::error::SyncResult;
use chainsensor_store::Table;
use chainsensor_types::{Activity, NewActivity};
use serde_json::json;

impl DataStore {
    /// Persists an audit record and prepends it to the local list,
    /// which never holds more than the configured cap regardless of how
    /// much history exists remotely.
    pub async fn add_activity(&self, new: NewActivity) -> SyncResult<Activity> {
        let identity = self.identity()?;
        let _w = self.activity_writer.lock().await;

        let row = json!({
            "user_id": identity.user_id,
            "action": new.action,
            "type": new.kind,
            "dataset_id": new.dataset_id,
            "sensor_id": new.sensor_id,
        });
        let stored = self.store.insert(Table::Activities, row).await?;
        let activity: Activity = serde_json::from_value(stored)?;

        let mut rows = self.activities.write().await;
        rows.insert(0, activity.clone());
        rows.truncate(self.config.activity_cap);
        Ok(activity)
    }
}
