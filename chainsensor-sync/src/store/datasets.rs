//! Dataset upload, deletion, lookup, and the simulated processing
//! transition.

use super::DataStore;
use crate::error::SyncResult;
use chainsensor_store::Table;
use chainsensor_types::{Dataset, DatasetId, DatasetStatus, NewActivity, NewDataset, UserId};
use serde_json::json;
use std::sync::Arc;
use tracing::{info, warn};

impl DataStore {
    /// Persists an uploaded dataset in status "processing", prepends it
    /// to the cache, records an upload activity, and schedules the
    /// delayed flip to "processed".
    pub async fn add_dataset(&self, new: NewDataset) -> SyncResult<Dataset> {
        let identity = self.identity()?;
        let _w = self.dataset_writer.lock().await;

        let row = json!({
            "user_id": identity.user_id,
            "name": new.name,
            "type": new.kind,
            "size": new.size,
            "content": new.content,
            "status": DatasetStatus::Processing,
        });
        let stored = self.store.insert(Table::Datasets, row).await?;
        let dataset: Dataset = serde_json::from_value(stored)?;

        self.datasets.write().await.insert(0, dataset.clone());

        self.add_activity(NewActivity {
            action: format!("Uploaded {}", dataset.name),
            kind: "upload".to_string(),
            dataset_id: Some(dataset.id.clone()),
            sensor_id: None,
        })
        .await?;

        info!(dataset_id = %dataset.id, name = %dataset.name, "dataset uploaded");
        self.schedule_processing(identity.user_id, dataset.id.clone());
        Ok(dataset)
    }

    /// Deletes a dataset remotely, then locally, then records a delete
    /// activity. A pending processing timer for the id is cancelled so
    /// the deleted row is never resurrected. No-ops if the id is not
    /// present locally.
    pub async fn delete_dataset(&self, id: &DatasetId) -> SyncResult<()> {
        let identity = self.identity()?;
        let _w = self.dataset_writer.lock().await;

        let Some(existing) = self.lookup_dataset(id).await else {
            return Ok(());
        };

        self.store
            .delete(Table::Datasets, &identity.user_id, id.as_str())
            .await?;
        self.timers.cancel(id.as_str());
        self.datasets.write().await.retain(|d| d.id != *id);

        self.add_activity(NewActivity {
            action: format!("Deleted {}", existing.name),
            kind: "delete".to_string(),
            dataset_id: None,
            sensor_id: None,
        })
        .await?;

        info!(dataset_id = %id, "dataset deleted");
        Ok(())
    }

    /// Pure local lookup; absence is not an error.
    pub async fn dataset_by_id(&self, id: &DatasetId) -> Option<Dataset> {
        self.lookup_dataset(id).await
    }

    async fn lookup_dataset(&self, id: &DatasetId) -> Option<Dataset> {
        self.datasets.read().await.iter().find(|d| d.id == *id).cloned()
    }

    /// Schedules the processing→processed flip. The timer updates the
    /// remote row first, then the cache; a failure is logged and the
    /// transition is abandoned — no retry, matching the stub pipeline
    /// this simulates.
    fn schedule_processing(&self, owner: UserId, id: DatasetId) {
        let store = Arc::clone(&self.store);
        let datasets = Arc::clone(&self.datasets);
        let timers = Arc::clone(&self.timers);
        let writer = Arc::clone(&self.dataset_writer);
        let delay = self.config.processing_delay;
        let key = id.as_str().to_string();

        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let _w = writer.lock().await;
            let patch = json!({ "status": DatasetStatus::Processed });
            match store
                .update(Table::Datasets, &owner, id.as_str(), patch)
                .await
            {
                Ok(()) => {
                    let mut rows = datasets.write().await;
                    if let Some(dataset) = rows.iter_mut().find(|d| d.id == id) {
                        dataset.status = DatasetStatus::Processed;
                    }
                }
                Err(e) => warn!(dataset_id = %id, "processing transition failed: {e}"),
            }
            timers.complete(id.as_str());
        });
        self.timers.register(&key, handle);
    }
}
