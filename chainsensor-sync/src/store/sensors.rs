//! Sensor creation, partial update, and lookup.

use super::DataStore;
use crate::error::SyncResult;
use crate::patch::SensorPatch;
use chainsensor_store::Table;
use chainsensor_types::{NewActivity, NewSensor, Sensor, SensorId, SensorStatus, slug};
use serde_json::json;
use tracing::info;

impl DataStore {
    /// Persists a sensor from the builder in status "active", with an
    /// API endpoint derived deterministically from its name. Prepends
    /// the stored record to the cache, records a create activity, and
    /// returns the record.
    pub async fn add_sensor(&self, new: NewSensor) -> SyncResult<Sensor> {
        let identity = self.identity()?;
        let _w = self.sensor_writer.lock().await;

        let api_endpoint = slug::api_endpoint(&self.config.endpoint_base_url, &new.name);
        let row = json!({
            "user_id": identity.user_id,
            "name": new.name,
            "dataset_id": new.dataset_id,
            "logic": new.logic,
            "api_endpoint": api_endpoint,
            "status": SensorStatus::Active,
        });
        let stored = self.store.insert(Table::Sensors, row).await?;
        let sensor: Sensor = serde_json::from_value(stored)?;

        self.sensors.write().await.insert(0, sensor.clone());

        self.add_activity(NewActivity {
            action: format!("Created sensor: {}", sensor.name),
            kind: "create".to_string(),
            dataset_id: None,
            sensor_id: Some(sensor.id.clone()),
        })
        .await?;

        info!(sensor_id = %sensor.id, name = %sensor.name, "sensor created");
        Ok(sensor)
    }

    /// Applies a partial update remotely, then merges the same fields
    /// into the cached copy — local and remote never diverge in the
    /// fields an update touched.
    pub async fn update_sensor(&self, id: &SensorId, patch: SensorPatch) -> SyncResult<()> {
        let identity = self.identity()?;
        let _w = self.sensor_writer.lock().await;

        let body = serde_json::to_value(&patch)?;
        self.store
            .update(Table::Sensors, &identity.user_id, id.as_str(), body)
            .await?;

        let mut rows = self.sensors.write().await;
        if let Some(sensor) = rows.iter_mut().find(|s| s.id == *id) {
            patch.apply(sensor);
        }
        Ok(())
    }

    /// Pure local lookup; absence is not an error.
    pub async fn sensor_by_id(&self, id: &SensorId) -> Option<Sensor> {
        self.sensors.read().await.iter().find(|s| s.id == *id).cloned()
    }
}
