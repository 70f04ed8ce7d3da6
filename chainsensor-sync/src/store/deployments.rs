//! Simulated deployments and their delayed "deployed" transition.

use super::DataStore;
use crate::error::SyncResult;
use crate::patch::DeploymentPatch;
use chainsensor_store::{RemoteStore, Table};
use chainsensor_types::{Deployment, DeploymentId, DeploymentStatus, NewDeployment, UserId};
use serde_json::json;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{info, warn};

impl DataStore {
    /// Persists a deployment in status "deploying", prepends it to the
    /// cache, and schedules the delayed flip to "deployed".
    pub async fn add_deployment(&self, new: NewDeployment) -> SyncResult<Deployment> {
        let identity = self.identity()?;
        let _w = self.deployment_writer.lock().await;

        let row = json!({
            "user_id": identity.user_id,
            "sensor_id": new.sensor_id,
            "platform": new.platform,
            "api_endpoint": new.api_endpoint,
            "status": DeploymentStatus::Deploying,
        });
        let stored = self.store.insert(Table::Deployments, row).await?;
        let deployment: Deployment = serde_json::from_value(stored)?;

        self.deployments.write().await.insert(0, deployment.clone());

        info!(
            deployment_id = %deployment.id,
            platform = %deployment.platform,
            "deployment started"
        );
        self.schedule_deployment(identity.user_id, deployment.id.clone());
        Ok(deployment)
    }

    /// Applies a partial update remotely, then merges the same fields
    /// into the cached copy. Same contract shape as `update_sensor`.
    pub async fn update_deployment(
        &self,
        id: &DeploymentId,
        patch: DeploymentPatch,
    ) -> SyncResult<()> {
        let identity = self.identity()?;
        let _w = self.deployment_writer.lock().await;
        push_deployment_patch(&self.store, &self.deployments, &identity.user_id, id, &patch).await
    }

    /// Schedules the deploying→deployed flip through the same patch
    /// path as `update_deployment`.
    fn schedule_deployment(&self, owner: UserId, id: DeploymentId) {
        let store = Arc::clone(&self.store);
        let deployments = Arc::clone(&self.deployments);
        let timers = Arc::clone(&self.timers);
        let writer = Arc::clone(&self.deployment_writer);
        let delay = self.config.deployment_delay;
        let key = id.as_str().to_string();

        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let _w = writer.lock().await;
            let patch = DeploymentPatch::status(DeploymentStatus::Deployed);
            if let Err(e) =
                push_deployment_patch(&store, &deployments, &owner, &id, &patch).await
            {
                warn!(deployment_id = %id, "deployment transition failed: {e}");
            }
            timers.complete(id.as_str());
        });
        self.timers.register(&key, handle);
    }
}

/// Remote partial update followed by the identical local merge.
async fn push_deployment_patch(
    store: &Arc<dyn RemoteStore>,
    deployments: &RwLock<Vec<Deployment>>,
    owner: &UserId,
    id: &DeploymentId,
    patch: &DeploymentPatch,
) -> SyncResult<()> {
    let body = serde_json::to_value(patch)?;
    store
        .update(Table::Deployments, owner, id.as_str(), body)
        .await?;

    let mut rows = deployments.write().await;
    if let Some(deployment) = rows.iter_mut().find(|d| d.id == *id) {
        patch.apply(deployment);
    }
    Ok(())
}
