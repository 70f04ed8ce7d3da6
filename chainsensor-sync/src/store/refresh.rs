//! Wholesale reload of the cached collections.

use super::{DataStore, rows_into};
use crate::error::SyncResult;
use chainsensor_store::{SelectQuery, Table};
use chainsensor_types::{Activity, Dataset, Deployment, Sensor, UserId};
use std::sync::atomic::Ordering;
use tracing::{debug, warn};

impl DataStore {
    /// Reloads all four collections for the current identity from the
    /// remote store, most-recent-first, with activities capped to the
    /// most recent entries.
    ///
    /// Failures are logged and leave the prior cache in place; no
    /// partial replacement is ever visible. Without an identity this is
    /// a no-op.
    pub async fn refresh(&self) {
        let Some(identity) = self.session.identity() else {
            debug!("refresh skipped: no active identity");
            return;
        };

        self.loading.store(true, Ordering::SeqCst);
        if let Err(e) = self.reload(&identity.user_id).await {
            warn!("refresh failed, keeping cached state: {e}");
        }
        self.loading.store(false, Ordering::SeqCst);
    }

    async fn reload(&self, owner: &UserId) -> SyncResult<()> {
        let datasets: Vec<Dataset> = rows_into(
            self.store
                .select(Table::Datasets, owner, SelectQuery::newest_first())
                .await?,
        )?;
        let sensors: Vec<Sensor> = rows_into(
            self.store
                .select(Table::Sensors, owner, SelectQuery::newest_first())
                .await?,
        )?;
        let activities: Vec<Activity> = rows_into(
            self.store
                .select(
                    Table::Activities,
                    owner,
                    SelectQuery::newest_first().with_limit(self.config.activity_cap),
                )
                .await?,
        )?;
        let deployments: Vec<Deployment> = rows_into(
            self.store
                .select(Table::Deployments, owner, SelectQuery::newest_first())
                .await?,
        )?;

        debug!(
            datasets = datasets.len(),
            sensors = sensors.len(),
            activities = activities.len(),
            deployments = deployments.len(),
            "cache reloaded"
        );

        // All four fetched; swap them in together.
        let mut cached_datasets = self.datasets.write().await;
        let mut cached_sensors = self.sensors.write().await;
        let mut cached_activities = self.activities.write().await;
        let mut cached_deployments = self.deployments.write().await;
        *cached_datasets = datasets;
        *cached_sensors = sensors;
        *cached_activities = activities;
        *cached_deployments = deployments;
        Ok(())
    }
}
