//! The client data-synchronization layer.
//!
//! `DataStore` holds a locally-cached view of the four entity
//! collections for the current identity, mediates every mutation
//! through the injected [`RemoteStore`], and keeps derived metrics
//! consistent with the cache. It is created at the composition root and
//! passed by reference to consumers — there is no ambient global state.

mod activity;
mod datasets;
mod deployments;
mod metrics;
mod refresh;
mod sensors;

use crate::config::SyncConfig;
use crate::error::{SyncError, SyncResult};
use crate::timers::TimerRegistry;
use chainsensor_store::{Identity, RemoteStore, Session};
use chainsensor_types::{Activity, Dataset, Deployment, Sensor};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::RwLock;

/// Locally-cached, identity-scoped view of the remote collections.
pub struct DataStore {
    store: Arc<dyn RemoteStore>,
    session: Session,
    config: SyncConfig,

    datasets: Arc<RwLock<Vec<Dataset>>>,
    sensors: Arc<RwLock<Vec<Sensor>>>,
    activities: Arc<RwLock<Vec<Activity>>>,
    deployments: Arc<RwLock<Vec<Deployment>>>,
    loading: AtomicBool,

    /// Pending simulated status transitions, keyed by entity id.
    timers: Arc<TimerRegistry>,

    // One writer mutex per collection: every mutator of a collection
    // holds its mutex across the remote write and the local apply, so
    // racing mutations serialize instead of interleaving. The dataset
    // and deployment mutexes are shared with their transition timers.
    dataset_writer: Arc<tokio::sync::Mutex<()>>,
    sensor_writer: tokio::sync::Mutex<()>,
    activity_writer: tokio::sync::Mutex<()>,
    deployment_writer: Arc<tokio::sync::Mutex<()>>,
}

impl DataStore {
    pub fn new(store: Arc<dyn RemoteStore>, session: Session, config: SyncConfig) -> Self {
        Self {
            store,
            session,
            config,
            datasets: Arc::new(RwLock::new(Vec::new())),
            sensors: Arc::new(RwLock::new(Vec::new())),
            activities: Arc::new(RwLock::new(Vec::new())),
            deployments: Arc::new(RwLock::new(Vec::new())),
            loading: AtomicBool::new(false),
            timers: Arc::new(TimerRegistry::new()),
            dataset_writer: Arc::new(tokio::sync::Mutex::new(())),
            sensor_writer: tokio::sync::Mutex::new(()),
            activity_writer: tokio::sync::Mutex::new(()),
            deployment_writer: Arc::new(tokio::sync::Mutex::new(())),
        }
    }

    /// The identity every operation is scoped by. Authenticated-only
    /// operations call this before any network interaction.
    pub(crate) fn identity(&self) -> SyncResult<Identity> {
        self.session.identity().ok_or(SyncError::AuthRequired)
    }

    // ── Cached snapshots ──

    pub async fn datasets(&self) -> Vec<Dataset> {
        self.datasets.read().await.clone()
    }

    pub async fn sensors(&self) -> Vec<Sensor> {
        self.sensors.read().await.clone()
    }

    pub async fn activities(&self) -> Vec<Activity> {
        self.activities.read().await.clone()
    }

    pub async fn deployments(&self) -> Vec<Deployment> {
        self.deployments.read().await.clone()
    }

    /// True while a `refresh` is replacing the cache.
    pub fn is_loading(&self) -> bool {
        self.loading.load(Ordering::SeqCst)
    }

    /// Number of simulated transitions still pending.
    pub fn pending_transitions(&self) -> usize {
        self.timers.pending()
    }

    /// Empties all four collections atomically and aborts every pending
    /// transition timer. Called on identity loss — no stale cross-session
    /// data may remain visible.
    pub async fn clear(&self) {
        self.timers.cancel_all();
        let mut datasets = self.datasets.write().await;
        let mut sensors = self.sensors.write().await;
        let mut activities = self.activities.write().await;
        let mut deployments = self.deployments.write().await;
        datasets.clear();
        sensors.clear();
        activities.clear();
        deployments.clear();
    }
}

/// Deserializes a page of store rows into entities.
pub(crate) fn rows_into<T: DeserializeOwned>(rows: Vec<Value>) -> SyncResult<Vec<T>> {
    rows.into_iter()
        .map(|row| serde_json::from_value(row).map_err(SyncError::from))
        .collect()
}
