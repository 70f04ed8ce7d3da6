//! Simulated status transitions: scheduling, completion, cancellation.

use chainsensor_store::{Identity, MemoryStore, Session, Table};
use chainsensor_sync::{DataStore, SyncConfig};
use chainsensor_types::{
    DatasetStatus, DeploymentStatus, NewDataset, NewDeployment, SensorId, UserId,
};
use std::sync::Arc;
use std::time::Duration;

fn config(delay: Duration) -> SyncConfig {
    SyncConfig {
        processing_delay: delay,
        deployment_delay: delay,
        ..SyncConfig::default()
    }
}

struct Harness {
    store: Arc<MemoryStore>,
    data: DataStore,
}

fn setup(delay: Duration) -> Harness {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("chainsensor_sync=debug")
        .try_init();

    let store = Arc::new(MemoryStore::new());
    let session = Session::new();
    session.set(Identity {
        user_id: UserId::from("u-1"),
        email: "test@example.com".to_string(),
    });
    let data = DataStore::new(store.clone(), session, config(delay));
    Harness { store, data }
}

fn upload(name: &str) -> NewDataset {
    NewDataset {
        name: name.to_string(),
        kind: "csv".to_string(),
        size: "1 MB".to_string(),
        content: None,
    }
}

fn deployment() -> NewDeployment {
    NewDeployment {
        sensor_id: SensorId::from("s-1"),
        platform: "aws-lambda".to_string(),
        api_endpoint: "https://api.chainsensor.com/v1/x".to_string(),
    }
}

async fn settle() {
    tokio::time::sleep(Duration::from_millis(200)).await;
}

// --- Dataset processing ---

#[tokio::test]
async fn dataset_flips_to_processed_exactly_once() {
    let h = setup(Duration::from_millis(10));
    let dataset = h.data.add_dataset(upload("sales.csv")).await.unwrap();

    // Immediately after upload: processing, one pending timer.
    assert_eq!(dataset.status, DatasetStatus::Processing);
    assert_eq!(
        h.data.dataset_by_id(&dataset.id).await.unwrap().status,
        DatasetStatus::Processing
    );
    assert_eq!(h.data.pending_transitions(), 1);

    settle().await;

    // After the delay: processed locally and remotely, timer retired.
    assert_eq!(
        h.data.dataset_by_id(&dataset.id).await.unwrap().status,
        DatasetStatus::Processed
    );
    let remote = h.store.rows_for(Table::Datasets, &UserId::from("u-1")).await;
    assert_eq!(remote[0]["status"], "processed");
    assert_eq!(h.data.pending_transitions(), 0);

    // And it stays there — no further transition occurs.
    settle().await;
    assert_eq!(
        h.data.dataset_by_id(&dataset.id).await.unwrap().status,
        DatasetStatus::Processed
    );
}

#[tokio::test]
async fn delete_cancels_the_processing_timer() {
    let h = setup(Duration::from_millis(100));
    let dataset = h.data.add_dataset(upload("doomed.csv")).await.unwrap();

    h.data.delete_dataset(&dataset.id).await.unwrap();
    assert_eq!(h.data.pending_transitions(), 0);

    settle().await;

    // The deleted dataset was not resurrected anywhere.
    assert_eq!(h.data.dataset_by_id(&dataset.id).await, None);
    assert!(h.data.datasets().await.is_empty());
    assert!(h.store.rows_for(Table::Datasets, &UserId::from("u-1")).await.is_empty());
}

#[tokio::test]
async fn failed_transition_is_abandoned_without_retry() {
    let h = setup(Duration::from_millis(10));
    let dataset = h.data.add_dataset(upload("stuck.csv")).await.unwrap();

    // The next store call is the timer's update.
    h.store.fail_next("store unavailable");
    settle().await;

    assert_eq!(
        h.data.dataset_by_id(&dataset.id).await.unwrap().status,
        DatasetStatus::Processing
    );
    assert_eq!(h.data.pending_transitions(), 0);
}

// --- Deployment ---

#[tokio::test]
async fn deployment_flips_to_deployed() {
    let h = setup(Duration::from_millis(10));
    let dep = h.data.add_deployment(deployment()).await.unwrap();
    assert_eq!(dep.status, DeploymentStatus::Deploying);
    assert_eq!(h.data.pending_transitions(), 1);

    settle().await;

    let cached = h.data.deployments().await;
    assert_eq!(cached[0].status, DeploymentStatus::Deployed);
    let remote = h
        .store
        .rows_for(Table::Deployments, &UserId::from("u-1"))
        .await;
    assert_eq!(remote[0]["status"], "deployed");
    assert_eq!(h.data.pending_transitions(), 0);
}

// --- Identity loss ---

#[tokio::test]
async fn clear_aborts_pending_timers() {
    let h = setup(Duration::from_millis(100));
    h.data.add_dataset(upload("a.csv")).await.unwrap();
    h.data.add_deployment(deployment()).await.unwrap();
    assert_eq!(h.data.pending_transitions(), 2);

    h.data.clear().await;
    assert_eq!(h.data.pending_transitions(), 0);

    settle().await;

    // Aborted timers never wrote: the remote rows keep their initial status.
    let datasets = h.store.rows_for(Table::Datasets, &UserId::from("u-1")).await;
    assert_eq!(datasets[0]["status"], "processing");
    let deployments = h
        .store
        .rows_for(Table::Deployments, &UserId::from("u-1"))
        .await;
    assert_eq!(deployments[0]["status"], "deploying");
}
