//! The five entity types cached by the synchronization layer.
//!
//! Field names follow the remote store's column names so that rows
//! serialize directly to wire shape. `user_id` is carried on every
//! persisted row; insert payload types (`NewDataset` and friends) omit
//! the store-assigned fields (`id`, `created_at`, `updated_at`, and any
//! initial status the layer sets itself).

use crate::ids::{ActivityId, DatasetId, DeploymentId, LogicBlockId, SensorId, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Processing lifecycle of an uploaded dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DatasetStatus {
    Processing,
    Processed,
    Error,
}

/// Whether a sensor is live. Never transitions automatically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SensorStatus {
    Active,
    Inactive,
}

/// Simulated publication lifecycle of a deployment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeploymentStatus {
    Deploying,
    Deployed,
    Error,
}

/// Kind tag of a logic block within a sensor's rule set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogicBlockKind {
    Condition,
    Action,
    Trigger,
}

/// A named, typed unit of uploaded content with a processing lifecycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    pub id: DatasetId,
    pub user_id: UserId,
    pub name: String,
    /// Declared content-type tag (e.g. "csv", "json").
    #[serde(rename = "type")]
    pub kind: String,
    /// Human-readable declared size (e.g. "2.4 MB").
    pub size: String,
    /// Raw content blob, when the upload carried one.
    #[serde(default)]
    pub content: Option<String>,
    pub status: DatasetStatus,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// One condition/action/trigger statement within a sensor's rule set.
///
/// Pure value object owned by its sensor; no independent lifecycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogicBlock {
    pub id: LogicBlockId,
    #[serde(rename = "type")]
    pub kind: LogicBlockKind,
    pub content: String,
    #[serde(default)]
    pub editable: bool,
}

/// A named rule set bound to one dataset, exposable as an API endpoint.
///
/// `dataset_id` is a weak reference: deleting the dataset does not
/// cascade to sensors built on it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sensor {
    pub id: SensorId,
    pub user_id: UserId,
    pub name: String,
    pub dataset_id: DatasetId,
    pub logic: Vec<LogicBlock>,
    #[serde(default)]
    pub api_endpoint: Option<String>,
    pub status: SensorStatus,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Append-only audit record describing a mutation.
///
/// The local cache retains only the most recent entries; the remote
/// store keeps full history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Activity {
    pub id: ActivityId,
    pub user_id: UserId,
    /// Human-readable description, e.g. `"Uploaded sales.csv"`.
    pub action: String,
    /// Type tag: "upload", "delete", "create", ...
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub dataset_id: Option<DatasetId>,
    #[serde(default)]
    pub sensor_id: Option<SensorId>,
    pub created_at: DateTime<Utc>,
}

/// A simulated publication of a sensor to a named platform.
///
/// Never reconciled against a real deployment target.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Deployment {
    pub id: DeploymentId,
    pub user_id: UserId,
    pub sensor_id: SensorId,
    pub platform: String,
    pub api_endpoint: String,
    pub status: DeploymentStatus,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Insert payload for a dataset upload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewDataset {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub size: String,
    #[serde(default)]
    pub content: Option<String>,
}

/// Insert payload for a sensor saved from the builder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewSensor {
    pub name: String,
    pub dataset_id: DatasetId,
    pub logic: Vec<LogicBlock>,
}

/// Insert payload for an audit-log entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewActivity {
    pub action: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub dataset_id: Option<DatasetId>,
    #[serde(default)]
    pub sensor_id: Option<SensorId>,
}

/// Insert payload for a deployment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewDeployment {
    pub sensor_id: SensorId,
    pub platform: String,
    pub api_endpoint: String,
}
