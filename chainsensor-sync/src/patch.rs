//! Partial-field update payloads.
//!
//! A patch serializes only its populated fields, so the remote update
//! and the local merge touch exactly the same columns — the two copies
//! can never diverge in fields an update carried.

use chainsensor_types::{
    DatasetId, Deployment, DeploymentStatus, LogicBlock, Sensor, SensorStatus,
};
use serde::Serialize;

/// Partial update for a sensor.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SensorPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dataset_id: Option<DatasetId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logic: Option<Vec<LogicBlock>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_endpoint: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<SensorStatus>,
}

impl SensorPatch {
    /// Merges the populated fields into a cached sensor.
    pub fn apply(&self, sensor: &mut Sensor) {
        if let Some(name) = &self.name {
            sensor.name = name.clone();
        }
        if let Some(dataset_id) = &self.dataset_id {
            sensor.dataset_id = dataset_id.clone();
        }
        if let Some(logic) = &self.logic {
            sensor.logic = logic.clone();
        }
        if let Some(api_endpoint) = &self.api_endpoint {
            sensor.api_endpoint = Some(api_endpoint.clone());
        }
        if let Some(status) = self.status {
            sensor.status = status;
        }
    }
}

/// Partial update for a deployment.
#[derive(Debug, Clone, Default, Serialize)]
pub struct DeploymentPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub platform: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_endpoint: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<DeploymentStatus>,
}

impl DeploymentPatch {
    /// A patch that only flips the lifecycle status.
    #[must_use]
    pub fn status(status: DeploymentStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }

    /// Merges the populated fields into a cached deployment.
    pub fn apply(&self, deployment: &mut Deployment) {
        if let Some(platform) = &self.platform {
            deployment.platform = platform.clone();
        }
        if let Some(api_endpoint) = &self.api_endpoint {
            deployment.api_endpoint = api_endpoint.clone();
        }
        if let Some(status) = self.status {
            deployment.status = status;
        }
    }
}
