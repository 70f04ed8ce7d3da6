//! Core type definitions for the ChainSensor client data layer.
//!
//! Shared by the remote store adapter (`chainsensor-store`) and the
//! synchronization layer (`chainsensor-sync`): entity structs, status
//! enums, id newtypes, and the two pure derivations the product relies
//! on (size-string parsing and endpoint slugs).

mod entities;
mod ids;
pub mod size;
pub mod slug;

pub use entities::{
    Activity, Dataset, DatasetStatus, Deployment, DeploymentStatus, LogicBlock, LogicBlockKind,
    NewActivity, NewDataset, NewDeployment, NewSensor, Sensor, SensorStatus,
};
pub use ids::{ActivityId, DatasetId, DeploymentId, LogicBlockId, SensorId, UserId};
