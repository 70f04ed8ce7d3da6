//! Client data-synchronization layer for ChainSensor.
//!
//! Maintains a consistent, locally-cached view of the user's datasets,
//! sensors, activity log, and deployments, mediating all mutations
//! through a [`chainsensor_store::RemoteStore`].
//!
//! # Architecture
//!
//! - **DataStore**: the command surface the view layer talks to — one
//!   method per operation, each an async request/response pair.
//! - **Patches**: partial-field updates that serialize only populated
//!   fields, applied remotely and locally from the same value.
//! - **TimerRegistry**: cancellable tasks driving the simulated
//!   processing/deployment status transitions, keyed by entity id so a
//!   delete or identity loss aborts them.
//!
//! Every authenticated-only operation fails fast with
//! [`SyncError::AuthRequired`] before any network interaction when no
//! identity is present. Remote-store errors propagate to the caller
//! unchanged; presentation of failures is the view layer's concern.
//!
//! # Example
//!
//! ```no_run
//! use chainsensor_store::{MemoryStore, Session};
//! use chainsensor_sync::{DataStore, SyncConfig};
//! use std::sync::Arc;
//!
//! let store = Arc::new(MemoryStore::new());
//! let session = Session::new();
//! let data = DataStore::new(store, session, SyncConfig::default());
//! # let _ = data;
//! ```

pub mod config;
mod error;
mod patch;
mod store;
mod timers;

pub use config::SyncConfig;
pub use error::{SyncError, SyncResult};
pub use patch::{DeploymentPatch, SensorPatch};
pub use store::DataStore;
