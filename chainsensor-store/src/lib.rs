//! Remote store adapter for the ChainSensor client data layer.
//!
//! All persistence is delegated to a hosted row store. This crate owns
//! the seam: the [`RemoteStore`] trait, an HTTP implementation
//! ([`RestClient`]) with JWT auth and refresh-on-401, an in-memory
//! implementation ([`MemoryStore`]) for tests and local development,
//! and the [`Session`] handle carrying the current identity.

pub mod config;
pub mod error;
pub mod memory;
pub mod rest;
pub mod session;
pub mod store;

pub use config::StoreConfig;
pub use error::{StoreError, StoreResult};
pub use memory::MemoryStore;
pub use rest::RestClient;
pub use session::{Identity, Session};
pub use store::{RemoteStore, SelectQuery, Table};
