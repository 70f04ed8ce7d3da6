//! Current-identity handle shared between the auth client and the
//! synchronization layer.

use chainsensor_types::UserId;
use std::sync::{Arc, RwLock};

/// The authenticated user, as reported by the identity provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub user_id: UserId,
    pub email: String,
}

/// Shared handle to the current session identity.
///
/// Cheap to clone; all clones observe the same state. The auth client
/// sets and clears it, the synchronization layer reads it before every
/// operation.
#[derive(Clone, Default)]
pub struct Session {
    inner: Arc<RwLock<Option<Identity>>>,
}

impl Session {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the current identity, if any.
    #[must_use]
    pub fn identity(&self) -> Option<Identity> {
        self.read().clone()
    }

    #[must_use]
    pub fn user_id(&self) -> Option<UserId> {
        self.read().as_ref().map(|i| i.user_id.clone())
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.read().is_some()
    }

    /// Installs a new identity (sign-in or session restore).
    pub fn set(&self, identity: Identity) {
        *self.write() = Some(identity);
    }

    /// Drops the identity (sign-out or session expiry).
    pub fn clear(&self) {
        *self.write() = None;
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, Option<Identity>> {
        self.inner
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, Option<Identity>> {
        self.inner
            .write()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}
