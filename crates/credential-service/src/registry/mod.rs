//! Identity registry and the shared, lock-guarded handle around it.

mod memory;

pub use memory::Registry;

use crate::error::RegistrationError;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;

/// A registered user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    /// Unique email, matched exactly (case-sensitive)
    pub email: String,

    /// Unique ten-digit phone number
    pub phone: String,

    /// Password as submitted
    pub secret: String,
}

impl Identity {
    pub fn new(
        email: impl Into<String>,
        phone: impl Into<String>,
        secret: impl Into<String>,
    ) -> Self {
        Self {
            email: email.into(),
            phone: phone.into(),
            secret: secret.into(),
        }
    }
}

/// Shared registry handle.
///
/// Only composite operations are exposed, each running under a single lock
/// acquisition. In particular the duplicate check and the insert happen
/// under one write lock, so concurrent registrations cannot both pass the
/// check for the same email or phone.
#[derive(Debug, Clone, Default)]
pub struct IdentityStore {
    registry: Arc<RwLock<Registry>>,
}

impl IdentityStore {
    /// Create a store around an empty registry.
    pub fn new() -> Self {
        Self::from_registry(Registry::new())
    }

    /// Create a store around an existing registry.
    pub fn from_registry(registry: Registry) -> Self {
        Self {
            registry: Arc::new(RwLock::new(registry)),
        }
    }

    /// Insert an identity unless its email or phone is already taken.
    ///
    /// Email is checked before phone.
    pub async fn insert_unique(&self, identity: Identity) -> Result<(), RegistrationError> {
        let mut registry = self.registry.write().await;

        if registry.find_by_email(&identity.email).is_some() {
            return Err(RegistrationError::DuplicateEmail);
        }
        if registry.find_by_phone(&identity.phone).is_some() {
            return Err(RegistrationError::DuplicatePhone);
        }

        registry.insert(identity);
        debug!(total = registry.count(), "Identity stored");
        Ok(())
    }

    /// Look up an identity by exact email and secret.
    pub async fn find_by_credentials(&self, email: &str, secret: &str) -> Option<Identity> {
        let registry = self.registry.read().await;
        registry.find_by_credentials(email, secret).cloned()
    }

    /// Number of stored identities.
    pub async fn count(&self) -> usize {
        self.registry.read().await.count()
    }
}
