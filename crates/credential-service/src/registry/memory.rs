//! In-memory registry implementation.

use super::Identity;

/// Append-only list of registered identities.
///
/// Lookups are linear scans in insertion order. The registry itself does
/// not reject duplicates; `IdentityStore::insert_unique` does.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    identities: Vec<Identity>,
}

impl Registry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self {
            identities: Vec::new(),
        }
    }

    /// First identity with exactly this email.
    pub fn find_by_email(&self, email: &str) -> Option<&Identity> {
        self.identities.iter().find(|i| i.email == email)
    }

    /// First identity with exactly this phone number.
    pub fn find_by_phone(&self, phone: &str) -> Option<&Identity> {
        self.identities.iter().find(|i| i.phone == phone)
    }

    /// First identity whose email and secret both match exactly.
    pub fn find_by_credentials(&self, email: &str, secret: &str) -> Option<&Identity> {
        self.identities
            .iter()
            .find(|i| i.email == email && i.secret == secret)
    }

    /// Append an identity.
    pub fn insert(&mut self, identity: Identity) {
        self.identities.push(identity);
    }

    /// Number of stored identities.
    pub fn count(&self) -> usize {
        self.identities.len()
    }
}
