//! Visitor identity resolution.
//!
//! Obtains or creates the anonymous-session token and records the contact
//! id once an identify exchange succeeds. The anonymous token is a UUID v4
//! persisted in the local mirror with no expiry or rotation; collision
//! probability is accepted at face value from the generator.

use deco_estilos_core::{AnonId, ContactId};

use crate::storage::{LocalStore, StorageError, keys};

/// Resolves and persists visitor identity.
///
/// Cheap to clone; wraps the local mirror.
#[derive(Debug, Clone)]
pub struct IdentityResolver {
    mirror: LocalStore,
}

impl IdentityResolver {
    /// Create a resolver over the given mirror.
    #[must_use]
    pub const fn new(mirror: LocalStore) -> Self {
        Self { mirror }
    }

    /// Get the anonymous-session token, creating and persisting one if absent.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if a freshly generated token cannot be persisted.
    pub fn ensure_anon_id(&self) -> Result<AnonId, StorageError> {
        if let Some(token) = self.mirror.get(keys::ANON_ID) {
            return Ok(AnonId::new(token));
        }
        let token = uuid::Uuid::new_v4().to_string();
        self.mirror.set(keys::ANON_ID, &token)?;
        tracing::debug!("Created anonymous session token");
        Ok(AnonId::new(token))
    }

    /// The contact id recorded by a successful identify exchange, if any.
    #[must_use]
    pub fn contact_id(&self) -> Option<ContactId> {
        self.mirror.get(keys::CONTACT_ID).map(ContactId::new)
    }

    /// Record the contact id; attached to subsequent wishlist requests as a
    /// correlation key.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the id cannot be persisted.
    pub fn set_contact_id(&self, contact_id: &ContactId) -> Result<(), StorageError> {
        self.mirror.set(keys::CONTACT_ID, contact_id.as_str())
    }

    /// Whether this visitor has ever completed an identify exchange.
    #[must_use]
    pub fn is_identified(&self) -> bool {
        self.contact_id().is_some()
    }
}
