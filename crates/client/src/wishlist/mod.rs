//! Wishlist store with optimistic remote reconciliation.
//!
//! The store holds an in-memory set of product ids. On load it fetches the
//! authoritative set from the wishlist service keyed by the anonymous id
//! (plus contact id once known). Toggles apply optimistically and roll back
//! if the remote call fails. A first-time add from an unidentified visitor
//! is gated behind an identity-capture step so the wishlist survives
//! clearing local storage.

pub mod api;
pub mod optimistic;

use std::collections::BTreeSet;

use deco_estilos_core::{ContactId, IdentityError, IdentityHandle, ProductId};
use thiserror::Error;
use tracing::instrument;

use crate::identity::IdentityResolver;
use crate::storage::StorageError;

use api::{ListResponse, WishlistApiError, WishlistBackend};
use optimistic::OptimisticToggle;

/// Errors surfaced by wishlist operations.
///
/// Nothing here is fatal and nothing is retried automatically; callers
/// degrade to "no-op plus message".
#[derive(Debug, Error)]
pub enum WishlistError {
    /// Remote wishlist service call failed.
    #[error("Wishlist service error: {0}")]
    Api(#[from] WishlistApiError),

    /// Local mirror read/write failed.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// The supplied identity input was invalid.
    #[error("Invalid identity: {0}")]
    Identity(#[from] IdentityError),
}

/// Result of a toggle request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleOutcome {
    /// The product was added to the wishlist.
    Added,
    /// The product was removed from the wishlist.
    Removed,
    /// No state changed: the caller must run the identity-capture step and
    /// then call [`WishlistStore::identify`] with this product id pending.
    IdentityRequired(ProductId),
}

/// The wishlist store.
///
/// Generic over the service backend so the state machine is testable
/// without a network.
#[derive(Debug)]
pub struct WishlistStore<B> {
    items: BTreeSet<ProductId>,
    identity: IdentityResolver,
    backend: B,
}

impl<B: WishlistBackend> WishlistStore<B> {
    /// Create a store with an empty (not yet loaded) set.
    #[must_use]
    pub const fn new(backend: B, identity: IdentityResolver) -> Self {
        Self {
            items: BTreeSet::new(),
            identity,
            backend,
        }
    }

    /// Fetch the remote set and replace the local one.
    ///
    /// If the response carries a contact id (another device already
    /// identified this visitor), it is persisted locally.
    ///
    /// # Errors
    ///
    /// Returns `WishlistError` if the anon id cannot be ensured, the remote
    /// call fails, or a returned contact id cannot be persisted. The local
    /// set is left unchanged on failure.
    #[instrument(skip(self))]
    pub async fn load(&mut self) -> Result<(), WishlistError> {
        let anon_id = self.identity.ensure_anon_id()?;
        let contact_id = self.identity.contact_id();

        let ListResponse { items, contact_id } =
            self.backend.list(&anon_id, contact_id.as_ref()).await?;

        self.items = items.into_iter().collect();
        if let Some(contact) = contact_id {
            self.identity.set_contact_id(&contact)?;
        }
        tracing::debug!(count = self.items.len(), "Wishlist loaded");
        Ok(())
    }

    /// Toggle membership of `product_id`.
    ///
    /// The flip is applied optimistically before the remote call; a remote
    /// failure rolls it back and returns the error. A first-time add from
    /// an unidentified visitor with an empty wishlist defers instead:
    /// [`ToggleOutcome::IdentityRequired`] is returned and no state changes.
    ///
    /// Two rapid toggles on the same product can race in flight; there is
    /// no per-product sequencing guarantee.
    ///
    /// # Errors
    ///
    /// Returns `WishlistError` if the remote toggle fails; local membership
    /// is exactly as it was before the call.
    #[instrument(skip(self))]
    pub async fn toggle(&mut self, product_id: ProductId) -> Result<ToggleOutcome, WishlistError> {
        // First-time favoriting prompts for a contact handle. Subsequent adds
        // (non-empty wishlist means the session already has remote state)
        // skip the prompt, as do removals.
        if !self.identity.is_identified()
            && self.items.is_empty()
            && !self.items.contains(&product_id)
        {
            return Ok(ToggleOutcome::IdentityRequired(product_id));
        }

        let anon_id = self.identity.ensure_anon_id()?;
        let mut mutation = OptimisticToggle::apply(product_id, &mut self.items);

        match self.backend.toggle(&anon_id, product_id).await {
            Ok(response) => {
                mutation.commit(&mut self.items, &response.items);
                Ok(if mutation.added() {
                    ToggleOutcome::Added
                } else {
                    ToggleOutcome::Removed
                })
            }
            Err(e) => {
                mutation.rollback(&mut self.items);
                tracing::warn!(error = %e, %product_id, "Toggle failed, rolled back");
                Err(e.into())
            }
        }
    }

    /// Run the identify exchange with a raw identity string.
    ///
    /// The string is classified as email (contains `@`) or phone. The
    /// service finds-or-creates the contact, merges the anonymous-linked
    /// and contact-linked sets by union (including `pending`, if any), and
    /// links the anon id to the contact. The merged set replaces the local
    /// one and the contact id is persisted. Idempotent under retry.
    ///
    /// # Errors
    ///
    /// Returns `WishlistError::Identity` for empty input (no state change),
    /// or a service/storage error if the exchange fails.
    #[instrument(skip(self, raw_identity))]
    pub async fn identify(
        &mut self,
        raw_identity: &str,
        pending: Option<ProductId>,
    ) -> Result<ContactId, WishlistError> {
        let handle = IdentityHandle::parse(raw_identity)?;
        let anon_id = self.identity.ensure_anon_id()?;
        let contact_id = self.identity.contact_id();

        let response = self
            .backend
            .identify(&anon_id, contact_id.as_ref(), &handle, pending)
            .await?;

        self.identity.set_contact_id(&response.contact_id)?;
        self.items = response.items.into_iter().collect();
        tracing::info!(count = self.items.len(), "Visitor identified, wishlist merged");
        Ok(response.contact_id)
    }

    /// Whether `product_id` is currently wishlisted.
    #[must_use]
    pub fn is_wishlisted(&self, product_id: ProductId) -> bool {
        self.items.contains(&product_id)
    }

    /// Number of wishlisted products.
    #[must_use]
    pub fn count(&self) -> usize {
        self.items.len()
    }

    /// The current set, ordered by product id.
    #[must_use]
    pub const fn items(&self) -> &BTreeSet<ProductId> {
        &self.items
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::cell::{Cell, RefCell};
    use std::collections::BTreeSet;

    use deco_estilos_core::AnonId;

    use crate::storage::LocalStore;

    use super::api::{IdentifyResponse, ToggleResponse, ToggleStatus};
    use super::*;

    /// In-memory stand-in for the wishlist service.
    ///
    /// Holds one anonymous set and one contact set, merged on identify the
    /// way the service does it.
    #[derive(Default)]
    struct FakeService {
        anon_items: RefCell<BTreeSet<ProductId>>,
        contact_items: RefCell<BTreeSet<ProductId>>,
        contact: RefCell<Option<ContactId>>,
        fail_next: Cell<bool>,
    }

    impl FakeService {
        fn fail_next(&self) {
            self.fail_next.set(true);
        }

        fn take_failure(&self) -> Result<(), WishlistApiError> {
            if self.fail_next.replace(false) {
                return Err(WishlistApiError::Api {
                    status: 500,
                    message: "boom".to_string(),
                });
            }
            Ok(())
        }

        fn visible_items(&self) -> Vec<ProductId> {
            if self.contact.borrow().is_some() {
                self.contact_items.borrow().iter().copied().collect()
            } else {
                self.anon_items.borrow().iter().copied().collect()
            }
        }
    }

    impl WishlistBackend for &FakeService {
        async fn list(
            &self,
            _anon_id: &AnonId,
            _contact_id: Option<&ContactId>,
        ) -> Result<ListResponse, WishlistApiError> {
            self.take_failure()?;
            Ok(ListResponse {
                items: self.visible_items(),
                contact_id: self.contact.borrow().clone(),
            })
        }

        async fn toggle(
            &self,
            _anon_id: &AnonId,
            product_id: ProductId,
        ) -> Result<ToggleResponse, WishlistApiError> {
            self.take_failure()?;
            let identified = self.contact.borrow().is_some();
            let mut items = if identified {
                self.contact_items.borrow_mut()
            } else {
                self.anon_items.borrow_mut()
            };
            let status = if items.remove(&product_id) {
                ToggleStatus::Removed
            } else {
                items.insert(product_id);
                ToggleStatus::Added
            };
            Ok(ToggleResponse {
                status,
                items: items.iter().copied().collect(),
            })
        }

        async fn identify(
            &self,
            _anon_id: &AnonId,
            _contact_id: Option<&ContactId>,
            identity: &IdentityHandle,
            pending: Option<ProductId>,
        ) -> Result<IdentifyResponse, WishlistApiError> {
            self.take_failure()?;
            let contact = self
                .contact
                .borrow()
                .clone()
                .unwrap_or_else(|| ContactId::new(format!("contact:{}", identity.as_str())));
            // Union of both sets plus the pending product id
            let mut merged: BTreeSet<ProductId> = self.anon_items.borrow().clone();
            merged.extend(self.contact_items.borrow().iter().copied());
            merged.extend(pending);
            *self.contact_items.borrow_mut() = merged.clone();
            *self.contact.borrow_mut() = Some(contact.clone());
            Ok(IdentifyResponse {
                contact_id: contact,
                items: merged.into_iter().collect(),
            })
        }
    }

    fn store_over<'a>(
        service: &'a FakeService,
        dir: &tempfile::TempDir,
    ) -> WishlistStore<&'a FakeService> {
        let mirror = LocalStore::open(dir.path()).unwrap();
        WishlistStore::new(service, IdentityResolver::new(mirror))
    }

    #[tokio::test]
    async fn test_fresh_session_gates_first_add() {
        let service = FakeService::default();
        let dir = tempfile::tempdir().unwrap();
        let mut store = store_over(&service, &dir);
        store.load().await.unwrap();

        let outcome = store.toggle(ProductId::new(42)).await.unwrap();
        assert_eq!(outcome, ToggleOutcome::IdentityRequired(ProductId::new(42)));
        // The gate defers; nothing mutated locally or remotely
        assert_eq!(store.count(), 0);
        assert!(service.anon_items.borrow().is_empty());
    }

    #[tokio::test]
    async fn test_identify_then_direct_toggle_scenario() {
        let service = FakeService::default();
        let dir = tempfile::tempdir().unwrap();
        let mut store = store_over(&service, &dir);
        store.load().await.unwrap();

        // First add on a fresh session triggers the identity prompt
        let outcome = store.toggle(ProductId::new(42)).await.unwrap();
        let ToggleOutcome::IdentityRequired(pending) = outcome else {
            panic!("expected identity gate");
        };

        // Supplying an identity merges and includes the pending product
        let contact = store.identify("a@b.com", Some(pending)).await.unwrap();
        assert_eq!(contact.as_str(), "contact:a@b.com");
        assert!(store.is_wishlisted(ProductId::new(42)));

        // Wishlist is now non-empty: the next add mutates directly
        let outcome = store.toggle(ProductId::new(43)).await.unwrap();
        assert_eq!(outcome, ToggleOutcome::Added);
        assert!(store.is_wishlisted(ProductId::new(43)));
        assert_eq!(store.count(), 2);
    }

    #[tokio::test]
    async fn test_toggle_is_involution() {
        let service = FakeService::default();
        service.anon_items.borrow_mut().insert(ProductId::new(1));
        let dir = tempfile::tempdir().unwrap();
        let mut store = store_over(&service, &dir);
        store.load().await.unwrap();

        let before: BTreeSet<_> = store.items().clone();
        assert_eq!(store.toggle(ProductId::new(7)).await.unwrap(), ToggleOutcome::Added);
        assert_eq!(
            store.toggle(ProductId::new(7)).await.unwrap(),
            ToggleOutcome::Removed
        );
        assert_eq!(store.items(), &before);
    }

    #[tokio::test]
    async fn test_toggle_rollback_on_remote_failure() {
        let service = FakeService::default();
        service.anon_items.borrow_mut().insert(ProductId::new(1));
        let dir = tempfile::tempdir().unwrap();
        let mut store = store_over(&service, &dir);
        store.load().await.unwrap();

        service.fail_next();
        let err = store.toggle(ProductId::new(7)).await.unwrap_err();
        assert!(matches!(err, WishlistError::Api(_)));
        // Rolled back: membership exactly as before the call
        assert!(!store.is_wishlisted(ProductId::new(7)));
        assert!(store.is_wishlisted(ProductId::new(1)));

        // Removal failure rolls back too
        service.fail_next();
        store.toggle(ProductId::new(1)).await.unwrap_err();
        assert!(store.is_wishlisted(ProductId::new(1)));
    }

    #[tokio::test]
    async fn test_identify_is_idempotent() {
        let service = FakeService::default();
        let dir = tempfile::tempdir().unwrap();
        let mut store = store_over(&service, &dir);

        let first = store.identify("a@b.com", Some(ProductId::new(42))).await.unwrap();
        let items_after_first = store.items().clone();

        let second = store.identify("a@b.com", Some(ProductId::new(42))).await.unwrap();
        assert_eq!(first, second);
        assert_eq!(store.items(), &items_after_first);
    }

    #[tokio::test]
    async fn test_identify_rejects_blank_input() {
        let service = FakeService::default();
        let dir = tempfile::tempdir().unwrap();
        let mut store = store_over(&service, &dir);

        let err = store.identify("   ", None).await.unwrap_err();
        assert!(matches!(err, WishlistError::Identity(_)));
        assert_eq!(store.count(), 0);
        assert!(service.contact.borrow().is_none());
    }

    #[tokio::test]
    async fn test_load_picks_up_contact_from_service() {
        let service = FakeService::default();
        *service.contact.borrow_mut() = Some(ContactId::new("c-9".to_string()));
        service.contact_items.borrow_mut().insert(ProductId::new(5));
        let dir = tempfile::tempdir().unwrap();
        let mut store = store_over(&service, &dir);

        store.load().await.unwrap();
        assert!(store.is_wishlisted(ProductId::new(5)));

        // The contact id from the response was persisted: no gate on add
        let outcome = store.toggle(ProductId::new(6)).await.unwrap();
        assert_eq!(outcome, ToggleOutcome::Added);
    }

    #[tokio::test]
    async fn test_load_failure_leaves_set_unchanged() {
        let service = FakeService::default();
        service.anon_items.borrow_mut().insert(ProductId::new(1));
        let dir = tempfile::tempdir().unwrap();
        let mut store = store_over(&service, &dir);
        store.load().await.unwrap();

        service.fail_next();
        store.load().await.unwrap_err();
        assert!(store.is_wishlisted(ProductId::new(1)));
    }

    #[tokio::test]
    async fn test_identified_visitor_skips_gate_even_when_empty() {
        let service = FakeService::default();
        let dir = tempfile::tempdir().unwrap();
        let mirror = LocalStore::open(dir.path()).unwrap();
        let resolver = IdentityResolver::new(mirror);
        resolver
            .set_contact_id(&ContactId::new("c-1".to_string()))
            .unwrap();
        *service.contact.borrow_mut() = Some(ContactId::new("c-1".to_string()));

        let mut store = WishlistStore::new(&service, resolver);
        store.load().await.unwrap();
        assert_eq!(store.count(), 0);

        // Identified with an empty list: adds go straight through
        let outcome = store.toggle(ProductId::new(3)).await.unwrap();
        assert_eq!(outcome, ToggleOutcome::Added);
    }
}
