//! Optimistic toggle mutations.
//!
//! A toggle flips membership locally before the remote call resolves, then
//! either commits (adopting the server's item set) or rolls back to the
//! prior membership. Modeled as an explicit three-state transition so the
//! reconciliation logic is independent of any UI concern.

use std::collections::BTreeSet;

use deco_estilos_core::ProductId;

/// Lifecycle of an optimistic mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationState {
    /// Applied locally, remote call in flight.
    Pending,
    /// Remote call succeeded; the server's set was adopted.
    Committed,
    /// Remote call failed; the prior membership was restored.
    RolledBack,
}

/// An in-flight optimistic membership flip for one product id.
#[derive(Debug)]
pub struct OptimisticToggle {
    product_id: ProductId,
    was_wishlisted: bool,
    state: MutationState,
}

impl OptimisticToggle {
    /// Flip membership of `product_id` in `items` and record the prior
    /// state for rollback.
    pub fn apply(product_id: ProductId, items: &mut BTreeSet<ProductId>) -> Self {
        let was_wishlisted = !items.insert(product_id);
        if was_wishlisted {
            items.remove(&product_id);
        }
        Self {
            product_id,
            was_wishlisted,
            state: MutationState::Pending,
        }
    }

    /// Whether this mutation added the product (as opposed to removing it).
    #[must_use]
    pub const fn added(&self) -> bool {
        !self.was_wishlisted
    }

    /// The current lifecycle state.
    #[must_use]
    pub const fn state(&self) -> MutationState {
        self.state
    }

    /// Reconcile with a successful remote response: the server's item set
    /// is authoritative and replaces the local one.
    pub fn commit(&mut self, items: &mut BTreeSet<ProductId>, server_items: &[ProductId]) {
        items.clear();
        items.extend(server_items.iter().copied());
        self.state = MutationState::Committed;
    }

    /// Restore the membership recorded at apply time.
    pub fn rollback(&mut self, items: &mut BTreeSet<ProductId>) {
        if self.was_wishlisted {
            items.insert(self.product_id);
        } else {
            items.remove(&self.product_id);
        }
        self.state = MutationState::RolledBack;
    }
}
