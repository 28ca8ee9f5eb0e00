//! Shopping cart store.
//!
//! An in-memory line-item collection with merge-on-add semantics. Every
//! mutation synchronously re-serializes the full collection to the local
//! mirror; construction deserializes the prior snapshot and silently falls
//! back to an empty cart on parse failure.

use deco_estilos_core::{CartLine, Price, VariantId};
use tracing::instrument;

use crate::storage::{LocalStore, StorageError, keys};

/// The shopping cart.
///
/// Invariants:
/// - at most one line per variant id
/// - every line has quantity >= 1 (a decrement to zero removes the line)
#[derive(Debug)]
pub struct CartStore {
    lines: Vec<CartLine>,
    is_open: bool,
    mirror: LocalStore,
}

impl CartStore {
    /// Load the cart from the local mirror.
    ///
    /// A missing or unparsable snapshot yields an empty cart.
    #[must_use]
    pub fn load(mirror: LocalStore) -> Self {
        let lines = mirror
            .get(keys::SHOPPING_CART)
            .and_then(|snapshot| match serde_json::from_str(&snapshot) {
                Ok(lines) => Some(lines),
                Err(e) => {
                    tracing::warn!(error = %e, "Corrupt cart snapshot, starting empty");
                    None
                }
            })
            .unwrap_or_default();

        Self {
            lines,
            is_open: false,
            mirror,
        }
    }

    /// Add a line to the cart.
    ///
    /// If a line with the same variant id exists, its quantity is increased
    /// by the added amount; otherwise the line is appended as-is. Marks the
    /// cart open for the UI.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if persisting the snapshot fails; the
    /// in-memory change still applies.
    #[instrument(skip(self, line), fields(variant_id = %line.variant_id))]
    pub fn add_item(&mut self, line: CartLine) -> Result<(), StorageError> {
        match self
            .lines
            .iter_mut()
            .find(|l| l.variant_id == line.variant_id)
        {
            Some(existing) => existing.quantity += line.quantity,
            None => self.lines.push(line),
        }
        self.is_open = true;
        self.persist()
    }

    /// Remove the line for `variant_id` unconditionally.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if persisting the snapshot fails.
    #[instrument(skip(self))]
    pub fn remove_item(&mut self, variant_id: VariantId) -> Result<(), StorageError> {
        self.lines.retain(|l| l.variant_id != variant_id);
        self.persist()
    }

    /// Replace the quantity for `variant_id`.
    ///
    /// A quantity of zero is equivalent to [`Self::remove_item`]. Setting a
    /// quantity for a variant not in the cart is a no-op.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if persisting the snapshot fails.
    #[instrument(skip(self))]
    pub fn set_quantity(&mut self, variant_id: VariantId, quantity: u32) -> Result<(), StorageError> {
        if quantity == 0 {
            return self.remove_item(variant_id);
        }
        if let Some(line) = self.lines.iter_mut().find(|l| l.variant_id == variant_id) {
            line.quantity = quantity;
        }
        self.persist()
    }

    /// Empty the cart (invoked after successful checkout).
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if persisting the snapshot fails.
    #[instrument(skip(self))]
    pub fn clear(&mut self) -> Result<(), StorageError> {
        self.lines.clear();
        self.persist()
    }

    /// Sum of unit price times quantity over all lines, exact decimal.
    #[must_use]
    pub fn total_price(&self) -> Price {
        self.lines.iter().map(CartLine::line_price).sum()
    }

    /// Sum of quantities over all lines.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.lines.iter().map(|l| l.quantity).sum()
    }

    /// The current lines, in insertion order.
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Whether the cart drawer should be shown.
    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.is_open
    }

    /// Open the cart drawer.
    pub fn open(&mut self) {
        self.is_open = true;
    }

    /// Close the cart drawer.
    pub fn close(&mut self) {
        self.is_open = false;
    }

    fn persist(&self) -> Result<(), StorageError> {
        // Vec<CartLine> serialization cannot fail; surface only the write error
        let snapshot = serde_json::to_string(&self.lines).unwrap_or_else(|_| "[]".to_string());
        self.mirror.set(keys::SHOPPING_CART, &snapshot)
    }
}
