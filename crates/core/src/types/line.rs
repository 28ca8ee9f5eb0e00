//! Cart line items.

use serde::{Deserialize, Serialize};

use super::id::{ProductId, VariantId};
use super::price::Price;

/// A single line in the shopping cart.
///
/// Keyed by `variant_id`: the cart holds at most one line per variant, and
/// adding the same variant again merges quantities instead of appending.
/// Quantity is always >= 1; a decrement to zero removes the line.
///
/// Serializes in camelCase to stay compatible with snapshots written by
/// earlier storefront builds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    /// The purchasable variant this line refers to (unique key).
    pub variant_id: VariantId,
    /// The parent product.
    pub product_id: ProductId,
    /// Product display name.
    pub name: String,
    /// Price per unit.
    pub unit_price: Price,
    /// Number of units; always >= 1 while the line exists.
    pub quantity: u32,
    /// Product or variant image, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    /// Variant color label, if the product has color options.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    /// Variant size label, if the product has size options.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
}

impl CartLine {
    /// The price of this line: unit price times quantity.
    #[must_use]
    pub fn line_price(&self) -> Price {
        self.unit_price * self.quantity
    }
}
