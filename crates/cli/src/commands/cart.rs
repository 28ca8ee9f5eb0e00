//! Local cart commands.
//!
//! # Usage
//!
//! ```bash
//! deco-cli cart add -v 11 -p 1 -n "Sillón Roble" --price 129.99 -q 2
//! deco-cli cart set-quantity -v 11 -q 3
//! deco-cli cart show
//! deco-cli cart clear
//! ```
//!
//! # Environment Variables
//!
//! - `DECO_DATA_DIR` - Directory for the local mirror (default: `.deco-estilos`)

use deco_estilos_client::cart::CartStore;
use deco_estilos_client::config::{ClientConfig, ConfigError};
use deco_estilos_client::storage::{LocalStore, StorageError};
use deco_estilos_core::{CartLine, Price, ProductId, VariantId};
use rust_decimal::Decimal;
use thiserror::Error;

/// Errors that can occur during cart commands.
#[derive(Debug, Error)]
pub enum CartCommandError {
    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Local mirror read/write failed.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

fn open_cart() -> Result<CartStore, CartCommandError> {
    let config = ClientConfig::from_env()?;
    let mirror = LocalStore::open(config.data_dir)?;
    Ok(CartStore::load(mirror))
}

/// Add a variant to the cart, merging quantity if it is already present.
#[allow(clippy::too_many_arguments)]
pub fn add(
    variant: i64,
    product: i64,
    name: &str,
    price: Decimal,
    quantity: u32,
    color: Option<String>,
    size: Option<String>,
    image_url: Option<String>,
) -> Result<(), CartCommandError> {
    let mut cart = open_cart()?;
    cart.add_item(CartLine {
        variant_id: VariantId::new(variant),
        product_id: ProductId::new(product),
        name: name.to_string(),
        unit_price: Price::new(price),
        quantity,
        image_url,
        color,
        size,
    })?;

    tracing::info!(
        "Added variant {variant} x{quantity}. Cart: {} items, total {}",
        cart.item_count(),
        cart.total_price()
    );
    Ok(())
}

/// Remove a variant from the cart.
pub fn remove(variant: i64) -> Result<(), CartCommandError> {
    let mut cart = open_cart()?;
    cart.remove_item(VariantId::new(variant))?;
    tracing::info!(
        "Removed variant {variant}. Cart: {} items, total {}",
        cart.item_count(),
        cart.total_price()
    );
    Ok(())
}

/// Replace the quantity for a variant (0 removes the line).
pub fn set_quantity(variant: i64, quantity: u32) -> Result<(), CartCommandError> {
    let mut cart = open_cart()?;
    cart.set_quantity(VariantId::new(variant), quantity)?;
    tracing::info!(
        "Set variant {variant} to {quantity}. Cart: {} items, total {}",
        cart.item_count(),
        cart.total_price()
    );
    Ok(())
}

/// Print the cart contents and totals.
pub fn show() -> Result<(), CartCommandError> {
    let cart = open_cart()?;

    if cart.lines().is_empty() {
        tracing::info!("Cart is empty");
        return Ok(());
    }

    for line in cart.lines() {
        let options = [line.color.as_deref(), line.size.as_deref()]
            .into_iter()
            .flatten()
            .collect::<Vec<_>>()
            .join(" / ");
        tracing::info!(
            "  [{}] {} {} x{} @ {} = {}",
            line.variant_id,
            line.name,
            if options.is_empty() {
                String::new()
            } else {
                format!("({options})")
            },
            line.quantity,
            line.unit_price,
            line.line_price()
        );
    }
    tracing::info!("Total: {} ({} items)", cart.total_price(), cart.item_count());
    Ok(())
}

/// Empty the cart.
pub fn clear() -> Result<(), CartCommandError> {
    let mut cart = open_cart()?;
    cart.clear()?;
    tracing::info!("Cart cleared");
    Ok(())
}
