//! Wishlist commands against the remote service.
//!
//! # Usage
//!
//! ```bash
//! deco-cli wish list
//! deco-cli wish toggle -p 42
//! deco-cli wish identify a@b.com --pending 42
//! ```
//!
//! # Environment Variables
//!
//! - `DECO_WISHLIST_URL` - Base URL of the wishlist service
//! - `DECO_DATA_DIR` - Directory for the local mirror (default: `.deco-estilos`)
//! - `DECO_SERVICE_TOKEN` - Optional bearer token for the service

use deco_estilos_client::config::{ClientConfig, ConfigError};
use deco_estilos_client::identity::IdentityResolver;
use deco_estilos_client::storage::{LocalStore, StorageError};
use deco_estilos_client::wishlist::api::{WishlistApiError, WishlistClient};
use deco_estilos_client::wishlist::{ToggleOutcome, WishlistError, WishlistStore};
use deco_estilos_core::ProductId;
use thiserror::Error;

/// Errors that can occur during wishlist commands.
#[derive(Debug, Error)]
pub enum WishCommandError {
    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Local mirror read/write failed.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// The HTTP client could not be constructed.
    #[error("Client error: {0}")]
    Client(#[from] WishlistApiError),

    /// A wishlist operation failed.
    #[error("Wishlist error: {0}")]
    Wishlist(#[from] WishlistError),
}

fn open_store() -> Result<WishlistStore<WishlistClient>, WishCommandError> {
    let config = ClientConfig::from_env()?;
    let client = WishlistClient::new(&config)?;
    let mirror = LocalStore::open(config.data_dir)?;
    Ok(WishlistStore::new(client, IdentityResolver::new(mirror)))
}

/// Fetch and print the wishlist.
pub async fn list() -> Result<(), WishCommandError> {
    let mut store = open_store()?;
    store.load().await?;

    if store.count() == 0 {
        tracing::info!("Wishlist is empty");
        return Ok(());
    }
    for product_id in store.items() {
        tracing::info!("  product {product_id}");
    }
    tracing::info!("{} wishlisted products", store.count());
    Ok(())
}

/// Toggle a product on the wishlist.
pub async fn toggle(product: i64) -> Result<(), WishCommandError> {
    let mut store = open_store()?;
    store.load().await?;

    match store.toggle(ProductId::new(product)).await? {
        ToggleOutcome::Added => tracing::info!("Added product {product} to wishlist"),
        ToggleOutcome::Removed => tracing::info!("Removed product {product} from wishlist"),
        ToggleOutcome::IdentityRequired(pending) => {
            tracing::info!(
                "First favorite on a fresh session: run `deco-cli wish identify <email-or-phone> --pending {pending}` to save it"
            );
        }
    }
    Ok(())
}

/// Claim the wishlist with an email or phone, merging remote state.
pub async fn identify(identity: &str, pending: Option<i64>) -> Result<(), WishCommandError> {
    let mut store = open_store()?;

    let contact_id = store
        .identify(identity, pending.map(ProductId::new))
        .await?;
    tracing::info!(
        "Identified as contact {contact_id}; wishlist now has {} products",
        store.count()
    );
    Ok(())
}
