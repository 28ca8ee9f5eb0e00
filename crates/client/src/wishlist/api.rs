//! Wishlist service HTTP client.
//!
//! JSON over HTTP with `reqwest`. Three endpoints: list, toggle, identify.
//! No retry, no backoff; failures surface to the stores, which roll back
//! any optimistic change and report to the caller.

use deco_estilos_core::{AnonId, ContactId, IdentityHandle, ProductId};
use reqwest::header::{HeaderMap, HeaderValue};
use secrecy::ExposeSecret;
use serde::Deserialize;
use thiserror::Error;
use tracing::instrument;

use crate::config::ClientConfig;

/// Errors that can occur when talking to the wishlist service.
#[derive(Debug, Error)]
pub enum WishlistApiError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Service returned a non-2xx response.
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    /// Failed to parse a response body.
    #[error("Parse error: {0}")]
    Parse(String),

    /// The client could not be constructed.
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Response of `GET /wishlist/list`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListResponse {
    /// Product ids currently wishlisted.
    #[serde(default)]
    pub items: Vec<ProductId>,
    /// Contact id, if the service has already linked this anon id.
    #[serde(default)]
    pub contact_id: Option<ContactId>,
}

/// Direction the service resolved a toggle to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToggleStatus {
    Added,
    Removed,
}

/// Response of `POST /wishlist/toggle`.
#[derive(Debug, Clone, Deserialize)]
pub struct ToggleResponse {
    /// Whether the product ended up added or removed.
    pub status: ToggleStatus,
    /// The full item set after the toggle.
    #[serde(default)]
    pub items: Vec<ProductId>,
}

/// Response of `POST /wishlist/identify`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IdentifyResponse {
    /// The found-or-created contact record.
    pub contact_id: ContactId,
    /// Union of the contact-linked and anonymous-linked sets.
    #[serde(default)]
    pub items: Vec<ProductId>,
}

/// Pluggable wishlist service backend.
///
/// The HTTP client is the production implementation; tests use in-memory
/// fakes to exercise the stores without a network.
pub trait WishlistBackend {
    /// Fetch the wishlist keyed by `anon_id` (and `contact_id` if present).
    fn list(
        &self,
        anon_id: &AnonId,
        contact_id: Option<&ContactId>,
    ) -> impl Future<Output = Result<ListResponse, WishlistApiError>>;

    /// Toggle membership of `product_id` for `anon_id`.
    fn toggle(
        &self,
        anon_id: &AnonId,
        product_id: ProductId,
    ) -> impl Future<Output = Result<ToggleResponse, WishlistApiError>>;

    /// Find-or-create a contact for `identity`, merge the anonymous and
    /// contact-linked sets (plus `pending`, if any), and link the anon id.
    fn identify(
        &self,
        anon_id: &AnonId,
        contact_id: Option<&ContactId>,
        identity: &IdentityHandle,
        pending: Option<ProductId>,
    ) -> impl Future<Output = Result<IdentifyResponse, WishlistApiError>>;
}

/// HTTP client for the wishlist service.
#[derive(Debug, Clone)]
pub struct WishlistClient {
    client: reqwest::Client,
    base_url: String,
}

impl WishlistClient {
    /// Create a new wishlist service client.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to build or the service
    /// token is not a valid header value.
    pub fn new(config: &ClientConfig) -> Result<Self, WishlistApiError> {
        let mut headers = HeaderMap::new();
        if let Some(token) = &config.service_token {
            let auth_value = format!("Bearer {}", token.expose_secret());
            let mut value = HeaderValue::from_str(&auth_value)
                .map_err(|e| WishlistApiError::Config(format!("Invalid token format: {e}")))?;
            value.set_sensitive(true);
            headers.insert("Authorization", value);
        }

        let client = reqwest::Client::builder().default_headers(headers).build()?;

        Ok(Self {
            client,
            base_url: config.wishlist_url.clone(),
        })
    }

    async fn check(response: reqwest::Response) -> Result<reqwest::Response, WishlistApiError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let message = response.text().await.unwrap_or_default();
        Err(WishlistApiError::Api {
            status: status.as_u16(),
            message,
        })
    }
}

impl WishlistBackend for WishlistClient {
    #[instrument(skip(self))]
    async fn list(
        &self,
        anon_id: &AnonId,
        contact_id: Option<&ContactId>,
    ) -> Result<ListResponse, WishlistApiError> {
        let url = format!("{}/wishlist/list", self.base_url);
        let mut query: Vec<(&str, &str)> = vec![("anonId", anon_id.as_str())];
        if let Some(contact) = contact_id {
            query.push(("contactId", contact.as_str()));
        }

        let response = self.client.get(&url).query(&query).send().await?;
        let response = Self::check(response).await?;

        response
            .json()
            .await
            .map_err(|e| WishlistApiError::Parse(e.to_string()))
    }

    #[instrument(skip(self))]
    async fn toggle(
        &self,
        anon_id: &AnonId,
        product_id: ProductId,
    ) -> Result<ToggleResponse, WishlistApiError> {
        let url = format!("{}/wishlist/toggle", self.base_url);
        let body = serde_json::json!({
            "anonId": anon_id,
            "productId": product_id,
        });

        let response = self.client.post(&url).json(&body).send().await?;
        let response = Self::check(response).await?;

        response
            .json()
            .await
            .map_err(|e| WishlistApiError::Parse(e.to_string()))
    }

    #[instrument(skip(self, identity))]
    async fn identify(
        &self,
        anon_id: &AnonId,
        contact_id: Option<&ContactId>,
        identity: &IdentityHandle,
        pending: Option<ProductId>,
    ) -> Result<IdentifyResponse, WishlistApiError> {
        let url = format!("{}/wishlist/identify", self.base_url);
        let body = serde_json::json!({
            "identity": identity.as_str(),
            "productId": pending,
        });

        let mut request = self
            .client
            .post(&url)
            .header("X-Anon-ID", anon_id.as_str())
            .json(&body);
        if let Some(contact) = contact_id {
            request = request.header("X-Contact-ID", contact.as_str());
        }

        let response = request.send().await?;
        let response = Self::check(response).await?;

        response
            .json()
            .await
            .map_err(|e| WishlistApiError::Parse(e.to_string()))
    }
}
