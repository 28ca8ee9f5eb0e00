//! Integration tests for the Deco Estilos shopper state layer.
//!
//! # Running Tests
//!
//! ```bash
//! # Point at a running wishlist service
//! export DECO_WISHLIST_URL=http://localhost:8787
//!
//! # Run the ignored integration tests
//! cargo test -p deco-estilos-integration-tests -- --ignored
//! ```
//!
//! # Test Categories
//!
//! - `wishlist_service` - End-to-end tests of list/toggle/identify against a
//!   live wishlist service, each using a fresh anonymous session so runs do
//!   not interfere with each other.
