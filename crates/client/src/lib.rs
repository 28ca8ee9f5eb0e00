//! Deco Estilos Client - Cart and wishlist state layer.
//!
//! Two independent state containers back the storefront's shopping UI:
//!
//! - [`cart::CartStore`] - in-memory line-item collection with
//!   merge-on-add semantics, mirrored to durable local storage on every
//!   mutation.
//! - [`wishlist::WishlistStore`] - in-memory set of product ids with
//!   optimistic toggle, rollback on remote failure, and a remote
//!   merge-on-identify exchange.
//!
//! Supporting pieces:
//!
//! - [`storage::LocalStore`] - file-backed key/value mirror standing in for
//!   browser local storage.
//! - [`identity::IdentityResolver`] - lazily creates the anonymous-session
//!   token and records the contact id once the visitor identifies.
//! - [`wishlist::api::WishlistClient`] - `reqwest` client for the remote
//!   wishlist service.
//!
//! # Concurrency
//!
//! Single logical thread of control is assumed, matching UI-event-driven
//! execution. Remote calls are async but never raced intentionally; two
//! rapid toggles on the same product can race in flight with no sequencing
//! guarantee (documented limitation, not designed behavior). The local
//! mirror has no cross-process lock.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod config;
pub mod identity;
pub mod storage;
pub mod wishlist;

pub use cart::CartStore;
pub use config::ClientConfig;
pub use identity::IdentityResolver;
pub use storage::LocalStore;
pub use wishlist::{ToggleOutcome, WishlistError, WishlistStore};
