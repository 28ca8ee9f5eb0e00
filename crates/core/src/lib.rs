//! Deco Estilos Core - Shared types library.
//!
//! This crate provides common types used across all Deco Estilos components:
//! - `client` - Cart and wishlist state layer
//! - `cli` - Command-line front end for the state layer
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no HTTP clients. This keeps
//! it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, prices, cart lines, and
//!   identity handles

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
