//! Core types for Deco Estilos.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod id;
pub mod identity;
pub mod line;
pub mod price;

pub use id::*;
pub use identity::{IdentityError, IdentityHandle};
pub use line::CartLine;
pub use price::Price;
