//! Prelude module for coffee-server.
//!
//! This module re-exports the most commonly used types and traits from coffee-server,
//! making it easy to import everything you need with a single `use` statement.
//!
//! # Example
//!
//! ```rust
//! use coffee_server::prelude::*;
//! ```

// Re-export authorization types
pub use crate::auth::{
    AuthClaims, AuthConfig, AuthError, AuthErrorKind, AuthGate, KeySetProvider, Permission,
    RemoteKeySet, StaticKeySet, TokenVerifier, VerificationErrorPolicy,
};
// Re-export middleware types
pub use crate::middleware::*;
// Re-export service types
pub use crate::service::*;
// Re-export store types
pub use crate::store::{Drink, DrinkRepository, Ingredient, MemoryDrinkStore};
