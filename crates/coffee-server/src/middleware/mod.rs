//! Middleware for the coffee shop HTTP API.
//!
//! Each concern is exposed as an extension trait on `axum::Router` so the
//! server binary can compose them in a fixed order. Route-level
//! authorization is the [`require_permission`] function middleware.

mod auth;
mod observability;
mod recovery;
mod security;

pub use auth::require_permission;
pub use observability::{REQUEST_ID_HEADER, RouterObservabilityExt};
pub use recovery::{RecoveryConfig, RouterRecoveryExt};
pub use security::{CorsConfig, DEFAULT_MAX_BODY_SIZE, RouterSecurityExt, create_cors_layer};
