//! Centralized tracing target constants for structured logging.
//!
//! This module defines all tracing target strings used throughout the crate,
//! providing a single source of truth for log categorization and filtering.
//! Using consistent targets enables fine-grained control over log output
//! via tracing subscriber filters.

/// Bearer token extraction and JWT verification.
pub const AUTHENTICATION: &str = "coffee_server::authentication";

/// Permission checks performed by the authorization gate.
pub const AUTHORIZATION: &str = "coffee_server::authorization";

/// Key set fetching and caching.
pub const JWKS: &str = "coffee_server::jwks";

/// Drink resource handlers.
pub const HANDLER_DRINKS: &str = "coffee_server::handler::drinks";

/// Error recovery including middleware errors and request failures.
pub const RECOVERY_ERROR: &str = "coffee_server::recovery::error";

/// Panic recovery including handler panics.
pub const RECOVERY_PANIC: &str = "coffee_server::recovery::panic";
