//! Bearer token authorization.
//!
//! Requests to protected routes pass through a linear pipeline:
//!
//! 1. [`extract_bearer_token`] pulls the raw token out of the
//!    `Authorization` header.
//! 2. [`TokenVerifier`] resolves the signing key through a
//!    [`KeySetProvider`], checks the RS256 signature and validates expiry,
//!    audience and issuer.
//! 3. [`Permission::check`] looks up the required permission in the
//!    token's `permissions` claim.
//!
//! [`AuthGate`] composes the three stages. Every stage reports failures as
//! an [`AuthError`], which renders as a JSON error response.

mod bearer;
mod claims;
mod config;
mod error;
mod gate;
mod jwks;
mod permission;
mod verifier;

#[cfg(test)]
pub(crate) mod testing;

pub use self::bearer::{bearer_token_from_headers, extract_bearer_token};
pub use self::claims::AuthClaims;
pub use self::config::{AuthConfig, AuthConfigBuilder, VerificationErrorPolicy};
pub use self::error::{AuthError, AuthErrorKind, AuthResult};
pub use self::gate::{AuthGate, PermissionGuard};
pub use self::jwks::{KeySetProvider, RemoteKeySet, StaticKeySet};
pub use self::permission::{Permission, check_permissions};
pub use self::verifier::TokenVerifier;
