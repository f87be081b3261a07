//! HTTP request extractors.
//!
//! - [`AuthClaims`] - verified token claims stored by the authorization
//!   middleware
//! - [`Json`] - JSON deserialization with JSON error responses
//! - [`ValidateJson`] - JSON extraction with automatic validation
//! - [`Path`] - path parameter extraction with JSON error responses

mod claims;
pub mod reject;

pub use crate::auth::AuthClaims;
pub use crate::extract::reject::{Json, Path, ValidateJson};
