//! Authorization failures surfaced to HTTP clients.

use std::borrow::Cow;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use strum::{Display, IntoStaticStr};

use crate::handler::ErrorResponse;

/// Result type for the authorization pipeline.
pub type AuthResult<T, E = AuthError> = std::result::Result<T, E>;

/// Machine-readable category of an [`AuthError`].
///
/// The `snake_case` rendering of each variant is the `code` field of the
/// JSON error body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum AuthErrorKind {
    /// No `Authorization` header on the request.
    AuthorizationHeaderMissing,
    /// Malformed scheme, missing key id, unknown key or unparseable token.
    InvalidHeader,
    /// Audience or issuer mismatch, or no `permissions` claim.
    InvalidClaims,
    /// The required permission is not granted by the token.
    Unauthorized,
    /// The `exp` claim has elapsed.
    TokenExpired,
    /// Generic verification failure reported by the gate.
    InvalidToken,
}

impl AuthErrorKind {
    /// Returns the error code as sent to clients.
    #[inline]
    #[must_use]
    pub fn code(self) -> &'static str {
        self.into()
    }
}

/// A structured authorization failure.
///
/// Every rejection in the authorization pipeline produces exactly one of
/// these, carrying a code, a human-readable description and the HTTP status.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind} ({status}): {description}")]
#[must_use = "errors do nothing unless returned"]
pub struct AuthError {
    kind: AuthErrorKind,
    description: Cow<'static, str>,
    status: StatusCode,
}

impl AuthError {
    /// Creates a new [`AuthError`].
    #[inline]
    pub fn new(
        kind: AuthErrorKind,
        description: impl Into<Cow<'static, str>>,
        status: StatusCode,
    ) -> Self {
        Self {
            kind,
            description: description.into(),
            status,
        }
    }

    /// The request carries no `Authorization` header.
    pub fn header_missing() -> Self {
        Self::new(
            AuthErrorKind::AuthorizationHeaderMissing,
            "Authorization header is expected.",
            StatusCode::UNAUTHORIZED,
        )
    }

    /// The header scheme is not `Bearer`.
    pub fn invalid_scheme() -> Self {
        Self::new(
            AuthErrorKind::InvalidHeader,
            "Authorization header must start with \"Bearer\".",
            StatusCode::UNAUTHORIZED,
        )
    }

    /// The header has a scheme but no token segment.
    pub fn token_not_found() -> Self {
        Self::new(
            AuthErrorKind::InvalidHeader,
            "Token not found.",
            StatusCode::UNAUTHORIZED,
        )
    }

    /// The header has more than two segments.
    pub fn not_bearer_token() -> Self {
        Self::new(
            AuthErrorKind::InvalidHeader,
            "Authorization header must be bearer token.",
            StatusCode::UNAUTHORIZED,
        )
    }

    /// The token header carries no key identifier.
    pub fn malformed() -> Self {
        Self::new(
            AuthErrorKind::InvalidHeader,
            "Authorization malformed.",
            StatusCode::UNAUTHORIZED,
        )
    }

    /// No key in the key set matches the token, or the key set is unavailable.
    pub fn key_not_found() -> Self {
        Self::new(
            AuthErrorKind::InvalidHeader,
            "Unable to find the appropriate key.",
            StatusCode::BAD_REQUEST,
        )
    }

    /// The token could not be parsed or its signature did not verify.
    pub fn unparseable() -> Self {
        Self::new(
            AuthErrorKind::InvalidHeader,
            "Unable to parse authentication token.",
            StatusCode::BAD_REQUEST,
        )
    }

    /// The audience or issuer claim does not match the configuration.
    pub fn invalid_claims() -> Self {
        Self::new(
            AuthErrorKind::InvalidClaims,
            "Incorrect claims. Please, check the audience and issuer.",
            StatusCode::UNAUTHORIZED,
        )
    }

    /// The token has expired.
    pub fn expired() -> Self {
        Self::new(
            AuthErrorKind::TokenExpired,
            "Token expired.",
            StatusCode::UNAUTHORIZED,
        )
    }

    /// The verified claim set has no `permissions` field.
    pub fn permissions_missing() -> Self {
        Self::new(
            AuthErrorKind::InvalidClaims,
            "Permissions should be included in the payload.",
            StatusCode::BAD_REQUEST,
        )
    }

    /// The `permissions` claim lacks the required permission.
    pub fn permission_denied() -> Self {
        Self::new(
            AuthErrorKind::Unauthorized,
            "Permission not found.",
            StatusCode::FORBIDDEN,
        )
    }

    /// Generic verification failure used when the gate collapses errors.
    pub fn unverified() -> Self {
        Self::new(
            AuthErrorKind::InvalidToken,
            "Token could not be verified",
            StatusCode::UNAUTHORIZED,
        )
    }

    /// Replaces the HTTP status, keeping kind and description.
    #[inline]
    pub fn with_status(self, status: StatusCode) -> Self {
        Self { status, ..self }
    }

    /// Returns the error kind.
    #[inline]
    #[must_use]
    pub const fn kind(&self) -> AuthErrorKind {
        self.kind
    }

    /// Returns the machine-readable error code.
    #[inline]
    #[must_use]
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    /// Returns the human-readable description.
    #[inline]
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the HTTP status code.
    #[inline]
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        self.status
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        ErrorResponse::custom(self.kind.code(), self.description, self.status).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_render_as_snake_case_codes() {
        assert_eq!(
            AuthErrorKind::AuthorizationHeaderMissing.code(),
            "authorization_header_missing"
        );
        assert_eq!(AuthErrorKind::InvalidHeader.code(), "invalid_header");
        assert_eq!(AuthErrorKind::InvalidClaims.code(), "invalid_claims");
        assert_eq!(AuthErrorKind::Unauthorized.code(), "unauthorized");
        assert_eq!(AuthErrorKind::TokenExpired.code(), "token_expired");
        assert_eq!(AuthErrorKind::InvalidToken.code(), "invalid_token");
    }

    #[test]
    fn constructors_carry_expected_statuses() {
        assert_eq!(AuthError::header_missing().status(), StatusCode::UNAUTHORIZED);
        assert_eq!(AuthError::invalid_scheme().status(), StatusCode::UNAUTHORIZED);
        assert_eq!(AuthError::key_not_found().status(), StatusCode::BAD_REQUEST);
        assert_eq!(AuthError::unparseable().status(), StatusCode::BAD_REQUEST);
        assert_eq!(AuthError::invalid_claims().status(), StatusCode::UNAUTHORIZED);
        assert_eq!(AuthError::expired().status(), StatusCode::UNAUTHORIZED);
        assert_eq!(AuthError::permissions_missing().status(), StatusCode::BAD_REQUEST);
        assert_eq!(AuthError::permission_denied().status(), StatusCode::FORBIDDEN);
        assert_eq!(AuthError::unverified().status(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn with_status_keeps_kind_and_description() {
        let error = AuthError::key_not_found().with_status(StatusCode::UNAUTHORIZED);
        assert_eq!(error.kind(), AuthErrorKind::InvalidHeader);
        assert_eq!(error.description(), "Unable to find the appropriate key.");
        assert_eq!(error.status(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn display_includes_code_and_description() {
        let display = AuthError::expired().to_string();
        assert!(display.contains("token_expired"));
        assert!(display.contains("401"));
        assert!(display.contains("Token expired."));
    }
}
