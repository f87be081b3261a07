use axum::extract::{FromRequestParts, OptionalFromRequestParts};
use axum::http::request::Parts;

use crate::auth::AuthClaims;
use crate::handler::{Error, ErrorKind};
use crate::utility::tracing_targets;

/// Reads the claims the `require_permission` middleware stored on the
/// request.
///
/// Extracting [`AuthClaims`] on a route without that middleware is a
/// routing bug and fails with `500`.
impl<S> FromRequestParts<S> for AuthClaims
where
    S: Send + Sync,
{
    type Rejection = Error<'static>;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts.extensions.get::<AuthClaims>().cloned().ok_or_else(|| {
            tracing::error!(
                target: tracing_targets::AUTHORIZATION,
                path = %parts.uri.path(),
                "claims requested on a route without authorization middleware"
            );
            ErrorKind::InternalServerError
                .with_context("authorization middleware did not run for this route")
        })
    }
}

impl<S> OptionalFromRequestParts<S> for AuthClaims
where
    S: Send + Sync,
{
    type Rejection = Error<'static>;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &S,
    ) -> Result<Option<Self>, Self::Rejection> {
        Ok(parts.extensions.get::<AuthClaims>().cloned())
    }
}
