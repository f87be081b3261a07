//! Bearer credential extraction from the `Authorization` header.

use axum::http::HeaderMap;
use axum::http::header::AUTHORIZATION;

use super::{AuthError, AuthResult};
use crate::utility::tracing_targets;

/// Extracts the raw bearer token from an `Authorization` header value.
///
/// The header is split on whitespace and must consist of exactly the scheme
/// `Bearer` (any case) followed by a single token segment. The token is
/// returned unparsed.
pub fn extract_bearer_token(header: Option<&str>) -> AuthResult<&str> {
    let header = match header {
        Some(header) if !header.is_empty() => header,
        _ => {
            tracing::debug!(
                target: tracing_targets::AUTHENTICATION,
                "request rejected: authorization header missing"
            );
            return Err(AuthError::header_missing());
        }
    };

    let mut segments = header.split_whitespace();

    let has_bearer_scheme = segments
        .next()
        .is_some_and(|scheme| scheme.eq_ignore_ascii_case("bearer"));
    if !has_bearer_scheme {
        return Err(AuthError::invalid_scheme());
    }

    let Some(token) = segments.next() else {
        return Err(AuthError::token_not_found());
    };

    if segments.next().is_some() {
        return Err(AuthError::not_bearer_token());
    }

    Ok(token)
}

/// Extracts the raw bearer token from request headers.
///
/// A header value that is not visible ASCII is rejected as a malformed
/// scheme.
pub fn bearer_token_from_headers(headers: &HeaderMap) -> AuthResult<&str> {
    let header = headers
        .get(AUTHORIZATION)
        .map(|value| value.to_str().map_err(|_| AuthError::invalid_scheme()))
        .transpose()?;

    extract_bearer_token(header)
}

#[cfg(test)]
mod tests {
    use axum::http::{HeaderValue, StatusCode};

    use super::*;
    use crate::auth::AuthErrorKind;

    fn assert_invalid_header(header: &str) {
        let error = extract_bearer_token(Some(header)).unwrap_err();
        assert_eq!(error.kind(), AuthErrorKind::InvalidHeader, "header: {header:?}");
        assert_eq!(error.status(), StatusCode::UNAUTHORIZED, "header: {header:?}");
    }

    #[test]
    fn missing_header() {
        let error = extract_bearer_token(None).unwrap_err();
        assert_eq!(error.kind(), AuthErrorKind::AuthorizationHeaderMissing);
        assert_eq!(error.status(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn empty_header_counts_as_missing() {
        let error = extract_bearer_token(Some("")).unwrap_err();
        assert_eq!(error.kind(), AuthErrorKind::AuthorizationHeaderMissing);
    }

    #[test]
    fn returns_second_segment() {
        assert_eq!(extract_bearer_token(Some("Bearer abc.def.ghi")), Ok("abc.def.ghi"));
        assert_eq!(extract_bearer_token(Some("bearer abc")), Ok("abc"));
        assert_eq!(extract_bearer_token(Some("BEARER   abc ")), Ok("abc"));
    }

    #[test]
    fn rejects_other_schemes() {
        assert_invalid_header("Basic dXNlcjpwYXNz");
        assert_invalid_header("Token abc");
        assert_invalid_header("Bearerabc");
        assert_invalid_header("   ");
    }

    #[test]
    fn rejects_missing_token_segment() {
        let error = extract_bearer_token(Some("Bearer")).unwrap_err();
        assert_eq!(error.description(), "Token not found.");
        assert_invalid_header("Bearer ");
    }

    #[test]
    fn rejects_extra_segments() {
        let error = extract_bearer_token(Some("Bearer abc def")).unwrap_err();
        assert_eq!(error.description(), "Authorization header must be bearer token.");
        assert_invalid_header("Bearer a b c");
    }

    #[test]
    fn reads_from_header_map() {
        let mut headers = HeaderMap::new();
        assert_eq!(
            bearer_token_from_headers(&headers).unwrap_err().kind(),
            AuthErrorKind::AuthorizationHeaderMissing
        );

        headers.insert(AUTHORIZATION, HeaderValue::from_static("Bearer abc"));
        assert_eq!(bearer_token_from_headers(&headers), Ok("abc"));

        let opaque = HeaderValue::from_bytes(b"Bearer \xff\xfe").unwrap();
        headers.insert(AUTHORIZATION, opaque);
        assert_eq!(
            bearer_token_from_headers(&headers).unwrap_err().kind(),
            AuthErrorKind::InvalidHeader
        );
    }
}
