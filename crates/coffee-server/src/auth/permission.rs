use std::borrow::Cow;
use std::fmt;

use super::{AuthClaims, AuthError, AuthResult};
use crate::utility::tracing_targets;

/// Permission an operation requires from the caller's token.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Permission {
    /// Any verified token is sufficient.
    Authenticated,
    /// The token's `permissions` claim must contain this value.
    Required(Cow<'static, str>),
}

impl Permission {
    /// Creates a permission requirement; an empty string means
    /// [`Permission::Authenticated`].
    #[must_use]
    pub const fn required(permission: &'static str) -> Self {
        if permission.is_empty() {
            Self::Authenticated
        } else {
            Self::Required(Cow::Borrowed(permission))
        }
    }

    /// Returns the permission string, empty for [`Permission::Authenticated`].
    pub fn as_str(&self) -> &str {
        match self {
            Self::Authenticated => "",
            Self::Required(permission) => permission,
        }
    }

    /// Checks the requirement against verified claims.
    ///
    /// A token without a `permissions` claim is malformed and fails even for
    /// [`Permission::Authenticated`].
    pub fn check(&self, claims: &AuthClaims) -> AuthResult<()> {
        let Some(granted) = claims.permissions() else {
            tracing::warn!(
                target: tracing_targets::AUTHORIZATION,
                subject = claims.subject(),
                "token carries no permissions claim"
            );
            return Err(AuthError::permissions_missing());
        };

        match self {
            Self::Authenticated => Ok(()),
            Self::Required(permission) if granted.contains(&**permission) => Ok(()),
            Self::Required(permission) => {
                tracing::debug!(
                    target: tracing_targets::AUTHORIZATION,
                    subject = claims.subject(),
                    permission = %permission,
                    "permission denied"
                );
                Err(AuthError::permission_denied())
            }
        }
    }
}

/// Checks `permission` against verified claims.
#[inline]
pub fn check_permissions(permission: &Permission, claims: &AuthClaims) -> AuthResult<()> {
    permission.check(claims)
}

impl From<&'static str> for Permission {
    fn from(permission: &'static str) -> Self {
        Self::required(permission)
    }
}

impl From<String> for Permission {
    fn from(permission: String) -> Self {
        if permission.is_empty() {
            Self::Authenticated
        } else {
            Self::Required(Cow::Owned(permission))
        }
    }
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Authenticated => f.write_str("<authenticated>"),
            Self::Required(permission) => f.write_str(permission),
        }
    }
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use serde_json::json;

    use super::*;
    use crate::auth::AuthErrorKind;

    fn claims(permissions: Option<&[&str]>) -> AuthClaims {
        let mut value = json!({ "iss": "i", "aud": "coffee", "exp": 1 });
        if let Some(permissions) = permissions {
            value["permissions"] = json!(permissions);
        }
        AuthClaims::from_value(value).unwrap()
    }

    #[test]
    fn empty_string_is_authenticated() {
        assert_eq!(Permission::required(""), Permission::Authenticated);
        assert_eq!(Permission::from(String::new()), Permission::Authenticated);
        assert_eq!(Permission::Authenticated.as_str(), "");
        assert_eq!(Permission::from("post:drinks").as_str(), "post:drinks");
    }

    #[test]
    fn granted_permission_passes() {
        let claims = claims(Some(&["get:drinks-detail", "post:drinks"]));
        assert!(check_permissions(&"post:drinks".into(), &claims).is_ok());
    }

    #[test]
    fn authenticated_needs_permissions_claim_only() {
        assert!(Permission::Authenticated.check(&claims(Some(&[]))).is_ok());

        let error = Permission::Authenticated.check(&claims(None)).unwrap_err();
        assert_eq!(error.kind(), AuthErrorKind::InvalidClaims);
        assert_eq!(error.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn missing_claim_is_checked_before_membership() {
        let error = Permission::from("delete:drinks")
            .check(&claims(None))
            .unwrap_err();
        assert_eq!(error, AuthError::permissions_missing());
    }

    #[test]
    fn absent_permission_is_forbidden() {
        let error = Permission::from("delete:drinks")
            .check(&claims(Some(&["get:drinks-detail"])))
            .unwrap_err();

        assert_eq!(error.kind(), AuthErrorKind::Unauthorized);
        assert_eq!(error.status(), StatusCode::FORBIDDEN);
        assert_eq!(error.description(), "Permission not found.");
    }

    #[test]
    fn membership_is_exact() {
        let claims = claims(Some(&["post:drinks"]));
        assert!(Permission::from("post:drink").check(&claims).is_err());
        assert!(Permission::from("POST:DRINKS").check(&claims).is_err());
    }
}
