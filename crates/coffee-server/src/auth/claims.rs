use std::collections::BTreeSet;

use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// `aud` claim, either a single value or a list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
enum Audience {
    One(String),
    Many(Vec<String>),
}

impl Audience {
    fn as_slice(&self) -> &[String] {
        match self {
            Self::One(audience) => std::slice::from_ref(audience),
            Self::Many(audiences) => audiences,
        }
    }
}

/// Decoded payload. `iss` and `aud` stay optional here so that a token
/// lacking them reaches claim validation instead of failing to decode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct ClaimSet {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    iss: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    aud: Option<Audience>,
    exp: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    sub: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    iat: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    permissions: Option<BTreeSet<String>>,
    #[serde(flatten)]
    extra: Map<String, Value>,
}

/// Claims of an access token that passed signature, expiry, audience and
/// issuer checks.
///
/// Only [`TokenVerifier`] produces values of this type, so holding one is
/// proof of a verified token.
///
/// [`TokenVerifier`]: crate::auth::TokenVerifier
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct AuthClaims(ClaimSet);

impl AuthClaims {
    #[inline]
    pub(crate) fn from_verified(claims: ClaimSet) -> Self {
        Self(claims)
    }

    /// Token issuer (`iss`).
    #[inline]
    pub fn issuer(&self) -> &str {
        self.0.iss.as_deref().unwrap_or_default()
    }

    /// Token audiences (`aud`).
    pub fn audiences(&self) -> impl Iterator<Item = &str> {
        self.0
            .aud
            .iter()
            .flat_map(Audience::as_slice)
            .map(String::as_str)
    }

    /// Token subject (`sub`), usually the user id.
    #[inline]
    pub fn subject(&self) -> Option<&str> {
        self.0.sub.as_deref()
    }

    /// Expiration time (`exp`).
    pub fn expires_at(&self) -> Option<Timestamp> {
        Timestamp::from_second(self.0.exp).ok()
    }

    /// Issue time (`iat`).
    pub fn issued_at(&self) -> Option<Timestamp> {
        self.0.iat.and_then(|iat| Timestamp::from_second(iat).ok())
    }

    /// Granted permissions, or `None` if the token carries no
    /// `permissions` claim at all.
    #[inline]
    pub fn permissions(&self) -> Option<&BTreeSet<String>> {
        self.0.permissions.as_ref()
    }

    /// Returns a claim that is not one of the fields above.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.0.extra.get(name)
    }

    #[cfg(test)]
    pub(crate) fn from_value(value: Value) -> serde_json::Result<Self> {
        serde_json::from_value(value).map(Self)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn reads_registered_and_custom_claims() {
        let claims = AuthClaims::from_value(json!({
            "iss": "https://tenant.auth0.com/",
            "aud": ["coffee", "https://tenant.auth0.com/userinfo"],
            "exp": 1_700_000_000,
            "iat": 1_699_996_400,
            "sub": "auth0|barista",
            "azp": "client-id",
            "permissions": ["get:drinks-detail", "post:drinks"],
        }))
        .unwrap();

        assert_eq!(claims.issuer(), "https://tenant.auth0.com/");
        assert_eq!(claims.audiences().collect::<Vec<_>>().len(), 2);
        assert_eq!(claims.subject(), Some("auth0|barista"));
        assert_eq!(claims.expires_at().map(|t| t.as_second()), Some(1_700_000_000));
        assert_eq!(claims.issued_at().map(|t| t.as_second()), Some(1_699_996_400));
        assert_eq!(claims.get("azp"), Some(&json!("client-id")));
        assert!(claims.permissions().unwrap().contains("post:drinks"));
    }

    #[test]
    fn distinguishes_missing_and_empty_permissions() {
        let base = json!({ "iss": "i", "aud": "coffee", "exp": 1 });
        let missing = AuthClaims::from_value(base.clone()).unwrap();
        assert!(missing.permissions().is_none());

        let mut with_empty = base;
        with_empty["permissions"] = json!([]);
        let empty = AuthClaims::from_value(with_empty).unwrap();
        assert_eq!(empty.permissions().map(BTreeSet::len), Some(0));
    }

    #[test]
    fn serializes_back_to_claim_mapping() {
        let value = json!({
            "iss": "https://tenant.auth0.com/",
            "aud": "coffee",
            "exp": 1_700_000_000,
            "scope": "openid",
        });
        let claims = AuthClaims::from_value(value.clone()).unwrap();
        assert_eq!(serde_json::to_value(&claims).unwrap(), value);
    }
}
