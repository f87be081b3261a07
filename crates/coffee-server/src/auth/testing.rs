//! Token minting and key fixtures for tests.

use std::sync::Arc;

use jiff::{Span, Timestamp};
use jsonwebtoken::{Algorithm, EncodingKey, Header, encode};
use serde_json::{Value, json};

use super::{AuthConfig, AuthGate, StaticKeySet, TokenVerifier};

pub const DOMAIN: &str = "tenant.auth0.com";
pub const AUDIENCE: &str = "coffee";

pub const SIGNING_KID: &str = "signing-key";
pub const ROGUE_KID: &str = "rogue-key";

const SIGNING_KEY_PEM: &str = include_str!("../../fixtures/signing_key.pem");
const ROGUE_KEY_PEM: &str = include_str!("../../fixtures/rogue_key.pem");

const SIGNING_KEY_N: &str = "qCIl9vnRa5sqaIwM4wxfrijwzpR9f2OVeiXFTYrAgo2o05YrMcCm5QfT2rhVnoM_D-RvAryw9vTki5phNe_2nGcH4a_bhc_2ecEyi-zlTjiPkL6gC__WUNm9O4wC7TKirkr7EUBBN2rE-szoT2xhaYl0XDilc8pRvSZZhLgOQendAl2cEfLEgEkRiN034kLwzXFPHS5KfZuWgR2nv5DyuYrJNTl-jJ-D2tXtwiORbnKCiREtqMRhTXMo9696mUm8ZLSShCvED6QtMDk_pTrutcjz_Z6nqZ1DSN_Ph7irLqhTAXJ3m_w83hBb3nsw36-8NAfEIydCNqOO5RQpbSmb8Q";
const ROGUE_KEY_N: &str = "wo5w3FNsgem3dqe2Z6DqnWY3osVplcoBr8EJ-D59p1XWZPeoKbuH5NnpzTPdI_RFwdxKTeKgp1J2jZ4xzbzm04g9cnH9Z02v2WJDzjySFRrCeW-vLlUDv7OngUbDM-U_0-ypFBRw3iZlb4qt11mBWifM50mRmo5w6JXAx_XoZze4_q5B85l_yhoCJUIAuUisnQxvehuiTp3rB1RoKZhaUxbNKX1F_RGv2-kXwxpIuh1aSpOECwoUpHfdI_E4hk-DxnH2eIgzvJK8oZBdhEHsC3_CRvrjJjHq682gSSkkcNPtY1sqallNdVkloXyAWseYL9MJM5AYXy0LMLOQ4K_KdQ";
const KEY_E: &str = "AQAB";

fn rsa_jwk(kid: &str, n: &str) -> Value {
    json!({
        "kty": "RSA",
        "kid": kid,
        "use": "sig",
        "alg": "RS256",
        "n": n,
        "e": KEY_E,
    })
}

/// Public half of the signing key.
pub fn signing_jwk() -> Value {
    rsa_jwk(SIGNING_KID, SIGNING_KEY_N)
}

/// Public half of the rogue key, a key the default key set does not trust.
pub fn rogue_jwk() -> Value {
    rsa_jwk(ROGUE_KID, ROGUE_KEY_N)
}

/// Wraps keys in a JWKS document.
pub fn jwks_json(keys: impl IntoIterator<Item = Value>) -> Value {
    json!({ "keys": keys.into_iter().collect::<Vec<_>>() })
}

pub fn test_config() -> AuthConfig {
    AuthConfig::new(DOMAIN, AUDIENCE)
}

/// Key set that trusts only the signing key.
pub fn test_key_set() -> StaticKeySet {
    let document = jwks_json([signing_jwk()]).to_string();
    StaticKeySet::from_json(&document).expect("fixture JWKS must parse")
}

pub fn test_verifier() -> TokenVerifier {
    TokenVerifier::new(test_config(), Arc::new(test_key_set()))
}

pub fn test_gate() -> AuthGate {
    AuthGate::new(test_verifier())
}

/// Claims accepted by [`test_verifier`], valid for one hour.
pub fn valid_claims(permissions: &[&str]) -> Value {
    let now = Timestamp::now();
    let exp = now + Span::new().hours(1);
    json!({
        "iss": format!("https://{DOMAIN}/"),
        "aud": AUDIENCE,
        "sub": "auth0|barista",
        "iat": now.as_second(),
        "exp": exp.as_second(),
        "permissions": permissions,
    })
}

/// Signs `claims` with the signing key under `kid`.
pub fn sign(claims: &Value, kid: Option<&str>) -> String {
    sign_with(SIGNING_KEY_PEM, claims, kid)
}

/// Signs `claims` with the rogue key.
pub fn sign_rogue(claims: &Value, kid: Option<&str>) -> String {
    sign_with(ROGUE_KEY_PEM, claims, kid)
}

fn sign_with(pem: &str, claims: &Value, kid: Option<&str>) -> String {
    let mut header = Header::new(Algorithm::RS256);
    header.kid = kid.map(str::to_owned);
    let key = EncodingKey::from_rsa_pem(pem.as_bytes()).expect("fixture key must parse");
    encode(&header, claims, &key).expect("fixture token must encode")
}

/// A valid token carrying `permissions`.
pub fn token(permissions: &[&str]) -> String {
    sign(&valid_claims(permissions), Some(SIGNING_KID))
}

/// `Authorization` header value for a valid token carrying `permissions`.
pub fn bearer(permissions: &[&str]) -> String {
    format!("Bearer {}", token(permissions))
}
