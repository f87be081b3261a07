//! Access token verification against the identity provider's key set.

use std::sync::Arc;

use jsonwebtoken::errors::{Error as JwtError, ErrorKind as JwtErrorKind};
use jsonwebtoken::{DecodingKey, Validation, decode, decode_header};

use super::claims::ClaimSet;
use super::{AuthClaims, AuthConfig, AuthError, AuthResult, KeySetProvider, RemoteKeySet};
use crate::Result;
use crate::utility::tracing_targets;

/// Verifies RS256 access tokens and decodes their claims.
///
/// Verification is a single attempt with no retries: the token's key id is
/// resolved against the key set, the signature is checked and then expiry,
/// audience and issuer are validated with zero leeway.
#[derive(Debug, Clone)]
pub struct TokenVerifier {
    config: Arc<AuthConfig>,
    key_set: Arc<dyn KeySetProvider>,
    validation: Validation,
}

impl TokenVerifier {
    /// Creates a verifier that resolves keys through `key_set`.
    pub fn new(config: AuthConfig, key_set: Arc<dyn KeySetProvider>) -> Self {
        let validation = Self::validation(&config);
        Self {
            config: Arc::new(config),
            key_set,
            validation,
        }
    }

    /// Creates a verifier backed by the identity provider's remote key set.
    pub fn from_config(config: AuthConfig) -> Result<Self> {
        config.validate()?;
        let key_set = RemoteKeySet::from_config(&config)?;
        Ok(Self::new(config, Arc::new(key_set)))
    }

    fn validation(config: &AuthConfig) -> Validation {
        let mut validation = Validation::new(
            config
                .algorithms
                .first()
                .copied()
                .unwrap_or(jsonwebtoken::Algorithm::RS256),
        );
        validation.algorithms = config.algorithms.clone();
        validation.leeway = 0;
        validation.validate_nbf = true;
        validation.set_audience(&[config.auth_audience.as_str()]);
        validation.set_issuer(&[config.issuer()]);
        validation.set_required_spec_claims(&["exp", "aud", "iss"]);
        validation
    }

    /// Returns the configuration the verifier was built with.
    #[inline]
    pub fn config(&self) -> &AuthConfig {
        &self.config
    }

    /// Returns the key set provider.
    #[inline]
    pub fn key_set(&self) -> &Arc<dyn KeySetProvider> {
        &self.key_set
    }

    /// Verifies `token` and returns its decoded claims.
    pub async fn verify(&self, token: &str) -> AuthResult<AuthClaims> {
        let header = decode_header(token).map_err(|error| {
            tracing::debug!(
                target: tracing_targets::AUTHENTICATION,
                error = %error,
                "token header could not be parsed"
            );
            AuthError::unparseable()
        })?;

        let Some(kid) = header.kid else {
            tracing::debug!(
                target: tracing_targets::AUTHENTICATION,
                "token header has no key id"
            );
            return Err(AuthError::malformed());
        };

        let Some(jwk) = self.key_set.find_key(&kid).await? else {
            tracing::warn!(
                target: tracing_targets::AUTHENTICATION,
                kid = %kid,
                "no key in the key set matches the token"
            );
            return Err(AuthError::key_not_found());
        };

        let decoding_key = DecodingKey::from_jwk(&jwk).map_err(|error| {
            tracing::warn!(
                target: tracing_targets::AUTHENTICATION,
                kid = %kid,
                error = %error,
                "key set entry is not a usable verification key"
            );
            AuthError::unparseable()
        })?;

        let token_data =
            decode::<ClaimSet>(token, &decoding_key, &self.validation).map_err(|error| {
                let auth_error = classify(&error);
                tracing::debug!(
                    target: tracing_targets::AUTHENTICATION,
                    kid = %kid,
                    error = %error,
                    code = auth_error.code(),
                    "token verification failed"
                );
                auth_error
            })?;

        tracing::trace!(
            target: tracing_targets::AUTHENTICATION,
            kid = %kid,
            "token verified"
        );

        Ok(AuthClaims::from_verified(token_data.claims))
    }
}

fn classify(error: &JwtError) -> AuthError {
    match error.kind() {
        JwtErrorKind::ExpiredSignature => AuthError::expired(),
        JwtErrorKind::InvalidAudience
        | JwtErrorKind::InvalidIssuer
        | JwtErrorKind::ImmatureSignature => AuthError::invalid_claims(),
        JwtErrorKind::MissingRequiredClaim(claim) if claim == "aud" || claim == "iss" => {
            AuthError::invalid_claims()
        }
        _ => AuthError::unparseable(),
    }
}
