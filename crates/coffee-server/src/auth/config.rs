use std::time::Duration;

#[cfg(feature = "config")]
use clap::{Args, ValueEnum};
use derive_builder::Builder;
use jsonwebtoken::Algorithm;
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Default values for configuration options.
mod defaults {
    use jsonwebtoken::Algorithm;

    /// Default timeout of a single key set fetch in seconds.
    pub const JWKS_TIMEOUT_SECS: u64 = 5;

    /// Default lifetime of a cached key set in seconds.
    pub const JWKS_CACHE_TTL_SECS: u64 = 600;

    /// Default minimum age of a cached key set before a key id miss may
    /// force a refresh.
    pub const JWKS_MIN_REFRESH_SECS: u64 = 30;

    /// Signature algorithm allow-list.
    pub fn algorithms() -> Vec<Algorithm> {
        vec![Algorithm::RS256]
    }
}

/// How the authorization gate reports token verification failures.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "config", derive(ValueEnum))]
#[serde(rename_all = "snake_case")]
pub enum VerificationErrorPolicy {
    /// Keep the verifier's kind and description, reporting them as 401.
    #[default]
    Preserve,
    /// Replace every verification failure with a generic `invalid_token`.
    Collapse,
}

/// Identity provider settings for token verification.
///
/// Injected into [`RemoteKeySet`] and [`TokenVerifier`] at construction.
///
/// [`RemoteKeySet`]: crate::auth::RemoteKeySet
/// [`TokenVerifier`]: crate::auth::TokenVerifier
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Builder)]
#[cfg_attr(feature = "config", derive(Args))]
#[must_use = "config does nothing unless you use it"]
#[builder(
    pattern = "owned",
    setter(into, prefix = "with"),
    build_fn(validate = "Self::validate")
)]
pub struct AuthConfig {
    /// Identity provider tenant domain, without scheme (e.g. `tenant.auth0.com`).
    #[cfg_attr(feature = "config", arg(long = "auth-domain", env = "AUTH0_DOMAIN"))]
    pub auth_domain: String,

    /// Expected `aud` claim of every accepted token.
    #[cfg_attr(
        feature = "config",
        arg(long = "auth-audience", env = "API_AUDIENCE")
    )]
    pub auth_audience: String,

    /// Accepted signature algorithms.
    #[cfg_attr(feature = "config", arg(skip = defaults::algorithms()))]
    #[builder(default = "defaults::algorithms()")]
    #[serde(default = "defaults::algorithms")]
    pub algorithms: Vec<Algorithm>,

    /// Timeout of a single key set fetch in seconds.
    #[cfg_attr(
        feature = "config",
        arg(
            long = "jwks-timeout",
            env = "JWKS_TIMEOUT",
            default_value_t = defaults::JWKS_TIMEOUT_SECS
        )
    )]
    #[builder(default = "defaults::JWKS_TIMEOUT_SECS")]
    #[serde(default = "default_jwks_timeout_secs")]
    pub jwks_timeout_secs: u64,

    /// Lifetime of a cached key set in seconds; `0` disables caching.
    #[cfg_attr(
        feature = "config",
        arg(
            long = "jwks-cache-ttl",
            env = "JWKS_CACHE_TTL",
            default_value_t = defaults::JWKS_CACHE_TTL_SECS
        )
    )]
    #[builder(default = "defaults::JWKS_CACHE_TTL_SECS")]
    #[serde(default = "default_jwks_cache_ttl_secs")]
    pub jwks_cache_ttl_secs: u64,

    /// Minimum age of a cached key set before a key id miss forces a refresh.
    /// Also the wait before retrying a failed fetch.
    #[cfg_attr(
        feature = "config",
        arg(
            long = "jwks-min-refresh",
            env = "JWKS_MIN_REFRESH",
            default_value_t = defaults::JWKS_MIN_REFRESH_SECS
        )
    )]
    #[builder(default = "defaults::JWKS_MIN_REFRESH_SECS")]
    #[serde(default = "default_jwks_min_refresh_secs")]
    pub jwks_min_refresh_secs: u64,

    /// Reporting policy for token verification failures.
    #[cfg_attr(
        feature = "config",
        arg(
            long = "verification-errors",
            env = "VERIFICATION_ERRORS",
            value_enum,
            default_value_t = VerificationErrorPolicy::Preserve
        )
    )]
    #[builder(default)]
    #[serde(default)]
    pub verification_errors: VerificationErrorPolicy,
}

fn default_jwks_timeout_secs() -> u64 {
    defaults::JWKS_TIMEOUT_SECS
}

fn default_jwks_cache_ttl_secs() -> u64 {
    defaults::JWKS_CACHE_TTL_SECS
}

fn default_jwks_min_refresh_secs() -> u64 {
    defaults::JWKS_MIN_REFRESH_SECS
}

impl AuthConfig {
    /// Creates a new configuration builder.
    pub fn builder() -> AuthConfigBuilder {
        AuthConfigBuilder::default()
    }

    /// Creates a configuration with default key set settings.
    pub fn new(domain: impl Into<String>, audience: impl Into<String>) -> Self {
        Self {
            auth_domain: domain.into(),
            auth_audience: audience.into(),
            algorithms: defaults::algorithms(),
            jwks_timeout_secs: defaults::JWKS_TIMEOUT_SECS,
            jwks_cache_ttl_secs: defaults::JWKS_CACHE_TTL_SECS,
            jwks_min_refresh_secs: defaults::JWKS_MIN_REFRESH_SECS,
            verification_errors: VerificationErrorPolicy::default(),
        }
    }

    /// Sets the verification error policy.
    pub fn with_verification_errors(mut self, policy: VerificationErrorPolicy) -> Self {
        self.verification_errors = policy;
        self
    }

    /// Expected `iss` claim: `https://<domain>/`.
    #[must_use]
    pub fn issuer(&self) -> String {
        format!("https://{}/", self.auth_domain)
    }

    /// Well-known key set endpoint of the identity provider.
    #[must_use]
    pub fn jwks_uri(&self) -> String {
        format!("https://{}/.well-known/jwks.json", self.auth_domain)
    }

    /// Returns the key set fetch timeout.
    #[inline]
    #[must_use]
    pub fn jwks_timeout(&self) -> Duration {
        Duration::from_secs(self.jwks_timeout_secs)
    }

    /// Returns the key set cache lifetime.
    #[inline]
    #[must_use]
    pub fn jwks_cache_ttl(&self) -> Duration {
        Duration::from_secs(self.jwks_cache_ttl_secs)
    }

    /// Returns the minimum cache age for a forced refresh.
    #[inline]
    #[must_use]
    pub fn jwks_min_refresh(&self) -> Duration {
        Duration::from_secs(self.jwks_min_refresh_secs)
    }

    /// Validates a configuration that was not produced by the builder,
    /// e.g. one parsed from the command line.
    pub fn validate(&self) -> Result<()> {
        validate_fields(
            Some(self.auth_domain.as_str()),
            Some(self.auth_audience.as_str()),
            Some(self.jwks_timeout_secs),
        )
        .map_err(Error::config)?;

        if self.algorithms.is_empty() {
            return Err(Error::config("At least one signature algorithm is required"));
        }

        Ok(())
    }
}

impl AuthConfigBuilder {
    fn validate(builder: &AuthConfigBuilder) -> Result<(), String> {
        validate_fields(
            builder.auth_domain.as_deref(),
            builder.auth_audience.as_deref(),
            builder.jwks_timeout_secs,
        )
    }
}

fn validate_fields(
    domain: Option<&str>,
    audience: Option<&str>,
    timeout_secs: Option<u64>,
) -> Result<(), String> {
    if let Some(domain) = domain {
        if domain.is_empty() {
            return Err("Auth domain cannot be empty".to_string());
        }

        if domain.contains("://") || domain.contains('/') {
            return Err("Auth domain must be a bare host name without scheme or path".to_string());
        }
    }

    if let Some(audience) = audience
        && audience.is_empty()
    {
        return Err("Auth audience cannot be empty".to_string());
    }

    if let Some(timeout_secs) = timeout_secs {
        if timeout_secs < 1 {
            return Err("JWKS timeout must be at least 1 second".to_string());
        }
        if timeout_secs > 60 {
            return Err("JWKS timeout cannot exceed 60 seconds".to_string());
        }
    }

    Ok(())
}
