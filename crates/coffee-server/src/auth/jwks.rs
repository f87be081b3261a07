//! Identity provider key set retrieval and caching.
//!
//! The verifier looks up signing keys by their key id through the
//! [`KeySetProvider`] trait. [`RemoteKeySet`] fetches the provider's
//! well-known JWKS document and caches it; [`StaticKeySet`] serves a fixed
//! set held in memory.

use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use jsonwebtoken::jwk::{Jwk, JwkSet};
use reqwest::Client;
use tokio::sync::RwLock;
use url::Url;

use super::{AuthConfig, AuthError, AuthResult};
use crate::utility::tracing_targets;
use crate::{Error, Result};

/// Source of the public keys that sign access tokens.
#[async_trait]
pub trait KeySetProvider: Send + Sync + fmt::Debug {
    /// Returns the current key set.
    async fn key_set(&self) -> AuthResult<Arc<JwkSet>>;

    /// Returns the key with the given key id, if any.
    async fn find_key(&self, kid: &str) -> AuthResult<Option<Jwk>> {
        let key_set = self.key_set().await?;
        Ok(key_set.find(kid).cloned())
    }
}

/// A fixed key set held in memory.
#[derive(Debug, Clone)]
pub struct StaticKeySet {
    keys: Arc<JwkSet>,
}

impl StaticKeySet {
    /// Creates a provider that always returns `keys`.
    pub fn new(keys: JwkSet) -> Self {
        Self {
            keys: Arc::new(keys),
        }
    }

    /// Parses a JWKS document.
    pub fn from_json(document: &str) -> Result<Self> {
        let keys: JwkSet = serde_json::from_str(document)
            .map_err(|e| Error::config("Invalid JWKS document").with_source(e))?;
        Ok(Self::new(keys))
    }
}

#[async_trait]
impl KeySetProvider for StaticKeySet {
    async fn key_set(&self) -> AuthResult<Arc<JwkSet>> {
        Ok(self.keys.clone())
    }
}

#[derive(Debug)]
struct CachedKeySet {
    keys: Arc<JwkSet>,
    fetched_at: Instant,
}

impl CachedKeySet {
    fn new(keys: Arc<JwkSet>) -> Self {
        Self {
            keys,
            fetched_at: Instant::now(),
        }
    }

    #[inline]
    fn age(&self) -> Duration {
        self.fetched_at.elapsed()
    }
}

/// Cache slot guarded by the provider's lock.
#[derive(Debug, Default)]
struct KeySetCache {
    entry: Option<CachedKeySet>,
    failed_at: Option<Instant>,
}

impl KeySetCache {
    fn failed_within(&self, window: Duration) -> bool {
        self.failed_at
            .is_some_and(|failed_at| failed_at.elapsed() < window)
    }

    fn stale_keys(&self) -> Option<Arc<JwkSet>> {
        self.entry.as_ref().map(|cached| cached.keys.clone())
    }
}

/// Key set fetched over HTTPS from the identity provider.
///
/// Fetched sets are cached for the configured TTL. A key id that is missing
/// from a cached set older than the minimum refresh interval forces a single
/// refresh, which picks up rotated keys without hammering the endpoint with
/// unknown key ids. A TTL of zero disables caching.
///
/// A failed refresh is remembered for the minimum refresh interval. Within
/// that window callers get the last fetched set, or fail immediately when
/// there is none, instead of queueing behind another fetch.
#[derive(Debug, Clone)]
pub struct RemoteKeySet {
    client: Client,
    uri: Url,
    cache_ttl: Duration,
    min_refresh: Duration,
    cache: Arc<RwLock<KeySetCache>>,
}

impl RemoteKeySet {
    /// Creates a fetcher for the configured domain's well-known endpoint.
    pub fn from_config(config: &AuthConfig) -> Result<Self> {
        let uri = Url::parse(&config.jwks_uri())
            .map_err(|e| Error::config("Invalid JWKS endpoint").with_source(e))?;

        let client = Client::builder()
            .timeout(config.jwks_timeout())
            .build()
            .map_err(|e| Error::external("jwks", "Failed to build HTTP client").with_source(e))?;

        Ok(Self {
            client,
            uri,
            cache_ttl: config.jwks_cache_ttl(),
            min_refresh: config.jwks_min_refresh(),
            cache: Arc::new(RwLock::new(KeySetCache::default())),
        })
    }

    /// Overrides the endpoint, e.g. to point at a local mock provider.
    pub fn with_uri(mut self, uri: Url) -> Self {
        self.uri = uri;
        self
    }

    /// Overrides the cache lifetime.
    pub fn with_cache_ttl(mut self, cache_ttl: Duration) -> Self {
        self.cache_ttl = cache_ttl;
        self
    }

    /// Overrides the minimum cache age for a forced refresh.
    pub fn with_min_refresh(mut self, min_refresh: Duration) -> Self {
        self.min_refresh = min_refresh;
        self
    }

    /// Returns the endpoint the key set is fetched from.
    #[inline]
    pub fn uri(&self) -> &Url {
        &self.uri
    }

    /// Drops the cached key set and any remembered refresh failure.
    pub async fn invalidate(&self) {
        *self.cache.write().await = KeySetCache::default();
    }

    #[inline]
    fn caching(&self) -> bool {
        !self.cache_ttl.is_zero()
    }

    async fn fetch(&self) -> AuthResult<Arc<JwkSet>> {
        tracing::debug!(
            target: tracing_targets::JWKS,
            uri = %self.uri,
            "fetching key set"
        );

        let response = self
            .client
            .get(self.uri.clone())
            .send()
            .await
            .map_err(|error| {
                tracing::warn!(
                    target: tracing_targets::JWKS,
                    uri = %self.uri,
                    timeout = error.is_timeout(),
                    error = %error,
                    "key set request failed"
                );
                AuthError::key_not_found()
            })?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(
                target: tracing_targets::JWKS,
                uri = %self.uri,
                status = status.as_u16(),
                "key set endpoint returned an error status"
            );
            return Err(AuthError::key_not_found());
        }

        let keys: JwkSet = response.json().await.map_err(|error| {
            tracing::warn!(
                target: tracing_targets::JWKS,
                uri = %self.uri,
                error = %error,
                "key set response could not be parsed"
            );
            AuthError::key_not_found()
        })?;

        tracing::debug!(
            target: tracing_targets::JWKS,
            keys = keys.keys.len(),
            "key set fetched"
        );

        Ok(Arc::new(keys))
    }

    /// Fetches and stores a new key set unless `is_current` holds for the
    /// entry found under the write lock.
    async fn refresh_unless<F>(&self, is_current: F) -> AuthResult<Arc<JwkSet>>
    where
        F: FnOnce(&CachedKeySet) -> bool,
    {
        let mut cache = self.cache.write().await;
        if let Some(cached) = cache.entry.as_ref()
            && is_current(cached)
        {
            return Ok(cached.keys.clone());
        }

        if cache.failed_within(self.min_refresh) {
            tracing::debug!(
                target: tracing_targets::JWKS,
                uri = %self.uri,
                "key set refresh failed recently, not retrying yet"
            );
            return cache.stale_keys().ok_or_else(AuthError::key_not_found);
        }

        match self.fetch().await {
            Ok(keys) => {
                cache.entry = Some(CachedKeySet::new(keys.clone()));
                cache.failed_at = None;
                Ok(keys)
            }
            Err(error) => {
                cache.failed_at = Some(Instant::now());
                match cache.stale_keys() {
                    Some(keys) => {
                        tracing::warn!(
                            target: tracing_targets::JWKS,
                            uri = %self.uri,
                            "key set refresh failed, serving the previous set"
                        );
                        Ok(keys)
                    }
                    None => Err(error),
                }
            }
        }
    }
}

#[async_trait]
impl KeySetProvider for RemoteKeySet {
    async fn key_set(&self) -> AuthResult<Arc<JwkSet>> {
        if !self.caching() {
            return self.fetch().await;
        }

        if let Some(cached) = self.cache.read().await.entry.as_ref()
            && cached.age() < self.cache_ttl
        {
            return Ok(cached.keys.clone());
        }

        self.refresh_unless(|cached| cached.age() < self.cache_ttl)
            .await
    }

    async fn find_key(&self, kid: &str) -> AuthResult<Option<Jwk>> {
        let keys = self.key_set().await?;
        if let Some(key) = keys.find(kid) {
            return Ok(Some(key.clone()));
        }

        if !self.caching() {
            return Ok(None);
        }

        // Another task may already have replaced the set we searched.
        let refreshed = self
            .refresh_unless(|cached| {
                !Arc::ptr_eq(&cached.keys, &keys) || cached.age() < self.min_refresh
            })
            .await?;

        if Arc::ptr_eq(&refreshed, &keys) {
            tracing::debug!(
                target: tracing_targets::JWKS,
                kid,
                "unknown key id, key set refreshed too recently"
            );
            return Ok(None);
        }

        Ok(refreshed.find(kid).cloned())
    }
}
