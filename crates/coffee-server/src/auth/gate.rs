//! Authorization gate composing extraction, verification and permission
//! checks into a single guard.

use std::future::Future;
use std::sync::Arc;

use axum::http::{HeaderMap, StatusCode};

use super::bearer::{bearer_token_from_headers, extract_bearer_token};
use super::{
    AuthClaims, AuthConfig, AuthError, AuthResult, Permission, TokenVerifier,
    VerificationErrorPolicy,
};
use crate::Result;
use crate::utility::tracing_targets;

/// Guards protected operations behind a bearer token and a permission.
///
/// The gate runs a linear pipeline: extract the bearer token, verify it,
/// then check the required permission. The first failing stage rejects the
/// request. Extraction and permission failures are returned as they are;
/// verification failures are reported according to the gate's
/// [`VerificationErrorPolicy`].
#[derive(Debug, Clone)]
pub struct AuthGate {
    verifier: Arc<TokenVerifier>,
    policy: VerificationErrorPolicy,
}

impl AuthGate {
    /// Creates a gate using the verifier's configured error policy.
    pub fn new(verifier: TokenVerifier) -> Self {
        let policy = verifier.config().verification_errors;
        Self {
            verifier: Arc::new(verifier),
            policy,
        }
    }

    /// Creates a gate backed by the identity provider's remote key set.
    pub fn from_config(config: AuthConfig) -> Result<Self> {
        TokenVerifier::from_config(config).map(Self::new)
    }

    /// Overrides the verification error policy.
    #[must_use]
    pub fn with_policy(mut self, policy: VerificationErrorPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Returns the verification error policy.
    #[inline]
    pub fn policy(&self) -> VerificationErrorPolicy {
        self.policy
    }

    /// Returns the token verifier.
    #[inline]
    pub fn verifier(&self) -> &TokenVerifier {
        &self.verifier
    }

    /// Authorizes a raw `Authorization` header value.
    pub async fn authorize(
        &self,
        header: Option<&str>,
        permission: &Permission,
    ) -> AuthResult<AuthClaims> {
        let token = extract_bearer_token(header)?;
        self.authorize_token(token, permission).await
    }

    /// Authorizes the `Authorization` header of a request.
    pub async fn authorize_headers(
        &self,
        headers: &HeaderMap,
        permission: &Permission,
    ) -> AuthResult<AuthClaims> {
        let token = bearer_token_from_headers(headers)?;
        self.authorize_token(token, permission).await
    }

    /// Runs `operation` with the verified claims if the header grants
    /// `permission`. The operation is not invoked otherwise.
    pub async fn guard<F, Fut, T>(
        &self,
        header: Option<&str>,
        permission: &Permission,
        operation: F,
    ) -> AuthResult<T>
    where
        F: FnOnce(AuthClaims) -> Fut,
        Fut: Future<Output = T>,
    {
        let claims = self.authorize(header, permission).await?;
        Ok(operation(claims).await)
    }

    /// Binds this gate to a permission, for use as middleware state.
    pub fn require(&self, permission: impl Into<Permission>) -> PermissionGuard {
        PermissionGuard {
            gate: self.clone(),
            permission: permission.into(),
        }
    }

    async fn authorize_token(&self, token: &str, permission: &Permission) -> AuthResult<AuthClaims> {
        let claims = self
            .verifier
            .verify(token)
            .await
            .map_err(|error| self.report_verification_error(error))?;

        permission.check(&claims)?;

        tracing::debug!(
            target: tracing_targets::AUTHORIZATION,
            subject = claims.subject(),
            permission = %permission,
            "request authorized"
        );

        Ok(claims)
    }

    fn report_verification_error(&self, error: AuthError) -> AuthError {
        tracing::warn!(
            target: tracing_targets::AUTHENTICATION,
            code = error.code(),
            status = error.status().as_u16(),
            description = error.description(),
            policy = ?self.policy,
            "token verification failed"
        );

        match self.policy {
            VerificationErrorPolicy::Preserve => error.with_status(StatusCode::UNAUTHORIZED),
            VerificationErrorPolicy::Collapse => AuthError::unverified(),
        }
    }
}

/// An [`AuthGate`] bound to the permission a route requires.
///
/// Used as the state of the `require_permission` middleware.
#[derive(Debug, Clone)]
pub struct PermissionGuard {
    gate: AuthGate,
    permission: Permission,
}

impl PermissionGuard {
    /// Returns the gate.
    #[inline]
    pub fn gate(&self) -> &AuthGate {
        &self.gate
    }

    /// Returns the required permission.
    #[inline]
    pub fn permission(&self) -> &Permission {
        &self.permission
    }

    /// Authorizes request headers against the bound permission.
    pub async fn authorize_headers(&self, headers: &HeaderMap) -> AuthResult<AuthClaims> {
        self.gate.authorize_headers(headers, &self.permission).await
    }
}
