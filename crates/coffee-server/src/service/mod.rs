//! Application state and dependency injection.

mod config;

use std::sync::Arc;

pub use crate::service::config::{ServiceConfig, ServiceConfigBuilder};
// Re-export error types from crate root for convenience
pub use crate::{Error, Result};
use crate::auth::AuthGate;
use crate::store::{DrinkRepository, MemoryDrinkStore};

/// Application state.
///
/// Used for the [`State`] extraction (dependency injection).
///
/// [`State`]: axum::extract::State
#[must_use = "state does nothing unless you use it"]
#[derive(Debug, Clone)]
pub struct ServiceState {
    pub drinks: Arc<dyn DrinkRepository>,
    pub auth_gate: AuthGate,
}

impl ServiceState {
    /// Creates state from an already assembled store and gate.
    pub fn new(drinks: impl DrinkRepository + 'static, auth_gate: AuthGate) -> Self {
        Self {
            drinks: Arc::new(drinks),
            auth_gate,
        }
    }

    /// Initializes application state from configuration.
    ///
    /// Builds the identity provider key set client and an in-memory menu.
    /// No network request is made until the first token is verified.
    pub fn from_config(config: &ServiceConfig) -> Result<Self> {
        config.validate()?;

        let drinks = if config.seed_drinks {
            MemoryDrinkStore::with_sample()
        } else {
            MemoryDrinkStore::new()
        };

        let auth_gate = AuthGate::from_config(config.auth.clone())?;
        Ok(Self::new(drinks, auth_gate))
    }
}

macro_rules! impl_di {
    ($($f:ident: $t:ty),+) => {$(
        impl axum::extract::FromRef<ServiceState> for $t {
            fn from_ref(state: &ServiceState) -> Self {
                state.$f.clone()
            }
        }
    )+};
}

impl_di!(drinks: Arc<dyn DrinkRepository>);
impl_di!(auth_gate: AuthGate);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::AuthConfig;

    #[tokio::test]
    async fn state_from_config_seeds_menu_on_request() -> anyhow::Result<()> {
        let mut config = ServiceConfig::new(AuthConfig::new("tenant.auth0.com", "coffee"));
        config.seed_drinks = true;

        let state = ServiceState::from_config(&config)?;
        assert_eq!(state.drinks.list_drinks().await?.len(), 1);
        assert_eq!(
            state.auth_gate.verifier().config().issuer(),
            "https://tenant.auth0.com/"
        );
        Ok(())
    }

    #[test]
    fn state_from_invalid_config_fails() {
        let config = ServiceConfig::new(AuthConfig::new("", "coffee"));
        assert!(ServiceState::from_config(&config).is_err());
    }
}
