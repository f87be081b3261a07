#[cfg(feature = "config")]
use clap::Args;
use derive_builder::Builder;
use serde::{Deserialize, Serialize};

use crate::Result;
use crate::auth::AuthConfig;

/// App [`state`] configuration.
///
/// [`state`]: crate::service::ServiceState
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Builder)]
#[cfg_attr(feature = "config", derive(Args))]
#[must_use = "config does nothing unless you use it"]
#[builder(
    pattern = "owned",
    setter(into, prefix = "with"),
    build_fn(validate = "Self::validate")
)]
pub struct ServiceConfig {
    /// Identity provider settings.
    #[cfg_attr(feature = "config", command(flatten))]
    pub auth: AuthConfig,

    /// Starts the in-memory menu with a sample drink.
    #[cfg_attr(feature = "config", arg(long, env = "SEED_DRINKS"))]
    #[builder(default)]
    #[serde(default)]
    pub seed_drinks: bool,
}

impl ServiceConfig {
    /// Creates a new configuration builder.
    pub fn builder() -> ServiceConfigBuilder {
        ServiceConfigBuilder::default()
    }

    /// Creates a configuration with an empty menu.
    pub fn new(auth: AuthConfig) -> Self {
        Self {
            auth,
            seed_drinks: false,
        }
    }

    /// Validates a configuration that was not produced by the builder.
    pub fn validate(&self) -> Result<()> {
        self.auth.validate()
    }
}

impl ServiceConfigBuilder {
    fn validate(builder: &ServiceConfigBuilder) -> Result<(), String> {
        match &builder.auth {
            Some(auth) => auth.validate().map_err(|error| error.to_string()),
            None => Ok(()),
        }
    }
}
