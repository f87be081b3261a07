//! All `axum::`[`Router`]s with related `axum::`[`Handler`]s.
//!
//! # Usage Example
//!
//! ```rust,no_run
//! use coffee_server::auth::AuthConfig;
//! use coffee_server::handler::routes;
//! use coffee_server::service::{ServiceConfig, ServiceState};
//!
//! # fn main() -> coffee_server::Result<()> {
//! let config = ServiceConfig::new(AuthConfig::new("tenant.auth0.com", "coffee"));
//! let state = ServiceState::from_config(&config)?;
//! let app: axum::Router = routes(state.clone()).with_state(state);
//! # Ok(())
//! # }
//! ```
//!
//! [`Router`]: axum::routing::Router
//! [`Handler`]: axum::handler::Handler

mod drinks;
mod error;
mod monitors;
mod request;
mod response;

use axum::Router;
use axum::response::{IntoResponse, Response};

pub use crate::handler::drinks::{DELETE_DRINKS, GET_DRINKS_DETAIL, PATCH_DRINKS, POST_DRINKS};
pub use crate::handler::error::{Error, ErrorKind, Result};
pub use crate::handler::request::{CreateDrink, DrinkPathParams, IngredientRequest, UpdateDrink};
pub use crate::handler::response::{
    DeletedDrinkResponse, DrinksResponse, ErrorResponse, MonitorStatusResponse,
};
use crate::service::ServiceState;

#[inline]
async fn not_found() -> Response {
    ErrorKind::NotFound.into_response()
}

#[inline]
async fn method_not_allowed() -> Response {
    ErrorKind::MethodNotAllowed.into_response()
}

/// Returns a [`Router`] with all routes.
pub fn routes(state: ServiceState) -> Router<ServiceState> {
    Router::new()
        .merge(drinks::routes(&state))
        .merge(monitors::routes())
        .method_not_allowed_fallback(method_not_allowed)
        .fallback(not_found)
}
