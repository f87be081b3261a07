//! Drink menu handlers.
//!
//! `GET /drinks` is public; every other route sits behind the
//! [`require_permission`] middleware with the permission listed below.

use std::sync::Arc;

use axum::Router;
use axum::extract::State;
use axum::middleware::from_fn_with_state;
use axum::routing::{MethodRouter, delete, get, patch, post};

use super::request::{CreateDrink, DrinkPathParams, UpdateDrink};
use super::response::{DeletedDrinkResponse, DrinksResponse};
use crate::auth::{AuthClaims, Permission};
use crate::extract::{Json, Path, ValidateJson};
use crate::handler::Result;
use crate::middleware::require_permission;
use crate::service::ServiceState;
use crate::store::{Drink, DrinkRepository, ShortDrink};
use crate::utility::tracing_targets::HANDLER_DRINKS as TRACING_TARGET;

/// Required to see ingredient names.
pub const GET_DRINKS_DETAIL: Permission = Permission::required("get:drinks-detail");
/// Required to add a drink.
pub const POST_DRINKS: Permission = Permission::required("post:drinks");
/// Required to change a drink.
pub const PATCH_DRINKS: Permission = Permission::required("patch:drinks");
/// Required to remove a drink.
pub const DELETE_DRINKS: Permission = Permission::required("delete:drinks");

type Drinks = Arc<dyn DrinkRepository>;

/// Lists the menu without ingredient names.
#[tracing::instrument(skip_all)]
async fn list_drinks(State(drinks): State<Drinks>) -> Result<Json<DrinksResponse<ShortDrink>>> {
    let menu = drinks.list_drinks().await?;

    tracing::debug!(
        target: TRACING_TARGET,
        count = menu.len(),
        "listed public menu",
    );

    Ok(Json(DrinksResponse::short(&menu)))
}

/// Lists the menu with full recipes.
#[tracing::instrument(skip_all)]
async fn list_drinks_detail(
    State(drinks): State<Drinks>,
    claims: AuthClaims,
) -> Result<Json<DrinksResponse<Drink>>> {
    let menu = drinks.list_drinks().await?;

    tracing::debug!(
        target: TRACING_TARGET,
        subject = claims.subject(),
        count = menu.len(),
        "listed detailed menu",
    );

    Ok(Json(DrinksResponse::long(&menu)))
}

/// Adds a drink to the menu.
#[tracing::instrument(skip_all)]
async fn create_drink(
    State(drinks): State<Drinks>,
    claims: AuthClaims,
    ValidateJson(request): ValidateJson<CreateDrink>,
) -> Result<Json<DrinksResponse<Drink>>> {
    tracing::info!(
        target: TRACING_TARGET,
        subject = claims.subject(),
        title = %request.title,
        "creating drink",
    );

    let drink = drinks.create_drink(request.into_model()).await?;

    tracing::info!(
        target: TRACING_TARGET,
        drink_id = drink.id,
        "drink created",
    );

    Ok(Json(DrinksResponse::long([&drink])))
}

/// Updates the title and/or recipe of a drink.
#[tracing::instrument(skip_all)]
async fn update_drink(
    State(drinks): State<Drinks>,
    claims: AuthClaims,
    Path(DrinkPathParams { id }): Path<DrinkPathParams>,
    ValidateJson(request): ValidateJson<UpdateDrink>,
) -> Result<Json<DrinksResponse<Drink>>> {
    tracing::info!(
        target: TRACING_TARGET,
        subject = claims.subject(),
        drink_id = id,
        "updating drink",
    );

    let drink = drinks.update_drink(id, request.into_model()).await?;
    Ok(Json(DrinksResponse::long([&drink])))
}

/// Removes a drink from the menu.
#[tracing::instrument(skip_all)]
async fn delete_drink(
    State(drinks): State<Drinks>,
    claims: AuthClaims,
    Path(DrinkPathParams { id }): Path<DrinkPathParams>,
) -> Result<Json<DeletedDrinkResponse>> {
    let drink = drinks.delete_drink(id).await?;

    tracing::info!(
        target: TRACING_TARGET,
        subject = claims.subject(),
        drink_id = drink.id,
        title = %drink.title,
        "drink deleted",
    );

    Ok(Json(DeletedDrinkResponse::new(drink.id)))
}

/// Wraps `method_router` in the authorization middleware for `permission`.
fn protected(
    state: &ServiceState,
    permission: Permission,
    method_router: MethodRouter<ServiceState>,
) -> MethodRouter<ServiceState> {
    let guard = state.auth_gate.require(permission);
    method_router.route_layer(from_fn_with_state(guard, require_permission))
}

/// Returns a [`Router`] with all drink routes.
pub fn routes(state: &ServiceState) -> Router<ServiceState> {
    Router::new()
        .route(
            "/drinks",
            get(list_drinks).merge(protected(state, POST_DRINKS, post(create_drink))),
        )
        .route(
            "/drinks-detail",
            protected(state, GET_DRINKS_DETAIL, get(list_drinks_detail)),
        )
        .route(
            "/drinks/{id}",
            protected(state, PATCH_DRINKS, patch(update_drink))
                .merge(protected(state, DELETE_DRINKS, delete(delete_drink))),
        )
}
