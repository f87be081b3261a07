use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};

use crate::auth::PermissionGuard;

/// Requires a bearer token granting the guard's permission.
///
/// On success the verified [`AuthClaims`] are stored in the request
/// extensions for handlers to extract. On failure the request is answered
/// with the [`AuthError`] and the inner service is never called.
///
/// #### Examples
///
/// ```rust,no_run
/// use axum::middleware::from_fn_with_state;
/// use coffee_server::auth::{AuthConfig, AuthGate};
/// use coffee_server::middleware::require_permission;
///
/// # fn main() -> coffee_server::Result<()> {
/// let gate = AuthGate::from_config(AuthConfig::new("tenant.auth0.com", "coffee"))?;
/// let _layer = from_fn_with_state(gate.require("post:drinks"), require_permission);
/// # let _: axum::Router = axum::Router::new().route_layer(_layer);
/// # Ok(())
/// # }
/// ```
///
/// [`AuthClaims`]: crate::auth::AuthClaims
/// [`AuthError`]: crate::auth::AuthError
pub async fn require_permission(
    State(guard): State<PermissionGuard>,
    mut request: Request,
    next: Next,
) -> Response {
    match guard.authorize_headers(request.headers()).await {
        Ok(claims) => {
            request.extensions_mut().insert(claims);
            next.run(request).await
        }
        Err(error) => error.into_response(),
    }
}

#[cfg(test)]
mod tests {
    use axum::Router;
    use axum::http::StatusCode;
    use axum::middleware::from_fn_with_state;
    use axum::routing::get;
    use axum_test::TestServer;

    use super::*;
    use crate::auth::AuthClaims;
    use crate::auth::testing::{bearer, test_gate};

    async fn whoami(claims: AuthClaims) -> String {
        claims.subject().unwrap_or_default().to_owned()
    }

    fn router() -> Router {
        Router::new().route(
            "/whoami",
            get(whoami).route_layer(from_fn_with_state(
                test_gate().require("get:drinks-detail"),
                require_permission,
            )),
        )
    }

    #[tokio::test]
    async fn authorized_request_reaches_handler_with_claims() -> anyhow::Result<()> {
        let server = TestServer::new(router())?;

        let response = server
            .get("/whoami")
            .authorization(bearer(&["get:drinks-detail"]))
            .await;

        response.assert_status_ok();
        response.assert_text("auth0|barista");
        Ok(())
    }

    #[tokio::test]
    async fn rejected_request_never_reaches_handler() -> anyhow::Result<()> {
        let server = TestServer::new(router())?;

        let response = server.get("/whoami").await;
        response.assert_status(StatusCode::UNAUTHORIZED);
        let body: serde_json::Value = response.json();
        assert_eq!(body["code"], "authorization_header_missing");

        let response = server
            .get("/whoami")
            .authorization(bearer(&["post:drinks"]))
            .await;
        response.assert_status(StatusCode::FORBIDDEN);
        let body: serde_json::Value = response.json();
        assert_eq!(body["code"], "unauthorized");
        Ok(())
    }
}
