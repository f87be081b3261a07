//! Liveness probe.

use axum::Router;
use axum::routing::get;
use jiff::Timestamp;

use super::response::MonitorStatusResponse;
use crate::extract::Json;
use crate::service::ServiceState;

/// Reports that the server is accepting requests.
#[tracing::instrument(skip_all)]
async fn health_status() -> Json<MonitorStatusResponse> {
    Json(MonitorStatusResponse {
        updated_at: Timestamp::now(),
        is_healthy: true,
    })
}

/// Returns a [`Router`] with all health monitoring routes.
pub fn routes() -> Router<ServiceState> {
    Router::new().route("/health", get(health_status))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handler::test::create_test_server;

    #[tokio::test]
    async fn health_needs_no_token() -> anyhow::Result<()> {
        let server = create_test_server()?;

        let response = server.get("/health").await;
        response.assert_status_ok();

        let status = response.json::<MonitorStatusResponse>();
        assert!(status.is_healthy);

        let age = Timestamp::now().duration_since(status.updated_at);
        assert!(age.as_secs() < 60, "response timestamp should be recent");
        Ok(())
    }
}
