//! Monitor response types.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

/// Liveness status of the server.
#[must_use]
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonitorStatusResponse {
    /// Timestamp when this status was generated.
    pub updated_at: Timestamp,
    /// Overall system health status.
    pub is_healthy: bool,
}
