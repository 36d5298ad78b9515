//! DTOs for the health check endpoint.

use serde::Serialize;

/// Overall service health.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub checks: HealthChecks,
}

/// Per-component health checks.
#[derive(Debug, Serialize)]
pub struct HealthChecks {
    pub database: CheckStatus,
    pub click_queue: CheckStatus,
    pub cache: CheckStatus,
}

/// Status of a single component.
#[derive(Debug, Serialize)]
pub struct CheckStatus {
    pub status: String,
    pub message: Option<String>,
}
