use axum::Json;
use serde::Serialize;

/// Service identifier reported by the health endpoint.
const SERVICE_NAME: &str = "notes-api";

#[derive(Serialize, utoipa::ToSchema)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct RootResponse {
    pub message: &'static str,
}

#[utoipa::path(
    get,
    path = "/health",
    tag = "Health",
    operation_id = "healthCheck",
    summary = "Service health check",
    responses((status = 200, description = "Service is healthy", body = HealthResponse)),
)]
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        service: SERVICE_NAME,
    })
}

#[utoipa::path(
    get,
    path = "/",
    tag = "Health",
    operation_id = "root",
    summary = "Liveness banner",
    responses((status = 200, description = "Server is running", body = RootResponse)),
)]
pub async fn root() -> Json<RootResponse> {
    Json(RootResponse {
        message: "Server is running",
    })
}
