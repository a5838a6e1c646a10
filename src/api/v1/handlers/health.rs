/*
 * Responsibility
 * - GET /health (疎通用)
 * - 認証なしで通る (access middleware は bearer がなければ素通し)
 */
use axum::{Json, http::StatusCode, response::IntoResponse};
use serde_json::json;

#[utoipa::path(
    get,
    path = "/api/v1/health",
    responses((status = OK, description = "Service is up")),
    tag = "health"
)]
pub async fn health() -> impl IntoResponse {
    (StatusCode::OK, Json(json!({"status": "ok"})))
}
