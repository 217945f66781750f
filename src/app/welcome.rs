//! 服务信息、问候与健康检查

use axum::{extract::State, http::StatusCode, response::Json};
use serde_json::{json, Value};

use super::AppState;

/// API 信息
pub async fn api_info() -> Json<Value> {
    Json(json!({
        "name": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "GET /products": "list products",
            "POST /products": "create a product",
            "GET /products/:id": "show a product",
            "PUT /products/:id": "update a product",
            "DELETE /products/:id": "delete a product",
            "GET /greeting": "hello world",
            "GET /health": "health check"
        }
    }))
}

pub async fn greeting() -> &'static str {
    "Hello World!"
}

/// 健康检查，存储不可用时返回 503
pub async fn health_check(State(state): State<AppState>) -> (StatusCode, Json<Value>) {
    let store = state.product_service.store_kind();

    match state.product_service.ping().await {
        Ok(()) => (
            StatusCode::OK,
            Json(json!({
                "status": "healthy",
                "store": store,
                "timestamp": chrono::Utc::now().to_rfc3339()
            })),
        ),
        Err(err) => {
            tracing::warn!(error = ?err, "health check failed");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({
                    "status": "unhealthy",
                    "store": store,
                    "timestamp": chrono::Utc::now().to_rfc3339()
                })),
            )
        }
    }
}
