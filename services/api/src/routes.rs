//! API service routes

use axum::{Json, Router, extract::rejection::JsonRejection, middleware, response::IntoResponse, routing::get};
use serde_json::json;
use tower_http::trace::TraceLayer;
use tracing::warn;

use crate::{
    error::{ApiError, ApiResult},
    state::AppState,
};

pub mod admin;
pub mod catalog;

/// Create the router for the API service
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .merge(auth::routes::create_router())
        .merge(catalog::router())
        .merge(admin::router())
        .layer(middleware::from_fn_with_state(
            state.gate.clone(),
            auth::route_gate,
        ))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "service": "hotel-api"
    }))
}

/// Unwrap a JSON body, reporting a readable 400 when it does not parse
pub(crate) fn json_body<T>(payload: Result<Json<T>, JsonRejection>) -> ApiResult<T> {
    payload.map(|Json(body)| body).map_err(|e| {
        warn!("Rejected request body: {}", e);
        ApiError::BadRequest(e.body_text())
    })
}
