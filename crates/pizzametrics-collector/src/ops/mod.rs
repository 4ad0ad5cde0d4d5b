//! Operational HTTP endpoints.
//!
//! - `/healthz`    : liveness
//! - `/v1/metrics` : current collector snapshot as JSON

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};

use crate::app_state::AppState;

pub async fn healthz() -> impl IntoResponse {
    (StatusCode::OK, "ok")
}

pub async fn metrics(State(state): State<AppState>) -> impl IntoResponse {
    Json(state.collector().snapshot())
}
