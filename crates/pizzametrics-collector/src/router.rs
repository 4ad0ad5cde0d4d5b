//! Axum router wiring.
//!
//! Exposes the operational routes; the whole router sits behind request
//! tracking so these requests are counted like any other.

use axum::{routing::get, Router};

use crate::{app_state::AppState, ops, transport::middleware::with_request_tracking};

pub fn build_router(state: AppState) -> Router {
    let collector = state.collector();
    let router = Router::new()
        .route("/healthz", get(ops::healthz))
        .route("/v1/metrics", get(ops::metrics))
        .with_state(state);
    with_request_tracking(router, collector)
}
