//! Request-tracking middleware.
//!
//! Counts every inbound request by method before route dispatch, including
//! requests that end up unmatched (404) or rejected further down the stack.

use std::sync::Arc;

use axum::{extract::Request, extract::State, middleware::Next, response::Response, Router};

use crate::obs::Collector;

pub async fn track_requests(
    State(collector): State<Arc<Collector>>,
    req: Request,
    next: Next,
) -> Response {
    collector.record_request(req.method().as_str());
    next.run(req).await
}

/// Wrap a host application's router so every request is counted.
pub fn with_request_tracking<S>(router: Router<S>, collector: Arc<Collector>) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    router.layer(axum::middleware::from_fn_with_state(collector, track_requests))
}
