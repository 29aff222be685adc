use axum::{middleware, routing::get, Router};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use super::{handlers, middleware as mw, rpc};
use crate::state::AppState;

/// Build the application router.
///
/// Everything except the operational endpoints falls through to the RPC
/// handler, whatever the path or HTTP method.
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        // Health and metrics
        .route("/health", get(handlers::health))
        .route("/metrics", get(handlers::get_metrics))
        // Ticket RPC
        .fallback(rpc::dispatch)
        .layer(middleware::from_fn(mw::metrics_middleware))
        .layer(middleware::from_fn(mw::cors_middleware))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
