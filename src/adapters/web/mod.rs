//! Web server adapter.
//!
//! Serves the UDF wire contract under `/tv` for the charting frontend. All
//! policy lives in the domain layer; handlers only normalize parameters,
//! call the upstream port once and shape the response.

mod handlers;

pub use handlers::*;

use axum::{Router, routing::get};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::ports::upstream_port::UpstreamPort;

pub struct AppState {
    pub upstream: Arc<dyn UpstreamPort + Send + Sync>,
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/tv/config", get(handlers::config))
        .route("/tv/symbols", get(handlers::symbols))
        .route("/tv/search", get(handlers::search))
        .route("/tv/history", get(handlers::history))
        .route("/tv/time", get(handlers::server_time))
        .route("/tv/timescale_marks", get(handlers::timescale_marks))
        .route("/healthz", get(handlers::healthz))
        .fallback(handlers::not_found)
        .layer(TraceLayer::new_for_http())
        .with_state(Arc::new(state))
}
