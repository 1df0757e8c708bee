//! HTTP request handlers for the feed endpoints.

use axum::{
    Json,
    extract::{Query, State},
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use serde_json::json;
use std::sync::Arc;
use tracing::warn;

use crate::domain::fallback::{self, Substitute};
use crate::domain::resolution::normalize_resolution_params;
use crate::domain::udf::{QueryPairs, UdfOperation, normalize_symbol_params};
use crate::domain::upstream::UpstreamResponse;

use super::AppState;

pub async fn config(
    State(state): State<Arc<AppState>>,
    Query(params): Query<QueryPairs>,
) -> Response {
    relay(&state, UdfOperation::Config, params).await
}

pub async fn symbols(
    State(state): State<Arc<AppState>>,
    Query(params): Query<QueryPairs>,
) -> Response {
    relay(&state, UdfOperation::Symbols, normalize_symbol_params(params)).await
}

pub async fn search(
    State(state): State<Arc<AppState>>,
    Query(params): Query<QueryPairs>,
) -> Response {
    relay(&state, UdfOperation::Search, params).await
}

pub async fn history(
    State(state): State<Arc<AppState>>,
    Query(params): Query<QueryPairs>,
) -> Response {
    relay(&state, UdfOperation::History, normalize_resolution_params(params)).await
}

pub async fn server_time(
    State(state): State<Arc<AppState>>,
    Query(params): Query<QueryPairs>,
) -> Response {
    relay(&state, UdfOperation::Time, params).await
}

pub async fn timescale_marks(
    State(state): State<Arc<AppState>>,
    Query(params): Query<QueryPairs>,
) -> Response {
    relay(&state, UdfOperation::TimescaleMarks, params).await
}

pub async fn healthz() -> Json<serde_json::Value> {
    Json(json!({"status": "ok"}))
}

pub async fn not_found() -> Response {
    (StatusCode::NOT_FOUND, Json(json!({"error": "not found"}))).into_response()
}

/// One upstream attempt, then either forwarding or the operation's
/// substitute. No retries: the chart polls on its own cadence, so a failed
/// call answers immediately and the next poll tries again.
async fn relay(state: &AppState, op: UdfOperation, params: QueryPairs) -> Response {
    match state.upstream.fetch(op, &params).await {
        Ok(response) if fallback::usable(op, &response) => forward(op, response),
        Ok(response) => {
            warn!(
                op = %op,
                status = response.status,
                "unusable upstream answer, serving fallback"
            );
            respond_substitute(fallback::substitute(op, &params))
        }
        Err(err) => {
            warn!(op = %op, error = %err, "upstream call failed, serving fallback");
            respond_substitute(fallback::substitute(op, &params))
        }
    }
}

/// Forward a usable upstream answer, body bytes untouched.
fn forward(op: UdfOperation, response: UpstreamResponse) -> Response {
    match op {
        // Search alone keeps the upstream's own status and content type.
        UdfOperation::Search => {
            let status =
                StatusCode::from_u16(response.status).unwrap_or(StatusCode::BAD_GATEWAY);
            let content_type = response
                .content_type
                .as_deref()
                .and_then(|ct| HeaderValue::from_str(ct).ok())
                .unwrap_or_else(|| HeaderValue::from_static("application/json"));
            no_store((status, [(header::CONTENT_TYPE, content_type)], response.body))
        }
        UdfOperation::Time => no_store((
            [(header::CONTENT_TYPE, HeaderValue::from_static("text/plain; charset=utf-8"))],
            response.body,
        )),
        UdfOperation::Config
        | UdfOperation::Symbols
        | UdfOperation::History
        | UdfOperation::TimescaleMarks => no_store((
            [(header::CONTENT_TYPE, HeaderValue::from_static("application/json"))],
            response.body,
        )),
    }
}

fn respond_substitute(substitute: Substitute) -> Response {
    match substitute {
        Substitute::Json(body) => no_store(Json(body)),
        Substitute::Text(body) => no_store((
            [(header::CONTENT_TYPE, HeaderValue::from_static("text/plain; charset=utf-8"))],
            body,
        )),
        Substitute::BadGateway(body) => no_store((StatusCode::BAD_GATEWAY, Json(body))),
    }
}

fn no_store(response: impl IntoResponse) -> Response {
    let mut response = response.into_response();
    response
        .headers_mut()
        .insert(header::CACHE_CONTROL, HeaderValue::from_static("no-store"));
    response
}
