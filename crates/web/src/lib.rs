//! Stockroom web application library.
//!
//! Registration, login and per-user product inventory served as
//! server-rendered HTML. The binary in `main.rs` only wires configuration,
//! telemetry and the listener around [`build_router`], so the whole request
//! path can be driven in-process by tests.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod db;
pub mod error;
pub mod filters;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;

use axum::{
    Router,
    body::Body,
    http::Request,
    middleware::{from_fn, from_fn_with_state},
};
use tower_http::{services::ServeDir, trace::TraceLayer};

use crate::middleware::{
    SessionLayer, load_current_user, request_id_middleware, security_headers_middleware,
};
use crate::state::AppState;

/// Build the application router with its middleware stack.
///
/// Sentry layers are not included; the binary adds them outermost.
pub fn build_router(state: AppState, session_layer: SessionLayer) -> Router {
    let static_dir = ServeDir::new(&state.config().static_dir);

    routes::routes()
        .nest_service("/static", static_dir)
        .layer(from_fn_with_state(state.clone(), load_current_user))
        .layer(session_layer)
        .layer(from_fn(security_headers_middleware))
        .layer(from_fn(request_id_middleware))
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
                tracing::info_span!(
                    "http_request",
                    method = %request.method(),
                    uri = %request.uri(),
                    request_id = tracing::field::Empty,
                )
            }),
        )
        .with_state(state)
}
