//! summarize-server
//!
//! HTTP surface for the configuration dialog's live validation.

use axum::Router;
use axum::middleware as axum_mw;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};

pub mod error;
pub mod middleware;
pub mod routes;
pub mod state;

pub use crate::state::AppState;

/// Build the router with every route and layer attached.
pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(routes::health::health_check))
        .route("/config-status", post(routes::status::check_config))
        .layer(axum_mw::from_fn(middleware::request_log::request_log))
        .layer(cors)
        .with_state(state)
}
