pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod geo;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod state;
pub mod webhook;

use std::sync::Arc;

use axum::Router;
use axum::http::{HeaderName, HeaderValue};
use sqlx::PgPool;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::geo::GeoCache;
use crate::state::{AppState, SharedState};

pub fn build_app(pool: PgPool, config: Config) -> Router {
    let max_body_size = config.max_body_size;

    let state: SharedState = Arc::new(AppState {
        pool,
        config,
        http: reqwest::Client::new(),
        geo_cache: GeoCache::new(),
    });

    // Evict expired geolocation cache entries in the background.
    let cleanup_state = state.clone();
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(std::time::Duration::from_secs(3600));
        loop {
            interval.tick().await;
            cleanup_state.geo_cache.cleanup(geo::CACHE_TTL);
        }
    });

    // Session-protected API surface records caller activity; the
    // webhook endpoint is signature-verified instead.
    let api = routes::api_routes().layer(axum::middleware::from_fn_with_state(
        state.clone(),
        middleware::activity::track_activity,
    ));

    Router::new()
        .merge(api)
        .merge(routes::webhook_routes())
        .route("/health", axum::routing::get(health))
        .layer(RequestBodyLimitLayer::new(max_body_size))
        .layer(TraceLayer::new_for_http())
        .layer(SetResponseHeaderLayer::overriding(
            HeaderName::from_static("x-content-type-options"),
            HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            HeaderName::from_static("x-frame-options"),
            HeaderValue::from_static("DENY"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            HeaderName::from_static("referrer-policy"),
            HeaderValue::from_static("strict-origin-when-cross-origin"),
        ))
        .with_state(state)
}

async fn health() -> &'static str {
    "ok"
}
