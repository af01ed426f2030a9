use axum::{
    http::{header, HeaderValue},
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;

use super::handlers;
use super::static_files::static_handler;
use super::state::AppState;

// UI Routes - web interface
pub fn ui_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(handlers::ui::index_handler))
        .route("/static/{*path}", get(static_handler))
}

// API Routes - REST API for programmatic access
pub fn api_routes() -> Router<Arc<AppState>> {
    Router::new().nest(
        "/api",
        Router::new()
            // Query endpoints
            .route("/nl-query", post(handlers::api::nl_query))
            .route("/history", get(handlers::api::list_history))
            .route("/rules", get(handlers::api::list_rules))

            // Mock chart data
            .route("/datasets/{tag}", get(handlers::api::get_dataset))

            // System status
            .route("/status", get(handlers::api::system_status))

            // Generated answers depend on live state; never cache them
            .layer(SetResponseHeaderLayer::if_not_present(
                header::CACHE_CONTROL,
                HeaderValue::from_static("no-store"),
            )),
    )
}

pub fn app(state: Arc<AppState>) -> Router {
    Router::new()
        .merge(ui_routes())
        .merge(api_routes())
        .fallback(handlers::ui::not_found_handler)
        .layer(CompressionLayer::new())
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
