//! API route definitions

use crate::handlers;
use crate::SharedState;
use axum::{routing::get, Router};
use std::path::PathBuf;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    services::ServeDir,
};

/// Create the main application router
pub fn create_router(state: SharedState, static_dir: Option<PathBuf>) -> Router {
    let api_routes = Router::new()
        .route("/health", get(handlers::health_check))
        .route("/analyze/{username}", get(handlers::analyze_profile))
        .route("/user/{username}/basic", get(handlers::basic_profile))
        .with_state(state);

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let mut app = Router::new()
        .nest("/api/v1", api_routes)
        .layer(cors)
        .layer(CompressionLayer::new());

    // Serve a frontend build if provided
    if let Some(dir) = static_dir {
        app = app.fallback_service(ServeDir::new(dir).append_index_html_on_directories(true));
    }

    app
}
