//! GitFolio Web API
//!
//! Axum-based REST API and static file server.

mod handlers;
mod routes;

pub use routes::create_router;

use gitfolio_analyzer::ProfileAnalyzer;
use gitfolio_collector::github::GithubCollector;
use std::sync::Arc;

/// Shared application state
pub struct AppState {
    pub analyzer: ProfileAnalyzer<GithubCollector>,
}

impl AppState {
    pub fn new(analyzer: ProfileAnalyzer<GithubCollector>) -> Self {
        Self { analyzer }
    }
}

pub type SharedState = Arc<AppState>;
