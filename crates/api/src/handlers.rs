//! API request handlers

use crate::SharedState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use gitfolio_analyzer::AnalyzerError;
use gitfolio_collector::{username::is_valid_username, CollectorError};
use serde::Serialize;
use tracing::{error, warn};

#[derive(Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<String>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn ok(data: T) -> Json<Self> {
        Json(Self {
            success: true,
            data: Some(data),
            error: None,
        })
    }

    pub fn err(status: StatusCode, message: impl Into<String>) -> (StatusCode, Json<Self>) {
        (
            status,
            Json(Self {
                success: false,
                data: None,
                error: Some(message.into()),
            }),
        )
    }
}

fn invalid_username(username: &str) -> Response {
    ApiResponse::<()>::err(
        StatusCode::BAD_REQUEST,
        format!("Invalid GitHub username: {}", username),
    )
    .into_response()
}

fn failure(username: &str, e: AnalyzerError) -> Response {
    let status = match &e {
        AnalyzerError::Source(CollectorError::NotFound(_)) => StatusCode::NOT_FOUND,
        AnalyzerError::Source(CollectorError::RateLimited(_)) => StatusCode::TOO_MANY_REQUESTS,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };

    if status.is_server_error() {
        error!("Analysis failed for {}: {}", username, e);
    } else {
        warn!("Analysis rejected for {}: {}", username, e);
    }

    ApiResponse::<()>::err(status, e.to_string()).into_response()
}

/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Full portfolio analysis for a user
pub async fn analyze_profile(
    State(state): State<SharedState>,
    Path(username): Path<String>,
) -> Response {
    if !is_valid_username(&username) {
        return invalid_username(&username);
    }

    match state.analyzer.analyze(&username).await {
        Ok(report) => ApiResponse::ok(report).into_response(),
        Err(e) => failure(&username, e),
    }
}

/// Profile record without repository analysis
pub async fn basic_profile(
    State(state): State<SharedState>,
    Path(username): Path<String>,
) -> Response {
    if !is_valid_username(&username) {
        return invalid_username(&username);
    }

    match state.analyzer.basic_profile(&username).await {
        Ok(user) => ApiResponse::ok(user).into_response(),
        Err(e) => failure(&username, e),
    }
}
