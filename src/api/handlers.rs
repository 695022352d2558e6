//! Shared handler infrastructure, health and status endpoints

use crate::history::HistoryError;
use crate::monitoring::{ServerStatus, VersionError};
use crate::AppState;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::Serialize;

// ============================================================================
// Health check
// ============================================================================

/// Health check response
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// Liveness probe. Answers from the process alone, without touching any
/// store, so it stays meaningful while a backend is misbehaving.
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

// ============================================================================
// Server status
// ============================================================================

/// GET /api/status — point-in-time status snapshot with the server version.
pub async fn get_status(State(state): State<AppState>) -> Result<Json<ServerStatus>, AppError> {
    Ok(Json(state.status.get_status().await?))
}

// ============================================================================
// Error handling
// ============================================================================

/// Application error type
#[derive(Debug)]
pub enum AppError {
    Internal(anyhow::Error),
    NotFound(String),
    BadRequest(String),
    Unauthorized(String),
    Forbidden(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            AppError::Internal(e) => {
                tracing::error!(error = %e, "internal error");
                (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
            }
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
            AppError::Forbidden(msg) => (StatusCode::FORBIDDEN, msg),
        };

        let body = Json(serde_json::json!({
            "error": message
        }));

        (status, body).into_response()
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::Internal(err)
    }
}

impl From<HistoryError> for AppError {
    fn from(err: HistoryError) -> Self {
        match err {
            HistoryError::NotFound(reference) => AppError::NotFound(reference),
            HistoryError::Forbidden => {
                AppError::Forbidden("operation not permitted for this user".to_string())
            }
            HistoryError::Storage(e) => AppError::Internal(e),
        }
    }
}

impl From<VersionError> for AppError {
    fn from(err: VersionError) -> Self {
        // Misconfigured build metadata is a server-side defect, not a
        // client-visible absence.
        match err {
            VersionError::Malformed { .. } => AppError::Internal(anyhow::Error::new(err)),
            VersionError::Source(e) => AppError::Internal(e),
        }
    }
}
