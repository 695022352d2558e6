//! API route definitions

use super::{handlers, me_handlers};
use crate::AppState;
use axum::{routing::get, Router};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Create the API router
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Health check
        .route("/health", get(handlers::health))
        // Server status
        .route("/api/status", get(handlers::get_status))
        // ====================================================================
        // Current-user resource area
        // ====================================================================
        .route("/api/me", get(me_handlers::get_me))
        .route("/api/me/history", get(me_handlers::get_user_history))
        .route(
            "/api/me/history/{note}",
            get(me_handlers::get_history_entry)
                .put(me_handlers::update_history_entry)
                .delete(me_handlers::delete_history_entry),
        )
        .route("/api/me/notes", get(me_handlers::get_my_notes))
        .route("/api/me/media", get(me_handlers::get_my_media))
        // Middleware
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
