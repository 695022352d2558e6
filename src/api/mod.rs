//! HTTP API for the current-user resource area and server status

pub mod auth;
pub mod handlers;
pub mod me_handlers;
pub mod routes;

pub use handlers::AppError;
pub use routes::create_router;
