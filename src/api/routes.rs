//! HTTP API Route Definitions

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{self, AppState};

/// Create the API router with all routes
pub fn create_router(app_state: AppState) -> Router {
    let api = Router::new()
        .route("/health", get(handlers::health))
        .route("/lookup", post(handlers::lookup))
        .with_state(app_state);

    Router::new().nest("/api", api)
}
