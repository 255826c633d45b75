pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{any, get},
    Router,
};

use crate::applications::handlers;
use crate::state::AppState;

/// Every method reaches the application handler so that non-POST requests
/// get the JSON 405 body instead of Axum's empty one. Application text has
/// no size cap, so the default 2 MB body limit is lifted.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/", any(handlers::handle_process_application))
        .route(
            "/api/process-application",
            any(handlers::handle_process_application),
        )
        .layer(DefaultBodyLimit::disable())
        .with_state(state)
}
