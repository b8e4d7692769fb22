pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::matcher::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Matcher API
        .route("/api/v1/matcher/score", post(handlers::handle_score))
        .route("/api/v1/matcher/match", post(handlers::handle_match_uploads))
        .with_state(state)
}
