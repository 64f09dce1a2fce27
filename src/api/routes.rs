//! API route definitions

use axum::routing::get;
use axum::routing::post;
use axum::Router;

use super::handlers::AppState;
use super::handlers::{
    self,
};

/// Create the API router
pub fn api_routes(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/", get(handlers::health))
        // Shadow chat
        .route("/chat", post(handlers::chat))
        // RAG search over saved items
        .route("/search", post(handlers::search))
        // Onboarding flows
        .route("/mission/enhance", post(handlers::enhance_mission))
        .route("/onboarding/suggestions", post(handlers::suggest_interests))
        .route("/content/curate", post(handlers::curate_content))
        .with_state(state)
}
