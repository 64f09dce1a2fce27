//! Museboard search handler

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use tracing::error;
use tracing::info;
use tracing::warn;

use super::AppState;
use crate::api::types::SearchRequest;
use crate::api::types::SearchResponse;

/// Semantic search over the requesting user's saved items, answered via the
/// RAG pipeline.
pub async fn search(
    State(state): State<AppState>,
    Json(req): Json<SearchRequest>,
) -> Result<Json<SearchResponse>, StatusCode> {
    info!("POST /search: {}", req.query);

    if let Err(e) = req.validate() {
        warn!("Rejected search request: {}", e);
        return Err(StatusCode::BAD_REQUEST);
    }

    match state.search.query(&req.query, &req.user_id).await {
        Ok(result) => Ok(Json(SearchResponse {
            answer: result.answer,
            sources: result.sources,
        })),
        Err(e) => {
            error!("Error processing search query: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}
