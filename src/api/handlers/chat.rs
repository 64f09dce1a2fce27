//! Shadow chat handler

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use tracing::error;
use tracing::info;
use tracing::warn;

use super::AppState;
use crate::api::types::ShadowChatRequest;
use crate::api::types::ShadowChatResponse;
use crate::shadow::chat::history_summary;
use crate::shadow::chat::museboard_summary;

/// Shadow chat: generate a reply from caller-supplied context, then
/// best-effort persist the turn pair.
pub async fn chat(
    State(state): State<AppState>,
    Json(req): Json<ShadowChatRequest>,
) -> Result<Json<ShadowChatResponse>, StatusCode> {
    info!("POST /chat: conversation {}", req.conversation_id);

    if let Err(e) = req.validate() {
        warn!("Rejected chat request: {}", e);
        return Err(StatusCode::BAD_REQUEST);
    }

    let history = history_summary(&req.context.conversation_history);
    let items = museboard_summary(req.context.total_items, &req.context.top_categories);

    let response = match state
        .chat_agent
        .respond(&req.context.mission, &req.user_message, &items, &history)
        .await
    {
        Ok(response) => response,
        Err(e) => {
            error!("Error generating Shadow response: {}", e);
            return Err(StatusCode::INTERNAL_SERVER_ERROR);
        }
    };

    // The reply is still returned when the write fails: availability over
    // durability for this non-critical log.
    if let Err(e) = state
        .conversations
        .save_turns(&req.conversation_id, &req.user_message, &response)
        .await
    {
        warn!("Failed to save conversation turn: {}", e);
    }

    Ok(Json(ShadowChatResponse { response }))
}
