//! Onboarding handlers: mission enhancement, interest suggestions, content
//! curation

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use tracing::error;
use tracing::info;
use tracing::warn;

use super::AppState;
use crate::api::types::CurateRequest;
use crate::api::types::CurateResponse;
use crate::api::types::MissionEnhanceRequest;
use crate::api::types::MissionEnhanceResponse;
use crate::api::types::SuggestionsRequest;
use crate::api::types::SuggestionsResponse;
use crate::errors::MuseAiError;

/// Refine a raw goal statement into a mission. Never errors to the caller:
/// any failure falls back to echoing the input, marked `enhanced: false`.
pub async fn enhance_mission(
    State(state): State<AppState>,
    Json(req): Json<MissionEnhanceRequest>,
) -> Json<MissionEnhanceResponse> {
    info!("POST /mission/enhance");

    match state.mission_enhancer.enhance(&req.user_input).await {
        Ok(mission) => Json(MissionEnhanceResponse {
            mission,
            enhanced: true,
        }),
        Err(e) => {
            warn!("Mission enhancement failed, echoing input unchanged: {}", e);
            Json(MissionEnhanceResponse {
                mission: req.user_input,
                enhanced: false,
            })
        }
    }
}

/// Suggest heroes and interest categories for a mission.
pub async fn suggest_interests(
    State(state): State<AppState>,
    Json(req): Json<SuggestionsRequest>,
) -> Result<Json<SuggestionsResponse>, StatusCode> {
    info!("POST /onboarding/suggestions");

    if let Err(e) = req.validate() {
        warn!("Rejected suggestions request: {}", e);
        return Err(StatusCode::BAD_REQUEST);
    }

    match state.interest_suggester.suggest(&req.mission).await {
        Ok(suggestions) => Ok(Json(SuggestionsResponse {
            heroes: suggestions.heroes,
            interests: suggestions.interests,
        })),
        Err(MuseAiError::MalformedOutput(e)) => {
            error!("Interest suggestion JSON decode failed: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
        Err(e) => {
            error!("Error generating interest suggestions: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Curate starter content for a new board. Degrades to the built-in library
/// inside the curator, so the common failure mode is still a 200.
pub async fn curate_content(
    State(state): State<AppState>,
    Json(req): Json<CurateRequest>,
) -> Result<Json<CurateResponse>, StatusCode> {
    info!("POST /content/curate");

    let curated = state
        .content_curator
        .curate(&req.mission, &req.heroes, &req.interests)
        .await;

    Ok(Json(CurateResponse {
        content: curated.content,
        categories: curated.categories,
    }))
}
