//! API request and response types

use serde::Deserialize;
use serde::Serialize;

use crate::errors::MuseAiError;
use crate::models::RetrievedItem;
use crate::models::ShadowContext;
use crate::shadow::CuratedPiece;
use crate::shadow::HeroSuggestion;
use crate::shadow::InterestSuggestion;

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
}

/// Shadow chat request
#[derive(Debug, Deserialize)]
pub struct ShadowChatRequest {
    pub context: ShadowContext,
    pub user_message: String,
    pub conversation_id: String,
}

impl ShadowChatRequest {
    /// Rejected before any external call is made.
    pub fn validate(&self) -> crate::Result<()> {
        if self.user_message.trim().is_empty() {
            return Err(MuseAiError::Validation(
                "user_message must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

/// Shadow chat response
#[derive(Debug, Serialize)]
pub struct ShadowChatResponse {
    pub response: String,
}

/// Museboard search request
#[derive(Debug, Deserialize)]
pub struct SearchRequest {
    pub query: String,
    pub user_id: String,
}

impl SearchRequest {
    /// Rejected before any external call is made.
    pub fn validate(&self) -> crate::Result<()> {
        if self.query.trim().is_empty() {
            return Err(MuseAiError::Validation(
                "query must not be empty".to_string(),
            ));
        }
        if self.user_id.trim().is_empty() {
            return Err(MuseAiError::Validation(
                "user_id must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

/// Museboard search response: the synthesized answer plus the full,
/// untruncated source records
#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub answer: String,
    pub sources: Vec<RetrievedItem>,
}

/// Mission enhancement request
#[derive(Debug, Deserialize)]
pub struct MissionEnhanceRequest {
    pub user_input: String,
}

/// Mission enhancement response. `enhanced` is false when the service fell
/// back to echoing the caller's input.
#[derive(Debug, Serialize)]
pub struct MissionEnhanceResponse {
    pub mission: String,
    pub enhanced: bool,
}

/// Interest suggestion request
#[derive(Debug, Deserialize)]
pub struct SuggestionsRequest {
    pub mission: String,
}

impl SuggestionsRequest {
    /// Rejected before any external call is made.
    pub fn validate(&self) -> crate::Result<()> {
        if self.mission.trim().is_empty() {
            return Err(MuseAiError::Validation(
                "mission must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

/// Interest suggestion response
#[derive(Debug, Serialize)]
pub struct SuggestionsResponse {
    pub heroes: Vec<HeroSuggestion>,
    pub interests: Vec<InterestSuggestion>,
}

/// Content curation request
#[derive(Debug, Deserialize)]
pub struct CurateRequest {
    pub mission: String,
    #[serde(default)]
    pub heroes: Vec<String>,
    #[serde(default)]
    pub interests: Vec<String>,
}

/// Content curation response
#[derive(Debug, Serialize)]
pub struct CurateResponse {
    pub content: Vec<CuratedPiece>,
    pub categories: Vec<String>,
}
