//! API request handlers

use std::sync::Arc;

use axum::Json;

use crate::api::types::HealthResponse;
use crate::database::ConversationStore;
use crate::database::MuseItemStore;
use crate::embeddings::Embedder;
use crate::llm::Generator;
use crate::shadow::ContentCurator;
use crate::shadow::InterestSuggester;
use crate::shadow::MissionEnhancer;
use crate::shadow::RagPipeline;
use crate::shadow::ShadowAgent;

// Re-export sub-modules
pub mod chat;
pub mod onboarding;
pub mod search;

// Re-export handlers
pub use chat::*;
pub use onboarding::*;
pub use search::*;

/// Shared application state: one stateless orchestrator per flow, all built
/// on clients injected at startup and reused across concurrent requests.
#[derive(Clone)]
pub struct AppState {
    pub chat_agent: Arc<ShadowAgent>,
    pub search: Arc<RagPipeline>,
    pub mission_enhancer: Arc<MissionEnhancer>,
    pub interest_suggester: Arc<InterestSuggester>,
    pub content_curator: Arc<ContentCurator>,
    pub conversations: Arc<dyn ConversationStore>,
}

impl AppState {
    /// Wire the orchestrators up from injected clients.
    pub fn new(
        embedder: Arc<dyn Embedder>,
        store: Arc<dyn MuseItemStore>,
        generator: Arc<dyn Generator>,
        conversations: Arc<dyn ConversationStore>,
    ) -> Self {
        Self {
            chat_agent: Arc::new(ShadowAgent::new(generator.clone())),
            search: Arc::new(RagPipeline::new(embedder, store, generator.clone())),
            mission_enhancer: Arc::new(MissionEnhancer::new(generator.clone())),
            interest_suggester: Arc::new(InterestSuggester::new(generator.clone())),
            content_curator: Arc::new(ContentCurator::new(generator)),
            conversations,
        }
    }
}

/// Health check handler
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        service: crate::SERVICE_NAME.to_string(),
    })
}
