//! Shadow orchestrators
//!
//! Each orchestrator sequences calls to the external clients (embedding,
//! vector store, generation, persistence) to fulfil one request. None of them
//! holds state: they are constructed once at startup and shared across
//! concurrent requests.

pub mod chat;
pub mod context;
pub mod onboarding;
pub mod search;

pub use chat::ShadowAgent;
pub use onboarding::ContentCurator;
pub use onboarding::CuratedContent;
pub use onboarding::CuratedPiece;
pub use onboarding::HeroSuggestion;
pub use onboarding::InterestSuggester;
pub use onboarding::InterestSuggestion;
pub use onboarding::InterestSuggestions;
pub use onboarding::MissionEnhancer;
pub use search::RagAnswer;
pub use search::RagPipeline;
