use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

/// Role of a conversation message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    User,
    Assistant,
    System,
}

impl MessageRole {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Assistant => "assistant",
            Self::System => "system",
        }
    }
}

impl std::fmt::Display for MessageRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single turn of an AI conversation, as supplied by the caller.
///
/// Persisted rows live in the `ai_messages` table; in requests these are
/// pass-through values and the timestamps stay as caller-provided strings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AiMessage {
    pub id: String,
    pub conversation_id: String,
    pub role: MessageRole,
    pub content: String,
    #[serde(default)]
    pub metadata: Option<serde_json::Value>,
    pub created_at: String,
}

/// A saved Museboard item, as supplied by the caller in chat context.
///
/// The stored row also carries an optional embedding column; it is not part
/// of the request-scoped view.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MuseItem {
    pub id: String,
    pub user_id: String,
    pub content: String,
    pub content_type: String,
    pub created_at: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub ai_categories: Option<Vec<String>>,
}

/// Request-scoped context for the Shadow chat agent, supplied wholesale by
/// the caller per request. The service never loads it independently.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShadowContext {
    pub mission: String,
    #[serde(default)]
    pub recent_items: Vec<MuseItem>,
    pub total_items: i64,
    #[serde(default)]
    pub top_categories: Vec<String>,
    #[serde(default)]
    pub conversation_history: Vec<AiMessage>,
}

/// A muse item returned by the vector store's similarity search, with its
/// similarity score. Ordering (descending by similarity) and the threshold
/// cut are both applied by the store.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct RetrievedItem {
    pub id: Uuid,
    pub user_id: Uuid,
    pub content: String,
    pub content_type: String,
    pub description: Option<String>,
    pub ai_categories: Option<Vec<String>>,
    pub created_at: DateTime<Utc>,
    pub similarity: f64,
}
