use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::RetrievedItem;
use crate::Result;

// Re-export submodules
mod messages;
mod muse_items;

pub use muse_items::PendingEmbeddingItem;

/// Gateway to the vector store's similarity search over saved muse items.
///
/// The store applies the similarity threshold and the owner filter itself;
/// callers only pass them through. An empty result is not an error.
#[async_trait]
pub trait MuseItemStore: Send + Sync {
    async fn similarity_search(
        &self,
        query_embedding: &[f32],
        user_id: &str,
        threshold: f32,
        limit: i64,
    ) -> Result<Vec<RetrievedItem>>;
}

/// Persistence for chat turns. Writes are best-effort from the caller's
/// perspective; the store itself reports failures normally.
#[async_trait]
pub trait ConversationStore: Send + Sync {
    async fn save_turns(
        &self,
        conversation_id: &str,
        user_message: &str,
        assistant_message: &str,
    ) -> Result<()>;
}

/// Item access needed by the offline embedding backfill job.
#[async_trait]
pub trait EmbeddingBackfillStore: Send + Sync {
    /// All muse items whose embedding has not been populated yet
    async fn items_missing_embedding(&self) -> Result<Vec<PendingEmbeddingItem>>;

    /// Write the embedding for a single muse item
    async fn update_item_embedding(&self, id: Uuid, embedding: Vec<f32>) -> Result<()>;
}

/// Database connection pool wrapper
#[derive(Debug, Clone)]
pub struct Database {
    pool: PgPool,
}

impl Database {
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a new database instance from configuration
    pub async fn from_config(config: &crate::config::AppConfig) -> Result<Self> {
        let pool_options = sqlx::postgres::PgPoolOptions::new()
            .max_connections(config.max_connections())
            .min_connections(config.min_connections())
            .acquire_timeout(std::time::Duration::from_secs(config.connection_timeout()));

        let pool = pool_options.connect(config.database_url()).await?;

        tracing::info!(
            "Database pool configured: max_connections={}, min_connections={}",
            config.max_connections(),
            config.min_connections()
        );

        Ok(Self::new(pool))
    }

    /// Get a reference to the database pool for raw queries
    pub const fn pool(&self) -> &PgPool {
        &self.pool
    }
}
