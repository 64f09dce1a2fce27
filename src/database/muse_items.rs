//! Muse item queries: similarity search and embedding maintenance

use async_trait::async_trait;
use pgvector::Vector;
use sqlx::FromRow;
use uuid::Uuid;

use super::Database;
use super::EmbeddingBackfillStore;
use super::MuseItemStore;
use crate::models::RetrievedItem;
use crate::Result;

/// A muse item whose embedding column is still null
#[derive(Debug, Clone, FromRow)]
pub struct PendingEmbeddingItem {
    pub id: Uuid,
    pub content: Option<String>,
    pub description: Option<String>,
}

#[async_trait]
impl MuseItemStore for Database {
    async fn similarity_search(
        &self,
        query_embedding: &[f32],
        user_id: &str,
        threshold: f32,
        limit: i64,
    ) -> Result<Vec<RetrievedItem>> {
        let query_vector = Vector::from(query_embedding.to_vec());

        // The stored procedure filters by owner and minimum similarity and
        // returns rows ordered by descending similarity, capped at match_count.
        let items = sqlx::query_as::<_, RetrievedItem>(
            r"
            SELECT id, user_id, content, content_type, description, ai_categories,
                   created_at, similarity
            FROM match_muse_items($1, $2::float8, $3::int, $4::uuid)
            ",
        )
        .bind(query_vector)
        .bind(f64::from(threshold))
        .bind(limit)
        .bind(user_id)
        .fetch_all(self.pool())
        .await?;

        Ok(items)
    }
}

#[async_trait]
impl EmbeddingBackfillStore for Database {
    async fn items_missing_embedding(&self) -> Result<Vec<PendingEmbeddingItem>> {
        let items = sqlx::query_as::<_, PendingEmbeddingItem>(
            r"
            SELECT id, content, description
            FROM muse_items
            WHERE embedding IS NULL
            ORDER BY created_at
            ",
        )
        .fetch_all(self.pool())
        .await?;

        Ok(items)
    }

    async fn update_item_embedding(&self, id: Uuid, embedding: Vec<f32>) -> Result<()> {
        sqlx::query("UPDATE muse_items SET embedding = $2 WHERE id = $1")
            .bind(id)
            .bind(Vector::from(embedding))
            .execute(self.pool())
            .await?;

        Ok(())
    }
}
