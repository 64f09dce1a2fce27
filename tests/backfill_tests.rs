//! Backfill job tests: pacing aside, a single item's failure must never
//! abort the run

use std::sync::Arc;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use museboard_ai::database::EmbeddingBackfillStore;
use museboard_ai::database::PendingEmbeddingItem;
use museboard_ai::embeddings::backfill_missing_embeddings;
use museboard_ai::embeddings::Embedder;
use museboard_ai::MuseAiError;
use museboard_ai::Result;
use uuid::Uuid;

struct InMemoryBackfillStore {
    items: Vec<PendingEmbeddingItem>,
    updated: Mutex<Vec<Uuid>>,
}

impl InMemoryBackfillStore {
    fn with_items(items: Vec<PendingEmbeddingItem>) -> Arc<Self> {
        Arc::new(Self {
            items,
            updated: Mutex::new(Vec::new()),
        })
    }
}

#[async_trait]
impl EmbeddingBackfillStore for InMemoryBackfillStore {
    async fn items_missing_embedding(&self) -> Result<Vec<PendingEmbeddingItem>> {
        Ok(self.items.clone())
    }

    async fn update_item_embedding(&self, id: Uuid, _embedding: Vec<f32>) -> Result<()> {
        self.updated.lock().unwrap().push(id);
        Ok(())
    }
}

/// Embedder that fails for any text containing the marker word
struct SelectivelyFailingEmbedder;

#[async_trait]
impl Embedder for SelectivelyFailingEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        if text.contains("poison") {
            return Err(MuseAiError::Upstream("rate limited".to_string()));
        }
        Ok(vec![0.0; 1536])
    }
}

fn pending(content: &str) -> PendingEmbeddingItem {
    PendingEmbeddingItem {
        id: Uuid::new_v4(),
        content: Some(content.to_string()),
        description: None,
    }
}

#[tokio::test]
async fn backfill_continues_past_a_failing_item() {
    let items = vec![pending("first"), pending("poison pill"), pending("third")];
    let first_id = items[0].id;
    let third_id = items[2].id;
    let store = InMemoryBackfillStore::with_items(items);

    let stats = backfill_missing_embeddings(
        store.clone(),
        Arc::new(SelectivelyFailingEmbedder),
        Duration::ZERO,
    )
    .await
    .unwrap();

    assert_eq!(stats.total, 3);
    assert_eq!(stats.updated, 2);
    assert_eq!(stats.failed, 1);

    let updated = store.updated.lock().unwrap().clone();
    assert_eq!(updated, vec![first_id, third_id]);
}

#[tokio::test]
async fn backfill_with_nothing_to_do_reports_zero_totals() {
    let store = InMemoryBackfillStore::with_items(Vec::new());

    let stats = backfill_missing_embeddings(
        store,
        Arc::new(SelectivelyFailingEmbedder),
        Duration::ZERO,
    )
    .await
    .unwrap();

    assert_eq!(stats.total, 0);
    assert_eq!(stats.updated, 0);
    assert_eq!(stats.failed, 0);
}
