//! Backfill embeddings for muse items that don't have one yet
//!
//! Offline job: walks every item whose embedding column is null, computes an
//! embedding from its content and description, and writes it back. Paced with
//! a fixed inter-call delay to respect upstream rate limits; a single item's
//! failure is logged and counted, never fatal to the run.

use std::sync::Arc;
use std::time::Duration;

use tracing::info;
use tracing::warn;

use super::Embedder;
use crate::database::EmbeddingBackfillStore;
use crate::database::PendingEmbeddingItem;
use crate::Result;

/// Outcome counts for one backfill run
#[derive(Debug, Default, Clone, Copy)]
pub struct BackfillStats {
    pub total: usize,
    pub updated: usize,
    pub failed: usize,
}

/// Backfill embeddings for all muse items missing one
pub async fn backfill_missing_embeddings(
    store: Arc<dyn EmbeddingBackfillStore>,
    embedder: Arc<dyn Embedder>,
    delay: Duration,
) -> Result<BackfillStats> {
    info!("Starting embeddings backfill");

    let items = store.items_missing_embedding().await?;

    let mut stats = BackfillStats {
        total: items.len(),
        ..BackfillStats::default()
    };

    if items.is_empty() {
        info!("No items to process; all existing items appear to have embeddings");
        return Ok(stats);
    }

    info!("Found {} items to process", items.len());

    for (index, item) in items.iter().enumerate() {
        match backfill_item(store.as_ref(), embedder.as_ref(), item).await {
            Ok(()) => {
                info!(
                    "Processed item {}/{} (ID: {})",
                    index + 1,
                    stats.total,
                    item.id
                );
                stats.updated += 1;
            }
            Err(e) => {
                warn!("Failed to backfill embedding for item {}: {}", item.id, e);
                stats.failed += 1;
            }
        }

        if index + 1 < stats.total {
            tokio::time::sleep(delay).await;
        }
    }

    info!(
        "Backfill complete: {} updated, {} failed",
        stats.updated, stats.failed
    );

    Ok(stats)
}

async fn backfill_item(
    store: &dyn EmbeddingBackfillStore,
    embedder: &dyn Embedder,
    item: &PendingEmbeddingItem,
) -> Result<()> {
    let text = embedding_text(item.content.as_deref(), item.description.as_deref());
    let embedding = embedder.embed(&text).await?;
    store.update_item_embedding(item.id, embedding).await
}

/// Text an item is embedded from: content plus description, labeled so the
/// two fields stay distinguishable to the model.
fn embedding_text(content: Option<&str>, description: Option<&str>) -> String {
    format!(
        "Content: {}\n\nDescription: {}",
        content.unwrap_or_default(),
        description.unwrap_or_default()
    )
}
