//! Text embedding generation
//!
//! Wraps remote embedding APIs (OpenAI-style and Ollama-style endpoints) and
//! provides the offline backfill job that populates missing item embeddings.

pub mod backfill;
pub mod client;

pub use backfill::backfill_missing_embeddings;
pub use backfill::BackfillStats;
pub use client::EmbeddingClient;
pub use client::EmbeddingProvider;

use async_trait::async_trait;

use crate::Result;

/// Default embedding dimension for OpenAI text-embedding-3-small
pub const DEFAULT_EMBEDDING_DIM: usize = 1536;

/// Turns a string into a fixed-length vector via one outbound API call.
///
/// No local retry: a remote failure surfaces as an upstream error and the
/// caller decides whether to abort or degrade.
#[async_trait]
pub trait Embedder: Send + Sync {
    async fn embed(&self, text: &str) -> Result<Vec<f32>>;
}

/// Collapse newlines to single spaces before embedding.
///
/// Embedding models are sensitive to literal newline tokens.
#[must_use]
pub fn normalize_for_embedding(text: &str) -> String {
    text.replace('\n', " ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_collapses_newlines() {
        assert_eq!(
            normalize_for_embedding("line one\nline two\n\nline three"),
            "line one line two  line three"
        );
    }

    #[test]
    fn test_normalize_leaves_plain_text_alone() {
        assert_eq!(normalize_for_embedding("no newlines here"), "no newlines here");
    }
}
