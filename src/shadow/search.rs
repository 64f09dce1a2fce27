//! Retrieval-augmented answering over a user's saved muse items
//!
//! Linear pipeline: embed the question, retrieve the top matches for the
//! asking user, render them into a bounded context block, generate an answer
//! grounded only in that context. Each step depends on the previous one's
//! output, so the steps are strictly sequential.

use std::sync::Arc;

use tracing::debug;
use tracing::info;

use super::context::render_context;
use crate::database::MuseItemStore;
use crate::embeddings::Embedder;
use crate::llm::FieldSpec;
use crate::llm::Generator;
use crate::llm::Signature;
use crate::llm::Strategy;
use crate::models::RetrievedItem;
use crate::Result;

/// Minimum similarity a stored item must reach to count as a match
pub const MATCH_THRESHOLD: f32 = 0.70;

/// Result cap for one retrieval
pub const MATCH_COUNT: i64 = 5;

/// Answer returned without a generation call when retrieval comes back empty.
/// Generating with no grounding would only invite hallucinated answers.
pub const NO_MATCH_ANSWER: &str =
    "I couldn't find any relevant items in your Museboard for that query.";

const GENERATE_ANSWER: Signature = Signature {
    instruction: "Answer the user's question based *only* on the provided context from their \
        Museboard. Synthesize the information from the context into a cohesive answer.",
    inputs: &[
        FieldSpec {
            name: "context",
            desc: "Relevant items from the user's Museboard.",
        },
        FieldSpec {
            name: "question",
            desc: "The user's original question.",
        },
    ],
    outputs: &[FieldSpec {
        name: "answer",
        desc: "A comprehensive answer synthesized from the context.",
    }],
};

/// Answer plus the original (untruncated) records it was grounded in
#[derive(Debug, Clone)]
pub struct RagAnswer {
    pub answer: String,
    pub sources: Vec<RetrievedItem>,
}

/// RAG orchestrator
pub struct RagPipeline {
    embedder: Arc<dyn Embedder>,
    store: Arc<dyn MuseItemStore>,
    generator: Arc<dyn Generator>,
}

impl RagPipeline {
    pub fn new(
        embedder: Arc<dyn Embedder>,
        store: Arc<dyn MuseItemStore>,
        generator: Arc<dyn Generator>,
    ) -> Self {
        Self {
            embedder,
            store,
            generator,
        }
    }

    /// Answer a question from the given user's saved items.
    pub async fn query(&self, question: &str, user_id: &str) -> Result<RagAnswer> {
        info!("Processing search query for user {}", user_id);

        let question_embedding = self.embedder.embed(question).await?;

        let items = self
            .store
            .similarity_search(&question_embedding, user_id, MATCH_THRESHOLD, MATCH_COUNT)
            .await?;

        debug!("Retrieved {} items", items.len());

        if items.is_empty() {
            return Ok(RagAnswer {
                answer: NO_MATCH_ANSWER.to_string(),
                sources: Vec::new(),
            });
        }

        let context = render_context(&items);

        let outputs = self
            .generator
            .generate(
                &GENERATE_ANSWER,
                Strategy::ReasonFirst,
                &[
                    ("context", context),
                    ("question", question.to_string()),
                ],
            )
            .await?;

        Ok(RagAnswer {
            answer: outputs.require("answer")?.to_string(),
            // Callers get the full records even though the model saw
            // truncated versions.
            sources: items,
        })
    }
}
