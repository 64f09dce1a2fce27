//! Test doubles for the external collaborators
//!
//! Hand-rolled doubles: a fixed-vector embedder, a canned-result item store,
//! a scripted generator that counts calls and captures its inputs, and
//! recording/failing conversation stores.

#![allow(dead_code)]

use std::sync::atomic::AtomicUsize;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;
use museboard_ai::database::ConversationStore;
use museboard_ai::database::MuseItemStore;
use museboard_ai::embeddings::Embedder;
use museboard_ai::llm::Generator;
use museboard_ai::llm::Outputs;
use museboard_ai::llm::Signature;
use museboard_ai::llm::Strategy;
use museboard_ai::models::RetrievedItem;
use museboard_ai::MuseAiError;
use museboard_ai::Result;
use uuid::Uuid;

/// Embedder returning a constant vector
pub struct StaticEmbedder {
    pub dimension: usize,
}

impl StaticEmbedder {
    pub fn new() -> Arc<Self> {
        Arc::new(Self { dimension: 1536 })
    }
}

#[async_trait]
impl Embedder for StaticEmbedder {
    async fn embed(&self, _text: &str) -> Result<Vec<f32>> {
        Ok(vec![0.1; self.dimension])
    }
}

/// Embedder that always fails, to exercise upstream-error paths
pub struct FailingEmbedder;

#[async_trait]
impl Embedder for FailingEmbedder {
    async fn embed(&self, _text: &str) -> Result<Vec<f32>> {
        Err(MuseAiError::Upstream("embedding API down".to_string()))
    }
}

/// Item store returning a canned result list in store order
pub struct StaticStore {
    pub items: Vec<RetrievedItem>,
}

impl StaticStore {
    pub fn with_items(items: Vec<RetrievedItem>) -> Arc<Self> {
        Arc::new(Self { items })
    }

    pub fn empty() -> Arc<Self> {
        Arc::new(Self { items: Vec::new() })
    }
}

#[async_trait]
impl MuseItemStore for StaticStore {
    async fn similarity_search(
        &self,
        _query_embedding: &[f32],
        _user_id: &str,
        _threshold: f32,
        _limit: i64,
    ) -> Result<Vec<RetrievedItem>> {
        Ok(self.items.clone())
    }
}

/// Generator double: returns scripted output fields (or a scripted failure),
/// counting calls and capturing every input set it was given.
pub struct ScriptedGenerator {
    script: std::result::Result<Vec<(String, String)>, String>,
    calls: AtomicUsize,
    seen_inputs: Mutex<Vec<Vec<(String, String)>>>,
}

impl ScriptedGenerator {
    pub fn returning(fields: &[(&str, &str)]) -> Arc<Self> {
        Arc::new(Self {
            script: Ok(fields
                .iter()
                .map(|(n, v)| ((*n).to_string(), (*v).to_string()))
                .collect()),
            calls: AtomicUsize::new(0),
            seen_inputs: Mutex::new(Vec::new()),
        })
    }

    pub fn failing(message: &str) -> Arc<Self> {
        Arc::new(Self {
            script: Err(message.to_string()),
            calls: AtomicUsize::new(0),
            seen_inputs: Mutex::new(Vec::new()),
        })
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Value of one named input on the given call
    pub fn input_value(&self, call: usize, name: &str) -> Option<String> {
        self.seen_inputs
            .lock()
            .unwrap()
            .get(call)
            .and_then(|inputs| {
                inputs
                    .iter()
                    .find(|(n, _)| n == name)
                    .map(|(_, v)| v.clone())
            })
    }
}

#[async_trait]
impl Generator for ScriptedGenerator {
    async fn generate(
        &self,
        _signature: &Signature,
        _strategy: Strategy,
        inputs: &[(&str, String)],
    ) -> Result<Outputs> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.seen_inputs.lock().unwrap().push(
            inputs
                .iter()
                .map(|(n, v)| ((*n).to_string(), v.clone()))
                .collect(),
        );

        match &self.script {
            Ok(fields) => {
                let mut outputs = Outputs::new();
                for (name, value) in fields {
                    outputs.set(name, value);
                }
                Ok(outputs)
            }
            Err(message) => Err(MuseAiError::Upstream(message.clone())),
        }
    }
}

/// Conversation store that records saved turns
pub struct RecordingConversationStore {
    pub saved: Mutex<Vec<(String, String, String)>>,
}

impl RecordingConversationStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            saved: Mutex::new(Vec::new()),
        })
    }

    pub fn saved_turns(&self) -> Vec<(String, String, String)> {
        self.saved.lock().unwrap().clone()
    }
}

#[async_trait]
impl ConversationStore for RecordingConversationStore {
    async fn save_turns(
        &self,
        conversation_id: &str,
        user_message: &str,
        assistant_message: &str,
    ) -> Result<()> {
        self.saved.lock().unwrap().push((
            conversation_id.to_string(),
            user_message.to_string(),
            assistant_message.to_string(),
        ));
        Ok(())
    }
}

/// Conversation store whose writes always fail
pub struct FailingConversationStore;

#[async_trait]
impl ConversationStore for FailingConversationStore {
    async fn save_turns(&self, _: &str, _: &str, _: &str) -> Result<()> {
        Err(MuseAiError::Upstream("messages table unavailable".to_string()))
    }
}

/// Build a retrieved item with the given content and similarity score
pub fn retrieved_item(content: &str, similarity: f64) -> RetrievedItem {
    RetrievedItem {
        id: Uuid::new_v4(),
        user_id: Uuid::new_v4(),
        content: content.to_string(),
        content_type: "text".to_string(),
        description: None,
        ai_categories: None,
        created_at: Utc::now(),
        similarity,
    }
}
