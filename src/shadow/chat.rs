//! Shadow chat agent
//!
//! One generation call per invocation. All memory comes from the caller:
//! the mission, a summary of recent activity, and the prior transcript are
//! supplied per request, so the agent itself stays stateless across calls.

use std::sync::Arc;

use tracing::debug;

use crate::llm::FieldSpec;
use crate::llm::Generator;
use crate::llm::Signature;
use crate::llm::Strategy;
use crate::models::AiMessage;
use crate::Result;

const SHADOW_RESPONSE: Signature = Signature {
    instruction: "Act as Shadow, an AI thinking partner. Your tone must be deterministic, \
        focused, and precise. Avoid conversational fillers or speculation. Provide direct, \
        actionable insights.\n\nGiven the user's mission, their recent activity, and their \
        latest message, generate a helpful response.",
    inputs: &[
        FieldSpec {
            name: "mission",
            desc: "The user's overarching personal mission statement.",
        },
        FieldSpec {
            name: "context",
            desc: "A summary of the user's recent Museboard items and conversation history.",
        },
        FieldSpec {
            name: "question",
            desc: "The user's most recent message to Shadow.",
        },
    ],
    outputs: &[FieldSpec {
        name: "response",
        desc: "A concise and focused response from Shadow that is directly helpful.",
    }],
};

/// Chat orchestrator for the Shadow persona
pub struct ShadowAgent {
    generator: Arc<dyn Generator>,
}

impl ShadowAgent {
    pub fn new(generator: Arc<dyn Generator>) -> Self {
        Self { generator }
    }

    /// Generate one Shadow reply from the caller-supplied context.
    pub async fn respond(
        &self,
        mission: &str,
        question: &str,
        recent_items_summary: &str,
        history_summary: &str,
    ) -> Result<String> {
        // Synthesize the context into a more digestible format for the model
        let context = format!(
            "CONVERSATION HISTORY:\n{history_summary}\n\nMUSEBOARD SUMMARY:\n{recent_items_summary}"
        );

        debug!("Generating Shadow response");
        let outputs = self
            .generator
            .generate(
                &SHADOW_RESPONSE,
                Strategy::ReasonFirst,
                &[
                    ("mission", mission.to_string()),
                    ("context", context),
                    ("question", question.to_string()),
                ],
            )
            .await?;

        Ok(outputs.require("response")?.to_string())
    }
}

/// One `role: content` line per prior turn. Empty history yields an empty
/// string, which is still a well-formed transcript.
#[must_use]
pub fn history_summary(history: &[AiMessage]) -> String {
    history
        .iter()
        .map(|msg| format!("{}: {}", msg.role, msg.content))
        .collect::<Vec<_>>()
        .join("\n")
}

/// One-line summary of the user's board for the chat prompt
#[must_use]
pub fn museboard_summary(total_items: i64, top_categories: &[String]) -> String {
    format!(
        "User has {} items. Recent themes: {}",
        total_items,
        top_categories.join(", ")
    )
}
