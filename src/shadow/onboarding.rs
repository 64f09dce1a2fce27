//! Onboarding orchestrators: mission enhancement, interest suggestions, and
//! starter-content curation
//!
//! All three are single-shot prompt-and-parse flows with no retrieval step.

use std::sync::Arc;

use serde::Deserialize;
use serde::Serialize;
use tracing::debug;
use tracing::warn;

use crate::errors::MuseAiError;
use crate::llm::FieldSpec;
use crate::llm::Generator;
use crate::llm::Signature;
use crate::llm::Strategy;
use crate::Result;

const ENHANCE_MISSION: Signature = Signature {
    instruction: "You are Shadow, an AI muse for MuseboardLM. Your job is to take a user's raw \
        input about their goals/dreams and craft it into a clear, inspiring mission statement.\n\n\
        Rules:\n\
        - Keep it under 20 words when possible\n\
        - Make it inspiring and personal\n\
        - Focus on the outcome/impact they want to create\n\
        - Use active language\n\
        - If their input is already clear, you can return it with minor refinements\n\
        - If it's vague, ask ONE clarifying question max and then enhance based on what they \
        gave you\n\n\
        Examples:\n\
        Input: \"Help solo founders succeed\" -> Mission: \"Help solo founders build profitable \
        products\"\n\
        Input: \"I want to be a better leader\" -> Mission: \"Become a leader who inspires teams \
        to achieve extraordinary results\"\n\
        Input: \"Create art\" -> Mission: \"Create meaningful art that moves people and sparks \
        conversations\"",
    inputs: &[FieldSpec {
        name: "user_input",
        desc: "The user's raw input about their goals/mission.",
    }],
    outputs: &[FieldSpec {
        name: "mission",
        desc: "A refined, inspiring mission statement under 20 words.",
    }],
};

/// Refines a raw goal statement into a concise mission.
///
/// Enhancement is best-effort: the serving layer falls back to the original
/// input when this fails, so errors here never block the caller.
pub struct MissionEnhancer {
    generator: Arc<dyn Generator>,
}

impl MissionEnhancer {
    pub fn new(generator: Arc<dyn Generator>) -> Self {
        Self { generator }
    }

    pub async fn enhance(&self, user_input: &str) -> Result<String> {
        debug!("Enhancing mission statement");
        let outputs = self
            .generator
            .generate(
                &ENHANCE_MISSION,
                Strategy::ReasonFirst,
                &[("user_input", user_input.to_string())],
            )
            .await?;

        Ok(outputs.require("mission")?.to_string())
    }
}

const SUGGEST_INTERESTS: Signature = Signature {
    instruction: "Analyze the user's mission statement. Generate a list of 8-10 inspiring \
        figures (heroes) and 5-6 broad interest categories relevant to this mission.\n\n\
        You MUST format your entire response as a single, valid JSON object, structured exactly \
        like this:\n\
        {\n\
          \"heroes\": [\n\
            {\"name\": \"Person Name\", \"reason\": \"A brief explanation of why they are \
        relevant.\"},\n\
            ...\n\
          ],\n\
          \"interests\": [\n\
            {\"category\": \"Category Name\", \"description\": \"A brief explanation of its \
        relevance.\"},\n\
            ...\n\
          ]\n\
        }\n\n\
        Ensure the JSON is perfectly formed. Do not include any text, explanations, or markdown \
        backticks outside of the JSON object itself.",
    inputs: &[FieldSpec {
        name: "mission_statement",
        desc: "The user's refined mission statement.",
    }],
    outputs: &[FieldSpec {
        name: "suggestions_json",
        desc: "A single, valid JSON object containing lists of suggested heroes and interests.",
    }],
};

/// A suggested role model
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct HeroSuggestion {
    pub name: String,
    pub reason: String,
}

/// A suggested interest category
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct InterestSuggestion {
    pub category: String,
    pub description: String,
}

/// Parsed suggestion payload
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct InterestSuggestions {
    pub heroes: Vec<HeroSuggestion>,
    pub interests: Vec<InterestSuggestion>,
}

/// Suggests heroes and interest categories for a mission.
///
/// The model is held to a strict emit-only-JSON contract; a violation is an
/// upstream fault surfaced as [`MuseAiError::MalformedOutput`], not repaired
/// or retried here.
pub struct InterestSuggester {
    generator: Arc<dyn Generator>,
}

impl InterestSuggester {
    pub fn new(generator: Arc<dyn Generator>) -> Self {
        Self { generator }
    }

    pub async fn suggest(&self, mission: &str) -> Result<InterestSuggestions> {
        debug!("Suggesting heroes and interests");
        let outputs = self
            .generator
            .generate(
                &SUGGEST_INTERESTS,
                Strategy::Direct,
                &[("mission_statement", mission.to_string())],
            )
            .await?;

        let raw = outputs.require("suggestions_json")?;

        serde_json::from_str(raw).map_err(|e| {
            MuseAiError::MalformedOutput(format!("suggestions JSON failed to decode: {e}"))
        })
    }
}

const CURATE_CONTENT: Signature = Signature {
    instruction: "Create 10-15 pieces of inspirational content that would perfectly fit the \
        user's Museboard. Include quotes, insights, principles, and actionable advice from \
        their heroes or related to their interests. Make these deeply relevant and \
        inspirational - content they'd genuinely want to remember and revisit.\n\n\
        You MUST format your entire response as a single, valid JSON object, structured exactly \
        like this:\n\
        {\n\
          \"content\": [\n\
            {\n\
              \"type\": \"quote\",\n\
              \"content\": \"The actual quote or insight\",\n\
              \"source\": \"Who said it or where it's from\",\n\
              \"category\": \"Suggested category\",\n\
              \"relevance_reason\": \"Why this matters for their mission\"\n\
            },\n\
            ...\n\
          ],\n\
          \"categories\": [\"List of suggested categories for organization\"]\n\
        }\n\n\
        Do not include any text, explanations, or markdown backticks outside of the JSON object \
        itself.",
    inputs: &[
        FieldSpec {
            name: "mission",
            desc: "User's mission statement.",
        },
        FieldSpec {
            name: "heroes",
            desc: "List of their selected heroes.",
        },
        FieldSpec {
            name: "interests",
            desc: "List of their selected interests.",
        },
    ],
    outputs: &[FieldSpec {
        name: "curated_json",
        desc: "A single, valid JSON object containing curated content pieces and categories.",
    }],
};

/// One curated content piece
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CuratedPiece {
    #[serde(rename = "type")]
    pub kind: String,
    pub content: String,
    pub source: String,
    pub category: String,
    pub relevance_reason: String,
}

/// Curated starter content plus suggested organizing categories
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CuratedContent {
    pub content: Vec<CuratedPiece>,
    pub categories: Vec<String>,
}

/// Curates starter content for a new user's board.
///
/// Model-backed when the completion API cooperates; otherwise degrades to a
/// deterministic built-in library selected by keyword matching against the
/// mission text, so onboarding never stalls on an upstream outage.
pub struct ContentCurator {
    generator: Arc<dyn Generator>,
}

impl ContentCurator {
    pub fn new(generator: Arc<dyn Generator>) -> Self {
        Self { generator }
    }

    pub async fn curate(
        &self,
        mission: &str,
        heroes: &[String],
        interests: &[String],
    ) -> CuratedContent {
        match self.curate_with_model(mission, heroes, interests).await {
            Ok(curated) => curated,
            Err(e) => {
                warn!("Content curation model call failed, using fallback content: {e}");
                fallback_content(mission)
            }
        }
    }

    async fn curate_with_model(
        &self,
        mission: &str,
        heroes: &[String],
        interests: &[String],
    ) -> Result<CuratedContent> {
        debug!("Curating starter content");
        let outputs = self
            .generator
            .generate(
                &CURATE_CONTENT,
                Strategy::Direct,
                &[
                    ("mission", mission.to_string()),
                    ("heroes", heroes.join(", ")),
                    ("interests", interests.join(", ")),
                ],
            )
            .await?;

        let raw = outputs.require("curated_json")?;

        serde_json::from_str(raw).map_err(|e| {
            MuseAiError::MalformedOutput(format!("curated content JSON failed to decode: {e}"))
        })
    }
}

struct FallbackEntry {
    keywords: &'static [&'static str],
    content: &'static str,
    source: &'static str,
    category: &'static str,
    relevance_reason: &'static str,
}

/// Built-in curated library used when the model path is unavailable
const FALLBACK_LIBRARY: &[FallbackEntry] = &[
    FallbackEntry {
        keywords: &["start", "begin", "action", "build", "launch", "ship"],
        content: "The way to get started is to quit talking and begin doing.",
        source: "Walt Disney",
        category: "Action",
        relevance_reason: "Emphasizes the importance of taking action toward your mission",
    },
    FallbackEntry {
        keywords: &["fail", "success", "persist", "courage", "overcome", "resilien"],
        content: "Success is not final, failure is not fatal: it is the courage to continue that counts.",
        source: "Winston Churchill",
        category: "Resilience",
        relevance_reason: "Reminds us that persistence is key to achieving our mission",
    },
    FallbackEntry {
        keywords: &["love", "passion", "work", "great", "art", "create"],
        content: "The only way to do great work is to love what you do.",
        source: "Steve Jobs",
        category: "Passion",
        relevance_reason: "Aligns passion with purpose in pursuit of your goals",
    },
    FallbackEntry {
        keywords: &["innovat", "lead", "invent", "technolog", "new"],
        content: "Innovation distinguishes between a leader and a follower.",
        source: "Steve Jobs",
        category: "Innovation",
        relevance_reason: "Highlights the value of creative thinking and leadership",
    },
    FallbackEntry {
        keywords: &["focus", "productiv", "time", "busy", "habit"],
        content: "Focus on being productive instead of busy.",
        source: "Tim Ferriss",
        category: "Productivity",
        relevance_reason: "Helps maintain focus on what truly matters for your mission",
    },
];

/// Deterministic content selection keyed by keyword matching against the
/// mission text. Entries with a keyword hit are preferred; with no hits at
/// all, the whole library is returned so the board never starts empty.
#[must_use]
pub fn fallback_content(mission: &str) -> CuratedContent {
    let mission_lower = mission.to_lowercase();

    let matched: Vec<&FallbackEntry> = FALLBACK_LIBRARY
        .iter()
        .filter(|entry| entry.keywords.iter().any(|kw| mission_lower.contains(kw)))
        .collect();

    let selected: Vec<&FallbackEntry> = if matched.is_empty() {
        FALLBACK_LIBRARY.iter().collect()
    } else {
        matched
    };

    let content: Vec<CuratedPiece> = selected
        .iter()
        .map(|entry| CuratedPiece {
            kind: "quote".to_string(),
            content: entry.content.to_string(),
            source: entry.source.to_string(),
            category: entry.category.to_string(),
            relevance_reason: entry.relevance_reason.to_string(),
        })
        .collect();

    let mut categories: Vec<String> = Vec::new();
    for entry in &selected {
        if !categories.iter().any(|c| c == entry.category) {
            categories.push(entry.category.to_string());
        }
    }

    CuratedContent {
        content,
        categories,
    }
}
