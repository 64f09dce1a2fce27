//! Structured prompt/response exchange with a chat-completion API
//!
//! An orchestrator describes what it wants as a [`Signature`]: a natural-
//! language instruction plus named, described input and output fields. The
//! client renders that into the wrapped API's own prompt format and parses
//! the labeled output fields back out, keeping orchestration logic
//! backend-agnostic.

pub mod client;

pub use client::LlmClient;

use std::collections::HashMap;

use async_trait::async_trait;

use crate::errors::MuseAiError;
use crate::errors::Result;

/// A named, described prompt field
#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    pub name: &'static str,
    pub desc: &'static str,
}

/// Declarative description of one generation exchange: instruction plus
/// labeled input and output fields.
#[derive(Debug, Clone, Copy)]
pub struct Signature {
    pub instruction: &'static str,
    pub inputs: &'static [FieldSpec],
    pub outputs: &'static [FieldSpec],
}

/// How the model is asked to produce its outputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// Ask for the output fields directly. Used where extra prose would
    /// contaminate a strict parse (JSON suggestion generation).
    Direct,
    /// Ask for a `Reasoning` field before the output fields. Used wherever
    /// answer quality benefits from explicit intermediate reasoning (chat,
    /// search synthesis, mission crafting).
    ReasonFirst,
}

const REASONING_FIELD: FieldSpec = FieldSpec {
    name: "reasoning",
    desc: "Think step by step to work out the output fields.",
};

/// Labeled output fields parsed from a completion
#[derive(Debug, Clone, Default)]
pub struct Outputs {
    fields: HashMap<String, String>,
}

impl Outputs {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.fields.insert(name.into(), value.into());
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    /// Get a field the caller cannot proceed without. A missing field means
    /// the model ignored the format contract.
    pub fn require(&self, name: &str) -> Result<&str> {
        self.get(name).ok_or_else(|| {
            MuseAiError::MalformedOutput(format!("output field `{name}` missing from completion"))
        })
    }
}

/// One structured generation call against a completion API.
#[async_trait]
pub trait Generator: Send + Sync {
    async fn generate(
        &self,
        signature: &Signature,
        strategy: Strategy,
        inputs: &[(&str, String)],
    ) -> Result<Outputs>;
}

/// Human-readable label for a field name: `suggestions_json` -> `Suggestions Json`
fn field_label(name: &str) -> String {
    name.split('_')
        .filter(|w| !w.is_empty())
        .map(|w| {
            let mut chars = w.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Output fields the model is asked to fill, in order, for a given strategy
fn response_fields(signature: &Signature, strategy: Strategy) -> Vec<FieldSpec> {
    let mut fields = Vec::with_capacity(signature.outputs.len() + 1);
    if strategy == Strategy::ReasonFirst {
        fields.push(REASONING_FIELD);
    }
    fields.extend_from_slice(signature.outputs);
    fields
}

/// Render the system message: instruction plus the field format contract
#[must_use]
pub fn render_system_prompt(signature: &Signature, strategy: Strategy) -> String {
    let mut prompt = String::from(signature.instruction);

    prompt.push_str("\n\nYou will be given the following input fields:\n");
    for field in signature.inputs {
        prompt.push_str(&format!("- {}: {}\n", field_label(field.name), field.desc));
    }

    prompt.push_str("\nRespond using exactly this format, filling in every field:\n");
    for field in response_fields(signature, strategy) {
        prompt.push_str(&format!("{}: {}\n", field_label(field.name), field.desc));
    }

    prompt
}

/// Render the user message: the filled-in input fields
#[must_use]
pub fn render_user_prompt(signature: &Signature, inputs: &[(&str, String)]) -> String {
    let mut prompt = String::new();
    for field in signature.inputs {
        let value = inputs
            .iter()
            .find(|(name, _)| *name == field.name)
            .map_or("", |(_, value)| value.as_str());
        prompt.push_str(&format!("{}: {}\n\n", field_label(field.name), value));
    }
    prompt.push_str("Produce the output fields now.");
    prompt
}

/// Parse labeled output fields back out of a completion.
///
/// When the signature has exactly one output field and the completion carries
/// no labels at all, the whole completion is taken as that field's value.
#[must_use]
pub fn parse_outputs(signature: &Signature, strategy: Strategy, completion: &str) -> Outputs {
    let fields = response_fields(signature, strategy);
    let labels: Vec<(String, &'static str)> = fields
        .iter()
        .map(|f| (field_label(f.name).to_lowercase() + ":", f.name))
        .collect();

    let mut outputs = Outputs::new();
    let mut current: Option<(&'static str, String)> = None;
    let mut any_label_seen = false;

    for line in completion.lines() {
        let lowered = line.trim_start().to_lowercase();
        let matched = labels
            .iter()
            .find(|(label, _)| lowered.starts_with(label.as_str()));

        if let Some((label, name)) = matched {
            any_label_seen = true;
            if let Some((prev_name, value)) = current.take() {
                outputs.set(prev_name, value.trim());
            }
            let trimmed = line.trim_start();
            let rest = trimmed
                .char_indices()
                .nth(label.chars().count())
                .map_or("", |(idx, _)| &trimmed[idx..]);
            current = Some((*name, rest.trim_start().to_string()));
        } else if let Some((_, value)) = current.as_mut() {
            if !value.is_empty() {
                value.push('\n');
            }
            value.push_str(line);
        }
    }

    if let Some((name, value)) = current.take() {
        outputs.set(name, value.trim());
    }

    if !any_label_seen && signature.outputs.len() == 1 {
        outputs.set(signature.outputs[0].name, completion.trim());
    }

    outputs
}
