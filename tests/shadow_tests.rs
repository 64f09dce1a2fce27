//! Orchestrator-level tests against test doubles

mod common;

use common::retrieved_item;
use common::FailingEmbedder;
use common::ScriptedGenerator;
use common::StaticEmbedder;
use common::StaticStore;
use museboard_ai::shadow::context::ITEM_CONTENT_BUDGET;
use museboard_ai::shadow::onboarding::fallback_content;
use museboard_ai::shadow::search::NO_MATCH_ANSWER;
use museboard_ai::shadow::ContentCurator;
use museboard_ai::shadow::InterestSuggester;
use museboard_ai::shadow::MissionEnhancer;
use museboard_ai::shadow::RagPipeline;
use museboard_ai::shadow::ShadowAgent;
use museboard_ai::MuseAiError;

#[tokio::test]
async fn search_with_zero_results_short_circuits_without_generation() {
    let generator = ScriptedGenerator::returning(&[("answer", "should never be used")]);
    let pipeline = RagPipeline::new(StaticEmbedder::new(), StaticStore::empty(), generator.clone());

    let result = pipeline.query("motivation", "u1").await.unwrap();

    assert_eq!(result.answer, NO_MATCH_ANSWER);
    assert!(result.sources.is_empty());
    assert_eq!(generator.call_count(), 0);
}

#[tokio::test]
async fn search_truncates_context_but_returns_full_sources() {
    let long_content = "m".repeat(ITEM_CONTENT_BUDGET + 300);
    let store = StaticStore::with_items(vec![retrieved_item(&long_content, 0.91)]);
    let generator = ScriptedGenerator::returning(&[("answer", "grounded answer")]);
    let pipeline = RagPipeline::new(StaticEmbedder::new(), store, generator.clone());

    let result = pipeline.query("what did I save?", "u1").await.unwrap();

    // The model saw a bounded block...
    let context = generator.input_value(0, "context").unwrap();
    let content_line = context.lines().find(|l| l.starts_with("Content: ")).unwrap();
    assert_eq!(content_line.len(), "Content: ".len() + ITEM_CONTENT_BUDGET);

    // ...while the caller still gets the untruncated record.
    assert_eq!(result.sources.len(), 1);
    assert_eq!(result.sources[0].content, long_content);
    assert_eq!(result.answer, "grounded answer");
}

#[tokio::test]
async fn search_preserves_store_ordering_in_sources() {
    let store = StaticStore::with_items(vec![
        retrieved_item("first", 0.82),
        retrieved_item("second", 0.75),
    ]);
    let generator = ScriptedGenerator::returning(&[("answer", "both items matter")]);
    let pipeline = RagPipeline::new(StaticEmbedder::new(), store, generator);

    let result = pipeline.query("motivation", "u1").await.unwrap();

    assert_eq!(result.sources.len(), 2);
    assert!(result.sources[0].similarity > result.sources[1].similarity);
    assert_eq!(result.sources[0].content, "first");
}

#[tokio::test]
async fn search_propagates_embedding_failure() {
    let generator = ScriptedGenerator::returning(&[("answer", "unreachable")]);
    let pipeline = RagPipeline::new(
        std::sync::Arc::new(FailingEmbedder),
        StaticStore::empty(),
        generator.clone(),
    );

    let err = pipeline.query("q", "u1").await.unwrap_err();
    assert!(matches!(err, MuseAiError::Upstream(_)));
    assert_eq!(generator.call_count(), 0);
}

#[tokio::test]
async fn chat_with_empty_context_makes_exactly_one_generation_call() {
    let generator = ScriptedGenerator::returning(&[("response", "Begin with one concrete step.")]);
    let agent = ShadowAgent::new(generator.clone());

    let response = agent
        .respond("Create art", "where do I start?", "User has 0 items. Recent themes: ", "")
        .await
        .unwrap();

    assert_eq!(response, "Begin with one concrete step.");
    assert_eq!(generator.call_count(), 1);

    // Empty history still yields a well-formed context block.
    let context = generator.input_value(0, "context").unwrap();
    assert!(context.starts_with("CONVERSATION HISTORY:\n"));
    assert!(context.contains("MUSEBOARD SUMMARY:\nUser has 0 items. Recent themes: "));
}

#[tokio::test]
async fn mission_enhancer_returns_refined_mission() {
    let generator =
        ScriptedGenerator::returning(&[("mission", "Create meaningful art that moves people")]);
    let enhancer = MissionEnhancer::new(generator);

    let mission = enhancer.enhance("Create art").await.unwrap();
    assert_eq!(mission, "Create meaningful art that moves people");
}

#[tokio::test]
async fn mission_enhancer_propagates_upstream_failure_for_caller_fallback() {
    let generator = ScriptedGenerator::failing("completion API down");
    let enhancer = MissionEnhancer::new(generator);

    let err = enhancer.enhance("Create art").await.unwrap_err();
    assert!(matches!(err, MuseAiError::Upstream(_)));
}

#[tokio::test]
async fn interest_suggester_parses_contract_json() {
    let json = r#"{
        "heroes": [{"name": "Mary Oliver", "reason": "Attention as devotion."}],
        "interests": [{"category": "Poetry", "description": "Language that moves people."}]
    }"#;
    let generator = ScriptedGenerator::returning(&[("suggestions_json", json)]);
    let suggester = InterestSuggester::new(generator);

    let suggestions = suggester.suggest("Create meaningful art").await.unwrap();
    assert_eq!(suggestions.heroes.len(), 1);
    assert_eq!(suggestions.heroes[0].name, "Mary Oliver");
    assert_eq!(suggestions.interests[0].category, "Poetry");
}

#[tokio::test]
async fn interest_suggester_flags_invalid_json_as_malformed_output() {
    let generator = ScriptedGenerator::returning(&[("suggestions_json", "here you go: {oops")]);
    let suggester = InterestSuggester::new(generator);

    let err = suggester.suggest("Create meaningful art").await.unwrap_err();
    assert!(matches!(err, MuseAiError::MalformedOutput(_)));
}

#[tokio::test]
async fn content_curator_uses_model_output_when_valid() {
    let json = r#"{
        "content": [{
            "type": "quote",
            "content": "Attention is the beginning of devotion.",
            "source": "Mary Oliver",
            "category": "Attention",
            "relevance_reason": "Noticing is the artist's raw material."
        }],
        "categories": ["Attention"]
    }"#;
    let generator = ScriptedGenerator::returning(&[("curated_json", json)]);
    let curator = ContentCurator::new(generator);

    let curated = curator.curate("Create meaningful art", &[], &[]).await;
    assert_eq!(curated.content.len(), 1);
    assert_eq!(curated.content[0].source, "Mary Oliver");
    assert_eq!(curated.categories, vec!["Attention"]);
}

#[tokio::test]
async fn content_curator_falls_back_to_library_on_model_failure() {
    let generator = ScriptedGenerator::failing("completion API down");
    let curator = ContentCurator::new(generator);

    let curated = curator.curate("Create meaningful art", &[], &[]).await;
    assert!(!curated.content.is_empty());
    assert_eq!(curated, fallback_content("Create meaningful art"));
}
