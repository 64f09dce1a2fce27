//! Chat-completion API client

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde::Serialize;
use tracing::debug;

use super::parse_outputs;
use super::render_system_prompt;
use super::render_user_prompt;
use super::Generator;
use super::Outputs;
use super::Signature;
use super::Strategy;
use crate::errors::MuseAiError;
use crate::errors::Result;

/// Client for an OpenAI-style chat-completion endpoint
pub struct LlmClient {
    client: Client,
    endpoint: String,
    api_key: String,
    model: String,
    max_tokens: usize,
}

impl LlmClient {
    /// Create a new completion client
    pub fn new(endpoint: String, api_key: String, model: String, max_tokens: usize) -> Result<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(120))
            .pool_max_idle_per_host(100)
            .pool_idle_timeout(std::time::Duration::from_secs(30))
            .build()
            .map_err(|e| MuseAiError::Http(e.to_string()))?;

        Ok(Self {
            client,
            endpoint,
            api_key,
            model,
            max_tokens,
        })
    }

    /// Create a client from application configuration
    pub fn from_config(config: &crate::config::AppConfig) -> Result<Self> {
        Self::new(
            config.llm_endpoint().to_string(),
            config.llm_key().to_string(),
            config.llm_model().to_string(),
            config.llm_max_tokens(),
        )
    }

    async fn chat_completion(&self, system: &str, user: &str) -> Result<String> {
        #[derive(Serialize)]
        struct ChatMessage<'a> {
            role: &'a str,
            content: &'a str,
        }

        #[derive(Serialize)]
        struct ChatRequest<'a> {
            model: &'a str,
            messages: [ChatMessage<'a>; 2],
            max_tokens: usize,
        }

        #[derive(Deserialize)]
        struct ChatResponse {
            choices: Vec<Choice>,
        }

        #[derive(Deserialize)]
        struct Choice {
            message: ResponseMessage,
        }

        #[derive(Deserialize)]
        struct ResponseMessage {
            content: Option<String>,
        }

        let url = format!("{}/chat/completions", self.endpoint);
        debug!("Calling chat completions API: {}", url);

        let request = ChatRequest {
            model: &self.model,
            messages: [
                ChatMessage {
                    role: "system",
                    content: system,
                },
                ChatMessage {
                    role: "user",
                    content: user,
                },
            ],
            max_tokens: self.max_tokens,
        };

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| MuseAiError::Upstream(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(MuseAiError::Upstream(format!(
                "Chat completions API error ({status}): {error_text}"
            )));
        }

        let result: ChatResponse = response
            .json()
            .await
            .map_err(|e| MuseAiError::Upstream(format!("Failed to parse response: {e}")))?;

        result
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or_else(|| MuseAiError::Upstream("No completion in response".to_string()))
    }
}

#[async_trait]
impl Generator for LlmClient {
    async fn generate(
        &self,
        signature: &Signature,
        strategy: Strategy,
        inputs: &[(&str, String)],
    ) -> Result<Outputs> {
        let system = render_system_prompt(signature, strategy);
        let user = render_user_prompt(signature, inputs);

        let completion = self.chat_completion(&system, &user).await?;

        Ok(parse_outputs(signature, strategy, &completion))
    }
}
