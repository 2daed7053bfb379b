//! External generative-model provider
//!
//! Calls an OpenAI-compatible chat-completions endpoint. Honors the same
//! contract as the reference provider: a bounded time budget, with
//! timeouts surfaced as `Error::ProviderTimeout` and other failures as
//! `Error::Provider`, never a crash. Retry policy lives with the caller;
//! this client makes exactly one attempt per request.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use finisher_common::params::GenerationRequest;
use finisher_common::{Error, Result};

use crate::provider::LyricProvider;

const DEFAULT_ENDPOINT: &str = "https://api.openai.com/v1/chat/completions";
const DEFAULT_MODEL: &str = "gpt-3.5-turbo";
const USER_AGENT: &str = "TheFinisher/0.1.0";
const MAX_TOKENS: u32 = 300;
const TEMPERATURE: f32 = 0.8;

/// Chat-completions backed lyric provider
pub struct ExternalModelProvider {
    http_client: reqwest::Client,
    endpoint: String,
    api_key: String,
    model: String,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 1],
    max_tokens: u32,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ChatResponseMessage {
    content: String,
}

impl ExternalModelProvider {
    /// Create a provider with a bounded request time budget
    pub fn new(
        endpoint: Option<String>,
        api_key: String,
        model: Option<String>,
        timeout: Duration,
    ) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()
            .map_err(|e| Error::Provider(e.to_string()))?;

        Ok(Self {
            http_client,
            endpoint: endpoint.unwrap_or_else(|| DEFAULT_ENDPOINT.to_string()),
            api_key,
            model: model.unwrap_or_else(|| DEFAULT_MODEL.to_string()),
        })
    }

    fn build_prompt(request: &GenerationRequest) -> String {
        format!(
            "Write lyrics in the style of {} at {} bpm with a {} mood about {}. Keep it 8-16 lines.",
            request.genre, request.bpm, request.mood, request.theme
        )
    }
}

#[async_trait]
impl LyricProvider for ExternalModelProvider {
    fn name(&self) -> &'static str {
        "external"
    }

    async fn generate(&self, request: &GenerationRequest) -> Result<String> {
        let prompt = Self::build_prompt(request);
        let body = ChatRequest {
            model: &self.model,
            messages: [ChatMessage {
                role: "user",
                content: &prompt,
            }],
            max_tokens: MAX_TOKENS,
            temperature: TEMPERATURE,
        };

        tracing::debug!(model = %self.model, "Querying external lyric model");

        let response = self
            .http_client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    Error::ProviderTimeout(e.to_string())
                } else {
                    Error::Provider(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(Error::Provider(format!(
                "model endpoint returned {}: {}",
                status, error_text
            )));
        }

        let chat: ChatResponse = response
            .json()
            .await
            .map_err(|e| Error::Provider(format!("invalid model response: {}", e)))?;

        chat.choices
            .first()
            .map(|choice| choice.message.content.trim().to_string())
            .filter(|lyrics| !lyrics.is_empty())
            .ok_or_else(|| Error::Provider("model returned no lyrics".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_includes_all_parameters() {
        let request = GenerationRequest {
            genre: "hip-hop".to_string(),
            bpm: 90,
            mood: "energetic".to_string(),
            theme: "love".to_string(),
        };
        let prompt = ExternalModelProvider::build_prompt(&request);
        assert!(prompt.contains("hip-hop"));
        assert!(prompt.contains("90 bpm"));
        assert!(prompt.contains("energetic"));
        assert!(prompt.contains("love"));
    }

    #[test]
    fn defaults_applied_when_unset() {
        let provider = ExternalModelProvider::new(
            None,
            "sk-test".to_string(),
            None,
            Duration::from_secs(10),
        )
        .unwrap();
        assert_eq!(provider.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(provider.model, DEFAULT_MODEL);
        assert_eq!(provider.name(), "external");
    }
}
