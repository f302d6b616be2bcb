use crate::constants::{defaults, endpoints, models};
use crate::error::StylistError;
use crate::llm::traits::*;
use serde::{Deserialize, Serialize};

pub struct OpenAIClient {
    client: reqwest::Client,
    api_key: String,
    model: String,
    base_url: String,
    max_tokens: u32,
}

impl OpenAIClient {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key: api_key.into(),
            model: models::DEFAULT_MODEL.to_string(),
            base_url: endpoints::OPENAI_BASE_URL.to_string(),
            max_tokens: defaults::MAX_TOKENS,
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    /// Replace the underlying HTTP client (proxy, TLS or timeout settings).
    pub fn with_http_client(mut self, client: reqwest::Client) -> Self {
        self.client = client;
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn max_tokens(&self) -> u32 {
        self.max_tokens
    }

    pub fn endpoint(&self) -> String {
        format!(
            "{}{}",
            self.base_url.trim_end_matches('/'),
            endpoints::CHAT_COMPLETIONS_PATH
        )
    }
}

#[derive(Debug, Serialize)]
struct OpenAIRequest<'a> {
    model: &'a str,
    messages: &'a [ChatTurn],
    max_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct OpenAIResponse {
    #[serde(default)]
    choices: Vec<OpenAIChoice>,
}

#[derive(Debug, Deserialize)]
struct OpenAIChoice {
    message: OpenAIMessage,
}

#[derive(Debug, Deserialize)]
struct OpenAIMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OpenAIErrorEnvelope {
    error: OpenAIErrorBody,
}

#[derive(Debug, Deserialize)]
struct OpenAIErrorBody {
    message: String,
}

/// Prefer the provider's `{"error": {"message": ..}}` text over the raw body.
fn error_message(body: &str) -> String {
    serde_json::from_str::<OpenAIErrorEnvelope>(body)
        .map(|envelope| envelope.error.message)
        .unwrap_or_else(|_| body.to_string())
}

fn extract_content(body: &str) -> Result<String, StylistError> {
    let api_response: OpenAIResponse = serde_json::from_str(body)?;

    api_response
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .ok_or_else(|| StylistError::Llm("No content in API response".into()))
}

#[async_trait::async_trait]
impl CompletionClient for OpenAIClient {
    async fn complete(&self, turns: &[ChatTurn]) -> Result<String, StylistError> {
        let url = self.endpoint();

        let request_body = OpenAIRequest {
            model: &self.model,
            messages: turns,
            max_tokens: self.max_tokens,
        };

        tracing::debug!(
            model = %self.model,
            turns = turns.len(),
            "Sending chat completion request"
        );

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();
        let response_text = response.text().await?;

        if !status.is_success() {
            return Err(StylistError::Llm(format!(
                "OpenAI API error ({}): {}",
                status,
                error_message(&response_text)
            )));
        }

        extract_content(&response_text)
    }
}
