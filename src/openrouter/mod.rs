//! Minimal OpenRouter client. We only call chat completions plus two
//! cheap health probes; the API key is never logged.

use std::env;
use std::time::Duration;

use anyhow::Result;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use serde::{Deserialize, Serialize};
use tracing::info;

pub const DEFAULT_BASE_URL: &str = "https://openrouter.ai/api/v1";

/// Fixed cheap model used by the prompt health probe.
pub const HEALTH_PROBE_MODEL: &str = "openai/gpt-3.5-turbo";

const MODELS_PROBE_TIMEOUT: Duration = Duration::from_secs(5);
const PROMPT_PROBE_TIMEOUT: Duration = Duration::from_secs(15);

#[derive(Clone)]
pub struct OpenRouterClient {
    client: reqwest::Client,
    base_url: String,
}

impl OpenRouterClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(60))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    pub fn from_env() -> Result<Self> {
        let base_url =
            env::var("OPENROUTER_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        Self::new(base_url)
    }

    /// Single-turn chat completion with the composed prompt as the user
    /// message. Upstream error bodies are not propagated, only the status.
    pub async fn chat_completion(
        &self,
        api_key: &str,
        model: &str,
        prompt: &str,
    ) -> Result<ChatCompletionResponse> {
        let url = format!("{}/chat/completions", self.base_url);
        let request = ChatCompletionRequest {
            model: model.to_string(),
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: prompt.to_string(),
            }],
        };

        info!("Calling OpenRouter model {}", model);
        let response = self
            .client
            .post(&url)
            .header(CONTENT_TYPE, "application/json")
            .header(AUTHORIZATION, format!("Bearer {}", api_key))
            .json(&request)
            .send()
            .await
            .map_err(|e| anyhow::anyhow!("OpenRouter request failed: {}", e))?;

        if !response.status().is_success() {
            return Err(anyhow::anyhow!(
                "OpenRouter request failed with status: {}",
                response.status()
            ));
        }

        response
            .json()
            .await
            .map_err(|e| anyhow::anyhow!("Failed to read OpenRouter response: {}", e))
    }

    /// Reachability probe against the public models listing.
    pub async fn probe_models(&self) -> Result<()> {
        let url = format!("{}/models", self.base_url);
        let response = self
            .client
            .get(&url)
            .timeout(MODELS_PROBE_TIMEOUT)
            .send()
            .await
            .map_err(|e| anyhow::anyhow!("OpenRouter request failed: {}", e))?;

        if !response.status().is_success() {
            return Err(anyhow::anyhow!("Status {}", response.status()));
        }
        Ok(())
    }

    /// Round-trip probe: send one canned prompt and wait for any
    /// successful completion.
    pub async fn probe_prompt(&self, api_key: &str, model: &str, prompt: &str) -> Result<()> {
        let url = format!("{}/chat/completions", self.base_url);
        let request = ChatCompletionRequest {
            model: model.to_string(),
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: prompt.to_string(),
            }],
        };

        let response = self
            .client
            .post(&url)
            .header(CONTENT_TYPE, "application/json")
            .header(AUTHORIZATION, format!("Bearer {}", api_key))
            .timeout(PROMPT_PROBE_TIMEOUT)
            .json(&request)
            .send()
            .await
            .map_err(|e| anyhow::anyhow!("OpenRouter request failed: {}", e))?;

        if !response.status().is_success() {
            return Err(anyhow::anyhow!("Status {}", response.status()));
        }
        Ok(())
    }
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest {
    model: String,
    messages: Vec<ChatMessage>,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
pub struct ChatCompletionResponse {
    #[serde(default)]
    pub choices: Vec<ChatChoice>,
}

impl ChatCompletionResponse {
    pub fn first_content(&self) -> Option<&str> {
        self.choices
            .first()
            .and_then(|choice| choice.message.content.as_deref())
    }
}

#[derive(Debug, Deserialize)]
pub struct ChatChoice {
    pub message: ChatResponseMessage,
}

#[derive(Debug, Deserialize)]
pub struct ChatResponseMessage {
    pub content: Option<String>,
}
