use async_trait::async_trait;
use reqwest::Client;

use crate::config::ProviderConfig;
use crate::error::{ProviderError, ProviderFailure};
use crate::models::{ChatCompletionRequest, ChatCompletionResponse, ChatMessage};
use crate::prompt::truncate_chars;

/// Longest slice of a provider's error body kept in a [`ProviderFailure::Status`].
pub const MAX_ERROR_BODY_CHARS: usize = 500;

/// One chat-completion backend.
#[async_trait]
pub trait ChatProvider: Send + Sync {
    fn label(&self) -> &str;

    /// False when the provider has no API key; the orchestrator skips it without a call.
    fn is_configured(&self) -> bool;

    async fn complete(&self, system_prompt: &str, question: &str) -> Result<String, ProviderError>;
}

/// Calls an OpenAI-compatible `/chat/completions` endpoint. No retries.
pub struct ProviderClient {
    client: Client,
    config: ProviderConfig,
}

impl ProviderClient {
    pub fn new(config: ProviderConfig) -> Self {
        Self::with_client(Client::new(), config)
    }

    pub fn with_client(client: Client, config: ProviderConfig) -> Self {
        Self { client, config }
    }

    fn fail(&self, cause: ProviderFailure) -> ProviderError {
        ProviderError::new(self.config.label.clone(), cause)
    }
}

#[async_trait]
impl ChatProvider for ProviderClient {
    fn label(&self) -> &str {
        &self.config.label
    }

    fn is_configured(&self) -> bool {
        self.config.is_configured()
    }

    async fn complete(&self, system_prompt: &str, question: &str) -> Result<String, ProviderError> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .ok_or_else(|| self.fail(ProviderFailure::MissingApiKey))?;

        let request = ChatCompletionRequest {
            model: self.config.model.clone(),
            messages: vec![ChatMessage::system(system_prompt), ChatMessage::user(question)],
            temperature: self.config.temperature,
            max_tokens: self.config.max_tokens,
        };

        log::debug!(
            "Sending chat completion to {} (model {})",
            self.config.label,
            self.config.model
        );

        let response = self
            .client
            .post(self.config.completions_url())
            .bearer_auth(api_key)
            .timeout(self.config.timeout)
            .json(&request)
            .send()
            .await
            .map_err(|e| self.fail(transport_failure(e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(self.fail(ProviderFailure::Status {
                status: status.as_u16(),
                body: truncate_chars(&body, MAX_ERROR_BODY_CHARS).to_string(),
            }));
        }

        let completion: ChatCompletionResponse = response.json().await.map_err(|e| {
            if e.is_timeout() {
                self.fail(ProviderFailure::Timeout)
            } else {
                self.fail(ProviderFailure::MalformedResponse(e.to_string()))
            }
        })?;

        completion
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .filter(|content| !content.trim().is_empty())
            .ok_or_else(|| {
                self.fail(ProviderFailure::MalformedResponse(
                    "response contained no message content".to_string(),
                ))
            })
    }
}

fn transport_failure(error: reqwest::Error) -> ProviderFailure {
    if error.is_timeout() {
        ProviderFailure::Timeout
    } else {
        ProviderFailure::Transport(error.to_string())
    }
}
