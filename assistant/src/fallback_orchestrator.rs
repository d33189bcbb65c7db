use std::sync::Arc;

use crate::config::{AppConfig, TotalFailurePolicy};
use crate::error::{AllProvidersUnavailableError, ChatError, ProviderError, ProviderFailure};
use crate::models::{ChatRequest, ChatResult};
use crate::prompt::build_system_prompt;
use crate::provider_client::{ChatProvider, ProviderClient};

pub const APOLOGY_MESSAGE: &str = "I apologize, but I'm currently unable to process your request. Please check your API configuration and try again.";
pub const NO_PROVIDER_LABEL: &str = "none";

/// Tries the primary provider, then the secondary. Calls are strictly sequential.
pub struct FallbackOrchestrator {
    primary: Arc<dyn ChatProvider>,
    secondary: Arc<dyn ChatProvider>,
    document_char_budget: usize,
    on_total_failure: TotalFailurePolicy,
}

impl FallbackOrchestrator {
    pub fn new(
        primary: Arc<dyn ChatProvider>,
        secondary: Arc<dyn ChatProvider>,
        document_char_budget: usize,
        on_total_failure: TotalFailurePolicy,
    ) -> Self {
        Self {
            primary,
            secondary,
            document_char_budget,
            on_total_failure,
        }
    }

    /// Wires both HTTP provider clients from configuration, sharing one connection pool.
    pub fn from_config(config: &AppConfig) -> Self {
        let client = reqwest::Client::new();
        let primary = ProviderClient::with_client(client.clone(), config.primary.clone());
        let secondary = ProviderClient::with_client(client, config.secondary.clone());

        Self::new(
            Arc::new(primary),
            Arc::new(secondary),
            config.document_char_budget,
            config.on_total_failure,
        )
    }

    pub fn document_char_budget(&self) -> usize {
        self.document_char_budget
    }

    pub async fn respond(&self, request: &ChatRequest) -> Result<ChatResult, ChatError> {
        let system_prompt = build_system_prompt(request.document_text(), self.document_char_budget);

        let primary_error = match attempt(self.primary.as_ref(), &system_prompt, request.question()).await {
            Ok(answer) => return Ok(ChatResult::new(answer, self.primary.label())),
            Err(e) => e,
        };

        let secondary_error = match attempt(self.secondary.as_ref(), &system_prompt, request.question()).await {
            Ok(answer) => {
                log::info!(
                    "Answered by fallback provider {} after {}",
                    self.secondary.label(),
                    primary_error
                );
                return Ok(ChatResult::new(answer, self.secondary.label()));
            }
            Err(e) => e,
        };

        let failure = AllProvidersUnavailableError {
            primary: primary_error,
            secondary: secondary_error,
        };
        log::error!("{}", failure);

        match self.on_total_failure {
            TotalFailurePolicy::Raise => Err(failure.into()),
            TotalFailurePolicy::Apologize => Ok(ChatResult::new(APOLOGY_MESSAGE, NO_PROVIDER_LABEL)),
        }
    }
}

async fn attempt(
    provider: &dyn ChatProvider,
    system_prompt: &str,
    question: &str,
) -> Result<String, ProviderError> {
    if !provider.is_configured() {
        log::warn!("Provider {} is not configured, skipping", provider.label());
        return Err(ProviderError::new(provider.label(), ProviderFailure::MissingApiKey));
    }

    provider.complete(system_prompt, question).await.map_err(|e| {
        log::warn!("Provider call failed: {}", e);
        e
    })
}
