pub mod config;
pub mod document_processor;
pub mod error;
pub mod fallback_orchestrator;
pub mod models;
pub mod prompt;
pub mod provider_client;
#[cfg(any(test, feature = "test-util"))]
pub mod test_util;

pub use config::{AppConfig, ProviderConfig, TotalFailurePolicy};
pub use document_processor::DocumentProcessor;
pub use error::{
    AllProvidersUnavailableError, ChatError, ExtractionError, ProviderError, ProviderFailure,
    ValidationError,
};
pub use fallback_orchestrator::FallbackOrchestrator;
pub use models::*;
pub use provider_client::{ChatProvider, ProviderClient};
