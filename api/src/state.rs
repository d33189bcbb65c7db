use std::sync::Arc;

use assistant_core::{AppConfig, DocumentProcessor, FallbackOrchestrator};

/// Shared, read-only state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub orchestrator: Arc<FallbackOrchestrator>,
    pub document_processor: DocumentProcessor,
}

impl AppState {
    pub fn new(orchestrator: FallbackOrchestrator, document_processor: DocumentProcessor) -> Self {
        Self {
            orchestrator: Arc::new(orchestrator),
            document_processor,
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(
            FallbackOrchestrator::from_config(config),
            DocumentProcessor::new(),
        )
    }
}
