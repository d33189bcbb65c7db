use std::fmt;

/// Input the caller can fix: bad shape, bad size, bad type.
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("Question cannot be empty.")]
    EmptyQuestion,
    #[error("Question is too long: {actual} characters (maximum {max}).")]
    QuestionTooLong { max: usize, actual: usize },
    #[error("Invalid file type. Only PDF files are allowed.")]
    UnsupportedFileType(String),
    #[error("File too large. Maximum size allowed is {}MB.", .limit / (1024 * 1024))]
    FileTooLarge { limit: usize },
    #[error("No file uploaded.")]
    MissingFile,
    #[error("Malformed request: {0}")]
    MalformedBody(String),
}

#[derive(Debug, thiserror::Error)]
pub enum ExtractionError {
    #[error("Failed to parse PDF: {0}")]
    Unparseable(String),
    #[error("No text could be extracted from the PDF. The file might be corrupted or contain only images.")]
    NoText,
    #[error("Error processing PDF: {0}")]
    Failed(String),
}

/// Why a single provider call did not produce an answer.
#[derive(Debug, thiserror::Error)]
pub enum ProviderFailure {
    #[error("not configured (missing API key)")]
    MissingApiKey,
    #[error("request timed out")]
    Timeout,
    #[error("request failed: {0}")]
    Transport(String),
    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },
    #[error("malformed response: {0}")]
    MalformedResponse(String),
}

#[derive(Debug, thiserror::Error)]
#[error("{provider}: {cause}")]
pub struct ProviderError {
    pub provider: String,
    #[source]
    pub cause: ProviderFailure,
}

impl ProviderError {
    pub fn new(provider: impl Into<String>, cause: ProviderFailure) -> Self {
        Self {
            provider: provider.into(),
            cause,
        }
    }
}

/// Neither provider produced an answer. Carries the reason for each attempt.
#[derive(Debug)]
pub struct AllProvidersUnavailableError {
    pub primary: ProviderError,
    pub secondary: ProviderError,
}

impl fmt::Display for AllProvidersUnavailableError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "All AI providers are unavailable ({}; {})",
            self.primary, self.secondary
        )
    }
}

impl std::error::Error for AllProvidersUnavailableError {}

/// Failure of one chat turn through the orchestrator.
#[derive(Debug, thiserror::Error)]
pub enum ChatError {
    #[error(transparent)]
    AllProvidersUnavailable(#[from] AllProvidersUnavailableError),
}
