use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Largest PDF accepted by the upload path, in bytes.
pub const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Longest question accepted, in characters.
pub const MAX_QUESTION_CHARS: usize = 1000;

/// A validated question, optionally grounded in previously extracted document text.
#[derive(Debug, Clone)]
pub struct ChatRequest {
    document_text: String,
    question: String,
}

impl ChatRequest {
    pub fn new(
        document_text: impl Into<String>,
        question: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let question = question.into();

        if question.trim().is_empty() {
            return Err(ValidationError::EmptyQuestion);
        }

        let length = question.chars().count();
        if length > MAX_QUESTION_CHARS {
            return Err(ValidationError::QuestionTooLong {
                max: MAX_QUESTION_CHARS,
                actual: length,
            });
        }

        Ok(Self {
            document_text: document_text.into(),
            question,
        })
    }

    /// A question with no document context.
    pub fn simple(question: impl Into<String>) -> Result<Self, ValidationError> {
        Self::new(String::new(), question)
    }

    pub fn document_text(&self) -> &str {
        &self.document_text
    }

    pub fn question(&self) -> &str {
        &self.question
    }

    pub fn has_document(&self) -> bool {
        !self.document_text.trim().is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatResult {
    answer_text: String,
    provider_used: String,
}

impl ChatResult {
    pub fn new(answer_text: impl Into<String>, provider_used: impl Into<String>) -> Self {
        Self {
            answer_text: answer_text.into(),
            provider_used: provider_used.into(),
        }
    }

    pub fn answer_text(&self) -> &str {
        &self.answer_text
    }

    pub fn provider_used(&self) -> &str {
        &self.provider_used
    }
}

#[derive(Debug, Clone)]
pub struct UploadResult {
    pub filename: String,
    pub byte_size: usize,
    pub extracted_text: String,
}

// OpenAI-compatible chat completion wire format, shared by both providers.

#[derive(Debug, Serialize, Deserialize)]
pub struct ChatCompletionRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub temperature: f32,
    pub max_tokens: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ChatCompletionResponse {
    pub choices: Vec<ChatCompletionChoice>,
}

#[derive(Debug, Deserialize)]
pub struct ChatCompletionChoice {
    pub message: ChatCompletionMessage,
}

#[derive(Debug, Deserialize)]
pub struct ChatCompletionMessage {
    #[serde(default)]
    pub content: Option<String>,
}
