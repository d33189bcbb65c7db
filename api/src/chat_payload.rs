use serde::Deserialize;

/// Body of `POST /api/chat`. Both field spellings used by existing clients are accepted.
#[derive(Debug, Deserialize)]
pub struct ChatPayload {
    #[serde(default, alias = "pdf_text")]
    pub document_text: String,
    #[serde(default, alias = "user_question")]
    pub question: String,
}

/// Body of `POST /api/chat/simple`.
#[derive(Debug, Deserialize)]
pub struct SimpleChatPayload {
    #[serde(default, alias = "user_question")]
    pub question: String,
}
