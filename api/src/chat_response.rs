use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub success: bool,
    pub response: String,
    pub model_used: String,
    pub has_pdf_context: bool,
}

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub success: bool,
    pub filename: String,
    pub file_size: usize,
    pub text_length: usize,
    pub extracted_text: String,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
}

#[derive(Debug, Serialize)]
pub struct RootResponse {
    pub message: &'static str,
    pub version: &'static str,
    pub endpoints: Endpoints,
}

#[derive(Debug, Serialize)]
pub struct Endpoints {
    pub upload: &'static str,
    pub chat: &'static str,
    pub chat_simple: &'static str,
    pub health: &'static str,
}
