use assistant_core::prompt::truncate_chars;
use assistant_core::{ChatRequest, ValidationError};
use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use uuid::Uuid;

use crate::chat_payload::{ChatPayload, SimpleChatPayload};
use crate::chat_response::ChatResponse;
use crate::error::ApiError;
use crate::state::AppState;

pub async fn chat_handler(
    State(state): State<AppState>,
    payload: Result<Json<ChatPayload>, JsonRejection>,
) -> Result<Json<ChatResponse>, ApiError> {
    let Json(payload) = payload.map_err(malformed)?;
    let request = ChatRequest::new(payload.document_text, payload.question)?;

    answer(&state, request).await
}

/// Same as [`chat_handler`] but never carries document context.
pub async fn simple_chat_handler(
    State(state): State<AppState>,
    payload: Result<Json<SimpleChatPayload>, JsonRejection>,
) -> Result<Json<ChatResponse>, ApiError> {
    let Json(payload) = payload.map_err(malformed)?;
    let request = ChatRequest::simple(payload.question)?;

    answer(&state, request).await
}

async fn answer(state: &AppState, request: ChatRequest) -> Result<Json<ChatResponse>, ApiError> {
    let request_id = Uuid::new_v4();
    let budget = state.orchestrator.document_char_budget();
    log::info!(
        "[{}] Processing chat request with document text length: {}, question length: {}",
        request_id,
        truncate_chars(request.document_text(), budget).chars().count(),
        request.question().chars().count()
    );

    let result = state.orchestrator.respond(&request).await?;
    log::info!("[{}] Answered by {}", request_id, result.provider_used());

    Ok(Json(ChatResponse {
        success: true,
        response: result.answer_text().to_string(),
        model_used: result.provider_used().to_string(),
        has_pdf_context: request.has_document(),
    }))
}

fn malformed(rejection: JsonRejection) -> ApiError {
    ApiError::Validation(ValidationError::MalformedBody(rejection.body_text()))
}
