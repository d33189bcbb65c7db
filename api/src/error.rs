use assistant_core::{ChatError, ExtractionError, ValidationError};
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

#[derive(Serialize)]
pub struct ErrorBody {
    pub success: bool,
    pub error: &'static str,
    pub detail: String,
}

/// Every failure a handler can return, mapped onto an HTTP status.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Extraction(#[from] ExtractionError),
    #[error("Error generating AI response: {0}")]
    Chat(#[from] ChatError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(ValidationError::FileTooLarge { .. }) => StatusCode::PAYLOAD_TOO_LARGE,
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Extraction(ExtractionError::Failed(_)) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Extraction(_) => StatusCode::BAD_REQUEST,
            ApiError::Chat(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn kind(&self) -> &'static str {
        match self {
            ApiError::Validation(_) => "validation_error",
            ApiError::Extraction(_) => "extraction_error",
            ApiError::Chat(_) => "all_providers_unavailable",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            log::error!("Request failed: {}", self);
        } else {
            log::warn!("Request rejected: {}", self);
        }

        let body = ErrorBody {
            success: false,
            error: self.kind(),
            detail: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn statuses_follow_error_taxonomy() {
        assert_eq!(
            ApiError::from(ValidationError::EmptyQuestion).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::from(ValidationError::FileTooLarge { limit: 10 }).status(),
            StatusCode::PAYLOAD_TOO_LARGE
        );
        assert_eq!(
            ApiError::from(ExtractionError::NoText).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::from(ExtractionError::Failed("panic".to_string())).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
