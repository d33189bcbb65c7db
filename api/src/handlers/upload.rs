use assistant_core::{UploadResult, ValidationError, MAX_UPLOAD_BYTES};
use axum::{
    extract::{multipart::MultipartRejection, Multipart, State},
    http::StatusCode,
    Json,
};

use crate::chat_response::UploadResponse;
use crate::error::ApiError;
use crate::state::AppState;

const PDF_CONTENT_TYPE: &str = "application/pdf";

/// An uploaded file with its data and metadata.
struct UploadedFile {
    filename: String,
    data: Vec<u8>,
}

pub async fn upload_handler(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<UploadResponse>, ApiError> {
    let multipart = multipart
        .map_err(|e| ValidationError::MalformedBody(e.body_text()))?;
    let file = read_pdf_field(multipart).await?;

    if file.data.len() > MAX_UPLOAD_BYTES {
        log::warn!("Rejected upload {} of {} bytes", file.filename, file.data.len());
        return Err(too_large().into());
    }

    let extracted_text = state.document_processor.extract_text(&file.data).await?;
    let result = UploadResult {
        filename: file.filename,
        byte_size: file.data.len(),
        extracted_text,
    };

    log::info!(
        "Extracted {} characters from {} ({} bytes)",
        result.extracted_text.chars().count(),
        result.filename,
        result.byte_size
    );

    Ok(Json(UploadResponse {
        success: true,
        text_length: result.extracted_text.chars().count(),
        filename: result.filename,
        file_size: result.byte_size,
        extracted_text: result.extracted_text,
    }))
}

/// Takes the first part that carries a filename and checks it is declared as a PDF.
async fn read_pdf_field(mut multipart: Multipart) -> Result<UploadedFile, ValidationError> {
    while let Some(field) = multipart.next_field().await.map_err(read_failure)? {
        let Some(filename) = field.file_name().map(str::to_string) else {
            continue;
        };

        let content_type = field.content_type().unwrap_or("").to_string();
        if !is_pdf(&content_type, &filename) {
            return Err(ValidationError::UnsupportedFileType(content_type));
        }

        let data = field.bytes().await.map_err(read_failure)?.to_vec();
        return Ok(UploadedFile { filename, data });
    }

    Err(ValidationError::MissingFile)
}

/// Parameters after `;` (e.g. `charset`) are ignored.
fn is_pdf(content_type: &str, filename: &str) -> bool {
    let mime = content_type.split(';').next().unwrap_or("").trim();
    mime.eq_ignore_ascii_case(PDF_CONTENT_TYPE)
        || filename.to_ascii_lowercase().ends_with(".pdf")
}

fn read_failure(error: axum::extract::multipart::MultipartError) -> ValidationError {
    if error.status() == StatusCode::PAYLOAD_TOO_LARGE {
        too_large()
    } else {
        ValidationError::MalformedBody(format!("Failed to read file data: {}", error.body_text()))
    }
}

fn too_large() -> ValidationError {
    ValidationError::FileTooLarge {
        limit: MAX_UPLOAD_BYTES,
    }
}
