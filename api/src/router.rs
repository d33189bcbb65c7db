use assistant_core::MAX_UPLOAD_BYTES;
use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};

use crate::handlers::{chat_handler, health_handler, root_handler, simple_chat_handler, upload_handler};
use crate::state::AppState;

// Room for a maximum-size file plus multipart framing; the upload handler enforces the exact limit.
const BODY_LIMIT: usize = MAX_UPLOAD_BYTES + 1024 * 1024;

pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(root_handler))
        .route("/health", get(health_handler))
        .route("/api/upload", post(upload_handler))
        .route("/api/chat", post(chat_handler))
        .route("/api/chat/simple", post(simple_chat_handler))
        .layer(DefaultBodyLimit::max(BODY_LIMIT))
        .layer(cors)
        .with_state(state)
}
