use axum::Json;

use crate::chat_response::{Endpoints, HealthResponse, RootResponse};

pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        service: "AIBOT Backend",
    })
}

pub async fn root_handler() -> Json<RootResponse> {
    Json(RootResponse {
        message: "AIBOT Backend API is running!",
        version: env!("CARGO_PKG_VERSION"),
        endpoints: Endpoints {
            upload: "/api/upload",
            chat: "/api/chat",
            chat_simple: "/api/chat/simple",
            health: "/health",
        },
    })
}
