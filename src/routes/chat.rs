//! Strategy assistant endpoint (/api/chat)

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    routing::post,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::AppState;
use crate::constants::ASSISTANT_SYSTEM_PROMPT;
use crate::services::assistant::detect_ready;
use crate::services::error::{ApiError, LogErr};

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/api/chat", post(chat))
}

#[derive(Deserialize)]
struct ChatRequest {
    #[serde(default)]
    message: String,
}

#[derive(Serialize)]
struct ChatResponse {
    reply: String,
    /// The assistant has enough context to draft a script
    ready: bool,
}

/// POST /api/chat - Forward one message to the assistant. Stateless.
async fn chat(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<ChatResponse>, ApiError> {
    let Json(req) = payload.map_err(|rejection| {
        tracing::warn!(status = %rejection.status(), "[chat] Rejected body: {}", rejection.body_text());
        ApiError::new(rejection.status(), rejection.body_text())
    })?;

    let message = req.message.trim();
    if message.is_empty() {
        return Err(ApiError::bad_request("message must not be empty"));
    }

    let reply = state
        .assistant
        .complete(ASSISTANT_SYSTEM_PROMPT, message)
        .await
        .log_status("[chat] Completion failed", StatusCode::BAD_GATEWAY)?;

    let ready = detect_ready(&reply);
    tracing::debug!(ready, reply_len = reply.len(), "[chat] Reply received");

    Ok(Json(ChatResponse { reply, ready }))
}
