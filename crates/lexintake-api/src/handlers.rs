//! Route handler functions for all API endpoints.
//!
//! Each handler extracts the request body via axum extractors, interacts
//! with AppState services, and returns JSON responses.

use axum::extract::State;
use axum::Json;
use base64::engine::general_purpose::STANDARD as BASE64_STANDARD;
use base64::Engine;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use lexintake_narration::NarrationEngine;

use crate::error::ApiError;
use crate::state::AppState;

// =============================================================================
// Request and response types
// =============================================================================

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub message: Option<String>,
    pub session_id: Option<Uuid>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ChatResponseBody {
    pub response: String,
    pub session_id: Uuid,
    pub end_call: bool,
}

#[derive(Debug, Deserialize)]
pub struct NarrateRequest {
    pub text: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct NarrateResponseBody {
    /// Base64-encoded audio, or null when the engine produced none.
    pub audio: Option<String>,
    pub use_local_fallback: bool,
    pub engine: NarrationEngine,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub uptime_secs: u64,
    pub active_sessions: usize,
}

// =============================================================================
// Handler functions
// =============================================================================

/// GET /health - liveness and session count.
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_secs: state.start_time.elapsed().as_secs(),
        active_sessions: state.orchestrator.active_sessions(),
    })
}

/// POST /api/chat - advance a conversation with one caller message.
pub async fn chat(
    State(state): State<AppState>,
    Json(req): Json<ChatRequest>,
) -> Result<Json<ChatResponseBody>, ApiError> {
    let message = req
        .message
        .ok_or_else(|| ApiError::BadRequest("No message provided".to_string()))?;

    let (reply, session_id) = state.orchestrator.handle_message(&message, req.session_id)?;

    Ok(Json(ChatResponseBody {
        response: reply.text,
        session_id,
        end_call: reply.end_call,
    }))
}

/// POST /api/narrate - render text as speech.
///
/// Narration trouble is degraded to the local-fallback signal by the
/// adapter; only an empty text is a caller error.
pub async fn narrate(
    State(state): State<AppState>,
    Json(req): Json<NarrateRequest>,
) -> Result<Json<NarrateResponseBody>, ApiError> {
    if !state.config.narration.enabled {
        return Err(ApiError::ServiceUnavailable(
            "narration is disabled".to_string(),
        ));
    }

    let text = req
        .text
        .ok_or_else(|| ApiError::BadRequest("No text provided".to_string()))?;
    if text.trim().is_empty() {
        return Err(ApiError::BadRequest("No text provided".to_string()));
    }

    let narration = match state.narrator.narrate(&text).await {
        Ok(n) => n,
        Err(e) => {
            tracing::warn!(error = %e, "narration failed; signalling local fallback");
            lexintake_narration::Narration {
                audio: None,
                use_local_fallback: true,
                engine: NarrationEngine::BrowserFallback,
            }
        }
    };

    Ok(Json(NarrateResponseBody {
        audio: narration
            .audio
            .map(|bytes| BASE64_STANDARD.encode(bytes)),
        use_local_fallback: narration.use_local_fallback,
        engine: narration.engine,
    }))
}
