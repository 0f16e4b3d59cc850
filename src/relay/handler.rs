use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde::{Deserialize, Serialize};

use super::{AppState, RelayError};
use crate::persona::{DEFAULT_ROLE, DEFAULT_TEXT_SAMPLE, relay_system_prompt};
use crate::types::{ChatMessage, Role};

pub const EMPTY_COMPLETION_FALLBACK: &str = "Sorry, I couldn't generate a response.";

#[derive(Debug, Deserialize)]
pub struct PersonaMetadata {
    pub role: String,
    #[serde(rename = "textSample")]
    pub text_sample: String,
}

/// Inbound body. Extra fields (`userContext`, the rest of the model
/// metadata) are accepted and ignored.
#[derive(Debug, Deserialize)]
pub struct ChatRelayRequest {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub metadata: Option<PersonaMetadata>,
    #[serde(default)]
    pub history: Vec<ChatMessage>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ChatRelayResponse {
    pub content: String,
    pub history: Vec<ChatMessage>,
}

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
}

pub async fn health_handler() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(HealthResponse {
            status: "healthy".to_string(),
        }),
    )
}

#[tracing::instrument(skip(state, payload))]
pub async fn chat_relay_handler(
    State(state): State<AppState>,
    payload: Result<Json<ChatRelayRequest>, JsonRejection>,
) -> Result<Json<ChatRelayResponse>, RelayError> {
    let Some(provider) = state.provider.as_ref() else {
        return Err(RelayError::Configuration(
            "GROQ_API_KEY is not configured in environment variables".to_string(),
        ));
    };

    let Json(request) = payload.map_err(|rejection| RelayError::InvalidRequest(rejection.body_text()))?;

    let message = match request.message {
        Some(message) if !message.is_empty() => message,
        _ => return Err(RelayError::InvalidRequest("Message is required".to_string())),
    };

    let (role, text_sample) = match &request.metadata {
        Some(metadata) => (metadata.role.as_str(), metadata.text_sample.as_str()),
        None => (DEFAULT_ROLE, DEFAULT_TEXT_SAMPLE),
    };

    let supplied = request.history.len();
    let history: Vec<ChatMessage> = request
        .history
        .into_iter()
        .filter(|m| m.role != Role::System)
        .collect();
    if history.len() != supplied {
        tracing::warn!(
            dropped = supplied - history.len(),
            "Dropped system messages from supplied history"
        );
    }

    let user_message = ChatMessage::user(message);

    let mut outbound = Vec::with_capacity(history.len() + 2);
    outbound.push(ChatMessage::system(relay_system_prompt(role, text_sample)));
    outbound.extend(history.iter().cloned());
    outbound.push(user_message.clone());

    tracing::debug!(
        role,
        history_len = history.len(),
        message_len = user_message.content.len(),
        "Forwarding chat turn to provider"
    );

    let content = provider
        .complete(&outbound)
        .await?
        .unwrap_or_else(|| EMPTY_COMPLETION_FALLBACK.to_string());

    let mut updated = history;
    updated.push(user_message);
    updated.push(ChatMessage::assistant(content.clone()));

    Ok(Json(ChatRelayResponse {
        content,
        history: updated,
    }))
}
