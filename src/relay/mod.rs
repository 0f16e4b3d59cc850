//! Chat relay server.
//!
//! One stateless endpoint, `POST /chat-relay`, that attaches a persona system
//! prompt to a client-held conversation and forwards it to the LLM provider.

mod config;
mod handler;

use std::sync::Arc;

use axum::Json;
use axum::Router;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use serde::Serialize;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::ai::{ChatProvider, ProviderError};

pub use config::{ConfigError, RelayConfig};
pub use handler::{
    ChatRelayRequest, ChatRelayResponse, EMPTY_COMPLETION_FALLBACK, PersonaMetadata,
    chat_relay_handler, health_handler,
};

pub const RELAY_PATH: &str = "/chat-relay";

#[derive(Clone)]
pub struct AppState {
    /// Absent when no provider credential is configured.
    pub provider: Option<Arc<dyn ChatProvider>>,
}

impl AppState {
    pub fn new(provider: Option<Arc<dyn ChatProvider>>) -> Self {
        Self { provider }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum RelayError {
    #[error("{0}")]
    InvalidRequest(String),

    #[error("{0}")]
    Configuration(String),

    #[error(transparent)]
    Provider(#[from] ProviderError),
}

impl RelayError {
    pub fn status(&self) -> StatusCode {
        match self {
            RelayError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            RelayError::Configuration(_) | RelayError::Provider(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        let status = self.status();
        match &self {
            RelayError::InvalidRequest(_) => tracing::warn!(error = %self, "Rejected relay request"),
            RelayError::Configuration(_) => tracing::error!(error = %self, "Relay misconfigured"),
            RelayError::Provider(_) => tracing::error!(error = %self, "Provider call failed"),
        }
        (
            status,
            Json(ErrorResponse {
                error: self.to_string(),
            }),
        )
            .into_response()
    }
}

pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_response(DefaultOnResponse::new().level(Level::INFO));

    Router::new()
        .route("/health", get(health_handler))
        .route(RELAY_PATH, post(chat_relay_handler))
        .layer(trace_layer)
        .layer(cors)
        .with_state(state)
}
