pub mod groq;

use async_trait::async_trait;

use crate::types::ChatMessage;

pub use groq::GroqProvider;

/// A chat-completion backend the relay forwards conversations to.
#[async_trait]
pub trait ChatProvider: Send + Sync {
    /// Run one completion over `messages` (system prompt first).
    ///
    /// `Ok(None)` means the provider answered without any content.
    async fn complete(&self, messages: &[ChatMessage]) -> Result<Option<String>, ProviderError>;
}

#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error("provider request timed out")]
    Timeout,

    #[error("provider request failed: {0}")]
    Request(String),

    #[error("provider error {status}: {body}")]
    Status { status: u16, body: String },

    #[error("invalid provider response: {0}")]
    InvalidResponse(String),
}

impl From<reqwest::Error> for ProviderError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ProviderError::Timeout
        } else {
            ProviderError::Request(err.to_string())
        }
    }
}
