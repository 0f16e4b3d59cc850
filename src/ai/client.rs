use once_cell::sync::Lazy;
use reqwest::Client;
use std::env;

use crate::conversation::{RelayOutcome, RelayRequest};

pub const DEFAULT_RELAY_URL: &str = "http://127.0.0.1:3000/chat-relay";

static HTTP_CLIENT: Lazy<Client> = Lazy::new(Client::new);

/// Shared HTTP client for UI-side requests.
pub(crate) fn shared_http() -> Client {
    HTTP_CLIENT.clone()
}

/// Posts user turns to the chat relay endpoint.
#[derive(Clone)]
pub struct RelayClient {
    client: Client,
    endpoint: String,
}

impl RelayClient {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            client: shared_http(),
            endpoint: endpoint.into(),
        }
    }

    /// Endpoint from `RELAY_URL`, falling back to the local relay.
    pub fn from_env() -> Self {
        let endpoint = env::var("RELAY_URL").unwrap_or_else(|_| DEFAULT_RELAY_URL.to_string());
        Self::new(endpoint)
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// One round trip. Never errors: failures are folded into the outcome.
    pub async fn send(&self, request: &RelayRequest) -> RelayOutcome {
        let response = match self.client.post(&self.endpoint).json(request).send().await {
            Ok(response) => response,
            Err(err) => {
                tracing::error!(error = %err, endpoint = %self.endpoint, "Relay request failed");
                return RelayOutcome::Failed;
            }
        };

        let status = response.status();
        let body = match response.text().await {
            Ok(body) => body,
            Err(err) => {
                tracing::error!(error = %err, "Failed to read relay response");
                return RelayOutcome::Failed;
            }
        };

        let outcome = classify_body(&body);
        if !status.is_success() {
            tracing::warn!(%status, ?outcome, "Relay returned an error status");
        }
        outcome
    }
}

// The body decides the outcome, not the status: error bodies are JSON
// without `content` and count as malformed.
fn classify_body(body: &str) -> RelayOutcome {
    let value: serde_json::Value = match serde_json::from_str(body) {
        Ok(value) => value,
        Err(err) => {
            tracing::error!(error = %err, "Relay response is not JSON");
            return RelayOutcome::Failed;
        }
    };

    match value.get("content").and_then(|c| c.as_str()) {
        Some(content) if !content.is_empty() => RelayOutcome::Reply(content.to_string()),
        _ => RelayOutcome::Malformed,
    }
}
