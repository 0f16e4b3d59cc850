use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::{ChatProvider, ProviderError};
use crate::types::ChatMessage;

pub const DEFAULT_ENDPOINT: &str = "https://api.groq.com/openai/v1/chat/completions";
pub const DEFAULT_MODEL: &str = "llama-3.3-70b-versatile";

const TEMPERATURE: f64 = 0.7;
const MAX_TOKENS: u32 = 1000;

/// Client for Groq's OpenAI-compatible chat completion API.
pub struct GroqProvider {
    client: Client,
    endpoint: String,
    model: String,
    api_key: String,
}

#[derive(Serialize)]
struct GroqRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    temperature: f64,
    max_tokens: u32,
}

#[derive(Deserialize)]
struct GroqMessage {
    content: Option<String>,
}

#[derive(Deserialize)]
struct GroqChoice {
    message: Option<GroqMessage>,
}

#[derive(Deserialize)]
struct GroqResponse {
    choices: Vec<GroqChoice>,
}

impl GroqProvider {
    pub fn new(
        endpoint: String,
        model: String,
        api_key: String,
        timeout: Duration,
    ) -> Result<Self, ProviderError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            endpoint,
            model,
            api_key,
        })
    }
}

/// First choice's content; empty content counts as none.
fn first_choice_content(body: &str) -> Result<Option<String>, ProviderError> {
    let parsed: GroqResponse =
        serde_json::from_str(body).map_err(|e| ProviderError::InvalidResponse(e.to_string()))?;

    Ok(parsed
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message)
        .and_then(|message| message.content)
        .filter(|content| !content.is_empty()))
}

#[async_trait]
impl ChatProvider for GroqProvider {
    async fn complete(&self, messages: &[ChatMessage]) -> Result<Option<String>, ProviderError> {
        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&GroqRequest {
                model: &self.model,
                messages,
                temperature: TEMPERATURE,
                max_tokens: MAX_TOKENS,
            })
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(ProviderError::Status {
                status: status.as_u16(),
                body,
            });
        }

        first_choice_content(&body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;
    use serde_json::json;

    async fn setup() -> (mockito::ServerGuard, GroqProvider) {
        let server = mockito::Server::new_async().await;
        let provider = GroqProvider::new(
            format!("{}/openai/v1/chat/completions", server.url()),
            DEFAULT_MODEL.to_string(),
            "test-key".to_string(),
            Duration::from_secs(5),
        )
        .unwrap();
        (server, provider)
    }

    #[test]
    fn test_first_choice_content() {
        assert_eq!(
            first_choice_content(r#"{"choices":[{"message":{"content":"hi"}}]}"#).unwrap(),
            Some("hi".to_string())
        );
        assert_eq!(first_choice_content(r#"{"choices":[]}"#).unwrap(), None);
        assert_eq!(
            first_choice_content(r#"{"choices":[{"message":{"content":""}}]}"#).unwrap(),
            None
        );
        assert_eq!(
            first_choice_content(r#"{"choices":[{"message":{"content":null}}]}"#).unwrap(),
            None
        );
        assert!(matches!(
            first_choice_content(r#"{"id":"x"}"#),
            Err(ProviderError::InvalidResponse(_))
        ));
    }

    #[tokio::test]
    async fn test_complete_sends_fixed_parameters() {
        let (mut server, provider) = setup().await;
        let mock = server
            .mock("POST", "/openai/v1/chat/completions")
            .match_header("authorization", "Bearer test-key")
            .match_body(Matcher::PartialJson(json!({
                "model": DEFAULT_MODEL,
                "temperature": 0.7,
                "max_tokens": 1000,
                "messages": [
                    {"role": "system", "content": "be brief"},
                    {"role": "user", "content": "hello"}
                ]
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"choices":[{"message":{"role":"assistant","content":"Hi!"}}]}"#)
            .create_async()
            .await;

        let messages = vec![ChatMessage::system("be brief"), ChatMessage::user("hello")];
        let reply = provider.complete(&messages).await.unwrap();

        assert_eq!(reply, Some("Hi!".to_string()));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_complete_maps_error_status() {
        let (mut server, provider) = setup().await;
        server
            .mock("POST", "/openai/v1/chat/completions")
            .with_status(401)
            .with_body(r#"{"error":{"message":"Invalid API Key"}}"#)
            .create_async()
            .await;

        let err = provider
            .complete(&[ChatMessage::user("hello")])
            .await
            .unwrap_err();
        match err {
            ProviderError::Status { status, body } => {
                assert_eq!(status, 401);
                assert!(body.contains("Invalid API Key"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn test_slow_provider_times_out() {
        // Accepts connections and never answers.
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let mut held = Vec::new();
            while let Ok((socket, _)) = listener.accept().await {
                held.push(socket);
            }
        });

        let provider = GroqProvider::new(
            format!("http://{addr}/openai/v1/chat/completions"),
            DEFAULT_MODEL.to_string(),
            "test-key".to_string(),
            Duration::from_millis(300),
        )
        .unwrap();

        let err = provider
            .complete(&[ChatMessage::user("hello")])
            .await
            .unwrap_err();
        assert!(matches!(err, ProviderError::Timeout), "{err}");
    }

    #[tokio::test]
    async fn test_unreachable_provider_is_request_error() {
        let provider = GroqProvider::new(
            "http://127.0.0.1:1/chat".to_string(),
            DEFAULT_MODEL.to_string(),
            "test-key".to_string(),
            Duration::from_secs(5),
        )
        .unwrap();

        let err = provider
            .complete(&[ChatMessage::user("hello")])
            .await
            .unwrap_err();
        assert!(matches!(err, ProviderError::Request(_)));
    }
}
