//! End-to-end chat flow tests
//!
//! Selection through session bootstrap, then user turns sent by the real
//! `RelayClient` to a relay served on a local port.

use std::sync::{Arc, Mutex};

use tokio::net::TcpListener;

use twinchat::ai::{ChatProvider, ProviderError, RelayClient};
use twinchat::conversation::{
    Conversation, ConversationError, MALFORMED_RESPONSE_FALLBACK, Phase, REQUEST_FAILED_FALLBACK,
    RelayOutcome,
};
use twinchat::relay::{AppState, create_router};
use twinchat::session::{
    MemorySessionStore, SessionError, end_session, load_session, start_chat,
};
use twinchat::types::{ChatMessage, ModelMetadata, Role, UserContext, Visibility};

/// Answers each turn with `reply #n`, remembering what it was sent.
#[derive(Default)]
struct ScriptedProvider {
    seen: Mutex<Vec<Vec<ChatMessage>>>,
}

#[async_trait::async_trait]
impl ChatProvider for ScriptedProvider {
    async fn complete(&self, messages: &[ChatMessage]) -> Result<Option<String>, ProviderError> {
        let mut seen = self.seen.lock().unwrap();
        seen.push(messages.to_vec());
        Ok(Some(format!("reply #{}", seen.len())))
    }
}

async fn serve_relay(state: AppState) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, create_router(state)).await.unwrap();
    });
    format!("http://{addr}/chat-relay")
}

fn model(visibility: Option<Visibility>) -> ModelMetadata {
    ModelMetadata {
        role: "Teacher".to_string(),
        text_sample: "linear algebra".to_string(),
        address: "0x1234567890abcdef1234".to_string(),
        visibility,
        created_at: None,
    }
}

fn conversation_for(visibility: Option<Visibility>) -> Conversation {
    let store = MemorySessionStore::new();
    start_chat(&store, &model(visibility)).unwrap();
    Conversation::new(load_session(&store).unwrap())
}

mod bootstrap {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn missing_selection_sends_user_back() {
        let store = MemorySessionStore::new();
        assert!(matches!(load_session(&store), Err(SessionError::Missing)));
    }

    #[test]
    fn ended_session_is_gone() {
        let store = MemorySessionStore::new();
        start_chat(&store, &model(None)).unwrap();
        end_session(&store).unwrap();
        assert!(matches!(load_session(&store), Err(SessionError::Missing)));
    }

    #[test]
    fn defaults_are_filled_in() {
        let store = MemorySessionStore::new();
        start_chat(&store, &model(None)).unwrap();

        let session = load_session(&store).unwrap();

        assert_eq!(session.metadata.visibility, Some(Visibility::Public));
        assert!(session.metadata.created_at.is_some());
        assert!(session.user_context.is_none());
    }

    #[test]
    fn private_model_gets_user_context() {
        let store = MemorySessionStore::new();
        start_chat(&store, &model(Some(Visibility::Private))).unwrap();

        let session = load_session(&store).unwrap();

        assert_eq!(session.user_context, Some(UserContext::stub()));
    }

    #[test]
    fn conversation_opens_with_hidden_prompt_and_welcome() {
        let conversation = conversation_for(Some(Visibility::Private));

        let wire: Vec<_> = conversation.wire().collect();
        assert_eq!(wire.len(), 1);
        assert_eq!(wire[0].role, Role::System);
        assert!(wire[0].content.contains("Teacher"));

        let display: Vec<_> = conversation.display().collect();
        assert_eq!(display.len(), 1);
        assert!(display[0].content.contains("personalize my responses"));
    }
}

mod round_trips {
    use super::*;
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn replies_grow_both_logs_and_history_excludes_system() {
        let provider = Arc::new(ScriptedProvider::default());
        let shared: Arc<dyn ChatProvider> = provider.clone();
        let client = RelayClient::new(serve_relay(AppState::new(Some(shared))).await);
        let mut conversation = conversation_for(None);

        for turn in ["What is a vector?", "And a matrix?"] {
            let wire_before = conversation.wire_len();
            let display_before = conversation.display_len();

            let request = conversation.submit(turn).unwrap();
            assert!(request.history.iter().all(|m| m.role != Role::System));
            assert_eq!(conversation.phase(), Phase::AwaitingResponse);

            let outcome = client.send(&request).await;
            conversation.resolve(outcome).unwrap();

            assert_eq!(conversation.wire_len(), wire_before + 2);
            assert_eq!(conversation.display_len(), display_before + 2);
            assert_eq!(conversation.phase(), Phase::Ready);
        }

        let display: Vec<_> = conversation.display().map(|m| m.content.as_str()).collect();
        assert_eq!(
            &display[1..],
            &["What is a vector?", "reply #1", "And a matrix?", "reply #2"]
        );

        // The second turn carried the first exchange as history.
        let seen = provider.seen.lock().unwrap();
        assert_eq!(seen.len(), 2);
        assert_eq!(
            &seen[1][1..],
            &[
                ChatMessage::user("What is a vector?"),
                ChatMessage::assistant("reply #1"),
                ChatMessage::user("And a matrix?"),
            ]
        );
    }

    #[tokio::test]
    async fn unconfigured_relay_shows_malformed_fallback() {
        let client = RelayClient::new(serve_relay(AppState::new(None)).await);
        let mut conversation = conversation_for(None);

        let request = conversation.submit("hello").unwrap();
        let outcome = client.send(&request).await;

        assert_eq!(outcome, RelayOutcome::Malformed);
        conversation.resolve(outcome).unwrap();
        let last = conversation.display().last().unwrap();
        assert_eq!(last.content, MALFORMED_RESPONSE_FALLBACK);
        assert_eq!(conversation.wire_len(), 2);
    }

    #[tokio::test]
    async fn unreachable_relay_shows_failure_fallback() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        let client = RelayClient::new(format!("http://{addr}/chat-relay"));
        let mut conversation = conversation_for(None);

        let request = conversation.submit("hello").unwrap();
        let outcome = client.send(&request).await;

        assert_eq!(outcome, RelayOutcome::Failed);
        conversation.resolve(outcome).unwrap();
        let last = conversation.display().last().unwrap();
        assert_eq!(last.content, REQUEST_FAILED_FALLBACK);
        assert_eq!(conversation.phase(), Phase::Ready);
    }
}

mod guards {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn blank_input_changes_nothing() {
        let mut conversation = conversation_for(None);
        let before = conversation.clone();

        for input in ["", "   ", "\n\t"] {
            assert_eq!(conversation.submit(input), Err(ConversationError::EmptyInput));
        }

        assert_eq!(conversation, before);
    }

    #[test]
    fn second_submit_while_pending_is_rejected() {
        let mut conversation = conversation_for(None);
        conversation.submit("first").unwrap();
        let pending = conversation.clone();

        assert_eq!(conversation.submit("second"), Err(ConversationError::Busy));
        assert_eq!(conversation, pending);
    }

    #[test]
    fn resolve_without_pending_request_is_rejected() {
        let mut conversation = conversation_for(None);
        assert_eq!(
            conversation.resolve(RelayOutcome::Reply("stray".to_string())),
            Err(ConversationError::NotAwaiting)
        );
        assert_eq!(conversation.display_len(), 1);
    }
}
