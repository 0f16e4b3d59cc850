//! Client-side conversation state.
//!
//! A conversation keeps one ordered log. Each entry records whether it goes
//! over the wire to the relay and whether the user sees it; the wire log and
//! the display log are filters over that single log, so they cannot drift.
//!
//! ```text
//! entry                on_wire  visible
//! system prompt        yes      no
//! welcome message      no       yes
//! user / reply         yes      yes
//! fallback apology     no       yes
//! ```

use serde::Serialize;

use crate::persona::{client_system_prompt, welcome_message};
use crate::session::ChatSession;
use crate::types::{ChatMessage, ModelMetadata, Role, UserContext};

pub const MALFORMED_RESPONSE_FALLBACK: &str = "Sorry, I couldn't process your request.";
pub const REQUEST_FAILED_FALLBACK: &str = "Sorry, there was an error processing your request.";

#[derive(Clone, Debug, PartialEq)]
pub struct LogEntry {
    pub message: ChatMessage,
    pub on_wire: bool,
    pub visible: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Ready,
    AwaitingResponse,
}

/// Body posted to the relay for one user turn.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RelayRequest {
    pub message: String,
    pub metadata: ModelMetadata,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_context: Option<UserContext>,
    pub history: Vec<ChatMessage>,
}

/// How a relay round trip ended, as seen by the client.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RelayOutcome {
    Reply(String),
    /// The relay answered but without usable `content`.
    Malformed,
    /// The request never produced a readable answer.
    Failed,
}

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum ConversationError {
    #[error("message is empty")]
    EmptyInput,

    #[error("a response is still pending")]
    Busy,

    #[error("no request is pending")]
    NotAwaiting,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Conversation {
    session: ChatSession,
    log: Vec<LogEntry>,
    phase: Phase,
}

impl Conversation {
    pub fn new(session: ChatSession) -> Self {
        let metadata = &session.metadata;
        let system = ChatMessage::system(client_system_prompt(
            &metadata.role,
            &metadata.text_sample,
        ));
        let welcome = ChatMessage::assistant(welcome_message(
            &metadata.role,
            &metadata.text_sample,
            session.visibility(),
        ));

        let log = vec![
            LogEntry {
                message: system,
                on_wire: true,
                visible: false,
            },
            LogEntry {
                message: welcome,
                on_wire: false,
                visible: true,
            },
        ];

        Self {
            session,
            log,
            phase: Phase::Ready,
        }
    }

    pub fn session(&self) -> &ChatSession {
        &self.session
    }

    pub fn metadata(&self) -> &ModelMetadata {
        &self.session.metadata
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_awaiting(&self) -> bool {
        self.phase == Phase::AwaitingResponse
    }

    /// Messages that make up the LLM conversation, system prompt first.
    pub fn wire(&self) -> impl Iterator<Item = &ChatMessage> {
        self.log.iter().filter(|e| e.on_wire).map(|e| &e.message)
    }

    /// Messages shown to the user, welcome message first.
    pub fn display(&self) -> impl Iterator<Item = &ChatMessage> {
        self.log.iter().filter(|e| e.visible).map(|e| &e.message)
    }

    pub fn wire_len(&self) -> usize {
        self.wire().count()
    }

    pub fn display_len(&self) -> usize {
        self.display().count()
    }

    fn history(&self) -> Vec<ChatMessage> {
        self.wire()
            .filter(|m| m.role != Role::System)
            .cloned()
            .collect()
    }

    fn push(&mut self, message: ChatMessage, on_wire: bool) {
        self.log.push(LogEntry {
            message,
            on_wire,
            visible: true,
        });
    }

    /// Record a user turn and return the request to send for it.
    ///
    /// The request's history is taken before the new user message is
    /// appended; the relay adds the message itself.
    pub fn submit(&mut self, input: &str) -> Result<RelayRequest, ConversationError> {
        if self.is_awaiting() {
            return Err(ConversationError::Busy);
        }
        if input.trim().is_empty() {
            return Err(ConversationError::EmptyInput);
        }

        let request = RelayRequest {
            message: input.to_string(),
            metadata: self.session.metadata.clone(),
            user_context: if self.session.metadata.is_private() {
                self.session.user_context.clone()
            } else {
                None
            },
            history: self.history(),
        };

        self.push(ChatMessage::user(input), true);
        self.phase = Phase::AwaitingResponse;
        Ok(request)
    }

    /// Finish the pending round trip.
    ///
    /// Fallback apologies are shown to the user but kept off the wire log,
    /// so the next request does not replay them to the model.
    pub fn resolve(&mut self, outcome: RelayOutcome) -> Result<(), ConversationError> {
        if !self.is_awaiting() {
            return Err(ConversationError::NotAwaiting);
        }

        match outcome {
            RelayOutcome::Reply(content) => self.push(ChatMessage::assistant(content), true),
            RelayOutcome::Malformed => {
                tracing::warn!("Relay response had no content");
                self.push(ChatMessage::assistant(MALFORMED_RESPONSE_FALLBACK), false);
            }
            RelayOutcome::Failed => {
                self.push(ChatMessage::assistant(REQUEST_FAILED_FALLBACK), false);
            }
        }

        self.phase = Phase::Ready;
        Ok(())
    }
}
