//! Session-scoped storage for the selected persona.
//!
//! The selection screen writes the chosen model under [`SESSION_KEY`]; the
//! chat screen reads it back through [`load_session`]. Stores live as long as
//! the app session (browser tab or desktop process) and are handed around
//! explicitly, never through a global.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use time::OffsetDateTime;

use crate::types::{ModelMetadata, UserContext, Visibility};

/// Key under which the selected model is stored.
pub const SESSION_KEY: &str = "chatbotMetadata";

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("no model selected for this session")]
    Missing,

    #[error("stored model metadata is invalid: {0}")]
    Invalid(#[from] serde_json::Error),

    #[error("session storage unavailable: {0}")]
    Storage(String),
}

pub trait SessionStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str) -> Result<(), SessionError>;
    fn remove(&self, key: &str) -> Result<(), SessionError>;
}

/// In-memory store. Clones share the same map.
#[derive(Clone, Default)]
pub struct MemorySessionStore {
    entries: Arc<Mutex<HashMap<String, String>>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PartialEq for MemorySessionStore {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.entries, &other.entries)
    }
}

impl SessionStore for MemorySessionStore {
    fn get(&self, key: &str) -> Option<String> {
        let entries = self.entries.lock().ok()?;
        entries.get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), SessionError> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|e| SessionError::Storage(e.to_string()))?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), SessionError> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|e| SessionError::Storage(e.to_string()))?;
        entries.remove(key);
        Ok(())
    }
}

/// Everything the chat screen needs to start a conversation.
#[derive(Clone, Debug, PartialEq)]
pub struct ChatSession {
    pub metadata: ModelMetadata,
    /// Only present for private models.
    pub user_context: Option<UserContext>,
}

impl ChatSession {
    pub fn visibility(&self) -> Visibility {
        self.metadata.visibility.unwrap_or_default()
    }
}

/// Persist the selected model so the chat screen can pick it up.
pub fn start_chat(store: &impl SessionStore, model: &ModelMetadata) -> Result<(), SessionError> {
    let serialized = serde_json::to_string(model)?;
    store.set(SESSION_KEY, &serialized)?;
    tracing::debug!(role = %model.role, "Stored selected model for chat session");
    Ok(())
}

/// Read the stored model back, filling in defaults.
///
/// Any error means the caller should send the user back to model selection.
pub fn load_session(store: &impl SessionStore) -> Result<ChatSession, SessionError> {
    let raw = store.get(SESSION_KEY).ok_or(SessionError::Missing)?;
    let mut metadata: ModelMetadata = serde_json::from_str(&raw)?;

    if metadata.created_at.is_none() {
        metadata.created_at = Some(OffsetDateTime::now_utc());
    }
    if metadata.visibility.is_none() {
        metadata.visibility = Some(Visibility::Public);
    }

    // TODO: fetch the real profile from a user service once one exists.
    let user_context = metadata.is_private().then(UserContext::stub);

    Ok(ChatSession {
        metadata,
        user_context,
    })
}

pub fn end_session(store: &impl SessionStore) -> Result<(), SessionError> {
    store.remove(SESSION_KEY)
}
