/// HTTP clients for the two LLM hops of a chat turn.
///
/// # Architecture
///
/// - `client` - `RelayClient`, used by the UI to post a turn to the relay
/// - `providers` - `ChatProvider` backends the relay forwards to (Groq)
///
/// # Usage
///
/// ```rust,no_run
/// use twinchat::ai::RelayClient;
/// use twinchat::conversation::Conversation;
/// use twinchat::session::{MemorySessionStore, load_session};
///
/// # async fn example(store: MemorySessionStore) -> anyhow::Result<()> {
/// let mut conversation = Conversation::new(load_session(&store)?);
/// let request = conversation.submit("Hello!")?;
/// let outcome = RelayClient::from_env().send(&request).await;
/// conversation.resolve(outcome)?;
/// # Ok(())
/// # }
/// ```
mod client;
pub mod providers;

// Re-export main types
pub use client::{DEFAULT_RELAY_URL, RelayClient};
pub(crate) use client::shared_http;
pub use providers::{ChatProvider, GroqProvider, ProviderError};
