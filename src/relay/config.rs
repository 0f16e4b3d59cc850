use std::env;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use crate::ai::providers::groq::{DEFAULT_ENDPOINT, DEFAULT_MODEL};
use crate::ai::{ChatProvider, GroqProvider, ProviderError};

pub const DEFAULT_ADDR: &str = "127.0.0.1:3000";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Relay settings read from the process environment.
#[derive(Clone, Debug, PartialEq)]
pub struct RelayConfig {
    pub addr: SocketAddr,
    /// `None` when `GROQ_API_KEY` is unset; requests then fail with a
    /// configuration error instead of the server refusing to start.
    pub api_key: Option<String>,
    pub endpoint: String,
    pub model: String,
    pub timeout: Duration,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid RELAY_ADDR '{0}'")]
    Addr(String),

    #[error("invalid RELAY_PROVIDER_TIMEOUT_SECS '{0}'")]
    Timeout(String),
}

impl RelayConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let addr_raw = lookup("RELAY_ADDR").unwrap_or_else(|| DEFAULT_ADDR.to_string());
        let addr = addr_raw
            .parse()
            .map_err(|_| ConfigError::Addr(addr_raw.clone()))?;

        let timeout = match lookup("RELAY_PROVIDER_TIMEOUT_SECS") {
            Some(raw) => raw
                .trim()
                .parse::<u64>()
                .ok()
                .filter(|secs| *secs > 0)
                .map(Duration::from_secs)
                .ok_or(ConfigError::Timeout(raw))?,
            None => Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        };

        Ok(Self {
            addr,
            api_key: lookup("GROQ_API_KEY").filter(|key| !key.trim().is_empty()),
            endpoint: lookup("GROQ_ENDPOINT").unwrap_or_else(|| DEFAULT_ENDPOINT.to_string()),
            model: lookup("GROQ_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            timeout,
        })
    }

    /// Build the provider, or `None` when no credential is configured.
    pub fn provider(&self) -> Result<Option<Arc<dyn ChatProvider>>, ProviderError> {
        let Some(api_key) = &self.api_key else {
            return Ok(None);
        };
        let provider = GroqProvider::new(
            self.endpoint.clone(),
            self.model.clone(),
            api_key.clone(),
            self.timeout,
        )?;
        Ok(Some(Arc::new(provider)))
    }
}
