//! Model directory: where the selection screen finds personas.

use reqwest::Client;
use std::env;

use crate::ai::shared_http;
use crate::types::ModelMetadata;

pub const DEFAULT_DIRECTORY_URL: &str =
    "https://gateway.pinata.cloud/ipfs/QmeaS5X6M8i2MGUMrtWKXn9DRfXU2T9o8HE82MvsUzdb7Z";

#[derive(Debug, thiserror::Error)]
enum DirectoryError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("directory returned {0}")]
    Status(reqwest::StatusCode),

    #[error("invalid model record: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Clone)]
pub struct ModelDirectory {
    client: Client,
    url: String,
}

impl ModelDirectory {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            client: shared_http(),
            url: url.into(),
        }
    }

    pub fn from_env() -> Self {
        let url = env::var("MODEL_DIRECTORY_URL").unwrap_or_else(|_| DEFAULT_DIRECTORY_URL.to_string());
        Self::new(url)
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Fetch the published models.
    ///
    /// The directory currently holds a single record. Failures are logged
    /// and yield an empty list.
    pub async fn fetch_models(&self) -> Vec<ModelMetadata> {
        match self.fetch_record().await {
            Ok(model) => {
                tracing::debug!(role = %model.role, "Loaded model from directory");
                vec![model]
            }
            Err(err) => {
                tracing::warn!(error = %err, url = %self.url, "Error fetching models");
                Vec::new()
            }
        }
    }

    async fn fetch_record(&self) -> Result<ModelMetadata, DirectoryError> {
        let response = self.client.get(&self.url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(DirectoryError::Status(status));
        }
        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }
}
