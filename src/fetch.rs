use crate::config::Config;
use crate::error::PipelineError;
use anyhow::{Context, Result};
use reqwest::Client;
use std::time::Duration;
use url::Url;

/// Shared HTTP client for all source downloads. The whole-request timeout
/// bounds how long one unresponsive remote can hold a pipeline.
pub struct Fetcher {
    client: Client,
}

impl Fetcher {
    pub fn new(config: &Config) -> Result<Self> {
        let client = Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(Duration::from_secs(config.fetch_timeout_secs))
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self { client })
    }

    /// GET the full body of a source document. Connection errors, timeouts
    /// and non-2xx statuses all classify as transport failures.
    pub async fn fetch(&self, url: &Url) -> Result<String, PipelineError> {
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .and_then(|resp| resp.error_for_status())
            .map_err(|source| PipelineError::Transport {
                url: url.to_string(),
                source,
            })?;

        response.text().await.map_err(|source| PipelineError::Transport {
            url: url.to_string(),
            source,
        })
    }
}
