use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::TreeParser;

/// Seconds to wait for a parser service response
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Configuration for a parser served over HTTP
#[derive(Debug, Clone)]
pub struct HttpParserConfig {
    /// Endpoint accepting `{"sentences": [...]}` and returning `{"trees": [...]}`
    pub endpoint: String,
    /// Optional bearer token (from DISFLUENCY_PARSER_API_KEY)
    pub api_key: Option<String>,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl HttpParserConfig {
    /// Create config from environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_env_with_endpoint(None)
    }

    /// Like `from_env`, but an explicit endpoint overrides DISFLUENCY_PARSER_URL
    pub fn from_env_with_endpoint(endpoint: Option<String>) -> Result<Self> {
        let endpoint = match endpoint {
            Some(endpoint) => endpoint,
            None => std::env::var("DISFLUENCY_PARSER_URL")
                .context("DISFLUENCY_PARSER_URL environment variable not set")?,
        };

        Ok(Self {
            endpoint,
            api_key: std::env::var("DISFLUENCY_PARSER_API_KEY").ok(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        })
    }

    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            api_key: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

/// Client for a remote parsing service
pub struct HttpParser {
    client: Client,
    config: HttpParserConfig,
}

impl HttpParser {
    pub fn new(config: HttpParserConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .context("Failed to build parser service client")?;
        Ok(Self { client, config })
    }
}

impl TreeParser for HttpParser {
    async fn parse_batch(&self, sentences: &[String]) -> Result<Vec<String>> {
        let mut request = self
            .client
            .post(&self.config.endpoint)
            .header("content-type", "application/json")
            .json(&ParseRequest { sentences });
        if let Some(key) = &self.config.api_key {
            request = request.bearer_auth(key);
        }

        let response = request
            .send()
            .await
            .context("Failed to send request to parser service")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("Parser service error: {} - {}", status, body);
        }

        let response: ParseResponse = response
            .json()
            .await
            .context("Failed to parse parser service response")?;

        Ok(response.trees)
    }
}

#[derive(Debug, Serialize)]
struct ParseRequest<'a> {
    sentences: &'a [String],
}

#[derive(Debug, Deserialize)]
struct ParseResponse {
    trees: Vec<String>,
}
