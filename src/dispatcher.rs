//! Scrape endpoint client.
//!
//! Builds `{base}{endpoint}?url={encoded product url}` for the selected
//! platform, performs one GET and classifies the outcome.

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use std::time::Instant;
use tracing::{debug, error, info, warn};

use crate::config::FlowConfig;
use crate::error::FlowError;
use crate::normalizer::RawResult;
use crate::platform::Platform;
use crate::view::EMPTY_URL_PLACEHOLDER;

/// One submission's routing input
#[derive(Debug, Clone, PartialEq)]
pub struct ScrapeRequest {
    pub platform: Platform,
    /// Trimmed product URL as typed by the user
    pub raw_url: String,
}

impl ScrapeRequest {
    /// Rejects empty or whitespace-only URLs before anything touches the network.
    pub fn new(platform: Platform, raw_url: &str) -> Result<Self, FlowError> {
        let raw_url = raw_url.trim();
        if raw_url.is_empty() {
            return Err(FlowError::Validation(EMPTY_URL_PLACEHOLDER.to_string()));
        }
        Ok(Self {
            platform,
            raw_url: raw_url.to_string(),
        })
    }

    /// Path plus query, e.g. `/scrape/dell?url=https%3A%2F%2Fwww.dell.com%2Fx`.
    pub fn endpoint(&self) -> String {
        format!(
            "{}?url={}",
            self.platform.endpoint_path(),
            urlencoding::encode(&self.raw_url)
        )
    }
}

/// Anything that can answer a scrape request with a JSON payload.
#[async_trait]
pub trait ScrapeBackend {
    async fn fetch(&self, request: &ScrapeRequest) -> Result<RawResult, FlowError>;
}

pub struct Dispatcher {
    client: Client,
    base_url: String,
}

impl Dispatcher {
    pub fn new(config: &FlowConfig) -> Result<Self, FlowError> {
        let mut builder = Client::builder().user_agent(config.user_agent.clone());
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| FlowError::transport("Failed to build HTTP client", e))?;

        Ok(Self::with_client(client, &config.backend_url))
    }

    pub fn with_client(client: Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn request_url(&self, request: &ScrapeRequest) -> String {
        format!("{}{}", self.base_url, request.endpoint())
    }

    /// Validate and send in one step.
    pub async fn dispatch(&self, platform: Platform, raw_url: &str) -> Result<RawResult, FlowError> {
        let request = ScrapeRequest::new(platform, raw_url)?;
        self.fetch(&request).await
    }
}

#[async_trait]
impl ScrapeBackend for Dispatcher {
    async fn fetch(&self, request: &ScrapeRequest) -> Result<RawResult, FlowError> {
        let url = self.request_url(request);
        let start = Instant::now();
        info!("📡 [{}] GET {}", request.platform, url);

        let response = self.client.get(&url).send().await.map_err(|e| {
            error!("❌ [{}] Request failed: {}", request.platform, e);
            FlowError::transport("Request failed", e)
        })?;
        let status = response.status();

        let body = response.text().await.map_err(|e| {
            error!("❌ [{}] Failed to read response body: {}", request.platform, e);
            FlowError::transport("Failed to read response", e)
        })?;

        let payload: Value = serde_json::from_str(&body).map_err(|e| {
            warn!(
                "⚠️ [{}] Non-JSON response (status {}, {} bytes): {}",
                request.platform,
                status,
                body.len(),
                e
            );
            FlowError::Transport(format!("Invalid response from server (status {})", status))
        })?;
        let raw = RawResult::new(payload);

        if let Some(message) = raw.declared_error() {
            warn!("⚠️ [{}] Backend declared error: {}", request.platform, message);
            return Err(FlowError::Declared(message));
        }

        if !status.is_success() {
            warn!("⚠️ [{}] HTTP error status {}", request.platform, status);
            return Err(FlowError::Transport(format!("Server responded with status {}", status)));
        }

        debug!(
            "[{}] Response parsed in {:.2}s",
            request.platform,
            start.elapsed().as_secs_f32()
        );
        Ok(raw)
    }
}
