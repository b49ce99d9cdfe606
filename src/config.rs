//! Environment-driven configuration.
//!
//! Values are read from the process environment, optionally seeded from a
//! `.env` file by the binary.

use anyhow::{bail, Context, Result};
use std::time::Duration;

pub const BACKEND_URL_VAR: &str = "SENTIMENT_FLOW_BACKEND_URL";
pub const TIMEOUT_VAR: &str = "SENTIMENT_FLOW_TIMEOUT_SECS";
pub const USER_AGENT_VAR: &str = "SENTIMENT_FLOW_USER_AGENT";

/// Where the scrape backend listens when nothing is configured.
pub const DEFAULT_BACKEND_URL: &str = "http://localhost:5050";

#[derive(Debug, Clone, PartialEq)]
pub struct FlowConfig {
    /// Base URL the endpoint paths are appended to
    pub backend_url: String,
    /// Request timeout; `None` leaves the transport default in place
    pub request_timeout: Option<Duration>,
    pub user_agent: String,
}

impl Default for FlowConfig {
    fn default() -> Self {
        Self {
            backend_url: DEFAULT_BACKEND_URL.to_string(),
            request_timeout: None,
            user_agent: default_user_agent(),
        }
    }
}

fn default_user_agent() -> String {
    format!("sentiment-flow/{}", env!("CARGO_PKG_VERSION"))
}

impl FlowConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let backend_url = get(BACKEND_URL_VAR).unwrap_or_else(|| DEFAULT_BACKEND_URL.to_string());
        let parsed = reqwest::Url::parse(&backend_url)
            .with_context(|| format!("{} is not a valid URL: {}", BACKEND_URL_VAR, backend_url))?;
        if parsed.cannot_be_a_base() {
            bail!("{} must be an absolute base URL: {}", BACKEND_URL_VAR, backend_url);
        }

        let request_timeout = match get(TIMEOUT_VAR) {
            None => None,
            Some(raw) => {
                let secs: u64 = raw
                    .parse()
                    .with_context(|| format!("{} must be a whole number of seconds, got {}", TIMEOUT_VAR, raw))?;
                (secs > 0).then(|| Duration::from_secs(secs))
            }
        };

        let user_agent = get(USER_AGENT_VAR).unwrap_or_else(default_user_agent);

        Ok(Self {
            backend_url: backend_url.trim_end_matches('/').to_string(),
            request_timeout,
            user_agent,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = FlowConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, FlowConfig::default());
        assert_eq!(config.backend_url, "http://localhost:5050");
        assert!(config.request_timeout.is_none());
        assert!(config.user_agent.starts_with("sentiment-flow/"));
    }

    #[test]
    fn test_reads_all_values() {
        let config = FlowConfig::from_lookup(lookup(&[
            (BACKEND_URL_VAR, "https://sentiment.internal:8443/"),
            (TIMEOUT_VAR, "45"),
            (USER_AGENT_VAR, "flow-test"),
        ]))
        .unwrap();
        assert_eq!(config.backend_url, "https://sentiment.internal:8443");
        assert_eq!(config.request_timeout, Some(Duration::from_secs(45)));
        assert_eq!(config.user_agent, "flow-test");
    }

    #[test]
    fn test_zero_or_blank_timeout_means_transport_default() {
        let zero = FlowConfig::from_lookup(lookup(&[(TIMEOUT_VAR, "0")])).unwrap();
        assert!(zero.request_timeout.is_none());
        let blank = FlowConfig::from_lookup(lookup(&[(TIMEOUT_VAR, "  ")])).unwrap();
        assert!(blank.request_timeout.is_none());
    }

    #[test]
    fn test_rejects_bad_values() {
        assert!(FlowConfig::from_lookup(lookup(&[(TIMEOUT_VAR, "soon")])).is_err());
        assert!(FlowConfig::from_lookup(lookup(&[(BACKEND_URL_VAR, "localhost")])).is_err());
        assert!(FlowConfig::from_lookup(lookup(&[(BACKEND_URL_VAR, "mailto:ops@example.com")])).is_err());
    }
}
