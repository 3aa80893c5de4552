//! HTTP transport for the Discovery service

use discovery_kit_common::{DiscoveryError, FetcherConfig, Result};
use log::{debug, info, warn};
use reqwest::blocking::Client;
use serde_json::Value;
use std::collections::BTreeMap;
use std::time::Duration;

/// Performs one GET against the Discovery service
///
/// `endpoint` is relative to the `discovery/v1` root (e.g., "/apis").
#[cfg_attr(test, mockall::automock)]
pub trait Transport {
    fn fetch(&self, endpoint: &str, query: &BTreeMap<String, String>) -> Result<Value>;
}

/// Blocking `reqwest` transport
pub struct HttpTransport {
    client: Client,
    base_url: String,
}

impl HttpTransport {
    /// Build a transport for the root URL and timeout in `config`
    pub fn new(config: &FetcherConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| {
                DiscoveryError::Transport(format!("Failed to build HTTP client: {}", e))
            })?;

        Ok(Self {
            client,
            base_url: discovery_base_url(&config.root_url),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

/// `{root}discovery/v1`, tolerating a root without trailing slash
fn discovery_base_url(root_url: &str) -> String {
    format!("{}/discovery/v1", root_url.trim_end_matches('/'))
}

impl Transport for HttpTransport {
    fn fetch(&self, endpoint: &str, query: &BTreeMap<String, String>) -> Result<Value> {
        let url = format!("{}{}", self.base_url, endpoint);
        info!("GET {}", url);
        debug!("Query parameters: {:?}", query);

        let response = self
            .client
            .get(&url)
            .query(query)
            .send()
            .map_err(|e| DiscoveryError::Transport(format!("Request to {} failed: {}", url, e)))?;

        let status = response.status();
        let body = response
            .text()
            .map_err(|e| DiscoveryError::Transport(format!("Failed to read response: {}", e)))?;

        if !status.is_success() {
            warn!("GET {} returned {}", url, status);
            return Err(DiscoveryError::Http {
                status: status.as_u16(),
                body,
            });
        }

        Ok(serde_json::from_str(&body)?)
    }
}
