//! Fetcher configuration loading from YAML files
//!
//! Lets the Discovery service endpoint and the standard query parameters be
//! set from an external file instead of command-line flags.

use crate::{DiscoveryError, Result};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// Default root of the Google APIs Discovery service
pub const DEFAULT_ROOT_URL: &str = "https://www.googleapis.com/";

/// Default request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Configuration for fetching the API directory and Discovery documents
///
/// Example YAML:
/// ```yaml
/// root_url: https://www.googleapis.com/
/// timeout_secs: 10
/// quota_user: build-bot
/// pretty_print: false
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FetcherConfig {
    /// Root URL the `discovery/v1` path is appended to
    #[serde(default = "default_root_url")]
    pub root_url: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// IP address of the end user (`userIp`)
    #[serde(default)]
    pub user_ip: Option<String>,

    /// Quota accounting key (`quotaUser`)
    #[serde(default)]
    pub quota_user: Option<String>,

    /// Whether responses are pretty printed (`prettyPrint`)
    #[serde(default = "default_pretty_print")]
    pub pretty_print: bool,

    /// Partial response selector (`fields`)
    #[serde(default)]
    pub fields: Option<String>,
}

fn default_root_url() -> String {
    DEFAULT_ROOT_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

fn default_pretty_print() -> bool {
    true
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self {
            root_url: default_root_url(),
            timeout_secs: default_timeout_secs(),
            user_ip: None,
            quota_user: None,
            pretty_print: default_pretty_print(),
            fields: None,
        }
    }
}

impl FetcherConfig {
    /// Load configuration from a YAML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            DiscoveryError::Config(format!("Failed to read config file {:?}: {}", path, e))
        })?;

        Self::from_yaml(&content).map_err(|e| {
            DiscoveryError::Config(format!("Failed to parse config YAML from {:?}: {}", path, e))
        })
    }

    /// Parse configuration from a YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Check settings that would otherwise surface as transport failures
    pub fn validate(&self) -> Result<()> {
        if self.root_url.trim().is_empty() {
            return Err(DiscoveryError::Config("root_url must not be empty".to_string()));
        }
        if self.timeout_secs == 0 {
            return Err(DiscoveryError::Config("timeout_secs must be positive".to_string()));
        }
        Ok(())
    }

    /// Encode the standard query parameters shared by every Discovery request
    ///
    /// Optional parameters are only included when set, and `prettyPrint` is
    /// only sent when it differs from the server default of `true`.
    pub fn standard_query_params(&self) -> BTreeMap<String, String> {
        let mut params = BTreeMap::new();
        if let Some(user_ip) = &self.user_ip {
            params.insert("userIp".to_string(), user_ip.clone());
        }
        if let Some(quota_user) = &self.quota_user {
            params.insert("quotaUser".to_string(), quota_user.clone());
        }
        if !self.pretty_print {
            params.insert("prettyPrint".to_string(), "false".to_string());
        }
        if let Some(fields) = &self.fields {
            params.insert("fields".to_string(), fields.clone());
        }
        params
    }
}
