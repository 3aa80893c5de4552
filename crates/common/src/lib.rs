//! Common types and utilities for Discovery Kit
//!
//! This crate contains the shared error type and the fetcher configuration
//! used across the model, fetcher, and CLI components.

mod fetch_config;

pub use fetch_config::{FetcherConfig, DEFAULT_ROOT_URL, DEFAULT_TIMEOUT_SECS};

use thiserror::Error;

/// Errors that can occur while loading or fetching Discovery documents
///
/// Decoding a JSON value into the model never fails; these variants only
/// cover the layers around it (text parsing, files, the network).
#[derive(Error, Debug)]
pub enum DiscoveryError {
    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Result type for Discovery Kit operations
pub type Result<T> = std::result::Result<T, DiscoveryError>;
