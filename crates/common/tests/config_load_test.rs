//! Integration test for loading fetcher configuration from disk

use discovery_kit_common::{DiscoveryError, FetcherConfig};
use std::io::Write;
use tempfile::NamedTempFile;

#[test]
fn test_load_config_file() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(
        file,
        "root_url: http://localhost:8080/\ntimeout_secs: 5\npretty_print: false"
    )
    .unwrap();

    let config = FetcherConfig::load(file.path()).unwrap();
    assert_eq!(config.root_url, "http://localhost:8080/");
    assert_eq!(config.timeout_secs, 5);
    assert!(!config.pretty_print);
    assert!(config.user_ip.is_none());
}

#[test]
fn test_load_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let result = FetcherConfig::load(&dir.path().join("missing.yaml"));
    assert!(matches!(result, Err(DiscoveryError::Config(_))));
}

#[test]
fn test_load_malformed_yaml() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "timeout_secs: [not, a, number]").unwrap();

    let result = FetcherConfig::load(file.path());
    assert!(matches!(result, Err(DiscoveryError::Config(_))));
}
