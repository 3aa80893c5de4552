//! Directory and Discovery document fetching

use crate::transport::{HttpTransport, Transport};
use discovery_kit_common::{FetcherConfig, Result};
use discovery_kit_model::{DirectoryList, DiscoveryDocument, JsonCodec};
use log::debug;

/// Fetches the API directory and individual Discovery documents
///
/// # Example
/// ```rust,no_run
/// use discovery_kit_common::FetcherConfig;
/// use discovery_kit_fetcher::ApisFetcher;
///
/// let fetcher = ApisFetcher::http(FetcherConfig::default())?;
/// let doc = fetcher.get_discovery_document("storage", "v1")?;
/// println!("{} has {} schemas", doc.title, doc.schemas.len());
/// # Ok::<(), discovery_kit_common::DiscoveryError>(())
/// ```
pub struct ApisFetcher<T: Transport> {
    transport: T,
    config: FetcherConfig,
}

impl ApisFetcher<HttpTransport> {
    /// Fetcher over the blocking HTTP transport
    pub fn http(config: FetcherConfig) -> Result<Self> {
        let transport = HttpTransport::new(&config)?;
        Ok(Self::new(transport, config))
    }
}

impl<T: Transport> ApisFetcher<T> {
    pub fn new(transport: T, config: FetcherConfig) -> Self {
        Self { transport, config }
    }

    pub fn config(&self) -> &FetcherConfig {
        &self.config
    }

    /// List the APIs known to the Discovery service
    ///
    /// # Arguments
    /// * `name` - Only include APIs with this name
    /// * `preferred` - Only include the preferred version of each API
    pub fn list_apis(&self, name: Option<&str>, preferred: bool) -> Result<DirectoryList> {
        let mut query = self.config.standard_query_params();
        if let Some(name) = name {
            query.insert("name".to_string(), name.to_string());
        }
        if preferred {
            query.insert("preferred".to_string(), "true".to_string());
        }

        let json = self.transport.fetch("/apis", &query)?;
        let list = DirectoryList::decode(&json);
        debug!("Directory lists {} APIs", list.items.len());
        Ok(list)
    }

    /// Fetch the Discovery document of one API version
    pub fn get_discovery_document(&self, api: &str, version: &str) -> Result<DiscoveryDocument> {
        let query = self.config.standard_query_params();
        let endpoint = format!("/apis/{}/{}/rest", api, version);

        let json = self.transport.fetch(&endpoint, &query)?;
        Ok(DiscoveryDocument::decode(&json))
    }
}
