//! Fetching from the Google APIs Discovery service
//!
//! ## Discovery Sources
//!
//! - **List all APIs**: `GET https://www.googleapis.com/discovery/v1/apis`
//! - **Get specific API**: `GET https://www.googleapis.com/discovery/v1/apis/{api}/{version}/rest`
//!
//! The network sits behind the [`Transport`] trait; [`ApisFetcher`] builds
//! the request and decodes the payload into the model. Transport and HTTP
//! errors are returned unchanged.

mod apis;
mod transport;

pub use apis::ApisFetcher;
pub use transport::{HttpTransport, Transport};
