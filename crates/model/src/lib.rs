//! Typed model of Google Discovery documents
//!
//! Decodes a Discovery document (the JSON description of a REST API's
//! resources, methods and schemas) into a tree of plain Rust values, and
//! encodes that tree back to an equivalent JSON value.
//!
//! ## Decoding policy
//!
//! Decoding never fails. Fields that are missing or carry the wrong JSON type
//! fall back to empty strings, `false`, or empty collections; fields whose
//! presence matters (`$ref`, `items`, `mediaUpload`, ...) become `None` and
//! are left out again on encode. Members the model does not know are dropped.
//!
//! ## Usage
//! ```rust
//! use discovery_kit_model::{DiscoveryDocument, JsonCodec};
//!
//! let doc = DiscoveryDocument::from_json(r#"{"name": "storage", "version": "v1"}"#).unwrap();
//! assert_eq!(doc.name, "storage");
//!
//! let json = doc.encode();
//! assert_eq!(json["kind"], "discovery#restDescription");
//! ```

pub mod codec;
mod directory;
mod document;
mod method;
mod resource;
mod schema;

pub use codec::JsonCodec;
pub use directory::{DirectoryItem, DirectoryList};
pub use document::{Auth, DiscoveryDocument, Icons};
pub use method::{
    MediaUpload, Method, ProtocolEndpoint, ProtocolKind, ProtocolsKey, UploadProtocol,
};
pub use resource::{MethodEntry, Resource};
pub use schema::{Annotations, ParameterLocation, Schema, SchemaFormat, SchemaType};
