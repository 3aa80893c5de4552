//! Discovery document root and its flat metadata records

use crate::codec::{encode_map, encode_strings, model_map, string_array, string_value, JsonCodec};
use crate::method::Method;
use crate::resource::{collect_from_resources, MethodEntry, Resource};
use crate::schema::Schema;
use discovery_kit_common::{DiscoveryError, Result};
use log::debug;
use serde_json::{json, Map, Value};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// Links to 16x16 and 32x32 icons representing an API
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Icons {
    pub x16: String,
    pub x32: String,
}

impl JsonCodec for Icons {
    fn decode(json: &Value) -> Self {
        Self {
            x16: string_value(json, "x16"),
            x32: string_value(json, "x32"),
        }
    }

    fn encode(&self) -> Value {
        json!({
            "x16": self.x16,
            "x32": self.x32,
        })
    }
}

/// Authentication information
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Auth {
    /// OAuth 2.0 scope URI to its description
    pub scopes: BTreeMap<String, String>,
}

impl JsonCodec for Auth {
    fn decode(json: &Value) -> Self {
        let scopes: BTreeMap<String, String> = json
            .get("oauth2")
            .and_then(|oauth2| oauth2.get("scopes"))
            .and_then(Value::as_object)
            .map(|scopes| {
                scopes
                    .iter()
                    .map(|(uri, scope)| (uri.clone(), string_value(scope, "description")))
                    .collect()
            })
            .unwrap_or_default();

        Self { scopes }
    }

    fn encode(&self) -> Value {
        let scopes: Map<String, Value> = self
            .scopes
            .iter()
            .map(|(uri, description)| (uri.clone(), json!({ "description": description })))
            .collect();

        json!({ "oauth2": { "scopes": scopes } })
    }
}

/// Discovery Document root
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DiscoveryDocument {
    /// Discovery format version (e.g., "v1")
    pub discovery_version: String,

    /// API ID (e.g., "storage:v1")
    pub id: String,

    /// API name (e.g., "storage", "compute")
    pub name: String,

    /// API version (e.g., "v1")
    pub version: String,

    /// Revision of the API description
    pub revision: String,

    pub title: String,

    pub description: String,

    pub icons: Icons,

    pub documentation_link: String,

    pub labels: Vec<String>,

    /// Protocol of the API (e.g., "rest")
    pub protocol: String,

    /// Root URL (e.g., "<https://storage.googleapis.com/>")
    pub root_url: String,

    /// Common parameters accepted by every method
    pub parameters: BTreeMap<String, Schema>,

    pub auth: Auth,

    pub features: Vec<String>,

    /// Schemas (data types), the targets of `$ref`
    pub schemas: BTreeMap<String, Schema>,

    /// Methods at root level (rare)
    pub methods: BTreeMap<String, Method>,

    /// Deprecated, use `root_url` and `service_path`
    pub base_url: String,

    /// Deprecated, use `service_path`
    pub base_path: String,

    /// Service path (e.g., "storage/v1/")
    pub service_path: String,

    pub batch_path: String,

    /// Resources (collections of methods)
    pub resources: BTreeMap<String, Resource>,
}

impl DiscoveryDocument {
    /// Value of the `kind` member emitted on encode
    pub const KIND: &'static str = "discovery#restDescription";

    /// Parse a Discovery document from a JSON string
    ///
    /// Only JSON syntax errors fail; the document itself is decoded leniently.
    pub fn from_json(json: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(json).map_err(|e| {
            DiscoveryError::Parse(format!("Failed to parse Discovery JSON: {}", e))
        })?;

        Ok(Self::decode(&value))
    }

    /// Load a Discovery document from file path
    ///
    /// Read failures are returned as [`DiscoveryError::Io`].
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        debug!("Reading Discovery document {}", path.as_ref().display());
        let content = fs::read_to_string(path.as_ref())?;

        Self::from_json(&content)
    }

    /// Encode back to JSON text
    pub fn to_json_string(&self, pretty: bool) -> Result<String> {
        let value = self.encode();
        let text = if pretty {
            serde_json::to_string_pretty(&value)?
        } else {
            serde_json::to_string(&value)?
        };
        Ok(text)
    }

    /// Get a schema by reference
    /// e.g., "Bucket" -> returns Bucket schema
    pub fn resolve_schema_ref(&self, ref_name: &str) -> Option<&Schema> {
        self.schemas.get(ref_name)
    }

    /// Every method in the document: top-level methods first, then the
    /// resource tree depth first
    pub fn all_methods(&self) -> Vec<MethodEntry<'_>> {
        let mut found: Vec<MethodEntry<'_>> = self
            .methods
            .iter()
            .map(|(name, method)| MethodEntry {
                resource_path: String::new(),
                name: name.as_str(),
                method,
            })
            .collect();
        collect_from_resources(&self.resources, "", &mut found);
        found
    }
}

impl JsonCodec for DiscoveryDocument {
    fn decode(json: &Value) -> Self {
        let doc = Self {
            discovery_version: string_value(json, "discoveryVersion"),
            id: string_value(json, "id"),
            name: string_value(json, "name"),
            version: string_value(json, "version"),
            revision: string_value(json, "revision"),
            title: string_value(json, "title"),
            description: string_value(json, "description"),
            icons: json.get("icons").map(Icons::decode).unwrap_or_default(),
            documentation_link: string_value(json, "documentationLink"),
            labels: string_array(json, "labels"),
            protocol: string_value(json, "protocol"),
            root_url: string_value(json, "rootUrl"),
            parameters: model_map(json, "parameters"),
            auth: json.get("auth").map(Auth::decode).unwrap_or_default(),
            features: string_array(json, "features"),
            schemas: model_map(json, "schemas"),
            methods: model_map(json, "methods"),
            base_url: string_value(json, "baseUrl"),
            base_path: string_value(json, "basePath"),
            service_path: string_value(json, "servicePath"),
            batch_path: string_value(json, "batchPath"),
            resources: model_map(json, "resources"),
        };

        debug!(
            "Decoded Discovery document '{}': {} schemas, {} resources, {} top-level methods",
            doc.id,
            doc.schemas.len(),
            doc.resources.len(),
            doc.methods.len()
        );
        doc
    }

    fn encode(&self) -> Value {
        debug!("Encoding Discovery document '{}'", self.id);

        let mut object = Map::new();
        let mut put = |key: &str, value: Value| {
            object.insert(key.to_string(), value);
        };
        put("kind", Value::from(Self::KIND));
        put("discoveryVersion", Value::from(self.discovery_version.as_str()));
        put("id", Value::from(self.id.as_str()));
        put("name", Value::from(self.name.as_str()));
        put("version", Value::from(self.version.as_str()));
        put("revision", Value::from(self.revision.as_str()));
        put("title", Value::from(self.title.as_str()));
        put("description", Value::from(self.description.as_str()));
        put("icons", self.icons.encode());
        put("documentationLink", Value::from(self.documentation_link.as_str()));
        put("labels", encode_strings(&self.labels));
        put("protocol", Value::from(self.protocol.as_str()));
        put("rootUrl", Value::from(self.root_url.as_str()));
        put("parameters", encode_map(&self.parameters));
        put("auth", self.auth.encode());
        put("features", encode_strings(&self.features));
        put("schemas", encode_map(&self.schemas));
        put("methods", encode_map(&self.methods));
        put("baseUrl", Value::from(self.base_url.as_str()));
        put("basePath", Value::from(self.base_path.as_str()));
        put("servicePath", Value::from(self.service_path.as_str()));
        put("batchPath", Value::from(self.batch_path.as_str()));
        put("resources", encode_map(&self.resources));
        Value::Object(object)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scope_map() {
        let auth = Auth::decode(&json!({
            "oauth2": {"scopes": {"https://x/auth": {"description": "d"}}}
        }));
        assert_eq!(auth.scopes.len(), 1);
        assert_eq!(auth.scopes["https://x/auth"], "d");
        assert_eq!(
            auth.encode(),
            json!({"oauth2": {"scopes": {"https://x/auth": {"description": "d"}}}})
        );
    }

    #[test]
    fn test_decode_empty_document() {
        let doc = DiscoveryDocument::decode(&json!({}));
        assert_eq!(doc, DiscoveryDocument::default());
        assert!(doc.schemas.is_empty());
        assert!(doc.auth.scopes.is_empty());

        let encoded = doc.encode();
        assert_eq!(encoded["kind"], DiscoveryDocument::KIND);
        assert_eq!(encoded["icons"], json!({"x16": "", "x32": ""}));
        assert_eq!(encoded["auth"], json!({"oauth2": {"scopes": {}}}));
        assert_eq!(encoded["labels"], json!([]));
    }

    #[test]
    fn test_minimal_document() {
        let doc = DiscoveryDocument::from_json(
            r##"{
                "discoveryVersion": "v1",
                "name": "storage",
                "version": "v1",
                "title": "Cloud Storage JSON API",
                "rootUrl": "https://storage.googleapis.com/",
                "servicePath": "storage/v1/"
            }"##,
        )
        .unwrap();

        assert_eq!(doc.name, "storage");
        assert_eq!(doc.version, "v1");
        assert_eq!(doc.root_url, "https://storage.googleapis.com/");
        assert_eq!(doc.encode()["rootUrl"], "https://storage.googleapis.com/");
    }

    #[test]
    fn test_invalid_json_is_parse_error() {
        let result = DiscoveryDocument::from_json("{\"name\": ");
        assert!(matches!(result, Err(DiscoveryError::Parse(_))));
    }

    #[test]
    fn test_resolve_schema_ref() {
        let doc = DiscoveryDocument::decode(&json!({
            "schemas": {"Bucket": {"id": "Bucket", "type": "object"}}
        }));
        assert_eq!(
            doc.resolve_schema_ref("Bucket").and_then(|s| s.id.as_deref()),
            Some("Bucket")
        );
        assert!(doc.resolve_schema_ref("Object").is_none());
    }

    #[test]
    fn test_all_methods_top_level_first() {
        let doc = DiscoveryDocument::decode(&json!({
            "methods": {"getInfo": {"id": "svc.getInfo"}},
            "resources": {
                "buckets": {"methods": {"get": {"id": "svc.buckets.get"}}}
            }
        }));

        let methods = doc.all_methods();
        assert_eq!(methods.len(), 2);
        assert_eq!(methods[0].resource_path, "");
        assert_eq!(methods[0].name, "getInfo");
        assert_eq!(methods[1].resource_path, "buckets");
        assert_eq!(methods[1].method.id, "svc.buckets.get");
    }
}
