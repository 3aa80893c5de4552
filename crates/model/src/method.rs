//! Method (API operation) and media upload descriptors

use crate::codec::{
    bool_value, encode_map, encode_strings, model_map, opt_str, present_object, string_array,
    string_value, JsonCodec,
};
use crate::schema::Schema;
use serde_json::{json, Map, Value};
use std::collections::BTreeMap;

/// Upload transfer strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProtocolKind {
    Simple,
    Resumable,
}

impl ProtocolKind {
    /// Wire key of the protocol inside `mediaUpload.protocols`
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Simple => "simple",
            Self::Resumable => "resumable",
        }
    }
}

/// Endpoint details shared by both upload protocols
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProtocolEndpoint {
    /// Whether multipart (metadata + media) uploads are accepted
    pub multipart: bool,

    /// Upload URI path
    pub path: String,
}

impl JsonCodec for ProtocolEndpoint {
    fn decode(json: &Value) -> Self {
        Self {
            multipart: bool_value(json, "multipart"),
            path: string_value(json, "path"),
        }
    }

    fn encode(&self) -> Value {
        json!({
            "multipart": self.multipart,
            "path": self.path,
        })
    }
}

/// One upload protocol advertised by a method
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadProtocol {
    Simple(ProtocolEndpoint),
    Resumable(ProtocolEndpoint),
}

impl UploadProtocol {
    pub fn kind(&self) -> ProtocolKind {
        match self {
            Self::Simple(_) => ProtocolKind::Simple,
            Self::Resumable(_) => ProtocolKind::Resumable,
        }
    }

    pub fn endpoint(&self) -> &ProtocolEndpoint {
        match self {
            Self::Simple(endpoint) | Self::Resumable(endpoint) => endpoint,
        }
    }
}

/// Member name the protocol table was read from
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ProtocolsKey {
    /// `protocols`, used by current Discovery documents
    #[default]
    Protocols,
    /// `protocol`, used by some older documents
    Protocol,
}

impl ProtocolsKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Protocols => "protocols",
            Self::Protocol => "protocol",
        }
    }
}

/// Media upload parameters of a method
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MediaUpload {
    /// Accepted MIME ranges (`accept`)
    pub accepted_mime_types: Vec<String>,

    /// Maximum upload size, e.g. "10GB"
    pub max_size: String,

    /// Advertised protocols; simple before resumable when both exist
    pub protocols: Vec<UploadProtocol>,

    /// Key the protocol table was decoded from, `None` when it was absent
    ///
    /// A table present but empty is kept on encode; protocols added in code
    /// without a key are written under `protocols`.
    pub protocols_key: Option<ProtocolsKey>,
}

impl MediaUpload {
    /// Find the protocol of the given kind
    pub fn protocol(&self, kind: ProtocolKind) -> Option<&ProtocolEndpoint> {
        self.protocols
            .iter()
            .find(|protocol| protocol.kind() == kind)
            .map(UploadProtocol::endpoint)
    }

    fn decode_protocols(protocols: &Value) -> Vec<UploadProtocol> {
        let mut decoded = Vec::new();
        if let Some(simple) = present_object(protocols, ProtocolKind::Simple.as_str()) {
            decoded.push(UploadProtocol::Simple(ProtocolEndpoint::decode(simple)));
        }
        if let Some(resumable) = present_object(protocols, ProtocolKind::Resumable.as_str()) {
            decoded.push(UploadProtocol::Resumable(ProtocolEndpoint::decode(
                resumable,
            )));
        }
        decoded
    }
}

impl JsonCodec for MediaUpload {
    fn decode(json: &Value) -> Self {
        let table = [ProtocolsKey::Protocols, ProtocolsKey::Protocol]
            .into_iter()
            .find_map(|key| present_object(json, key.as_str()).map(|table| (key, table)));

        Self {
            accepted_mime_types: string_array(json, "accept"),
            max_size: string_value(json, "maxSize"),
            protocols: table
                .map(|(_, table)| Self::decode_protocols(table))
                .unwrap_or_default(),
            protocols_key: table.map(|(key, _)| key),
        }
    }

    fn encode(&self) -> Value {
        let mut object = Map::new();
        object.insert(
            "accept".to_string(),
            encode_strings(&self.accepted_mime_types),
        );
        object.insert("maxSize".to_string(), Value::String(self.max_size.clone()));
        if self.protocols_key.is_some() || !self.protocols.is_empty() {
            let key = self.protocols_key.unwrap_or_default();
            let protocols: Map<String, Value> = self
                .protocols
                .iter()
                .map(|protocol| {
                    (
                        protocol.kind().as_str().to_string(),
                        protocol.endpoint().encode(),
                    )
                })
                .collect();
            object.insert(key.as_str().to_string(), Value::Object(protocols));
        }
        Value::Object(object)
    }
}

/// Method (API operation)
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Method {
    /// Method ID (e.g., "storage.buckets.insert")
    pub id: String,

    /// HTTP path, relative to the service path
    pub path: String,

    /// HTTP method (GET, POST, PUT, DELETE, PATCH)
    pub http_method: String,

    pub description: String,

    /// Parameters by name
    pub parameters: BTreeMap<String, Schema>,

    /// Canonical positional order of the required parameters
    pub parameter_order: Vec<String>,

    /// OAuth scopes accepted by the method
    pub scopes: Vec<String>,

    /// Name of the request body schema (`request.$ref`)
    pub request_schema_name: Option<String>,

    /// Name of the response body schema (`response.$ref`)
    pub response_schema_name: Option<String>,

    pub media_upload: Option<MediaUpload>,

    pub supports_media_upload: bool,

    pub supports_media_download: bool,

    pub supports_subscription: bool,
}

impl Method {
    /// Parameters in `parameterOrder` order
    ///
    /// Names listed in the order but missing from `parameters` are skipped.
    pub fn ordered_parameters(&self) -> Vec<(&str, &Schema)> {
        self.parameter_order
            .iter()
            .filter_map(|name| {
                self.parameters
                    .get(name)
                    .map(|schema| (name.as_str(), schema))
            })
            .collect()
    }
}

fn schema_name_ref(json: &Value, key: &str) -> Option<String> {
    json.get(key)
        .and_then(|body| opt_str(body, "$ref"))
        .map(str::to_string)
}

impl JsonCodec for Method {
    fn decode(json: &Value) -> Self {
        Self {
            id: string_value(json, "id"),
            path: string_value(json, "path"),
            http_method: string_value(json, "httpMethod"),
            description: string_value(json, "description"),
            parameters: model_map(json, "parameters"),
            parameter_order: string_array(json, "parameterOrder"),
            scopes: string_array(json, "scopes"),
            request_schema_name: schema_name_ref(json, "request"),
            response_schema_name: schema_name_ref(json, "response"),
            media_upload: present_object(json, "mediaUpload").map(MediaUpload::decode),
            supports_media_upload: bool_value(json, "supportsMediaUpload"),
            supports_media_download: bool_value(json, "supportsMediaDownload"),
            supports_subscription: bool_value(json, "supportsSubscription"),
        }
    }

    fn encode(&self) -> Value {
        let mut object = Map::new();
        object.insert("id".to_string(), Value::String(self.id.clone()));
        object.insert("path".to_string(), Value::String(self.path.clone()));
        object.insert(
            "httpMethod".to_string(),
            Value::String(self.http_method.clone()),
        );
        object.insert(
            "description".to_string(),
            Value::String(self.description.clone()),
        );
        object.insert("parameters".to_string(), encode_map(&self.parameters));
        object.insert(
            "parameterOrder".to_string(),
            encode_strings(&self.parameter_order),
        );
        object.insert("scopes".to_string(), encode_strings(&self.scopes));
        if let Some(request) = &self.request_schema_name {
            object.insert("request".to_string(), json!({ "$ref": request }));
        }
        if let Some(response) = &self.response_schema_name {
            object.insert("response".to_string(), json!({ "$ref": response }));
        }
        if let Some(media_upload) = &self.media_upload {
            object.insert("mediaUpload".to_string(), media_upload.encode());
        }
        object.insert(
            "supportsMediaUpload".to_string(),
            Value::Bool(self.supports_media_upload),
        );
        object.insert(
            "supportsMediaDownload".to_string(),
            Value::Bool(self.supports_media_download),
        );
        object.insert(
            "supportsSubscription".to_string(),
            Value::Bool(self.supports_subscription),
        );
        Value::Object(object)
    }
}
