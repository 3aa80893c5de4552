//! API directory listing returned by the Discovery service

use crate::codec::{bool_value, encode_strings, string_array, string_value, JsonCodec};
use crate::document::Icons;
use serde_json::{json, Value};

/// One API in the directory
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DirectoryItem {
    /// API ID (e.g., "storage:v1")
    pub id: String,
    pub name: String,
    pub version: String,
    pub title: String,
    pub description: String,
    /// URL of the Discovery REST document
    pub discovery_rest_url: String,
    /// Link to the Discovery document relative to the directory
    pub discovery_link: String,
    pub icons: Icons,
    pub documentation_link: String,
    pub labels: Vec<String>,
    /// Whether this is the preferred version of the API
    pub preferred: bool,
}

impl DirectoryItem {
    pub const KIND: &'static str = "discovery#directoryItem";
}

impl JsonCodec for DirectoryItem {
    fn decode(json: &Value) -> Self {
        Self {
            id: string_value(json, "id"),
            name: string_value(json, "name"),
            version: string_value(json, "version"),
            title: string_value(json, "title"),
            description: string_value(json, "description"),
            discovery_rest_url: string_value(json, "discoveryRestUrl"),
            discovery_link: string_value(json, "discoveryLink"),
            icons: json.get("icons").map(Icons::decode).unwrap_or_default(),
            documentation_link: string_value(json, "documentationLink"),
            labels: string_array(json, "labels"),
            preferred: bool_value(json, "preferred"),
        }
    }

    fn encode(&self) -> Value {
        json!({
            "kind": Self::KIND,
            "id": self.id,
            "name": self.name,
            "version": self.version,
            "title": self.title,
            "description": self.description,
            "discoveryRestUrl": self.discovery_rest_url,
            "discoveryLink": self.discovery_link,
            "icons": self.icons.encode(),
            "documentationLink": self.documentation_link,
            "labels": encode_strings(&self.labels),
            "preferred": self.preferred,
        })
    }
}

/// Directory of every API the Discovery service knows about
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DirectoryList {
    pub discovery_version: String,
    pub items: Vec<DirectoryItem>,
}

impl DirectoryList {
    pub const KIND: &'static str = "discovery#directoryList";

    /// Items flagged as the preferred version of their API
    pub fn preferred(&self) -> impl Iterator<Item = &DirectoryItem> {
        self.items.iter().filter(|item| item.preferred)
    }
}

impl JsonCodec for DirectoryList {
    fn decode(json: &Value) -> Self {
        let items: Vec<DirectoryItem> = json
            .get("items")
            .and_then(Value::as_array)
            .map(|items| items.iter().map(DirectoryItem::decode).collect())
            .unwrap_or_default();

        Self {
            discovery_version: string_value(json, "discoveryVersion"),
            items,
        }
    }

    fn encode(&self) -> Value {
        let items: Vec<Value> = self.items.iter().map(DirectoryItem::encode).collect();
        json!({
            "kind": Self::KIND,
            "discoveryVersion": self.discovery_version,
            "items": items,
        })
    }
}
