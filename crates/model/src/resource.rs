//! Resource (collection of methods and nested resources)

use crate::codec::{encode_map, model_map, JsonCodec};
use crate::method::Method;
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Resource (collection of methods)
///
/// `methods` and `resources` are separate namespaces: the same name may
/// appear in both.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Resource {
    /// Methods for this resource
    pub methods: BTreeMap<String, Method>,

    /// Nested resources
    pub resources: BTreeMap<String, Resource>,
}

/// A method found while walking a resource tree
#[derive(Debug, Clone, PartialEq)]
pub struct MethodEntry<'a> {
    /// Dotted path of the owning resource, empty for top-level methods
    pub resource_path: String,

    /// Method name within its resource
    pub name: &'a str,

    pub method: &'a Method,
}

impl Resource {
    /// Every method of this resource and its descendants, depth first
    ///
    /// `prefix` is the dotted path of this resource. Own methods come before
    /// those of nested resources; siblings follow key order.
    pub fn walk_methods<'a>(&'a self, prefix: &str) -> Vec<MethodEntry<'a>> {
        let mut found = Vec::new();
        self.collect_methods(prefix, &mut found);
        found
    }

    pub(crate) fn collect_methods<'a>(
        &'a self,
        prefix: &str,
        found: &mut Vec<MethodEntry<'a>>,
    ) {
        for (name, method) in &self.methods {
            found.push(MethodEntry {
                resource_path: prefix.to_string(),
                name: name.as_str(),
                method,
            });
        }
        collect_from_resources(&self.resources, prefix, found);
    }
}

/// Recursively collect methods from a mapping of resources
pub(crate) fn collect_from_resources<'a>(
    resources: &'a BTreeMap<String, Resource>,
    prefix: &str,
    found: &mut Vec<MethodEntry<'a>>,
) {
    for (name, resource) in resources {
        let path = if prefix.is_empty() {
            name.clone()
        } else {
            format!("{}.{}", prefix, name)
        };
        resource.collect_methods(&path, found);
    }
}

impl JsonCodec for Resource {
    fn decode(json: &Value) -> Self {
        Self {
            methods: model_map(json, "methods"),
            resources: model_map(json, "resources"),
        }
    }

    fn encode(&self) -> Value {
        let mut object = Map::new();
        object.insert("methods".to_string(), encode_map(&self.methods));
        object.insert("resources".to_string(), encode_map(&self.resources));
        Value::Object(object)
    }
}
