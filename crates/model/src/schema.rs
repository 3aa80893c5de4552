//! Schema (data type) definition
//!
//! Based on JSON Schema Draft 3 with Google-specific extensions. A schema
//! owns its children (`properties`, `items`, `additionalProperties`) and
//! refers to other named schemas only through `$ref`.

use crate::codec::{
    bool_value, encode_map, encode_strings, insert_opt, opt_model_map, opt_str, opt_string,
    opt_string_array, present_object, string_array, JsonCodec,
};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fmt;

/// JSON type described by a schema
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SchemaType {
    String,
    Number,
    Integer,
    Boolean,
    Object,
    Array,
    Null,
    Any,
}

impl SchemaType {
    /// Look up a type by its wire name; unknown names yield `None`
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "string" => Some(Self::String),
            "number" => Some(Self::Number),
            "integer" => Some(Self::Integer),
            "boolean" => Some(Self::Boolean),
            "object" => Some(Self::Object),
            "array" => Some(Self::Array),
            "null" => Some(Self::Null),
            "any" => Some(Self::Any),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Number => "number",
            Self::Integer => "integer",
            Self::Boolean => "boolean",
            Self::Object => "object",
            Self::Array => "array",
            Self::Null => "null",
            Self::Any => "any",
        }
    }
}

impl fmt::Display for SchemaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Refinement of a schema's type
///
/// Validity against the type is not checked: `int64` is carried on
/// `string` schemas in Discovery documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SchemaFormat {
    Int32,
    Uint32,
    Double,
    Float,
    Byte,
    Date,
    DateTime,
    Int64,
    Uint64,
    GoogleDateTime,
    GoogleDuration,
    GoogleFieldMask,
}

impl SchemaFormat {
    /// Look up a format by its wire name; unknown names yield `None`
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "int32" => Some(Self::Int32),
            "uint32" => Some(Self::Uint32),
            "double" => Some(Self::Double),
            "float" => Some(Self::Float),
            "byte" => Some(Self::Byte),
            "date" => Some(Self::Date),
            "date-time" => Some(Self::DateTime),
            "int64" => Some(Self::Int64),
            "uint64" => Some(Self::Uint64),
            "google-datetime" => Some(Self::GoogleDateTime),
            "google-duration" => Some(Self::GoogleDuration),
            "google-fieldmask" => Some(Self::GoogleFieldMask),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Int32 => "int32",
            Self::Uint32 => "uint32",
            Self::Double => "double",
            Self::Float => "float",
            Self::Byte => "byte",
            Self::Date => "date",
            Self::DateTime => "date-time",
            Self::Int64 => "int64",
            Self::Uint64 => "uint64",
            Self::GoogleDateTime => "google-datetime",
            Self::GoogleDuration => "google-duration",
            Self::GoogleFieldMask => "google-fieldmask",
        }
    }
}

impl fmt::Display for SchemaFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where a parameter schema is sent in the request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParameterLocation {
    Query,
    Path,
}

impl ParameterLocation {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "query" => Some(Self::Query),
            "path" => Some(Self::Path),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Query => "query",
            Self::Path => "path",
        }
    }
}

/// Schema-level annotations
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Annotations {
    /// Methods for which the annotated property is required
    pub required: Vec<String>,
}

impl JsonCodec for Annotations {
    fn decode(json: &Value) -> Self {
        Self {
            required: string_array(json, "required"),
        }
    }

    fn encode(&self) -> Value {
        let mut object = Map::new();
        object.insert("required".to_string(), encode_strings(&self.required));
        Value::Object(object)
    }
}

/// Shape of one JSON value
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Schema {
    /// Schema ID, set on named schemas
    pub id: Option<String>,

    /// Type (string, object, array, etc.)
    pub schema_type: Option<SchemaType>,

    /// Name of another schema this one stands for (`$ref`)
    pub x_ref: Option<String>,

    pub description: Option<String>,

    /// Default value, as written in the document (`default`)
    pub default_value: Option<String>,

    pub required: bool,

    pub format: Option<SchemaFormat>,

    pub pattern: Option<String>,

    /// Lower bound, kept in its string form
    pub minimum: Option<String>,

    /// Upper bound, kept in its string form
    pub maximum: Option<String>,

    /// Allowed values (`enum`)
    pub enum_values: Option<Vec<String>>,

    /// Descriptions aligned by index with `enum_values`
    pub enum_descriptions: Option<Vec<String>>,

    pub repeated: bool,

    /// Parameter location, only meaningful for parameter schemas
    pub location: Option<ParameterLocation>,

    /// Properties (for object type)
    pub properties: Option<BTreeMap<String, Schema>>,

    /// Shape of the values of an open-ended map
    pub additional_properties: Option<Box<Schema>>,

    /// Items (for array type)
    pub items: Option<Box<Schema>>,

    pub annotations: Option<Annotations>,
}

impl Schema {
    /// Look up a direct property by name
    pub fn property(&self, name: &str) -> Option<&Schema> {
        self.properties.as_ref()?.get(name)
    }

    /// True when this schema only stands for another named schema
    pub fn is_reference(&self) -> bool {
        self.x_ref.is_some()
    }

    /// Number of nesting levels, counting this schema as one
    pub fn depth(&self) -> usize {
        let nested_properties = self
            .properties
            .iter()
            .flat_map(|properties| properties.values())
            .map(Schema::depth);
        let nested_items = self.items.iter().map(|items| items.depth());
        let nested_additional = self
            .additional_properties
            .iter()
            .map(|additional| additional.depth());

        1 + nested_properties
            .chain(nested_items)
            .chain(nested_additional)
            .max()
            .unwrap_or(0)
    }
}

impl JsonCodec for Schema {
    fn decode(json: &Value) -> Self {
        Self {
            id: opt_string(json, "id"),
            schema_type: opt_str(json, "type").and_then(SchemaType::parse),
            x_ref: opt_string(json, "$ref"),
            description: opt_string(json, "description"),
            default_value: opt_string(json, "default"),
            required: bool_value(json, "required"),
            format: opt_str(json, "format").and_then(SchemaFormat::parse),
            pattern: opt_string(json, "pattern"),
            minimum: opt_string(json, "minimum"),
            maximum: opt_string(json, "maximum"),
            enum_values: opt_string_array(json, "enum"),
            enum_descriptions: opt_string_array(json, "enumDescriptions"),
            repeated: bool_value(json, "repeated"),
            location: opt_str(json, "location").and_then(ParameterLocation::parse),
            properties: opt_model_map(json, "properties"),
            additional_properties: present_object(json, "additionalProperties")
                .map(|child| Box::new(Schema::decode(child))),
            items: present_object(json, "items").map(|child| Box::new(Schema::decode(child))),
            annotations: present_object(json, "annotations").map(Annotations::decode),
        }
    }

    fn encode(&self) -> Value {
        let mut object = Map::new();
        insert_opt(&mut object, "id", self.id.clone());
        insert_opt(&mut object, "type", self.schema_type.map(|t| t.as_str()));
        insert_opt(&mut object, "$ref", self.x_ref.clone());
        insert_opt(&mut object, "description", self.description.clone());
        insert_opt(&mut object, "default", self.default_value.clone());
        object.insert("required".to_string(), Value::Bool(self.required));
        insert_opt(&mut object, "format", self.format.map(|f| f.as_str()));
        insert_opt(&mut object, "pattern", self.pattern.clone());
        insert_opt(&mut object, "minimum", self.minimum.clone());
        insert_opt(&mut object, "maximum", self.maximum.clone());
        insert_opt(
            &mut object,
            "enum",
            self.enum_values.as_deref().map(encode_strings),
        );
        insert_opt(
            &mut object,
            "enumDescriptions",
            self.enum_descriptions.as_deref().map(encode_strings),
        );
        object.insert("repeated".to_string(), Value::Bool(self.repeated));
        insert_opt(&mut object, "location", self.location.map(|l| l.as_str()));
        insert_opt(&mut object, "properties", self.properties.as_ref().map(encode_map));
        insert_opt(
            &mut object,
            "additionalProperties",
            self.additional_properties.as_ref().map(|child| child.encode()),
        );
        insert_opt(&mut object, "items", self.items.as_ref().map(|child| child.encode()));
        insert_opt(
            &mut object,
            "annotations",
            self.annotations.as_ref().map(Annotations::encode),
        );
        Value::Object(object)
    }
}
