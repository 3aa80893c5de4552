//! Integration test for decoding a Discovery document

use discovery_kit_common::DiscoveryError;
use discovery_kit_model::{
    DiscoveryDocument, JsonCodec, ParameterLocation, ProtocolKind, SchemaFormat, SchemaType,
};
use std::io::Write;
use tempfile::NamedTempFile;

// Simplified Google Cloud Storage Discovery document
const STORAGE_DISCOVERY: &str = r##"{
    "kind": "discovery#restDescription",
    "discoveryVersion": "v1",
    "id": "storage:v1",
    "name": "storage",
    "version": "v1",
    "revision": "20240307",
    "title": "Cloud Storage JSON API",
    "description": "Stores and retrieves potentially large, immutable data objects.",
    "icons": {
        "x16": "https://www.google.com/images/icons/product/cloud_storage-16.png",
        "x32": "https://www.google.com/images/icons/product/cloud_storage-32.png"
    },
    "documentationLink": "https://developers.google.com/storage/docs/json_api/",
    "labels": ["labs"],
    "protocol": "rest",
    "rootUrl": "https://storage.googleapis.com/",
    "servicePath": "storage/v1/",
    "basePath": "/storage/v1/",
    "baseUrl": "https://storage.googleapis.com/storage/v1/",
    "batchPath": "batch/storage/v1",
    "features": ["dataWrapper"],
    "auth": {
        "oauth2": {
            "scopes": {
                "https://www.googleapis.com/auth/devstorage.full_control": {
                    "description": "Manage your data and permissions in Google Cloud Storage"
                },
                "https://www.googleapis.com/auth/devstorage.read_only": {
                    "description": "View your data in Google Cloud Storage"
                }
            }
        }
    },
    "parameters": {
        "alt": {
            "type": "string",
            "description": "Data format for the response.",
            "default": "json",
            "enum": ["json"],
            "enumDescriptions": ["Responses with Content-Type of application/json"],
            "location": "query"
        }
    },
    "schemas": {
        "Bucket": {
            "id": "Bucket",
            "type": "object",
            "description": "A bucket resource",
            "properties": {
                "name": {
                    "type": "string",
                    "description": "The name of the bucket",
                    "annotations": {"required": ["storage.buckets.insert"]}
                },
                "metageneration": {
                    "type": "string",
                    "format": "int64"
                },
                "labels": {
                    "type": "object",
                    "additionalProperties": {"type": "string"}
                },
                "acl": {
                    "type": "array",
                    "items": {"$ref": "BucketAccessControl"}
                }
            }
        },
        "BucketAccessControl": {
            "id": "BucketAccessControl",
            "type": "object",
            "properties": {
                "role": {"type": "string"}
            }
        },
        "Object": {
            "id": "Object",
            "type": "object",
            "properties": {
                "size": {"type": "string", "format": "uint64"}
            }
        }
    },
    "resources": {
        "buckets": {
            "methods": {
                "insert": {
                    "id": "storage.buckets.insert",
                    "path": "b",
                    "httpMethod": "POST",
                    "description": "Creates a new bucket",
                    "parameters": {
                        "project": {
                            "type": "string",
                            "description": "A valid API project identifier",
                            "required": true,
                            "location": "query"
                        }
                    },
                    "parameterOrder": ["project"],
                    "request": {"$ref": "Bucket"},
                    "response": {"$ref": "Bucket"},
                    "scopes": ["https://www.googleapis.com/auth/devstorage.full_control"]
                },
                "get": {
                    "id": "storage.buckets.get",
                    "path": "b/{bucket}",
                    "httpMethod": "GET",
                    "parameters": {
                        "bucket": {
                            "type": "string",
                            "required": true,
                            "location": "path"
                        }
                    },
                    "parameterOrder": ["bucket"],
                    "response": {"$ref": "Bucket"}
                }
            }
        },
        "objects": {
            "methods": {
                "insert": {
                    "id": "storage.objects.insert",
                    "path": "b/{bucket}/o",
                    "httpMethod": "POST",
                    "parameters": {
                        "bucket": {"type": "string", "required": true, "location": "path"}
                    },
                    "parameterOrder": ["bucket"],
                    "request": {"$ref": "Object"},
                    "response": {"$ref": "Object"},
                    "supportsMediaUpload": true,
                    "mediaUpload": {
                        "accept": ["*/*"],
                        "protocols": {
                            "simple": {"multipart": true, "path": "/upload/storage/v1/b/{bucket}/o"},
                            "resumable": {"multipart": true, "path": "/resumable/upload/storage/v1/b/{bucket}/o"}
                        }
                    }
                },
                "get": {
                    "id": "storage.objects.get",
                    "path": "b/{bucket}/o/{object}",
                    "httpMethod": "GET",
                    "supportsMediaDownload": true,
                    "supportsSubscription": true
                }
            },
            "resources": {
                "acl": {
                    "methods": {
                        "list": {
                            "id": "storage.objects.acl.list",
                            "path": "b/{bucket}/o/{object}/acl",
                            "httpMethod": "GET"
                        }
                    }
                }
            }
        }
    }
}"##;

#[test]
fn test_decode_gcs_discovery() {
    let doc = DiscoveryDocument::from_json(STORAGE_DISCOVERY).unwrap();

    // Verify service metadata
    assert_eq!(doc.id, "storage:v1");
    assert_eq!(doc.name, "storage");
    assert_eq!(doc.revision, "20240307");
    assert_eq!(doc.protocol, "rest");
    assert_eq!(doc.batch_path, "batch/storage/v1");
    assert_eq!(doc.labels, vec!["labs"]);
    assert_eq!(doc.features, vec!["dataWrapper"]);
    assert!(doc.icons.x32.ends_with("cloud_storage-32.png"));
    assert_eq!(doc.auth.scopes.len(), 2);

    // Global parameters
    let alt = &doc.parameters["alt"];
    assert_eq!(alt.default_value.as_deref(), Some("json"));
    assert_eq!(alt.location, Some(ParameterLocation::Query));

    // Schemas
    let bucket = doc.resolve_schema_ref("Bucket").expect("Should have Bucket schema");
    assert_eq!(bucket.schema_type, Some(SchemaType::Object));
    assert_eq!(
        bucket.property("metageneration").and_then(|p| p.format),
        Some(SchemaFormat::Int64)
    );
    let labels = bucket.property("labels").unwrap();
    assert_eq!(
        labels.additional_properties.as_ref().and_then(|s| s.schema_type),
        Some(SchemaType::String)
    );
    let acl = bucket.property("acl").unwrap();
    assert_eq!(
        acl.items.as_ref().and_then(|s| s.x_ref.as_deref()),
        Some("BucketAccessControl")
    );
    let annotations = bucket.property("name").and_then(|p| p.annotations.as_ref());
    assert_eq!(
        annotations.map(|a| a.required.clone()),
        Some(vec!["storage.buckets.insert".to_string()])
    );

    // Methods
    let insert = &doc.resources["buckets"].methods["insert"];
    assert_eq!(insert.http_method, "POST");
    assert_eq!(insert.request_schema_name.as_deref(), Some("Bucket"));
    assert!(insert.parameters["project"].required);
    assert!(insert.media_upload.is_none());

    let upload = doc.resources["objects"].methods["insert"]
        .media_upload
        .as_ref()
        .expect("Should have media upload");
    assert_eq!(upload.protocols.len(), 2);
    assert_eq!(upload.protocols[0].kind(), ProtocolKind::Simple);
    assert_eq!(upload.protocols[1].kind(), ProtocolKind::Resumable);
    assert_eq!(upload.max_size, "");

    let get_object = &doc.resources["objects"].methods["get"];
    assert!(get_object.supports_media_download);
    assert!(get_object.supports_subscription);
    assert!(!get_object.supports_media_upload);
}

#[test]
fn test_all_methods_walks_nested_resources() {
    let doc = DiscoveryDocument::from_json(STORAGE_DISCOVERY).unwrap();

    let ids: Vec<(String, &str)> = doc
        .all_methods()
        .into_iter()
        .map(|entry| (entry.resource_path, entry.method.id.as_str()))
        .collect();

    assert_eq!(
        ids,
        vec![
            ("buckets".to_string(), "storage.buckets.get"),
            ("buckets".to_string(), "storage.buckets.insert"),
            ("objects".to_string(), "storage.objects.get"),
            ("objects".to_string(), "storage.objects.insert"),
            ("objects.acl".to_string(), "storage.objects.acl.list"),
        ]
    );
}

#[test]
fn test_round_trip_is_stable() {
    let doc = DiscoveryDocument::from_json(STORAGE_DISCOVERY).unwrap();
    let encoded = doc.encode();

    // A second pass reproduces the same value
    let again = DiscoveryDocument::decode(&encoded);
    assert_eq!(again, doc);
    assert_eq!(again.encode(), encoded);

    let source: serde_json::Value = serde_json::from_str(STORAGE_DISCOVERY).unwrap();
    assert_eq!(
        encoded["schemas"]["Bucket"]["properties"]["labels"]["additionalProperties"]["type"],
        "string"
    );
    assert_eq!(encoded["auth"], source["auth"]);
    assert_eq!(
        encoded["resources"]["objects"]["methods"]["insert"]["mediaUpload"]["protocols"],
        source["resources"]["objects"]["methods"]["insert"]["mediaUpload"]["protocols"]
    );
}

#[test]
fn test_load_from_file() {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(STORAGE_DISCOVERY.as_bytes()).unwrap();

    let doc = DiscoveryDocument::from_file(file.path()).unwrap();
    assert_eq!(doc.title, "Cloud Storage JSON API");

    let text = doc.to_json_string(false).unwrap();
    assert!(text.contains("\"kind\":\"discovery#restDescription\""));
}

#[test]
fn test_load_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let result = DiscoveryDocument::from_file(dir.path().join("missing.json"));
    assert!(matches!(result, Err(DiscoveryError::Io(_))));
}
