//! OpenSearch index configuration and mappings.
//!
//! This module defines the index settings and mappings for the seller search index.

use serde_json::{json, Value};

/// The default name of the search index.
pub const DEFAULT_INDEX_NAME: &str = "sellers";

/// Which index the client reads and writes.
#[derive(Debug, Clone)]
pub struct IndexConfig {
    /// Index name.
    pub name: String,
}

impl IndexConfig {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self::new(DEFAULT_INDEX_NAME)
    }
}

/// Get the index settings and mappings for the seller search index.
///
/// The configuration includes:
/// - **text** fields with a `raw` keyword sub-field for every seller attribute
/// - **long** `id` for exact lookups
pub fn get_index_settings() -> Value {
    json!({
        "settings": {
            "number_of_shards": 1,
            "number_of_replicas": 1
        },
        "mappings": {
            "properties": {
                "id": {
                    "type": "long"
                },
                "name": text_with_raw(),
                "email": text_with_raw(),
                "phoneNumber": text_with_raw(),
                "address": text_with_raw(),
                "city": text_with_raw()
            }
        }
    })
}

fn text_with_raw() -> Value {
    json!({
        "type": "text",
        "fields": {
            "raw": {
                "type": "keyword"
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_settings_structure() {
        let settings = get_index_settings();

        // Check settings exist
        assert!(settings["settings"]["number_of_shards"].is_number());
        assert!(settings["settings"]["number_of_replicas"].is_number());

        // Check mappings exist
        let properties = &settings["mappings"]["properties"];
        assert_eq!(properties["id"]["type"], "long");
        for field in ["name", "email", "phoneNumber", "address", "city"] {
            assert_eq!(properties[field]["type"], "text");
            assert_eq!(properties[field]["fields"]["raw"]["type"], "keyword");
        }
    }

    #[test]
    fn test_default_index_name() {
        assert_eq!(IndexConfig::default().name, "sellers");
    }
}
