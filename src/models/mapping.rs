//! Index mapping model

use serde::Serialize;
use serde_json::{json, Map, Value};

/// Storage type of a mapped field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    Long,
    Keyword,
    Date,
}

/// Ordered field name -> type declaration for one index
#[derive(Debug, Clone, PartialEq)]
pub struct IndexMapping {
    fields: Vec<(&'static str, FieldType)>,
}

/// Fields declared for the network-logs index.
///
/// `timestamp` is declared but the transformer never fills it.
pub const NETWORK_LOG_FIELDS: &[(&str, FieldType)] = &[
    ("duration", FieldType::Long),
    ("protocol_type", FieldType::Keyword),
    ("service", FieldType::Keyword),
    ("label", FieldType::Keyword),
    ("Indicator", FieldType::Keyword),
    ("Action", FieldType::Keyword),
    ("Severity", FieldType::Keyword),
    ("timestamp", FieldType::Date),
];

impl IndexMapping {
    pub fn network_logs() -> Self {
        Self {
            fields: NETWORK_LOG_FIELDS.to_vec(),
        }
    }

    pub fn fields(&self) -> &[(&'static str, FieldType)] {
        &self.fields
    }

    /// Body for the index-creation request: `{"mappings": {"properties": {...}}}`
    pub fn to_request_body(&self) -> Value {
        let properties: Map<String, Value> = self
            .fields
            .iter()
            .map(|(name, ty)| (name.to_string(), json!({ "type": ty })))
            .collect();

        json!({ "mappings": { "properties": properties } })
    }
}
