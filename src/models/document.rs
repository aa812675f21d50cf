//! Bulk entry models

use serde::{Deserialize, Serialize};

/// Serialized keys of [`NetworkLogDocument`], in order
pub const DOCUMENT_FIELDS: &[&str] = &[
    "duration",
    "protocol_type",
    "service",
    "label",
    "Indicator",
    "Action",
    "Severity",
];

/// One network-log document as indexed.
///
/// Field order here is the serialized order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkLogDocument {
    pub duration: u64,
    pub protocol_type: String,
    pub service: String,
    pub label: String,
    #[serde(rename = "Indicator")]
    pub indicator: String,
    #[serde(rename = "Action")]
    pub action: String,
    #[serde(rename = "Severity")]
    pub severity: String,
}

/// Bulk action line: `{"index": {"_index": "<name>"}}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BulkAction {
    pub index: IndexTarget,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexTarget {
    #[serde(rename = "_index")]
    pub index: String,
}

impl BulkAction {
    pub fn index(name: impl Into<String>) -> Self {
        Self {
            index: IndexTarget { index: name.into() },
        }
    }
}

/// Action line followed by its document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BulkEntry {
    pub action: BulkAction,
    pub document: NetworkLogDocument,
}

impl BulkEntry {
    /// Encode as two newline-terminated NDJSON lines
    pub fn to_lines(&self) -> serde_json::Result<String> {
        let mut out = serde_json::to_string(&self.action)?;
        out.push('\n');
        out.push_str(&serde_json::to_string(&self.document)?);
        out.push('\n');
        Ok(out)
    }
}
