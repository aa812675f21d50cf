//! Source row access and the column -> document field mapping

use std::collections::HashMap;

use csv::StringRecord;

use crate::error::{AppError, AppResult};
use crate::models::NetworkLogDocument;

pub const PACKET_LENGTH: &str = "Packet Length";
pub const PROTOCOL: &str = "Protocol";
pub const TRAFFIC_TYPE: &str = "Traffic Type";
pub const ATTACK_TYPE: &str = "Attack Type";
pub const MALWARE_INDICATORS: &str = "Malware Indicators";
pub const ACTION_TAKEN: &str = "Action Taken";
pub const SEVERITY_LEVEL: &str = "Severity Level";

/// Every column the mapping reads, in document order
pub const SOURCE_COLUMNS: &[&str] = &[
    PACKET_LENGTH,
    PROTOCOL,
    TRAFFIC_TYPE,
    ATTACK_TYPE,
    MALWARE_INDICATORS,
    ACTION_TAKEN,
    SEVERITY_LEVEL,
];

/// Header name -> position. First occurrence wins on duplicates.
#[derive(Debug, Clone, Default)]
pub struct ColumnIndex {
    positions: HashMap<String, usize>,
}

impl ColumnIndex {
    pub fn from_headers(headers: &StringRecord) -> Self {
        let mut positions = HashMap::with_capacity(headers.len());
        for (pos, name) in headers.iter().enumerate() {
            positions.entry(name.to_string()).or_insert(pos);
        }
        Self { positions }
    }

    pub fn position(&self, column: &str) -> Option<usize> {
        self.positions.get(column).copied()
    }

    /// Mapped columns absent from the header
    pub fn missing_columns(&self) -> Vec<&'static str> {
        SOURCE_COLUMNS
            .iter()
            .copied()
            .filter(|c| !self.positions.contains_key(*c))
            .collect()
    }
}

/// Borrowed view of one CSV record
pub struct SourceRow<'a> {
    columns: &'a ColumnIndex,
    record: &'a StringRecord,
    line: u64,
}

impl<'a> SourceRow<'a> {
    pub fn new(columns: &'a ColumnIndex, record: &'a StringRecord, line: u64) -> Self {
        Self { columns, record, line }
    }

    pub fn line(&self) -> u64 {
        self.line
    }

    /// Raw cell text. `None` when the column is absent, the row is short,
    /// or the cell is empty.
    pub fn text(&self, column: &str) -> Option<&'a str> {
        let pos = self.columns.position(column)?;
        self.record.get(pos).filter(|v| !v.is_empty())
    }

    /// Lowercased cell text, `None` when missing
    pub fn lowercase(&self, column: &str) -> Option<String> {
        self.text(column).map(str::to_lowercase)
    }

    /// Non-negative base-10 integer cell, bounded by the index's `long`
    /// type. Surrounding whitespace is ignored; a present value that does
    /// not parse is an error, not a default.
    pub fn integer(&self, column: &'static str) -> AppResult<Option<u64>> {
        let Some(raw) = self.text(column) else {
            return Ok(None);
        };

        let value = raw.trim().parse::<i64>().map_err(|_| AppError::InvalidInteger {
            line: self.line,
            column,
            value: raw.to_string(),
        })?;

        u64::try_from(value)
            .map(Some)
            .map_err(|_| AppError::NegativeInteger {
                line: self.line,
                column,
                value: raw.to_string(),
            })
    }

    /// Lowercased cell text that must be present
    pub fn required_lowercase(&self, column: &'static str) -> AppResult<String> {
        self.lowercase(column).ok_or(AppError::MissingField {
            line: self.line,
            column,
        })
    }
}

/// Map one source row to its document
pub fn to_document(row: &SourceRow<'_>) -> AppResult<NetworkLogDocument> {
    Ok(NetworkLogDocument {
        duration: row.integer(PACKET_LENGTH)?.unwrap_or(0),
        protocol_type: row.lowercase(PROTOCOL).unwrap_or_default(),
        service: row.lowercase(TRAFFIC_TYPE).unwrap_or_default(),
        label: row.lowercase(ATTACK_TYPE).unwrap_or_default(),
        indicator: row.lowercase(MALWARE_INDICATORS).unwrap_or_default(),
        action: row.lowercase(ACTION_TAKEN).unwrap_or_default(),
        // No default: a row without severity aborts the run
        severity: row.required_lowercase(SEVERITY_LEVEL)?,
    })
}
