//! Record Transformer
//!
//! Streams a CSV export of security events into bulk-ingest NDJSON.
//! Each row becomes an action line plus a document line, in source order.
//! Any row error aborts the run and no output file is produced.

pub mod row;
pub mod writer;


use std::io::Read;
use std::path::{Path, PathBuf};

use crate::error::{AppError, AppResult};
use crate::models::{BulkAction, BulkEntry, IndexMapping, DOCUMENT_FIELDS};
use row::{ColumnIndex, SourceRow};
pub use writer::BulkWriter;

/// Result of a completed transform run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransformSummary {
    pub rows: u64,
    pub lines: u64,
    pub output_path: PathBuf,
}

/// Transform `input` into `output` for `index_name`
pub fn run(input: &Path, output: &Path, index_name: &str) -> AppResult<TransformSummary> {
    tracing::info!("Reading {}", input.display());

    let reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(input)
        .map_err(|e| AppError::csv(input, e))?;

    let mut writer = BulkWriter::create(output)?;
    let rows = transform_reader(reader, input, index_name, &mut writer)?;
    writer.commit()?;

    let summary = TransformSummary {
        rows,
        lines: rows * 2,
        output_path: output.to_path_buf(),
    };
    tracing::info!(
        "Saved bulk JSONL file at {} ({} rows, {} lines)",
        summary.output_path.display(),
        summary.rows,
        summary.lines
    );
    Ok(summary)
}

/// Pump every record of `reader` through the mapping into `writer`.
/// Returns the number of rows written.
pub fn transform_reader<R: Read>(
    mut reader: csv::Reader<R>,
    source: &Path,
    index_name: &str,
    writer: &mut BulkWriter,
) -> AppResult<u64> {
    let headers = reader
        .headers()
        .map_err(|e| AppError::csv(source, e))?
        .clone();
    let columns = ColumnIndex::from_headers(&headers);

    warn_on_schema_gaps(&columns);

    let action = BulkAction::index(index_name);
    let mut record = csv::StringRecord::new();
    let mut rows = 0u64;

    while reader
        .read_record(&mut record)
        .map_err(|e| AppError::csv(source, e))?
    {
        let line = record.position().map_or(rows + 2, |p| p.line());
        let row = SourceRow::new(&columns, &record, line);

        let document = row::to_document(&row).inspect_err(|e| {
            if e.is_data_error() {
                tracing::error!("Aborting: row at line {} of {} rejected", row.line(), source.display());
            }
        })?;

        writer.append(&BulkEntry {
            action: action.clone(),
            document,
        })?;
        rows += 1;
    }

    tracing::debug!("Transformed {} rows from {}", rows, source.display());
    Ok(rows)
}

fn warn_on_schema_gaps(columns: &ColumnIndex) {
    for column in columns.missing_columns() {
        if column == row::SEVERITY_LEVEL {
            tracing::warn!("Input has no '{}' column; any data row will fail", column);
        } else {
            tracing::warn!("Input has no '{}' column; its field will use the default", column);
        }
    }

    for field in unpopulated_mapping_fields(&IndexMapping::network_logs()) {
        tracing::warn!("Index mapping declares '{}' but documents do not populate it", field);
    }
}

/// Fields the mapping declares that no document ever carries
fn unpopulated_mapping_fields(mapping: &IndexMapping) -> Vec<&'static str> {
    mapping
        .fields()
        .iter()
        .map(|(field, _)| *field)
        .filter(|field| !DOCUMENT_FIELDS.contains(field))
        .collect()
}
