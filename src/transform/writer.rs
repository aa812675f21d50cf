use std::fs::{self, File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::error::{AppError, AppResult};
use crate::models::BulkEntry;

/// NDJSON writer that stages into a sibling file and only replaces the
/// target on `commit`. Dropping an uncommitted writer removes the stage.
pub struct BulkWriter {
    target: PathBuf,
    staging: PathBuf,
    file: Option<BufWriter<File>>,
    entries: u64,
}

impl BulkWriter {
    pub fn create(target: &Path) -> AppResult<Self> {
        let staging = staged_sibling(target);

        let file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(&staging)
            .map_err(|e| AppError::io(&staging, e))?;

        Ok(Self {
            target: target.to_path_buf(),
            staging,
            file: Some(BufWriter::new(file)),
            entries: 0,
        })
    }

    pub fn staging_path(&self) -> &Path {
        &self.staging
    }

    pub fn entries(&self) -> u64 {
        self.entries
    }

    /// Append the action line and document line
    pub fn append(&mut self, entry: &BulkEntry) -> AppResult<()> {
        let lines = entry.to_lines()?;
        if let Some(file) = self.file.as_mut() {
            file.write_all(lines.as_bytes())
                .map_err(|e| AppError::io(&self.staging, e))?;
            self.entries += 1;
        }
        Ok(())
    }

    /// Flush, sync and move the staged file over the target
    pub fn commit(mut self) -> AppResult<u64> {
        if let Some(file) = self.file.as_mut() {
            file.flush().map_err(|e| AppError::io(&self.staging, e))?;
            file.get_ref()
                .sync_all()
                .map_err(|e| AppError::io(&self.staging, e))?;
        }

        // Close before rename; from here on cleanup is manual
        self.file = None;

        if let Err(e) = fs::rename(&self.staging, &self.target) {
            let _ = fs::remove_file(&self.staging);
            return Err(AppError::io(&self.target, e));
        }
        Ok(self.entries)
    }
}

impl Drop for BulkWriter {
    fn drop(&mut self) {
        // Still holding the file means commit never ran
        if self.file.take().is_some() {
            if let Err(e) = fs::remove_file(&self.staging) {
                tracing::warn!("Failed to remove staged output {}: {}", self.staging.display(), e);
            }
        }
    }
}

/// `<dir>/.<name>.partial` next to the target, so the final rename stays on one filesystem
fn staged_sibling(target: &Path) -> PathBuf {
    let name = target
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "bulk.jsonl".to_string());
    target.with_file_name(format!(".{}.partial", name))
}
