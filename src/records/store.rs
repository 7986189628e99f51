//! JSONL record store.
//!
//! Records are appended under an exclusive file lock and never rewritten.
//! Appending the same outcome for the same answer twice is a no-op.

use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use fs2::FileExt;

use super::types::ExtractionRecord;

/// Append-only log of extraction records
pub struct RecordStore {
    path: PathBuf,
}

impl RecordStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Open the store at the configured location ($CLAIMCAUSE_HOME/extractions.jsonl)
    pub fn open_default() -> Result<Self> {
        Ok(Self::new(crate::config::records_path()?))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append a record. Returns false if a record with the same ID exists.
    pub fn append(&self, record: &ExtractionRecord) -> Result<bool> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        let mut file = OpenOptions::new()
            .create(true)
            .read(true)
            .append(true)
            .open(&self.path)
            .with_context(|| format!("Failed to open records file: {}", self.path.display()))?;

        file.lock_exclusive()
            .context("Failed to acquire file lock on extractions.jsonl")?;

        // Checked under the lock so concurrent writers cannot both append
        if read_records(&file, &self.path)?
            .iter()
            .any(|existing| existing.id == record.id)
        {
            tracing::debug!(id = %record.id, "Record already present");
            return Ok(false);
        }

        let json = serde_json::to_string(record).context("Failed to serialize record")?;
        writeln!(file, "{}", json).context("Failed to write record")?;
        file.flush().context("Failed to flush record")?;

        tracing::info!(id = %record.id, status = record.status.as_str(), "Extraction recorded");

        // Lock is released when file is dropped
        Ok(true)
    }

    /// Load every record in file order
    pub fn load_all(&self) -> Result<Vec<ExtractionRecord>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let file = File::open(&self.path)
            .with_context(|| format!("Failed to open records file: {}", self.path.display()))?;

        read_records(&file, &self.path)
    }

    /// Find a record by ID prefix
    pub fn find(&self, id: &str) -> Result<Option<ExtractionRecord>> {
        if id.is_empty() {
            return Ok(None);
        }

        Ok(self
            .load_all()?
            .into_iter()
            .find(|record| record.id.starts_with(id)))
    }

    /// The last `limit` records, newest first
    pub fn recent(&self, limit: usize) -> Result<Vec<ExtractionRecord>> {
        let mut records = self.load_all()?;
        records.reverse();
        records.truncate(limit);
        Ok(records)
    }
}

fn read_records(file: &File, path: &Path) -> Result<Vec<ExtractionRecord>> {
    let reader = BufReader::new(file);
    let mut records = Vec::new();

    for line in reader.lines() {
        let line = line.with_context(|| format!("Failed to read {}", path.display()))?;
        if line.trim().is_empty() {
            continue;
        }

        let record: ExtractionRecord = serde_json::from_str(&line)
            .with_context(|| format!("Failed to parse record line: {}", line))?;

        records.push(record);
    }

    Ok(records)
}
