use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::Context;
use chrono::NaiveDate;
use tracing::info;

use crate::error::PersistError;

pub const SNAPSHOT_HEADER: &str = "project_names";

/// Reads and writes the dated snapshot files that carry one day's project
/// name set forward as the next day's comparison baseline. Each date owns
/// exactly one file; re-running the same day overwrites that day's file and
/// never touches any other date's.
pub struct SnapshotStore {
    dir: PathBuf,
}

impl SnapshotStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        SnapshotStore { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, date: NaiveDate) -> PathBuf {
        self.dir
            .join(format!("project_names_{}.csv", date.format("%Y-%m-%d")))
    }

    /// Loads the snapshot for `date`. A missing file is the normal first-run
    /// case and yields an empty set without creating anything. Rows that are
    /// empty after trimming are dropped; surviving rows keep their stored
    /// form untouched.
    pub fn load(&self, date: NaiveDate) -> Result<Vec<String>, PersistError> {
        let path = self.path_for(date);
        if !path.exists() {
            info!(
                action = "load",
                component = "snapshot_store",
                date = %date,
                path = %path.display(),
                "No snapshot for date, treating as empty set"
            );
            return Ok(Vec::new());
        }

        let mut reader = csv::Reader::from_path(&path)
            .with_context(|| format!("failed to open snapshot {}", path.display()))?;

        let mut names = Vec::new();
        for record in reader.records() {
            let record = record
                .with_context(|| format!("failed to read snapshot row in {}", path.display()))?;
            if let Some(value) = record.get(0) {
                if !value.trim().is_empty() {
                    names.push(value.to_string());
                }
            }
        }

        info!(
            action = "load",
            component = "snapshot_store",
            date = %date,
            name_count = names.len(),
            "Snapshot loaded"
        );
        Ok(names)
    }

    /// Writes the snapshot for `date`, sorted ascending by the raw name,
    /// creating the snapshot directory if needed. Idempotent for the same
    /// date.
    pub fn save(&self, date: NaiveDate, names: &[String]) -> Result<(), PersistError> {
        let start = Instant::now();
        fs::create_dir_all(&self.dir).with_context(|| {
            format!("failed to create snapshot directory {}", self.dir.display())
        })?;

        let mut sorted = names.to_vec();
        sorted.sort();

        let path = self.path_for(date);
        let mut writer = csv::Writer::from_path(&path)
            .with_context(|| format!("failed to create snapshot {}", path.display()))?;
        writer
            .write_record([SNAPSHOT_HEADER])
            .context("failed to write snapshot header")?;
        for name in &sorted {
            writer
                .write_record([name.as_str()])
                .with_context(|| format!("failed to write snapshot row to {}", path.display()))?;
        }
        writer
            .flush()
            .with_context(|| format!("failed to flush snapshot {}", path.display()))?;

        info!(
            action = "save",
            component = "snapshot_store",
            date = %date,
            name_count = sorted.len(),
            path = %path.display(),
            duration_ms = start.elapsed().as_millis(),
            "Snapshot written"
        );
        Ok(())
    }
}
