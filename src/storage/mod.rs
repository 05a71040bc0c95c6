// src/storage/mod.rs
use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::extractors::{ContentSection, YearlyStats};
use crate::utils::error::StorageError;

pub const STATS_FILENAME: &str = "mlb_stats_summary.csv";
pub const SECTIONS_FILENAME: &str = "mlb_history_sections.csv";
pub const SUMMARY_FILENAME: &str = "run_summary.json";

const STATS_HEADERS: [&str; 4] = ["Year", "Most Wins", "Most Losses", "Champion"];
const SECTIONS_HEADERS: [&str; 3] = ["Year", "Section", "Content"];

/// Counts reported at the end of a run.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RunSummary {
    pub index_url: String,
    pub years_discovered: usize,
    pub records_written: usize,
    pub sections_written: usize,
    pub pages_failed: usize,
}

pub struct StorageManager {
    base_dir: PathBuf,
}

impl StorageManager {
    /// Creates a new StorageManager with the specified base directory
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self, StorageError> {
        let base_path = base_dir.as_ref().to_path_buf();

        // Create the base directory if it doesn't exist
        if !base_path.exists() {
            fs::create_dir_all(&base_path)
                .map_err(StorageError::IoError)?;
        }

        Ok(Self { base_dir: base_path })
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Writes `rows` as CSV with `headers`, even when there are no rows.
    fn write_csv<T: Serialize>(&self, filename: &str, headers: &[&str], rows: &[T]) -> Result<PathBuf, StorageError> {
        let file_path = self.base_dir.join(filename);
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_path(&file_path)?;

        writer.write_record(headers)?;
        for row in rows {
            writer.serialize(row)?;
        }
        writer.flush().map_err(StorageError::IoError)?;

        tracing::info!("Saved {} rows to {}", rows.len(), file_path.display());
        Ok(file_path)
    }

    /// Saves the season summary table, one row per assembled year.
    pub fn save_stats(&self, stats: &[YearlyStats]) -> Result<PathBuf, StorageError> {
        self.write_csv(STATS_FILENAME, &STATS_HEADERS, stats)
    }

    /// Saves the narrative sections table in page-then-document order.
    pub fn save_sections(&self, sections: &[ContentSection]) -> Result<PathBuf, StorageError> {
        self.write_csv(SECTIONS_FILENAME, &SECTIONS_HEADERS, sections)
    }

    /// Saves run counts with a timestamp as pretty JSON.
    pub fn save_run_summary(&self, summary: &RunSummary) -> Result<PathBuf, StorageError> {
        let file_path = self.base_dir.join(SUMMARY_FILENAME);

        let mut metadata = serde_json::to_value(summary)
            .map_err(|e| StorageError::SerializationError(e.to_string()))?;
        if let Some(obj) = metadata.as_object_mut() {
            obj.insert(
                "extraction_timestamp".to_string(),
                serde_json::Value::String(chrono::Utc::now().to_rfc3339()),
            );
        }

        let metadata_str = serde_json::to_string_pretty(&metadata)
            .map_err(|e| StorageError::SerializationError(e.to_string()))?;

        fs::write(&file_path, metadata_str)
            .map_err(StorageError::IoError)?;

        tracing::info!("Saved run summary to {}", file_path.display());

        Ok(file_path)
    }
}
