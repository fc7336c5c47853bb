use crate::{HistoryError, HistoryStore};
use chrono::{DateTime, Utc};
use florascan_types::{PredictionRecord, async_trait};
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;

const HEADER: [&str; 4] = ["timestamp", "filename", "category", "confidence"];

/// File-backed history log: one CSV row per prediction, header written on
/// first creation, confidence stored with 4 decimal places.
pub struct CsvHistory {
    path: PathBuf,
    /// Serializes appends so concurrent requests cannot interleave rows.
    write_lock: Mutex<()>,
}

impl CsvHistory {
    /// Open (or create with a header) the log at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Result<Self, HistoryError> {
        let path = path.into();
        if !path.exists() {
            if let Some(parent) = path.parent()
                && !parent.as_os_str().is_empty()
            {
                std::fs::create_dir_all(parent)?;
            }
            let mut writer = csv::Writer::from_path(&path)?;
            writer.write_record(HEADER)?;
            writer.flush()?;
            tracing::info!(path = %path.display(), "created history log");
        }
        Ok(Self {
            path,
            write_lock: Mutex::new(()),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl HistoryStore for CsvHistory {
    async fn append(&self, record: &PredictionRecord) -> Result<(), HistoryError> {
        let _guard = self.write_lock.lock().await;

        let file = OpenOptions::new().append(true).open(&self.path)?;
        let mut writer = csv::Writer::from_writer(file);
        writer.write_record([
            record.timestamp.to_rfc3339(),
            record.filename.clone(),
            record.category.clone(),
            format!("{:.4}", record.confidence),
        ])?;
        writer.flush()?;
        Ok(())
    }

    async fn read_last(&self, n: usize) -> Result<Vec<PredictionRecord>, HistoryError> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .from_path(&self.path)?;

        let mut records = Vec::new();
        for row in reader.records() {
            let row = row?;
            let timestamp = row.get(0).ok_or(HistoryError::Malformed)?;
            let timestamp: DateTime<Utc> =
                DateTime::parse_from_rfc3339(timestamp)?.with_timezone(&Utc);
            let filename = row.get(1).ok_or(HistoryError::Malformed)?.to_string();
            let category = row.get(2).ok_or(HistoryError::Malformed)?.to_string();
            let confidence: f32 = row.get(3).ok_or(HistoryError::Malformed)?.parse()?;

            records.push(PredictionRecord {
                timestamp,
                filename,
                category,
                confidence,
            });
        }

        let skip = records.len().saturating_sub(n);
        Ok(records.split_off(skip))
    }
}
