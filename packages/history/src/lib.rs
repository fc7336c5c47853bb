//! Append-only prediction history.
//!
//! The store is a trait seam so the API layer never touches the file format
//! directly; [`CsvHistory`] is the durable implementation, [`MemoryHistory`]
//! backs tests.

mod csv_store;
mod memory;

pub use csv_store::CsvHistory;
pub use memory::MemoryHistory;

use florascan_types::{PredictionRecord, async_trait};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum HistoryError {
    #[error("history io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("history csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error("invalid timestamp in history row: {0}")]
    Timestamp(#[from] chrono::ParseError),
    #[error("invalid confidence in history row: {0}")]
    Confidence(#[from] std::num::ParseFloatError),
    #[error("malformed history row")]
    Malformed,
}

/// Append-only log of prediction records, readable back in insertion order.
#[async_trait]
pub trait HistoryStore: Send + Sync {
    /// Append one record. Concurrent appends must not interleave.
    async fn append(&self, record: &PredictionRecord) -> Result<(), HistoryError>;

    /// Return the last `n` records, oldest first.
    async fn read_last(&self, n: usize) -> Result<Vec<PredictionRecord>, HistoryError>;
}
