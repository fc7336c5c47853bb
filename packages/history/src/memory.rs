use crate::{HistoryError, HistoryStore};
use florascan_types::{PredictionRecord, async_trait};
use tokio::sync::Mutex;

/// In-memory store for tests and ephemeral deployments.
#[derive(Default)]
pub struct MemoryHistory {
    records: Mutex<Vec<PredictionRecord>>,
}

impl MemoryHistory {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl HistoryStore for MemoryHistory {
    async fn append(&self, record: &PredictionRecord) -> Result<(), HistoryError> {
        self.records.lock().await.push(record.clone());
        Ok(())
    }

    async fn read_last(&self, n: usize) -> Result<Vec<PredictionRecord>, HistoryError> {
        let records = self.records.lock().await;
        let skip = records.len().saturating_sub(n);
        Ok(records[skip..].to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn keeps_insertion_order() {
        let store = MemoryHistory::new();
        for i in 0..5 {
            store
                .append(&PredictionRecord::new(format!("{i}.jpg"), "daisy", 0.9))
                .await
                .unwrap();
        }

        let last = store.read_last(3).await.unwrap();
        assert_eq!(last.len(), 3);
        assert_eq!(last[0].filename, "2.jpg");
        assert_eq!(last[2].filename, "4.jpg");
    }

    #[tokio::test]
    async fn read_more_than_stored_returns_all() {
        let store = MemoryHistory::new();
        store
            .append(&PredictionRecord::new("a.jpg", "roses", 0.91))
            .await
            .unwrap();
        assert_eq!(store.read_last(50).await.unwrap().len(), 1);
    }
}
