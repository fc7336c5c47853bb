use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One prediction as persisted in the history log. Append-only; records are
/// never mutated or deleted once written.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PredictionRecord {
    /// UTC timestamp of the prediction (RFC 3339 on the wire).
    pub timestamp: DateTime<Utc>,
    /// Original upload filename, `"unnamed"` when the client sent none.
    pub filename: String,
    /// Resulting category, possibly the unknown sentinel.
    pub category: String,
    /// Raw top-class probability, rounded to 4 decimals.
    pub confidence: f32,
}

impl PredictionRecord {
    pub fn new(filename: impl Into<String>, category: impl Into<String>, confidence: f32) -> Self {
        Self {
            timestamp: Utc::now(),
            filename: filename.into(),
            category: category.into(),
            confidence: crate::round4(confidence),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_rounds_confidence() {
        let record = PredictionRecord::new("rose.jpg", "roses", 0.987_654_3);
        assert_eq!(record.confidence, 0.9877);
        assert_eq!(record.filename, "rose.jpg");
        assert_eq!(record.category, "roses");
    }

    #[test]
    fn serializes_timestamp_as_rfc3339() {
        let record = PredictionRecord::new("a.png", "daisy", 0.9);
        let json = serde_json::to_string(&record).unwrap();
        assert!(json.contains("timestamp"));
        let back: PredictionRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back, record);
    }
}
