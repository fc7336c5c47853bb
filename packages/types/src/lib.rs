//! Shared base types for the florascan workspace.
//!
//! Every other crate pulls `Result`, `async_trait`, and the common domain
//! types from here instead of importing them piecemeal.

pub use anyhow::{Error, Result, anyhow, bail};
pub use async_trait::async_trait;

mod record;

pub use record::PredictionRecord;

use serde::{Deserialize, Serialize};

/// Category reported whenever the rejection rule fires: either the model
/// picked the negative class, or the top confidence fell below the threshold.
pub const UNKNOWN_CATEGORY: &str = "unknown / unrecognized object";

/// Immutable per-process classifier configuration. Built once at startup and
/// shared read-only with the request handlers.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ClassifierConfig {
    /// Ordered class labels; index position matches the model output.
    pub labels: Vec<String>,
    /// The negative/background class catching out-of-domain inputs.
    pub negative_label: String,
    /// Minimum top-class probability below which a prediction is rejected.
    pub threshold: f32,
    /// Model input resolution (square, pixels).
    pub input_size: u32,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            labels: [
                "daisy",
                "dandelion",
                "roses",
                "sunflowers",
                "tulips",
                "no_flor",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
            negative_label: "no_flor".to_string(),
            threshold: 0.80,
            input_size: 180,
        }
    }
}

/// Generate a correlation id for error reports.
pub fn create_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// Round to 4 decimal places, the precision used for every confidence value
/// that leaves the process (history log and JSON responses).
pub fn round4(value: f32) -> f32 {
    (value * 10_000.0).round() / 10_000.0
}
