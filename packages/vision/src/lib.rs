//! Image preprocessing, classification policy, and the ONNX inference
//! backend behind the `/predict` endpoint.

pub mod backend;
mod error;
pub mod policy;
pub mod preprocess;

pub use backend::{ImageClassifier, TractClassifier};
pub use error::VisionError;
pub use policy::{Classification, classify, softmax};
pub use preprocess::preprocess;

/// Parse a newline-separated label list (e.g. a `labels.txt` shipped next to
/// the model artifact). Blank lines and surrounding whitespace are ignored.
pub fn parse_labels(raw: &str) -> Vec<String> {
    raw.lines()
        .map(|l| l.trim().to_string())
        .filter(|l| !l.is_empty())
        .collect()
}
