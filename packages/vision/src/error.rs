use thiserror::Error;

#[derive(Debug, Error)]
pub enum VisionError {
    /// The uploaded bytes do not parse as any supported image format.
    #[error("failed to decode image: {0}")]
    Decode(#[from] image::ImageError),

    /// Probability vector length does not match the label set. Unreachable
    /// through the request boundary; indicates a caller bug.
    #[error("probability vector has length {got}, expected {expected}")]
    Shape { expected: usize, got: usize },

    /// The model artifact could not be loaded or prepared.
    #[error("failed to load model: {0}")]
    Model(String),

    /// The inference collaborator failed at run time.
    #[error("inference failed: {0}")]
    Inference(String),
}
