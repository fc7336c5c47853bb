use crate::VisionError;
use ndarray::Array4;
use std::path::Path;
use tract_onnx::prelude::*;

/// Inference seam between the request handlers and the model runtime. The
/// model is loaded once at startup and shared read-only for the process
/// lifetime; implementations must be safe to call from concurrent requests.
pub trait ImageClassifier: Send + Sync {
    /// Run the model on a preprocessed `[1, H, W, 3]` tensor and return the
    /// raw per-class scores in label order.
    fn infer(&self, input: &Array4<f32>) -> Result<Vec<f32>, VisionError>;
}

/// ONNX backend built on tract. The optimized plan runs through `&self` and
/// allocates its state per call, so no lock is needed for concurrent use.
pub struct TractClassifier {
    plan: TypedSimplePlan<TypedModel>,
}

impl TractClassifier {
    /// Load and optimize the model artifact, pinning the input to a single
    /// `[1, size, size, 3]` f32 image.
    pub fn load(path: impl AsRef<Path>, input_size: u32) -> Result<Self, VisionError> {
        let path = path.as_ref();
        let size = input_size as usize;

        let plan = tract_onnx::onnx()
            .model_for_path(path)
            .map_err(|e| VisionError::Model(format!("{}: {e}", path.display())))?
            .with_input_fact(
                0,
                InferenceFact::dt_shape(f32::datum_type(), tvec!(1, size, size, 3)),
            )
            .map_err(|e| VisionError::Model(e.to_string()))?
            .into_optimized()
            .map_err(|e| VisionError::Model(e.to_string()))?
            .into_runnable()
            .map_err(|e| VisionError::Model(e.to_string()))?;

        tracing::info!(model = %path.display(), input_size, "loaded ONNX classifier");
        Ok(Self { plan })
    }
}

impl ImageClassifier for TractClassifier {
    fn infer(&self, input: &Array4<f32>) -> Result<Vec<f32>, VisionError> {
        let flat: Vec<f32> = input.iter().copied().collect();
        let tensor = Tensor::from_shape(input.shape(), &flat)
            .map_err(|e| VisionError::Inference(e.to_string()))?;

        let outputs = self
            .plan
            .run(tvec!(tensor.into()))
            .map_err(|e| VisionError::Inference(e.to_string()))?;

        let scores = outputs
            .first()
            .ok_or_else(|| VisionError::Inference("model produced no outputs".to_string()))?
            .to_array_view::<f32>()
            .map_err(|e| VisionError::Inference(e.to_string()))?;

        Ok(scores.iter().copied().collect())
    }
}
