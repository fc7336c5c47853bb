use crate::VisionError;
use florascan_types::UNKNOWN_CATEGORY;
use serde::{Deserialize, Serialize};

/// Outcome of the classification policy: the user-facing category and the
/// raw top-class probability.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Classification {
    pub category: String,
    pub confidence: f32,
}

/// Numerically-stable softmax over raw model scores. The model emits
/// unnormalized logits, so scores are always normalized before the policy
/// runs; softmax preserves the argmax, so applying it to an already
/// normalized vector is harmless.
pub fn softmax(scores: &[f32]) -> Vec<f32> {
    let max = scores.iter().copied().fold(f32::NEG_INFINITY, f32::max);
    let exps: Vec<f32> = scores.iter().map(|&s| (s - max).exp()).collect();
    let sum: f32 = exps.iter().sum();
    exps.iter().map(|&e| e / sum).collect()
}

/// Select the top class and apply the rejection rule.
///
/// The argmax breaks ties by first occurrence. The returned confidence is
/// always the raw top probability, even when the category is overridden.
/// Rejection applies in order: a win for the negative label maps to
/// [`UNKNOWN_CATEGORY`], then any confidence below `threshold` does the same.
///
/// A probability vector whose length differs from the label set is a caller
/// bug and fails with [`VisionError::Shape`].
pub fn classify(
    probabilities: &[f32],
    labels: &[String],
    negative_label: &str,
    threshold: f32,
) -> Result<Classification, VisionError> {
    if probabilities.len() != labels.len() || probabilities.is_empty() {
        return Err(VisionError::Shape {
            expected: labels.len(),
            got: probabilities.len(),
        });
    }

    let mut best_idx = 0usize;
    let mut best_score = probabilities[0];
    for (i, &p) in probabilities.iter().enumerate().skip(1) {
        if p > best_score {
            best_idx = i;
            best_score = p;
        }
    }

    let label = labels[best_idx].as_str();
    let category = if label == negative_label || best_score < threshold {
        UNKNOWN_CATEGORY.to_string()
    } else {
        label.to_string()
    };

    Ok(Classification {
        category,
        confidence: best_score,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flower_labels() -> Vec<String> {
        ["daisy", "dandelion", "roses", "sunflowers", "tulips", "no_flor"]
            .iter()
            .map(|s| s.to_string())
            .collect()
    }

    #[test]
    fn confident_positive_class_wins() {
        let probs = [0.85, 0.03, 0.03, 0.03, 0.03, 0.03];
        let result = classify(&probs, &flower_labels(), "no_flor", 0.80).unwrap();
        assert_eq!(result.category, "daisy");
        assert_eq!(result.confidence, 0.85);
    }

    #[test]
    fn negative_class_is_rejected_regardless_of_confidence() {
        let probs = [0.1, 0.05, 0.05, 0.1, 0.1, 0.6];
        let result = classify(&probs, &flower_labels(), "no_flor", 0.80).unwrap();
        assert_eq!(result.category, UNKNOWN_CATEGORY);
        assert_eq!(result.confidence, 0.6);

        let certain = [0.0, 0.0, 0.0, 0.0, 0.0, 1.0];
        let result = classify(&certain, &flower_labels(), "no_flor", 0.80).unwrap();
        assert_eq!(result.category, UNKNOWN_CATEGORY);
        assert_eq!(result.confidence, 1.0);
    }

    #[test]
    fn low_confidence_positive_is_rejected() {
        let probs = [0.79, 0.05, 0.04, 0.04, 0.04, 0.04];
        let result = classify(&probs, &flower_labels(), "no_flor", 0.80).unwrap();
        assert_eq!(result.category, UNKNOWN_CATEGORY);
        assert_eq!(result.confidence, 0.79);
    }

    #[test]
    fn threshold_is_strict_less_than() {
        let probs = [0.799_99, 0.05, 0.04, 0.04, 0.04, 0.030_01];
        let result = classify(&probs, &flower_labels(), "no_flor", 0.80).unwrap();
        assert_eq!(result.category, UNKNOWN_CATEGORY);

        let probs = [0.80, 0.05, 0.04, 0.04, 0.04, 0.03];
        let result = classify(&probs, &flower_labels(), "no_flor", 0.80).unwrap();
        assert_eq!(result.category, "daisy");
    }

    #[test]
    fn confidence_equals_max_even_when_rejected() {
        let probs = [0.3, 0.2, 0.1, 0.1, 0.1, 0.2];
        let result = classify(&probs, &flower_labels(), "no_flor", 0.80).unwrap();
        let max = probs.iter().copied().fold(f32::NEG_INFINITY, f32::max);
        assert_eq!(result.confidence, max);
    }

    #[test]
    fn argmax_tie_takes_first_occurrence() {
        let labels: Vec<String> = ["a", "b", "c"].iter().map(|s| s.to_string()).collect();
        let probs = [0.4, 0.4, 0.2];
        let result = classify(&probs, &labels, "c", 0.0).unwrap();
        assert_eq!(result.category, "a");
    }

    #[test]
    fn length_mismatch_is_a_shape_error() {
        let probs = [0.5, 0.5];
        let err = classify(&probs, &flower_labels(), "no_flor", 0.80).unwrap_err();
        assert!(matches!(err, VisionError::Shape { expected: 6, got: 2 }));
    }

    #[test]
    fn empty_vector_is_a_shape_error() {
        let err = classify(&[], &[], "no_flor", 0.80).unwrap_err();
        assert!(matches!(err, VisionError::Shape { .. }));
    }

    #[test]
    fn softmax_sums_to_one_and_keeps_argmax() {
        let scores = [2.0, -1.0, 0.5, 8.0, 3.0, 0.0];
        let probs = softmax(&scores);
        let sum: f32 = probs.iter().sum();
        assert!((sum - 1.0).abs() < 1e-5);
        assert!(probs.iter().all(|&p| (0.0..=1.0).contains(&p)));
        let argmax = probs
            .iter()
            .enumerate()
            .max_by(|a, b| a.1.partial_cmp(b.1).unwrap())
            .unwrap()
            .0;
        assert_eq!(argmax, 3);
    }

    #[test]
    fn softmax_is_stable_for_large_scores() {
        let probs = softmax(&[1000.0, 999.0, 998.0]);
        assert!(probs.iter().all(|p| p.is_finite()));
        assert!((probs.iter().sum::<f32>() - 1.0).abs() < 1e-5);
    }
}
