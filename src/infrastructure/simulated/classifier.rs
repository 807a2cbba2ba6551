// SPDX-License-Identifier: MPL-2.0
//! Classifiers that do not look at the images.

use crate::application::port::{ClassificationError, WasteClassifier};
use crate::domain::capture::{CapturedImage, WasteAnalysis};

/// Returns the same analysis for every collection.
#[derive(Debug, Clone, Copy, Default)]
pub struct StaticClassifier {
    analysis: WasteAnalysis,
}

impl StaticClassifier {
    #[must_use]
    pub fn new(analysis: WasteAnalysis) -> Self {
        Self { analysis }
    }
}

impl WasteClassifier for StaticClassifier {
    fn classify(
        &self,
        _pickup: &CapturedImage,
        _disposal: &CapturedImage,
    ) -> Result<WasteAnalysis, ClassificationError> {
        Ok(self.analysis)
    }
}

/// Classifier that is never available.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnavailableClassifier;

impl WasteClassifier for UnavailableClassifier {
    fn classify(
        &self,
        _pickup: &CapturedImage,
        _disposal: &CapturedImage,
    ) -> Result<WasteAnalysis, ClassificationError> {
        Err(ClassificationError::Unavailable(
            "classification disabled".to_string(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::capture::{ImageOrigin, WasteCategory};

    fn pixel() -> CapturedImage {
        CapturedImage::from_rgba(1, 1, vec![0; 4], ImageOrigin::Placeholder).unwrap()
    }

    #[test]
    fn static_classifier_returns_configured_analysis() {
        let analysis = WasteAnalysis::new(WasteCategory::Paper, 3.0, 10);
        let classifier = StaticClassifier::new(analysis);
        assert_eq!(classifier.classify(&pixel(), &pixel()), Ok(analysis));
    }

    #[test]
    fn default_static_classifier_reports_mixed_plastic() {
        let analysis = StaticClassifier::default()
            .classify(&pixel(), &pixel())
            .unwrap();
        assert_eq!(analysis.category, WasteCategory::MixedPlastic);
        assert_eq!(analysis.points, 42);
    }

    #[test]
    fn unavailable_classifier_fails() {
        assert!(UnavailableClassifier.classify(&pixel(), &pixel()).is_err());
    }
}
