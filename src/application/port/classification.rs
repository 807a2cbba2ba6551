// SPDX-License-Identifier: MPL-2.0
//! Waste classification port definition.

use crate::domain::capture::{CapturedImage, WasteAnalysis};
use std::fmt;

/// Errors that can occur while classifying a collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClassificationError {
    /// The classifier is not available right now.
    Unavailable(String),
    /// The images cannot be analysed (placeholder, too small, ...).
    UnsupportedImage,
}

impl ClassificationError {
    /// Returns the i18n message key for this error.
    #[must_use]
    pub fn i18n_key(&self) -> &'static str {
        match self {
            ClassificationError::Unavailable(_) => "analysis-error-unavailable",
            ClassificationError::UnsupportedImage => "analysis-error-unsupported-image",
        }
    }
}

impl fmt::Display for ClassificationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClassificationError::Unavailable(msg) => write!(f, "classifier unavailable: {msg}"),
            ClassificationError::UnsupportedImage => write!(f, "image cannot be classified"),
        }
    }
}

impl std::error::Error for ClassificationError {}

/// Port for estimating what was collected from the pickup and disposal photos.
pub trait WasteClassifier: Send + Sync {
    /// Analyses one collection.
    ///
    /// # Errors
    ///
    /// Returns a [`ClassificationError`] when no estimate can be produced.
    /// Callers treat this as non-blocking.
    fn classify(
        &self,
        pickup: &CapturedImage,
        disposal: &CapturedImage,
    ) -> Result<WasteAnalysis, ClassificationError>;
}
