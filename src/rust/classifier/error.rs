use std::fmt;

use crate::artifacts::ArtifactError;

/// Represents the different types of errors that can occur while classifying text.
#[derive(Debug)]
pub enum ClassifierError {
    /// The submitted text was empty or contained only whitespace
    EmptyInput,
    /// The vectorizer produced a feature vector the classifier cannot consume
    DimensionMismatch { expected: usize, actual: usize },
    /// The classifier failed to produce a usable label
    PredictionError(String),
    /// Error occurred during the build phase
    BuildError(String),
}

impl fmt::Display for ClassifierError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyInput => write!(f, "Input text cannot be empty"),
            Self::DimensionMismatch { expected, actual } => write!(
                f,
                "Feature dimension mismatch: classifier expects {} features, vectorizer produced {}",
                expected, actual
            ),
            Self::PredictionError(msg) => write!(f, "Prediction error: {}", msg),
            Self::BuildError(msg) => write!(f, "Build error: {}", msg),
        }
    }
}

impl std::error::Error for ClassifierError {}

impl From<ArtifactError> for ClassifierError {
    fn from(err: ArtifactError) -> Self {
        ClassifierError::BuildError(err.to_string())
    }
}

impl ClassifierError {
    /// True for failures inside the pipeline, as opposed to rejected input.
    pub fn is_inference_failure(&self) -> bool {
        matches!(self, Self::DimensionMismatch { .. } | Self::PredictionError(_))
    }
}
