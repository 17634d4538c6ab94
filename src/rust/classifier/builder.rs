use std::sync::Arc;

use log::{info, warn};

use super::classifier::SentimentClassifier;
use super::error::ClassifierError;
use super::label::LabelMap;
use crate::artifacts::{ArtifactManager, TrainedArtifacts};

/// A builder for constructing a SentimentClassifier with a fluent interface.
#[derive(Debug, Default)]
pub struct ClassifierBuilder {
    artifacts: Option<Arc<TrainedArtifacts>>,
    labels: LabelMap,
}

impl ClassifierBuilder {
    /// Creates a new empty ClassifierBuilder using the `"1"`/`"0"` label pair
    ///
    /// # Example
    /// ```
    /// use qal_analyzer::ClassifierBuilder;
    ///
    /// let builder = ClassifierBuilder::new();
    /// ```
    pub fn new() -> Self {
        Self {
            artifacts: None,
            labels: LabelMap::default(),
        }
    }

    /// Uses artifacts that were already loaded.
    ///
    /// The same handle can back any number of classifiers; nothing is copied.
    pub fn with_artifacts(mut self, artifacts: Arc<TrainedArtifacts>) -> Self {
        self.artifacts = Some(artifacts);
        self
    }

    /// Loads artifacts through `manager`, reusing whatever it already holds.
    ///
    /// # Returns
    /// * `Result<Self, ClassifierError>` - The builder instance if successful, or an error if:
    ///   - Artifacts were already set on this builder
    ///   - Either artifact file is missing, unreadable or malformed
    ///   - A configured checksum does not match
    pub fn with_artifact_manager(mut self, manager: &ArtifactManager) -> Result<Self, ClassifierError> {
        if self.artifacts.is_some() {
            return Err(ClassifierError::BuildError("Artifacts already set".to_string()));
        }
        self.artifacts = Some(manager.load()?);
        Ok(self)
    }

    /// Sets which raw classifier labels mean positive and negative.
    ///
    /// # Example
    /// ```
    /// use qal_analyzer::ClassifierBuilder;
    ///
    /// let builder = ClassifierBuilder::new().with_labels("pos", "neg");
    /// assert!(builder.is_ok());
    /// assert!(ClassifierBuilder::new().with_labels("same", "same").is_err());
    /// ```
    pub fn with_labels(
        mut self,
        positive: impl Into<String>,
        negative: impl Into<String>,
    ) -> Result<Self, ClassifierError> {
        let labels = LabelMap::new(positive, negative);
        if labels.positive.is_empty() || labels.negative.is_empty() {
            return Err(ClassifierError::BuildError("Labels cannot be empty".to_string()));
        }
        if labels.positive == labels.negative {
            return Err(ClassifierError::BuildError(format!(
                "Positive and negative labels must differ, both are '{}'",
                labels.positive
            )));
        }
        self.labels = labels;
        Ok(self)
    }

    pub fn build(self) -> Result<SentimentClassifier, ClassifierError> {
        let artifacts = self.artifacts.ok_or_else(|| {
            ClassifierError::BuildError("No artifacts provided".to_string())
        })?;

        let classes = artifacts.model.classes();
        for label in [&self.labels.positive, &self.labels.negative] {
            if !classes.contains(label) {
                warn!("Label '{}' is not among the classifier classes {:?}", label, classes);
            }
        }

        info!(
            "Classifier built: {} classes, {} features, vocabulary of {} terms",
            classes.len(),
            artifacts.model.n_features(),
            artifacts.vectorizer.vocabulary_size()
        );
        Ok(SentimentClassifier::from_parts(artifacts, self.labels))
    }
}
