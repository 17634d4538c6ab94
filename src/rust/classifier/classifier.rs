use std::sync::Arc;

use log::debug;

use super::error::ClassifierError;
use super::label::{LabelMap, Sentiment};
use crate::artifacts::TrainedArtifacts;

/// The outcome of classifying one piece of text.
#[derive(Debug, Clone, PartialEq)]
pub struct Prediction {
    /// The label exactly as the classifier produced it
    pub label: String,
    pub sentiment: Sentiment,
    /// Probability the classifier assigned to `label`
    pub confidence: f32,
}

/// Anything that can turn text into a [`Prediction`].
///
/// The web layer only depends on this trait, which keeps it testable
/// without trained artifacts on disk.
pub trait SentimentAnalyzer: Send + Sync {
    fn classify(&self, text: &str) -> Result<Prediction, ClassifierError>;
}

/// A thread-safe sentiment classifier built from a vectorizer and a
/// logistic model that were loaded once and are shared read-only.
///
/// ```rust,no_run
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// use qal_analyzer::{ArtifactManager, SentimentClassifier};
///
/// let manager = ArtifactManager::new("models");
/// let classifier = SentimentClassifier::builder()
///     .with_artifact_manager(&manager)?
///     .build()?;
///
/// let prediction = classifier.classify("በጣም ጥሩ ነው")?;
/// println!("{} ({})", prediction.label, prediction.sentiment);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct SentimentClassifier {
    artifacts: Arc<TrainedArtifacts>,
    labels: LabelMap,
}

// Compile-time verification of thread-safety
const _: () = {
    fn assert_send_sync<T: Send + Sync>() {}
    fn verify_thread_safety() {
        assert_send_sync::<SentimentClassifier>();
    }
};

impl SentimentClassifier {
    /// Creates a new ClassifierBuilder for fluent construction
    pub fn builder() -> super::builder::ClassifierBuilder {
        super::builder::ClassifierBuilder::new()
    }

    pub(crate) fn from_parts(artifacts: Arc<TrainedArtifacts>, labels: LabelMap) -> Self {
        Self { artifacts, labels }
    }

    pub fn artifacts(&self) -> &Arc<TrainedArtifacts> {
        &self.artifacts
    }

    pub fn labels(&self) -> &LabelMap {
        &self.labels
    }

    /// Returns information about the classifier's current state
    pub fn info(&self) -> super::ClassifierInfo {
        super::ClassifierInfo {
            classes: self.artifacts.model.classes().to_vec(),
            num_features: self.artifacts.model.n_features(),
            vocabulary_size: self.artifacts.vectorizer.vocabulary_size(),
            positive_label: self.labels.positive.clone(),
            negative_label: self.labels.negative.clone(),
            vectorizer_sha256: self.artifacts.vectorizer_sha256.clone(),
            model_sha256: self.artifacts.model_sha256.clone(),
        }
    }

    /// Classifies the sentiment of `text`.
    ///
    /// # Errors
    /// - `EmptyInput` if `text` is empty or whitespace only
    /// - `DimensionMismatch` if the vectorizer and classifier disagree on width
    /// - `PredictionError` if the classifier output is unusable
    pub fn classify(&self, text: &str) -> Result<Prediction, ClassifierError> {
        if text.trim().is_empty() {
            return Err(ClassifierError::EmptyInput);
        }

        let features = self.artifacts.vectorizer.transform(text);
        let (label, confidence) = self.artifacts.model.predict(&features)?;
        let sentiment = self.labels.sentiment_of(&label);
        debug!(
            "Classified {} chars as '{}' ({}, p={:.3})",
            text.chars().count(),
            label,
            sentiment,
            confidence
        );

        Ok(Prediction {
            label,
            sentiment,
            confidence,
        })
    }
}

impl SentimentAnalyzer for SentimentClassifier {
    fn classify(&self, text: &str) -> Result<Prediction, ClassifierError> {
        SentimentClassifier::classify(self, text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{LogisticModel, TfidfVectorizer};
    use std::collections::HashMap;

    fn setup_test_classifier() -> SentimentClassifier {
        let vocabulary: HashMap<String, usize> = [("ጥሩ", 0), ("መጥፎ", 1)]
            .into_iter()
            .map(|(term, column)| (term.to_string(), column))
            .collect();
        let vectorizer = TfidfVectorizer::new(vocabulary, vec![1.0, 1.0]).unwrap();
        let model = LogisticModel::new(
            vec!["0".into(), "1".into()],
            vec![vec![3.0, -3.0]],
            vec![0.0],
        )
        .unwrap();
        SentimentClassifier::builder()
            .with_artifacts(Arc::new(TrainedArtifacts::new(vectorizer, model)))
            .build()
            .expect("Failed to create classifier")
    }

    #[test]
    fn test_classifier_info() {
        let classifier = setup_test_classifier();
        let info = classifier.info();
        assert_eq!(info.classes, vec!["0", "1"]);
        assert_eq!(info.num_features, 2);
        assert_eq!(info.vocabulary_size, 2);
        assert!(info.vectorizer_sha256.is_none());
    }

    #[test]
    fn test_whitespace_is_rejected() {
        let classifier = setup_test_classifier();
        assert!(matches!(classifier.classify(" \n\t "), Err(ClassifierError::EmptyInput)));
    }

    #[test]
    fn test_sentiments() {
        let classifier = setup_test_classifier();
        let positive = classifier.classify("ጥሩ").unwrap();
        assert_eq!(positive.label, "1");
        assert_eq!(positive.sentiment, Sentiment::Positive);

        let negative = classifier.classify("መጥፎ").unwrap();
        assert_eq!(negative.label, "0");
        assert_eq!(negative.sentiment, Sentiment::Negative);
    }

    #[test]
    fn test_trait_object_dispatch() {
        let analyzer: Arc<dyn SentimentAnalyzer> = Arc::new(setup_test_classifier());
        assert_eq!(analyzer.classify("ጥሩ").unwrap().sentiment, Sentiment::Positive);
    }
}
