mod error;
mod vectorizer;
mod model;
mod label;
#[allow(clippy::module_inception)]
mod classifier;
pub mod builder;
mod utils;

pub use error::ClassifierError;
pub use vectorizer::{Analyzer, Norm, TfidfVectorizer};
pub use model::LogisticModel;
pub use label::{LabelMap, Sentiment};
pub use classifier::{Prediction, SentimentAnalyzer, SentimentClassifier};
pub use builder::ClassifierBuilder;

/// Information about the current state and configuration of a classifier
#[derive(Debug, Clone)]
pub struct ClassifierInfo {
    /// Labels the classifier was trained on
    pub classes: Vec<String>,
    /// Width of the feature vectors the classifier accepts
    pub num_features: usize,
    /// Number of terms in the vectorizer vocabulary
    pub vocabulary_size: usize,
    pub positive_label: String,
    pub negative_label: String,
    /// SHA-256 of the vectorizer file, if it was loaded from disk
    pub vectorizer_sha256: Option<String>,
    /// SHA-256 of the classifier file, if it was loaded from disk
    pub model_sha256: Option<String>,
}
