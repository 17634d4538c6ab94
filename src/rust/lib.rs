//! Amharic sentiment classification behind a single web page.
//!
//! A fitted tf-idf vectorizer and logistic model are loaded once, shared
//! read-only, and used to label each submitted text as positive or negative.
//!
//! # Basic Usage
//!
//! ```rust,no_run
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use qal_analyzer::{ArtifactManager, Sentiment, SentimentClassifier};
//!
//! let manager = ArtifactManager::new("models");
//! let classifier = SentimentClassifier::builder()
//!     .with_artifact_manager(&manager)?
//!     .build()?;
//!
//! let prediction = classifier.classify("በጣም ጥሩ ነው")?;
//! assert_eq!(prediction.sentiment, Sentiment::Positive);
//! # Ok(())
//! # }
//! ```
//!
//! # Thread Safety
//!
//! Artifacts are loaded once per [`ArtifactManager`] and handed out as
//! `Arc<TrainedArtifacts>`, so classifiers can be cloned freely across threads:
//!
//! ```rust,no_run
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use qal_analyzer::{ArtifactManager, SentimentClassifier};
//! use std::thread;
//!
//! let artifacts = ArtifactManager::new("models").load()?;
//! let classifier = SentimentClassifier::builder()
//!     .with_artifacts(artifacts)
//!     .build()?;
//!
//! let mut handles = vec![];
//! for _ in 0..3 {
//!     let classifier = classifier.clone();
//!     handles.push(thread::spawn(move || classifier.classify("ጥሩ ነው")));
//! }
//!
//! for handle in handles {
//!     handle.join().unwrap()?;
//! }
//! # Ok(())
//! # }
//! ```

pub mod artifacts;
pub mod classifier;
pub mod config;
pub mod web;

pub use artifacts::{ArtifactChecksums, ArtifactError, ArtifactManager, TrainedArtifacts};
pub use classifier::{
    Analyzer, ClassifierBuilder, ClassifierError, ClassifierInfo, LabelMap, LogisticModel, Norm,
    Prediction, Sentiment, SentimentAnalyzer, SentimentClassifier, TfidfVectorizer,
};
pub use config::Config;

/// Initializes `env_logger`, defaulting to `info` when `RUST_LOG` is unset.
pub fn init_logger() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
}
