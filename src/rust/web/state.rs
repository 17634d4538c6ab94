use std::time::Instant;

use log::{debug, error, info};

use crate::classifier::{ClassifierError, Prediction, SentimentAnalyzer};

pub const EMPTY_INPUT_WARNING: &str = "⚠️ Please enter some text to analyze.";
pub const POSITIVE_MESSAGE: &str = "🎉 That sounds uplifting!";
pub const NEGATIVE_MESSAGE: &str = "😟 That doesn't sound great.";
pub const UNKNOWN_LABEL_NOTE: &str = "ℹ️ The model returned a label outside the expected set.";
pub const PENDING_MESSAGE: &str = "Analyzing sentiment...";

/// What the page shows after handling one interaction.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewState {
    /// Form only, nothing submitted yet
    Idle,
    /// Submission was blank; the classifier was not consulted
    Warning,
    Analyzed(Prediction),
    /// The classifier failed; carries a message fit for the user
    Failed(String),
}

impl ViewState {
    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failed(_))
    }
}

/// Runs the guard and, for non-blank text, the classifier.
pub fn submit(analyzer: &dyn SentimentAnalyzer, text: &str) -> ViewState {
    if text.trim().is_empty() {
        debug!("Rejected blank submission");
        return ViewState::Warning;
    }

    info!("Analyzing submission of {} chars", text.chars().count());
    let started = Instant::now();
    match analyzer.classify(text) {
        Ok(prediction) => {
            info!(
                "Predicted '{}' ({}, p={:.3}) in {:.2?}",
                prediction.label,
                prediction.sentiment,
                prediction.confidence,
                started.elapsed()
            );
            ViewState::Analyzed(prediction)
        }
        Err(ClassifierError::EmptyInput) => ViewState::Warning,
        Err(e) => {
            error!("Inference failed: {}", e);
            ViewState::Failed(format!("Something went wrong while analyzing your text: {}", e))
        }
    }
}
