use std::fmt;

/// Sentiment decided from the classifier's raw label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sentiment {
    Positive,
    Negative,
    /// The classifier returned a label outside the configured pair
    Unknown,
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Positive => write!(f, "positive"),
            Self::Negative => write!(f, "negative"),
            Self::Unknown => write!(f, "unknown"),
        }
    }
}

/// The raw labels the training run used for each sentiment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelMap {
    pub positive: String,
    pub negative: String,
}

impl Default for LabelMap {
    fn default() -> Self {
        Self {
            positive: "1".to_string(),
            negative: "0".to_string(),
        }
    }
}

impl LabelMap {
    pub fn new(positive: impl Into<String>, negative: impl Into<String>) -> Self {
        Self {
            positive: positive.into(),
            negative: negative.into(),
        }
    }

    pub fn sentiment_of(&self, label: &str) -> Sentiment {
        if label == self.positive {
            Sentiment::Positive
        } else if label == self.negative {
            Sentiment::Negative
        } else {
            Sentiment::Unknown
        }
    }
}
