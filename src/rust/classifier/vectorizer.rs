use std::collections::{HashMap, HashSet};

use ndarray::Array1;
use regex::Regex;
use serde::Deserialize;

use super::utils::normalize_vector;
use crate::artifacts::ArtifactError;

const DEFAULT_TOKEN_PATTERN: &str = r"(?u)\b\w\w+\b";

/// Row normalization applied after tf-idf weighting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Norm {
    L1,
    L2,
}

/// How raw text is split into terms before counting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Analyzer {
    /// Regex tokens, optionally joined into word n-grams
    #[default]
    Word,
    /// Character n-grams over whitespace-collapsed text
    Char,
}

fn default_lowercase() -> bool {
    true
}

fn default_ngram_range() -> (usize, usize) {
    (1, 1)
}

fn default_token_pattern() -> String {
    DEFAULT_TOKEN_PATTERN.to_string()
}

fn default_norm() -> Option<Norm> {
    Some(Norm::L2)
}

/// On-disk shape of a fitted vectorizer, before validation.
#[derive(Debug, Deserialize)]
struct RawVectorizer {
    vocabulary: HashMap<String, usize>,
    idf: Vec<f32>,
    #[serde(default = "default_lowercase")]
    lowercase: bool,
    #[serde(default)]
    analyzer: Analyzer,
    #[serde(default = "default_ngram_range")]
    ngram_range: (usize, usize),
    #[serde(default = "default_token_pattern")]
    token_pattern: String,
    #[serde(default)]
    stop_words: Option<Vec<String>>,
    #[serde(default)]
    sublinear_tf: bool,
    #[serde(default = "default_norm")]
    norm: Option<Norm>,
}

/// A fitted tf-idf vectorizer mapping raw text to a fixed-width feature vector.
///
/// The vocabulary and idf weights come from the training run; this type only
/// applies them. Terms outside the vocabulary are ignored, so text made
/// entirely of unseen words maps to the zero vector.
#[derive(Debug, Clone, Deserialize)]
#[serde(try_from = "RawVectorizer")]
pub struct TfidfVectorizer {
    vocabulary: HashMap<String, usize>,
    idf: Array1<f32>,
    lowercase: bool,
    analyzer: Analyzer,
    ngram_range: (usize, usize),
    token_pattern: Regex,
    stop_words: HashSet<String>,
    sublinear_tf: bool,
    norm: Option<Norm>,
}

impl TryFrom<RawVectorizer> for TfidfVectorizer {
    type Error = String;

    fn try_from(raw: RawVectorizer) -> Result<Self, Self::Error> {
        if raw.idf.len() != raw.vocabulary.len() {
            return Err(format!(
                "vocabulary has {} terms but idf has {} weights",
                raw.vocabulary.len(),
                raw.idf.len()
            ));
        }

        let mut seen = vec![false; raw.idf.len()];
        for (term, &column) in &raw.vocabulary {
            if column >= raw.idf.len() {
                return Err(format!(
                    "term '{}' maps to column {} but only {} columns exist",
                    term,
                    column,
                    raw.idf.len()
                ));
            }
            if std::mem::replace(&mut seen[column], true) {
                return Err(format!("column {} is assigned to more than one term", column));
            }
        }

        let (min_n, max_n) = raw.ngram_range;
        if min_n == 0 || min_n > max_n {
            return Err(format!("invalid ngram_range ({}, {})", min_n, max_n));
        }

        let token_pattern = Regex::new(&raw.token_pattern)
            .map_err(|e| format!("invalid token_pattern: {}", e))?;

        Ok(Self {
            vocabulary: raw.vocabulary,
            idf: Array1::from(raw.idf),
            lowercase: raw.lowercase,
            analyzer: raw.analyzer,
            ngram_range: raw.ngram_range,
            token_pattern,
            stop_words: raw.stop_words.unwrap_or_default().into_iter().collect(),
            sublinear_tf: raw.sublinear_tf,
            norm: raw.norm,
        })
    }
}

impl TfidfVectorizer {
    /// Creates a word-level vectorizer with default settings from a fitted
    /// vocabulary and its idf weights.
    pub fn new(vocabulary: HashMap<String, usize>, idf: Vec<f32>) -> Result<Self, ArtifactError> {
        Self::try_from(RawVectorizer {
            vocabulary,
            idf,
            lowercase: default_lowercase(),
            analyzer: Analyzer::default(),
            ngram_range: default_ngram_range(),
            token_pattern: default_token_pattern(),
            stop_words: None,
            sublinear_tf: false,
            norm: default_norm(),
        })
        .map_err(ArtifactError::Invalid)
    }

    /// Width of the vectors produced by [`transform`](Self::transform).
    pub fn n_features(&self) -> usize {
        self.idf.len()
    }

    pub fn vocabulary_size(&self) -> usize {
        self.vocabulary.len()
    }

    pub fn analyzer(&self) -> Analyzer {
        self.analyzer
    }

    /// Splits text into the terms that are looked up in the vocabulary.
    pub fn analyze(&self, text: &str) -> Vec<String> {
        let text = if self.lowercase {
            text.to_lowercase()
        } else {
            text.to_string()
        };

        match self.analyzer {
            Analyzer::Word => self.word_ngrams(&text),
            Analyzer::Char => self.char_ngrams(&text),
        }
    }

    /// Converts text into its tf-idf feature vector.
    pub fn transform(&self, text: &str) -> Array1<f32> {
        let mut tf = Array1::<f32>::zeros(self.n_features());
        for term in self.analyze(text) {
            if let Some(&column) = self.vocabulary.get(&term) {
                tf[column] += 1.0;
            }
        }

        if self.sublinear_tf {
            tf.mapv_inplace(|count| if count > 0.0 { 1.0 + count.ln() } else { 0.0 });
        }

        let weighted = tf * &self.idf;
        match self.norm {
            Some(norm) => normalize_vector(&weighted, norm),
            None => weighted,
        }
    }

    fn word_ngrams(&self, text: &str) -> Vec<String> {
        let tokens: Vec<&str> = self
            .token_pattern
            .find_iter(text)
            .map(|m| m.as_str())
            .filter(|token| !self.stop_words.contains(*token))
            .collect();

        let (min_n, max_n) = self.ngram_range;
        let mut terms = Vec::new();
        for n in min_n..=max_n.min(tokens.len()) {
            terms.extend(tokens.windows(n).map(|window| window.join(" ")));
        }
        terms
    }

    fn char_ngrams(&self, text: &str) -> Vec<String> {
        let chars = collapse_whitespace(text);
        let (min_n, max_n) = self.ngram_range;
        let mut terms = Vec::new();
        for n in min_n..=max_n.min(chars.len()) {
            terms.extend(chars.windows(n).map(|window| window.iter().collect::<String>()));
        }
        terms
    }
}

/// Replaces every run of two or more whitespace characters with one space.
fn collapse_whitespace(text: &str) -> Vec<char> {
    fn flush(out: &mut Vec<char>, run: &mut Vec<char>) {
        if run.len() >= 2 {
            out.push(' ');
        } else {
            out.append(run);
        }
        run.clear();
    }

    let mut out = Vec::with_capacity(text.len());
    let mut run = Vec::new();
    for c in text.chars() {
        if c.is_whitespace() {
            run.push(c);
        } else {
            flush(&mut out, &mut run);
            out.push(c);
        }
    }
    flush(&mut out, &mut run);
    out
}
