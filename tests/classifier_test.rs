use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;
use std::thread;

use qal_analyzer::{
    ArtifactManager, ClassifierError, LogisticModel, Sentiment, SentimentClassifier,
    TfidfVectorizer, TrainedArtifacts,
};

fn sample_models_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("models")
}

fn setup_test_classifier() -> SentimentClassifier {
    let manager = ArtifactManager::new(sample_models_dir());
    SentimentClassifier::builder()
        .with_artifact_manager(&manager)
        .unwrap()
        .build()
        .expect("Failed to create classifier")
}

fn mismatched_classifier() -> SentimentClassifier {
    let vocabulary: HashMap<String, usize> = [("ጥሩ".to_string(), 0)].into_iter().collect();
    let vectorizer = TfidfVectorizer::new(vocabulary, vec![1.0]).unwrap();
    let model = LogisticModel::new(
        vec!["0".into(), "1".into()],
        vec![vec![1.0, -1.0, 0.5]],
        vec![0.0],
    )
    .unwrap();
    SentimentClassifier::builder()
        .with_artifacts(Arc::new(TrainedArtifacts::new(vectorizer, model)))
        .build()
        .unwrap()
}

#[test]
fn test_positive_scenario() -> Result<(), ClassifierError> {
    let classifier = setup_test_classifier();
    let prediction = classifier.classify("በጣም ጥሩ ነው")?;
    assert_eq!(prediction.label, "1");
    assert_eq!(prediction.sentiment, Sentiment::Positive);
    assert!(prediction.confidence > 0.5 && prediction.confidence <= 1.0);
    Ok(())
}

#[test]
fn test_negative_scenario() -> Result<(), ClassifierError> {
    let classifier = setup_test_classifier();
    let prediction = classifier.classify("በጣም መጥፎ ነው")?;
    assert_eq!(prediction.label, "0");
    assert_eq!(prediction.sentiment, Sentiment::Negative);
    Ok(())
}

#[test]
fn test_empty_and_whitespace_input() {
    let classifier = setup_test_classifier();
    assert!(matches!(classifier.classify(""), Err(ClassifierError::EmptyInput)));
    assert!(matches!(classifier.classify("   "), Err(ClassifierError::EmptyInput)));
}

#[test]
fn test_predictions_are_deterministic() -> Result<(), ClassifierError> {
    let classifier = setup_test_classifier();
    let inputs = ["በጣም ጥሩ ነው", "በጣም መጥፎ ነው", "ፊልሙ አስደናቂ ነው", "unrelated words"];
    for text in inputs {
        let first = classifier.classify(text)?;
        for _ in 0..5 {
            assert_eq!(classifier.classify(text)?, first);
        }
        assert!(["0", "1"].contains(&first.label.as_str()));
    }
    Ok(())
}

#[test]
fn test_classifiers_share_artifacts() -> Result<(), Box<dyn std::error::Error>> {
    let manager = ArtifactManager::new(sample_models_dir());
    let a = SentimentClassifier::builder().with_artifact_manager(&manager)?.build()?;
    let b = SentimentClassifier::builder().with_artifact_manager(&manager)?.build()?;
    assert!(Arc::ptr_eq(a.artifacts(), b.artifacts()));
    assert_eq!(a.classify("ምርጥ")?, b.classify("ምርጥ")?);
    Ok(())
}

#[test]
fn test_dimension_mismatch_surfaces_at_inference() {
    let classifier = mismatched_classifier();
    match classifier.classify("ጥሩ") {
        Err(err @ ClassifierError::DimensionMismatch { expected: 3, actual: 1 }) => {
            assert!(err.is_inference_failure());
        }
        other => panic!("expected dimension mismatch, got {:?}", other),
    }
}

#[test]
fn test_custom_labels_mark_unknown() -> Result<(), Box<dyn std::error::Error>> {
    let manager = ArtifactManager::new(sample_models_dir());
    let classifier = SentimentClassifier::builder()
        .with_artifact_manager(&manager)?
        .with_labels("pos", "neg")?
        .build()?;
    let prediction = classifier.classify("በጣም ጥሩ ነው")?;
    assert_eq!(prediction.label, "1");
    assert_eq!(prediction.sentiment, Sentiment::Unknown);
    Ok(())
}

#[test]
fn test_builder_rejects_second_artifact_source() {
    let manager = ArtifactManager::new(sample_models_dir());
    let result = SentimentClassifier::builder()
        .with_artifact_manager(&manager)
        .and_then(|builder| builder.with_artifact_manager(&manager));
    assert!(matches!(result, Err(ClassifierError::BuildError(_))));
}

#[test]
fn test_classifier_info() {
    let classifier = setup_test_classifier();
    let info = classifier.info();
    assert_eq!(info.classes, vec!["0", "1"]);
    assert_eq!(info.num_features, 14);
    assert_eq!(info.vocabulary_size, 14);
    assert_eq!(info.positive_label, "1");
    assert_eq!(info.negative_label, "0");
    assert_eq!(info.model_sha256.as_ref().map(String::len), Some(64));
}

#[test]
fn test_thread_safety() {
    let classifier = Arc::new(setup_test_classifier());
    let mut handles = vec![];

    for _ in 0..3 {
        let classifier = Arc::clone(&classifier);
        let handle = thread::spawn(move || {
            let result = classifier.classify("በጣም ጥሩ ነው");
            assert_eq!(result.unwrap().sentiment, Sentiment::Positive);
        });
        handles.push(handle);
    }

    for handle in handles {
        handle.join().unwrap();
    }
}
