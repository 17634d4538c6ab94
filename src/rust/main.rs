use std::sync::Arc;
use std::time::Instant;

use anyhow::Context;
use clap::Parser;
use log::info;
use qal_analyzer::{web, Config, SentimentClassifier};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    qal_analyzer::init_logger();
    let config = Config::parse();

    info!("=== Starting QalAnalyzer ===");
    let start_time = Instant::now();

    // Artifacts must load before anything is served.
    let manager = config.artifact_manager();
    let models_dir = config.models_dir.clone();
    let artifacts = tokio::task::spawn_blocking(move || manager.load())
        .await
        .context("artifact loading task panicked")?
        .with_context(|| format!("failed to load artifacts from {:?}", models_dir))?;

    let classifier = SentimentClassifier::builder()
        .with_artifacts(artifacts)
        .build()?;

    let info = classifier.info();
    info!(
        "=== Classifier ready (took {:.2?}): classes {:?}, {} features ===",
        start_time.elapsed(),
        info.classes,
        info.num_features
    );

    web::serve(&config, Arc::new(classifier))
        .await
        .context("web server failed")?;

    info!("=== QalAnalyzer stopped ===");
    Ok(())
}
