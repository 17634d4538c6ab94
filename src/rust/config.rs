use std::path::PathBuf;

use clap::Parser;

use crate::artifacts::{ArtifactChecksums, ArtifactManager};

/// Runtime configuration for the analyzer server.
#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Config {
    /// Directory holding tfidf_vectorizer.json and logistic_model.json
    #[arg(long, env = "QAL_MODELS_DIR", default_value = "models")]
    pub models_dir: PathBuf,

    /// Address to bind the web server to
    #[arg(long, env = "QAL_HOST", default_value = "127.0.0.1")]
    pub host: String,

    /// Port to serve the page on
    #[arg(short, long, env = "QAL_PORT", default_value_t = 8501)]
    pub port: u16,

    /// Number of HTTP workers (0 lets actix-web decide)
    #[arg(long, env = "QAL_WORKERS", default_value_t = 0)]
    pub workers: usize,

    /// Expected SHA-256 of the vectorizer file
    #[arg(long, env = "QAL_VECTORIZER_SHA256")]
    pub vectorizer_sha256: Option<String>,

    /// Expected SHA-256 of the classifier file
    #[arg(long, env = "QAL_MODEL_SHA256")]
    pub model_sha256: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            models_dir: PathBuf::from("models"),
            host: "127.0.0.1".to_string(),
            port: 8501,
            workers: 0, // Let actix-web decide
            vectorizer_sha256: None,
            model_sha256: None,
        }
    }
}

impl Config {
    pub fn checksums(&self) -> ArtifactChecksums {
        ArtifactChecksums {
            vectorizer: self.vectorizer_sha256.clone(),
            model: self.model_sha256.clone(),
        }
    }

    pub fn artifact_manager(&self) -> ArtifactManager {
        ArtifactManager::new(&self.models_dir).with_checksums(self.checksums())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_flags() {
        let config = Config::try_parse_from([
            "qal_analyzer",
            "--models-dir",
            "/srv/models",
            "--host",
            "0.0.0.0",
            "--port",
            "9000",
            "--workers",
            "2",
            "--model-sha256",
            "abc123",
        ])
        .unwrap();
        assert_eq!(config.models_dir, PathBuf::from("/srv/models"));
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 9000);
        assert_eq!(config.workers, 2);
        assert_eq!(config.checksums().model.as_deref(), Some("abc123"));
        assert!(config.checksums().vectorizer.is_none());
    }

    #[test]
    fn test_artifact_manager_uses_models_dir() {
        let config = Config {
            models_dir: PathBuf::from("/srv/models"),
            ..Config::default()
        };
        let manager = config.artifact_manager();
        assert_eq!(manager.models_dir(), PathBuf::from("/srv/models").as_path());
    }

    #[test]
    fn test_rejects_bad_port() {
        assert!(Config::try_parse_from(["qal_analyzer", "--port", "not-a-port"]).is_err());
    }
}
