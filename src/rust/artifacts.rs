use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use serde::de::DeserializeOwned;
use sha2::{Digest, Sha256};

use crate::classifier::{LogisticModel, TfidfVectorizer};

/// File name of the fitted vectorizer inside the models directory.
pub const VECTORIZER_FILE: &str = "tfidf_vectorizer.json";
/// File name of the fitted classifier inside the models directory.
pub const MODEL_FILE: &str = "logistic_model.json";
/// Overrides the default models directory.
pub const MODELS_DIR_ENV: &str = "QAL_MODELS_DIR";

#[derive(Debug, thiserror::Error)]
pub enum ArtifactError {
    #[error("Artifact not found: {0:?}")]
    NotFound(PathBuf),
    #[error("IO error reading {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Malformed {artifact} artifact at {path:?}: {source}")]
    Malformed {
        artifact: &'static str,
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("Invalid artifact: {0}")]
    Invalid(String),
    #[error("Hash mismatch: expected {expected}, got {actual} for {artifact} file")]
    HashMismatch {
        artifact: &'static str,
        expected: String,
        actual: String,
    },
    #[error("Artifact cache lock poisoned")]
    LockPoisoned,
}

/// The fitted vectorizer and classifier from one training run.
///
/// Never mutated after construction; share it through `Arc`.
#[derive(Debug)]
pub struct TrainedArtifacts {
    pub vectorizer: TfidfVectorizer,
    pub model: LogisticModel,
    pub vectorizer_sha256: Option<String>,
    pub model_sha256: Option<String>,
}

impl TrainedArtifacts {
    /// Pairs artifacts built in memory. No digests are recorded.
    pub fn new(vectorizer: TfidfVectorizer, model: LogisticModel) -> Self {
        Self {
            vectorizer,
            model,
            vectorizer_sha256: None,
            model_sha256: None,
        }
    }

    /// Whether the vectorizer output fits the classifier input.
    pub fn dimensions_agree(&self) -> bool {
        self.vectorizer.n_features() == self.model.n_features()
    }
}

/// Expected SHA-256 digests (lowercase or uppercase hex) of the artifact files.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArtifactChecksums {
    pub vectorizer: Option<String>,
    pub model: Option<String>,
}

/// Locates, verifies and loads the trained artifacts.
///
/// The first successful [`load`](Self::load) reads both files; later calls on
/// the same manager or any clone of it return the same handle.
#[derive(Debug, Clone)]
pub struct ArtifactManager {
    models_dir: PathBuf,
    checksums: ArtifactChecksums,
    loaded: Arc<Mutex<Option<Arc<TrainedArtifacts>>>>,
}

impl ArtifactManager {
    /// Creates a new ArtifactManager reading from the default models directory
    pub fn new_default() -> Self {
        Self::new(Self::get_default_models_dir())
    }

    /// Returns the default models directory path
    pub fn get_default_models_dir() -> PathBuf {
        match env::var(MODELS_DIR_ENV) {
            Ok(path) if !path.is_empty() => PathBuf::from(path),
            _ => PathBuf::from("models"),
        }
    }

    pub fn new<P: AsRef<Path>>(models_dir: P) -> Self {
        Self {
            models_dir: models_dir.as_ref().to_path_buf(),
            checksums: ArtifactChecksums::default(),
            loaded: Arc::new(Mutex::new(None)),
        }
    }

    pub fn with_checksums(mut self, checksums: ArtifactChecksums) -> Self {
        self.checksums = checksums;
        self
    }

    pub fn models_dir(&self) -> &Path {
        &self.models_dir
    }

    pub fn vectorizer_path(&self) -> PathBuf {
        self.models_dir.join(VECTORIZER_FILE)
    }

    pub fn model_path(&self) -> PathBuf {
        self.models_dir.join(MODEL_FILE)
    }

    pub fn artifacts_present(&self) -> bool {
        let vectorizer_path = self.vectorizer_path();
        let model_path = self.model_path();
        log::info!("Checking for artifacts:");
        log::info!("  Vectorizer path: {:?} (exists: {})", vectorizer_path, vectorizer_path.exists());
        log::info!("  Model path: {:?} (exists: {})", model_path, model_path.exists());
        vectorizer_path.exists() && model_path.exists()
    }

    /// True once artifacts have been loaded and cached.
    pub fn is_loaded(&self) -> bool {
        self.loaded.lock().map(|slot| slot.is_some()).unwrap_or(false)
    }

    /// Returns the loaded artifacts, reading them from disk on first use.
    ///
    /// Concurrent first calls are serialized, so disk is read at most once per
    /// successful load. A failed load leaves nothing cached.
    pub fn load(&self) -> Result<Arc<TrainedArtifacts>, ArtifactError> {
        let mut slot = self.loaded.lock().map_err(|_| ArtifactError::LockPoisoned)?;
        if let Some(artifacts) = slot.as_ref() {
            log::debug!("Reusing artifacts loaded from {:?}", self.models_dir);
            return Ok(Arc::clone(artifacts));
        }

        let artifacts = Arc::new(self.read_artifacts()?);
        *slot = Some(Arc::clone(&artifacts));
        Ok(artifacts)
    }

    fn read_artifacts(&self) -> Result<TrainedArtifacts, ArtifactError> {
        log::info!("Loading artifacts from {:?}", self.models_dir);

        let (vectorizer, vectorizer_sha256) = Self::read_artifact::<TfidfVectorizer>(
            &self.vectorizer_path(),
            "vectorizer",
            self.checksums.vectorizer.as_deref(),
        )?;
        let (model, model_sha256) = Self::read_artifact::<LogisticModel>(
            &self.model_path(),
            "model",
            self.checksums.model.as_deref(),
        )?;

        let artifacts = TrainedArtifacts {
            vectorizer,
            model,
            vectorizer_sha256: Some(vectorizer_sha256),
            model_sha256: Some(model_sha256),
        };

        if !artifacts.dimensions_agree() {
            log::warn!(
                "Vectorizer produces {} features but the model expects {}; every prediction will fail",
                artifacts.vectorizer.n_features(),
                artifacts.model.n_features()
            );
        }

        log::info!("Artifacts loaded successfully");
        Ok(artifacts)
    }

    fn read_artifact<T: DeserializeOwned>(
        path: &Path,
        artifact: &'static str,
        expected_hash: Option<&str>,
    ) -> Result<(T, String), ArtifactError> {
        let bytes = read_bytes(path)?;
        log::info!("Read {} bytes of {} from {:?}", bytes.len(), artifact, path);

        let hash = sha256_hex(&bytes);
        log::info!("Calculated {} hash: {}", artifact, hash);
        if let Some(expected) = expected_hash {
            if !hash.eq_ignore_ascii_case(expected) {
                log::error!("{} hash mismatch: expected {}, got {}", artifact, expected, hash);
                return Err(ArtifactError::HashMismatch {
                    artifact,
                    expected: expected.to_string(),
                    actual: hash,
                });
            }
        }

        let value = serde_json::from_slice(&bytes).map_err(|source| ArtifactError::Malformed {
            artifact,
            path: path.to_path_buf(),
            source,
        })?;
        Ok((value, hash))
    }

    pub fn verify_file(&self, path: &Path, expected_hash: &str) -> Result<bool, ArtifactError> {
        log::info!("Verifying file: {:?}", path);
        let hash = sha256_hex(&read_bytes(path)?);
        log::info!("Calculated hash: {}", hash);
        log::info!("Expected hash:   {}", expected_hash);
        Ok(hash.eq_ignore_ascii_case(expected_hash))
    }

    /// Checks both files exist and match any configured checksums.
    pub fn verify_artifacts(&self) -> Result<bool, ArtifactError> {
        if !self.artifacts_present() {
            log::info!("One or both artifact files do not exist");
            return Ok(false);
        }

        let vectorizer_ok = match &self.checksums.vectorizer {
            Some(expected) => self.verify_file(&self.vectorizer_path(), expected)?,
            None => true,
        };
        let model_ok = match &self.checksums.model {
            Some(expected) => self.verify_file(&self.model_path(), expected)?,
            None => true,
        };

        log::info!("Verification results:");
        log::info!("  Vectorizer hash verification: {}", vectorizer_ok);
        log::info!("  Model hash verification: {}", model_ok);

        Ok(vectorizer_ok && model_ok)
    }
}

fn read_bytes(path: &Path) -> Result<Vec<u8>, ArtifactError> {
    fs::read(path).map_err(|source| match source.kind() {
        io::ErrorKind::NotFound => ArtifactError::NotFound(path.to_path_buf()),
        _ => ArtifactError::Io {
            path: path.to_path_buf(),
            source,
        },
    })
}

pub(crate) fn sha256_hex(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    format!("{:x}", hasher.finalize())
}
