use crate::ocr_config::is_http_url;
use crate::{ConfigError, ConfigErrorResult, MAX_TIMEOUT_SECS, MIN_TIMEOUT_SECS};

use std::time::Duration;

use serde::Deserialize;

pub(crate) const DEFAULT_FACE_BASE_URL: &str = "http://127.0.0.1:5005";
pub(crate) const DEFAULT_FACE_MODEL_NAME: &str = "Facenet";
pub(crate) const DEFAULT_DETECTOR_BACKEND: &str = "retinaface";
pub(crate) const DEFAULT_DISTANCE_METRIC: &str = "cosine";
pub(crate) const DEFAULT_EMBEDDING_DIMENSION: usize = 128;
pub(crate) const DEFAULT_FACE_TIMEOUT_SECS: u64 = 120;

pub(crate) const MIN_EMBEDDING_DIMENSION: usize = 1;
pub(crate) const MAX_EMBEDDING_DIMENSION: usize = 4096;

const DISTANCE_METRICS: [&str; 3] = ["cosine", "euclidean", "euclidean_l2"];

/// Face detection, embedding and distance service
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FaceConfig {
    pub base_url: String,
    pub model_name: String,
    pub detector_backend: String,
    pub distance_metric: String,
    /// Embedding length produced by `model_name`
    pub embedding_dimension: usize,
    pub timeout_secs: u64,
}

impl Default for FaceConfig {
    fn default() -> Self {
        Self {
            base_url: String::from(DEFAULT_FACE_BASE_URL),
            model_name: String::from(DEFAULT_FACE_MODEL_NAME),
            detector_backend: String::from(DEFAULT_DETECTOR_BACKEND),
            distance_metric: String::from(DEFAULT_DISTANCE_METRIC),
            embedding_dimension: DEFAULT_EMBEDDING_DIMENSION,
            timeout_secs: DEFAULT_FACE_TIMEOUT_SECS,
        }
    }
}

impl FaceConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        if !is_http_url(&self.base_url) {
            return Err(ConfigError::face(format!(
                "face.base_url must start with http:// or https://, got '{}'",
                self.base_url
            )));
        }

        if self.model_name.trim().is_empty() {
            return Err(ConfigError::face("face.model_name cannot be empty"));
        }

        if self.detector_backend.trim().is_empty() {
            return Err(ConfigError::face("face.detector_backend cannot be empty"));
        }

        if !DISTANCE_METRICS.contains(&self.distance_metric.as_str()) {
            return Err(ConfigError::face(format!(
                "face.distance_metric must be one of {:?}, got '{}'",
                DISTANCE_METRICS, self.distance_metric
            )));
        }

        if !(MIN_EMBEDDING_DIMENSION..=MAX_EMBEDDING_DIMENSION).contains(&self.embedding_dimension)
        {
            return Err(ConfigError::face(format!(
                "face.embedding_dimension must be {}-{}, got {}",
                MIN_EMBEDDING_DIMENSION, MAX_EMBEDDING_DIMENSION, self.embedding_dimension
            )));
        }

        if !(MIN_TIMEOUT_SECS..=MAX_TIMEOUT_SECS).contains(&self.timeout_secs) {
            return Err(ConfigError::face(format!(
                "face.timeout_secs must be {}-{}, got {}",
                MIN_TIMEOUT_SECS, MAX_TIMEOUT_SECS, self.timeout_secs
            )));
        }

        Ok(())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}
