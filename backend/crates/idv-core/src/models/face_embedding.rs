use crate::{CoreError, Result as CoreErrorResult};

use std::panic::Location;

use error_location::ErrorLocation;
use serde::{Deserialize, Serialize};

/// Fixed-length face descriptor produced by the face model.
///
/// Embeddings are only comparable when produced by the same model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FaceEmbedding(Vec<f64>);

impl FaceEmbedding {
    pub fn new(values: Vec<f64>) -> Self {
        Self(values)
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Check the embedding is usable for comparison against `dimension`-long vectors
    #[track_caller]
    pub fn validate(&self, dimension: usize) -> CoreErrorResult<()> {
        let message = if self.0.is_empty() {
            Some("embedding is empty".to_string())
        } else if self.0.iter().any(|v| !v.is_finite()) {
            Some("embedding contains non-finite values".to_string())
        } else if self.0.len() != dimension {
            Some(format!(
                "expected {} values, found {}",
                dimension,
                self.0.len()
            ))
        } else {
            None
        };

        match message {
            Some(message) => Err(CoreError::InvalidEmbedding {
                message,
                location: ErrorLocation::from(Location::caller()),
            }),
            None => Ok(()),
        }
    }

    /// Serialize as a JSON array for storage
    #[track_caller]
    pub fn to_json(&self) -> CoreErrorResult<String> {
        serde_json::to_string(&self.0).map_err(|source| CoreError::Json {
            source,
            location: ErrorLocation::from(Location::caller()),
        })
    }

    #[track_caller]
    pub fn from_json(json: &str) -> CoreErrorResult<Self> {
        serde_json::from_str(json).map_err(|source| CoreError::Json {
            source,
            location: ErrorLocation::from(Location::caller()),
        })
    }
}

impl From<Vec<f64>> for FaceEmbedding {
    fn from(values: Vec<f64>) -> Self {
        Self(values)
    }
}
