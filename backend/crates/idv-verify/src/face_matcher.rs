use crate::liveness_checker::truncate;
use crate::{FaceModel, FaceModelError, FaceReference};

use idv_core::{CoreError, FaceEmbedding};

use std::path::Path;
use std::sync::Arc;

use log::{error, info, warn};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchStatus {
    Verified,
    NotVerified,
    LiveImageUnreadable,
    FaceNotDetected,
    EmbeddingMissing,
    EmbeddingInvalid,
    ComparatorError,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MatchOutcome {
    pub verified: bool,
    pub status: MatchStatus,
    pub message: String,
    /// Absent when no comparison happened
    pub distance: Option<f64>,
    pub threshold: f64,
    pub model: String,
    pub metric: String,
}

/// Compares the live face with the document embedding using the system threshold.
pub struct FaceMatcher {
    face_model: Arc<dyn FaceModel>,
    threshold: f64,
    embedding_dimension: usize,
}

impl FaceMatcher {
    pub fn new(face_model: Arc<dyn FaceModel>, threshold: f64, embedding_dimension: usize) -> Self {
        Self {
            face_model,
            threshold,
            embedding_dimension,
        }
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// `verified` iff distance <= threshold. The comparator's own verdict is ignored.
    pub async fn verify(
        &self,
        live_image: &Path,
        document_embedding: Option<&FaceEmbedding>,
    ) -> MatchOutcome {
        info!("Performing face verification: live image vs ID card");

        let Some(embedding) = document_embedding else {
            return self.failed(
                MatchStatus::EmbeddingMissing,
                "Cannot verify: Missing ID card embedding.",
            );
        };

        if let Err(e) = embedding.validate(self.embedding_dimension) {
            let reason = match e {
                CoreError::InvalidEmbedding { message, .. } => message,
                other => other.to_string(),
            };
            warn!("Document embedding rejected: {reason}");
            return self.failed(
                MatchStatus::EmbeddingInvalid,
                format!("Cannot verify: invalid ID card embedding ({reason})."),
            );
        }

        if let Err(reason) = check_readable(live_image).await {
            warn!("Live image unusable: {reason}");
            return self.failed(
                MatchStatus::LiveImageUnreadable,
                format!("Face Verification FAILED: live image unreadable ({reason})."),
            );
        }

        let comparison = match self
            .face_model
            .verify(live_image, FaceReference::Embedding(embedding), false)
            .await
        {
            Ok(comparison) => comparison,
            Err(FaceModelError::FaceNotDetected { .. }) => {
                return self.failed(
                    MatchStatus::FaceNotDetected,
                    "Face Verification FAILED: Face not detected in live image.",
                );
            }
            Err(FaceModelError::EmbeddingFailed { .. }) => {
                return self.failed(
                    MatchStatus::ComparatorError,
                    "Face Verification FAILED: Could not generate embedding for live face.",
                );
            }
            Err(e) => {
                error!("Face comparator error: {e}");
                return self.failed(
                    MatchStatus::ComparatorError,
                    format!("Face Verification FAILED ({})", truncate(&e.detail(), 100)),
                );
            }
        };

        let distance = comparison.distance;
        let verified = distance <= self.threshold;
        let (status, message) = if verified {
            (MatchStatus::Verified, "Face Verification PASSED.".to_string())
        } else {
            (
                MatchStatus::NotVerified,
                format!(
                    "Face Verification FAILED (Distance: {:.4} > Threshold: {:.4}).",
                    distance, self.threshold
                ),
            )
        };
        info!("Face match outcome: {message}");

        MatchOutcome {
            verified,
            status,
            message,
            distance: Some(distance),
            ..self.base()
        }
    }

    fn base(&self) -> MatchOutcome {
        MatchOutcome {
            verified: false,
            status: MatchStatus::NotVerified,
            message: String::new(),
            distance: None,
            threshold: self.threshold,
            model: self.face_model.model_name().to_string(),
            metric: self.face_model.distance_metric().to_string(),
        }
    }

    fn failed(&self, status: MatchStatus, message: impl Into<String>) -> MatchOutcome {
        MatchOutcome {
            status,
            message: message.into(),
            ..self.base()
        }
    }
}

async fn check_readable(path: &Path) -> Result<(), String> {
    let bytes = tokio::fs::read(path).await.map_err(|e| e.to_string())?;
    tokio::task::spawn_blocking(move || {
        image::load_from_memory(&bytes)
            .map(|_| ())
            .map_err(|e| e.to_string())
    })
    .await
    .map_err(|e| e.to_string())?
}
